pub mod add;
pub mod agenda;
pub mod category;
pub mod complete;
pub mod delete;
pub mod edit;
pub mod list;
pub mod search;
pub mod serve;
pub mod show;

use crate::cli::PageArgs;
use crate::config::Config;
use dayplan_core::query::{Page, Pagination};

pub(crate) fn pagination(args: &PageArgs, config: &Config) -> Pagination {
    Pagination::new(args.offset, args.limit.unwrap_or(config.page_size))
}

/// Footer line for paginated listings, omitted when everything fits on one page.
pub(crate) fn print_page_footer<T>(page: &Page<T>) {
    if page.total_pages > 1 {
        println!(
            "Page {} of {} ({} tasks total)",
            page.page, page.total_pages, page.total
        );
    }
}
