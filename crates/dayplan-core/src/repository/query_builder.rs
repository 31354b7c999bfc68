use crate::query::TaskFilter;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

/// Appends `WHERE`/`AND` conjunctions to a statement, one condition at a time.
pub(crate) struct WhereClause {
    started: bool,
}

impl WhereClause {
    pub(crate) fn new() -> Self {
        Self { started: false }
    }

    /// Opens the next condition and returns the builder to push it into.
    pub(crate) fn and<'q, 'a>(
        &mut self,
        qb: &'q mut QueryBuilder<'a, Sqlite>,
    ) -> &'q mut QueryBuilder<'a, Sqlite> {
        qb.push(if self.started { " AND " } else { " WHERE " });
        self.started = true;
        qb
    }
}

/// Utility functions for turning task filters into SQL
pub struct SqlQueryBuilder;

impl SqlQueryBuilder {
    /// Pushes the conditions for `filter`. `today` anchors `overdue_only`.
    pub(crate) fn push_task_filter<'a>(
        filter: &TaskFilter,
        today: NaiveDate,
        clause: &mut WhereClause,
        qb: &mut QueryBuilder<'a, Sqlite>,
    ) {
        if let Some(completed) = filter.completed {
            clause.and(qb).push("completed = ").push_bind(completed);
        }
        if let Some(category_id) = filter.category_id {
            clause.and(qb).push("category_id = ").push_bind(category_id);
        }
        if let Some(schedule_type) = filter.schedule_type {
            clause.and(qb).push("schedule_type = ").push_bind(schedule_type);
        }
        if let Some(habit_type) = filter.habit_type {
            clause.and(qb).push("habit_type = ").push_bind(habit_type);
        }
        if filter.overdue_only {
            Self::push_overdue(today, clause, qb);
        }
    }

    pub(crate) fn push_overdue<'a>(
        today: NaiveDate,
        clause: &mut WhereClause,
        qb: &mut QueryBuilder<'a, Sqlite>,
    ) {
        clause
            .and(qb)
            .push("start_date < ")
            .push_bind(today)
            .push(" AND completed = ")
            .push_bind(false);
    }

    /// `term` anywhere in title, description or notes, ignoring ASCII case.
    /// The term is a literal substring, so `%` and `_` match themselves.
    pub(crate) fn push_search<'a>(
        term: &str,
        clause: &mut WhereClause,
        qb: &mut QueryBuilder<'a, Sqlite>,
    ) {
        let qb = clause.and(qb);
        qb.push("(");
        for (i, column) in ["title", "description", "notes"].iter().enumerate() {
            if i > 0 {
                qb.push(" OR ");
            }
            qb.push(format!("instr(LOWER({}), LOWER(", column));
            qb.push_bind(term.to_string());
            qb.push(")) > 0");
        }
        qb.push(")");
    }

    pub(crate) fn push_pagination<'a>(offset: i64, limit: i64, qb: &mut QueryBuilder<'a, Sqlite>) {
        qb.push(" LIMIT ").push_bind(limit).push(" OFFSET ").push_bind(offset);
    }
}
