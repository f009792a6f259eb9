use std::cmp::Ordering;

use time::{format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime};
use uuid::Uuid;

use super::{
    dto::{CreateTodoRequest, TodoQuery, TodoSort, UpdateTodoRequest},
    model::{Todo, TodoPriority, TodoStatus},
};
use crate::{
    error::{AppError, AppResult},
    response::Meta,
};

pub const TITLE_MAX: usize = 120;
pub const DESCRIPTION_MAX: usize = 1000;
pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;

/// Validated input for a new todo.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub priority: TodoPriority,
    pub due_date: Option<OffsetDateTime>,
    pub list_id: Option<Uuid>,
}

/// Validated partial update. Outer `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TodoStatus>,
    pub priority: Option<TodoPriority>,
    pub due_date: Option<Option<OffsetDateTime>>,
    pub list_id: Option<Option<Uuid>>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.list_id.is_none()
    }
}

fn clean_title(title: &str) -> AppResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    if title.chars().count() > TITLE_MAX {
        return Err(AppError::validation(format!(
            "Title must be at most {TITLE_MAX} characters"
        )));
    }
    Ok(title.to_string())
}

/// Blank descriptions are stored as absent.
fn clean_description(description: Option<&str>) -> AppResult<Option<String>> {
    let Some(d) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    if d.chars().count() > DESCRIPTION_MAX {
        return Err(AppError::validation(format!(
            "Description must be at most {DESCRIPTION_MAX} characters"
        )));
    }
    Ok(Some(d.to_string()))
}

/// Accepts an RFC 3339 timestamp or a calendar date (taken as midnight UTC).
pub fn parse_due_date(raw: &str) -> AppResult<OffsetDateTime> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(ts);
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map(|d| d.midnight().assume_utc())
        .map_err(|_| AppError::validation("Due date must be YYYY-MM-DD or an RFC 3339 timestamp"))
}

pub fn validate_create(req: CreateTodoRequest) -> AppResult<NewTodo> {
    Ok(NewTodo {
        title: clean_title(&req.title)?,
        description: clean_description(req.description.as_deref())?,
        status: req.status.unwrap_or(TodoStatus::Pending),
        priority: req.priority.unwrap_or(TodoPriority::Medium),
        due_date: req.due_date.as_deref().map(parse_due_date).transpose()?,
        list_id: req.list_id,
    })
}

pub fn validate_update(req: UpdateTodoRequest) -> AppResult<TodoChanges> {
    let changes = TodoChanges {
        title: req.title.as_deref().map(clean_title).transpose()?,
        description: req
            .description
            .map(|d| clean_description(d.as_deref()))
            .transpose()?,
        status: req.status,
        priority: req.priority,
        due_date: req
            .due_date
            .map(|d| d.as_deref().map(parse_due_date).transpose())
            .transpose()?,
        list_id: req.list_id,
    };
    if changes.is_empty() {
        return Err(AppError::validation("No fields to update"));
    }
    Ok(changes)
}

impl TodoQuery {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    /// Trimmed, lower-cased search text, if any.
    pub fn needle(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }

    /// `needle` is the value of [`TodoQuery::needle`], computed once per query.
    pub fn matches(&self, todo: &Todo, needle: Option<&str>) -> bool {
        if self.status.is_some_and(|s| s != todo.status) {
            return false;
        }
        if self.priority.is_some_and(|p| p != todo.priority) {
            return false;
        }
        if self.list_id.is_some() && self.list_id != todo.list_id {
            return false;
        }
        match needle {
            None => true,
            Some(needle) => {
                todo.title.to_lowercase().contains(needle)
                    || todo
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(needle))
            }
        }
    }
}

fn newest_first(a: &Todo, b: &Todo) -> Ordering {
    b.created_at.cmp(&a.created_at)
}

pub fn sort_todos(todos: &mut [Todo], sort: TodoSort) {
    match sort {
        TodoSort::Priority => todos.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| newest_first(a, b))
        }),
        TodoSort::DueDate => todos.sort_by(|a, b| {
            match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(|| newest_first(a, b))
        }),
        TodoSort::CreatedAt => todos.sort_by(newest_first),
    }
}

/// Filters, sorts and pages `todos`. `Meta::total` counts matches before paging.
pub fn apply_query(todos: Vec<Todo>, query: &TodoQuery) -> (Vec<Todo>, Meta) {
    let needle = query.needle();
    let mut matched: Vec<Todo> = todos
        .into_iter()
        .filter(|t| query.matches(t, needle.as_deref()))
        .collect();
    sort_todos(&mut matched, query.sort);

    let meta = Meta {
        total: matched.len(),
        limit: query.limit(),
        offset: query.offset(),
    };
    let page = matched
        .into_iter()
        .skip(meta.offset)
        .take(meta.limit)
        .collect();
    (page, meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn todo(title: &str, priority: TodoPriority, created_at: OffsetDateTime) -> Todo {
        Todo {
            id: Uuid::new_v4(),
            list_id: None,
            title: title.into(),
            description: None,
            status: TodoStatus::Pending,
            priority,
            due_date: None,
            completed_at: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn titles(todos: &[Todo]) -> Vec<&str> {
        todos.iter().map(|t| t.title.as_str()).collect()
    }

    fn sample() -> Vec<Todo> {
        let mut a = todo("write report", TodoPriority::Low, datetime!(2024-01-01 09:00 UTC));
        a.due_date = Some(datetime!(2024-02-10 00:00 UTC));
        let mut b = todo("buy milk", TodoPriority::High, datetime!(2024-01-02 09:00 UTC));
        b.status = TodoStatus::Completed;
        let mut c = todo("call plumber", TodoPriority::Medium, datetime!(2024-01-03 09:00 UTC));
        c.due_date = Some(datetime!(2024-01-20 00:00 UTC));
        c.description = Some("Kitchen sink MILK smell".into());
        let d = todo("plan trip", TodoPriority::High, datetime!(2024-01-04 09:00 UTC));
        vec![a, b, c, d]
    }

    #[test]
    fn default_sort_is_newest_first() {
        let mut todos = sample();
        sort_todos(&mut todos, TodoSort::default());
        assert_eq!(
            titles(&todos),
            ["plan trip", "call plumber", "buy milk", "write report"]
        );
    }

    #[test]
    fn priority_sort_puts_high_first_and_breaks_ties_by_newest() {
        let mut todos = sample();
        sort_todos(&mut todos, TodoSort::Priority);
        assert_eq!(
            titles(&todos),
            ["plan trip", "buy milk", "call plumber", "write report"]
        );
    }

    #[test]
    fn due_date_sort_puts_undated_last() {
        let mut todos = sample();
        sort_todos(&mut todos, TodoSort::DueDate);
        assert_eq!(
            titles(&todos),
            ["call plumber", "write report", "plan trip", "buy milk"]
        );
    }

    #[test]
    fn filters_by_status_and_priority() {
        let query = TodoQuery {
            status: Some(TodoStatus::Pending),
            priority: Some(TodoPriority::High),
            ..Default::default()
        };
        let (page, meta) = apply_query(sample(), &query);
        assert_eq!(titles(&page), ["plan trip"]);
        assert_eq!(meta.total, 1);
    }

    #[test]
    fn search_matches_title_or_description_case_insensitively() {
        let query = TodoQuery {
            q: Some("  Milk ".into()),
            ..Default::default()
        };
        let (page, _) = apply_query(sample(), &query);
        assert_eq!(titles(&page), ["call plumber", "buy milk"]);
    }

    #[test]
    fn blank_search_matches_everything() {
        let query = TodoQuery {
            q: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(query.needle(), None);
        let (page, meta) = apply_query(sample(), &query);
        assert_eq!(page.len(), 4);
        assert_eq!(meta.total, 4);
    }

    #[test]
    fn filters_by_list() {
        let list = Uuid::new_v4();
        let mut todos = sample();
        todos[0].list_id = Some(list);
        let query = TodoQuery {
            list_id: Some(list),
            ..Default::default()
        };
        let (page, _) = apply_query(todos, &query);
        assert_eq!(titles(&page), ["write report"]);
    }

    #[test]
    fn pages_after_filtering() {
        let query = TodoQuery {
            limit: Some(2),
            offset: Some(1),
            ..Default::default()
        };
        let (page, meta) = apply_query(sample(), &query);
        assert_eq!(titles(&page), ["call plumber", "buy milk"]);
        assert_eq!(meta, Meta { total: 4, limit: 2, offset: 1 });
    }

    #[test]
    fn limit_is_clamped() {
        let zero = TodoQuery { limit: Some(0), ..Default::default() };
        let huge = TodoQuery { limit: Some(10_000), ..Default::default() };
        assert_eq!(zero.limit(), 1);
        assert_eq!(huge.limit(), MAX_LIMIT);
        assert_eq!(TodoQuery::default().limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn query_string_shape() {
        let query: TodoQuery =
            serde_json::from_str(r#"{"status":"in_progress","sort":"due_date"}"#).unwrap();
        assert_eq!(query.status, Some(TodoStatus::InProgress));
        assert_eq!(query.sort, TodoSort::DueDate);
    }

    #[test]
    fn create_applies_defaults_and_trims() {
        let req = CreateTodoRequest {
            title: "  Water plants ".into(),
            description: Some("   ".into()),
            status: None,
            priority: None,
            due_date: Some("2024-05-01".into()),
            list_id: None,
        };
        let new = validate_create(req).unwrap();
        assert_eq!(new.title, "Water plants");
        assert_eq!(new.description, None);
        assert_eq!(new.status, TodoStatus::Pending);
        assert_eq!(new.priority, TodoPriority::Medium);
        assert_eq!(new.due_date, Some(datetime!(2024-05-01 00:00 UTC)));
    }

    #[test]
    fn create_rejects_bad_title_and_description() {
        let base = || CreateTodoRequest {
            title: "ok".into(),
            description: None,
            status: None,
            priority: None,
            due_date: None,
            list_id: None,
        };
        let mut blank = base();
        blank.title = "   ".into();
        let mut long_title = base();
        long_title.title = "t".repeat(TITLE_MAX + 1);
        let mut long_desc = base();
        long_desc.description = Some("d".repeat(DESCRIPTION_MAX + 1));
        let mut bad_date = base();
        bad_date.due_date = Some("next tuesday".into());

        for req in [blank, long_title, long_desc, bad_date] {
            assert!(matches!(validate_create(req), Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn due_date_accepts_rfc3339() {
        let ts = parse_due_date("2024-03-04T10:30:00+02:00").unwrap();
        assert_eq!(ts, datetime!(2024-03-04 08:30 UTC));
    }

    #[test]
    fn update_distinguishes_clearing_from_keeping() {
        let req: UpdateTodoRequest =
            serde_json::from_str(r#"{"due_date":null,"list_id":null}"#).unwrap();
        let changes = validate_update(req).unwrap();
        assert_eq!(changes.due_date, Some(None));
        assert_eq!(changes.list_id, Some(None));
        assert_eq!(changes.description, None);
        assert_eq!(changes.title, None);
    }

    #[test]
    fn empty_update_is_rejected() {
        let err = validate_update(UpdateTodoRequest::default()).unwrap_err();
        assert_eq!(err.to_string(), "No fields to update");
    }
}
