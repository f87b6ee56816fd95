use crate::model::Todo;
use std::sync::atomic::{AtomicU64, Ordering};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

pub const DUE_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Completed,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

static ID_SEQUENCE: AtomicU64 = AtomicU64::new(0);

fn next_todo_id(now: OffsetDateTime) -> String {
    // Nanosecond timestamp alone can collide on rapid successive adds; the
    // process-wide sequence number keeps every id unique.
    let sequence = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("todo-{}-{}", now.unix_timestamp_nanos(), sequence)
}

fn normalize(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Prepends a fresh record. Blank titles must be rejected by the caller
/// before this is invoked.
pub fn add_todo(todos: &[Todo], title: &str, description: &str, due_date: &str) -> Vec<Todo> {
    let now = OffsetDateTime::now_utc();
    let todo = Todo {
        id: next_todo_id(now),
        title: title.to_string(),
        description: normalize(description),
        due_date: normalize(due_date),
        completed: false,
        created_at: (now.unix_timestamp_nanos() / 1_000_000) as i64,
    };

    let mut next = Vec::with_capacity(todos.len() + 1);
    next.push(todo);
    next.extend_from_slice(todos);
    next
}

pub fn delete_todo(todos: &[Todo], id: &str) -> Vec<Todo> {
    todos
        .iter()
        .filter(|todo| todo.id != id)
        .cloned()
        .collect()
}

pub fn toggle_todo(todos: &[Todo], id: &str) -> Vec<Todo> {
    todos
        .iter()
        .map(|todo| {
            if todo.id == id {
                let mut toggled = todo.clone();
                toggled.completed = !todo.completed;
                toggled
            } else {
                todo.clone()
            }
        })
        .collect()
}

pub fn update_todo(
    todos: &[Todo],
    id: &str,
    title: &str,
    description: &str,
    due_date: &str,
) -> Vec<Todo> {
    todos
        .iter()
        .map(|todo| {
            if todo.id == id {
                let mut updated = todo.clone();
                updated.title = title.to_string();
                updated.description = normalize(description);
                updated.due_date = normalize(due_date);
                updated
            } else {
                todo.clone()
            }
        })
        .collect()
}

/// Removes the record at `from` and reinserts it at `to`, where `to`
/// addresses the sequence after removal (splice semantics: `to` equal to the
/// shortened length appends). Both indices must be within the original
/// bounds; the caller guards that.
pub fn reorder_todos(todos: &[Todo], from: usize, to: usize) -> Vec<Todo> {
    let mut next = todos.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    next
}

pub fn filter_todos(todos: &[Todo], filter: Filter) -> Vec<Todo> {
    match filter {
        Filter::All => todos.to_vec(),
        Filter::Completed => todos.iter().filter(|todo| todo.completed).cloned().collect(),
        Filter::Pending => todos
            .iter()
            .filter(|todo| !todo.completed)
            .cloned()
            .collect(),
    }
}

pub fn todo_stats(todos: &[Todo]) -> TodoStats {
    let completed = todos.iter().filter(|todo| todo.completed).count();
    TodoStats {
        total: todos.len(),
        completed,
        pending: todos.len() - completed,
    }
}

pub fn todo_overdue(todo: &Todo) -> bool {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let today = OffsetDateTime::now_utc().to_offset(offset).date();
    overdue_on(todo, today)
}

fn overdue_on(todo: &Todo, today: Date) -> bool {
    if todo.completed {
        return false;
    }
    let Some(due) = todo.due_date.as_deref() else {
        return false;
    };
    // Stored data is never validated, so an unparsable due date simply
    // counts as not overdue.
    match Date::parse(due, DUE_DATE_FORMAT) {
        Ok(due_date) => due_date < today,
        Err(_) => false,
    }
}
