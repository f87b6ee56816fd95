pub mod error;
pub mod model;
pub mod session;
pub mod storage;
pub mod todo_api;

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::model::Todo;

    #[test]
    fn todo_has_required_fields() {
        let todo = Todo {
            id: "todo-1".to_string(),
            title: "demo".to_string(),
            description: None,
            due_date: None,
            completed: false,
            created_at: 1_700_000_000_000,
        };

        assert_eq!(todo.id, "todo-1");
        assert_eq!(todo.title, "demo");
        assert_eq!(todo.description, None);
        assert_eq!(todo.due_date, None);
        assert!(!todo.completed);
        assert_eq!(todo.created_at, 1_700_000_000_000);
    }

    #[test]
    fn app_error_exposes_code() {
        let err = AppError::invalid_input("missing title");
        assert_eq!(err.code(), "invalid_input");
        assert_eq!(err.to_string(), "invalid_input - missing title");
    }
}
