use crate::error::AppError;
use crate::model::Todo;
use crate::storage;
use crate::storage::kv_store::KeyValueStore;
use crate::todo_api::{self, Filter, TodoStats};

/// A user gesture translated into a state-transition command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add {
        title: String,
        description: String,
        due_date: String,
    },
    Delete {
        id: String,
    },
    Toggle {
        id: String,
    },
    Update {
        id: String,
        title: String,
        description: String,
        due_date: String,
    },
    Reorder {
        from: usize,
        to: usize,
    },
    SetFilter(Filter),
    ToggleDarkMode,
}

/// Owns the in-memory state and the injected store. Every mutation runs the
/// pure transition and then rewrites the changed key; a failed write leaves
/// the in-memory state authoritative for the rest of the session.
pub struct Session {
    store: Box<dyn KeyValueStore>,
    todos: Vec<Todo>,
    dark_mode: bool,
    filter: Filter,
}

impl Session {
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let todos = storage::load_todos(store.as_ref());
        let dark_mode = storage::load_dark_mode(store.as_ref());
        Self {
            store,
            todos,
            dark_mode,
            filter: Filter::All,
        }
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn find(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// The filtered view, recomputed on every call.
    pub fn visible(&self) -> Vec<Todo> {
        todo_api::filter_todos(&self.todos, self.filter)
    }

    pub fn stats(&self) -> TodoStats {
        todo_api::todo_stats(&self.todos)
    }

    pub fn apply(&mut self, action: Action) -> Result<(), AppError> {
        match action {
            Action::Add {
                title,
                description,
                due_date,
            } => {
                let trimmed = title.trim();
                if trimmed.is_empty() {
                    return Err(AppError::invalid_input("title is required"));
                }
                self.todos = todo_api::add_todo(&self.todos, trimmed, &description, &due_date);
                storage::save_todos(self.store.as_ref(), &self.todos);
            }
            Action::Delete { id } => {
                self.todos = todo_api::delete_todo(&self.todos, &id);
                storage::save_todos(self.store.as_ref(), &self.todos);
            }
            Action::Toggle { id } => {
                self.todos = todo_api::toggle_todo(&self.todos, &id);
                storage::save_todos(self.store.as_ref(), &self.todos);
            }
            Action::Update {
                id,
                title,
                description,
                due_date,
            } => {
                let trimmed = title.trim();
                if trimmed.is_empty() {
                    return Err(AppError::invalid_input("title is required"));
                }
                self.todos =
                    todo_api::update_todo(&self.todos, &id, trimmed, &description, &due_date);
                storage::save_todos(self.store.as_ref(), &self.todos);
            }
            Action::Reorder { from, to } => {
                if from >= self.todos.len() || to >= self.todos.len() {
                    return Err(AppError::invalid_input("index out of range"));
                }
                self.todos = todo_api::reorder_todos(&self.todos, from, to);
                storage::save_todos(self.store.as_ref(), &self.todos);
            }
            Action::SetFilter(filter) => {
                self.filter = filter;
            }
            Action::ToggleDarkMode => {
                self.dark_mode = !self.dark_mode;
                storage::save_dark_mode(self.store.as_ref(), self.dark_mode);
            }
        }

        Ok(())
    }
}
