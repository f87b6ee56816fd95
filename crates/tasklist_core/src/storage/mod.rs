pub mod kv_store;

use crate::error::AppError;
use crate::model::Todo;
use kv_store::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

pub const TODOS_KEY: &str = "todos";
pub const DARK_MODE_KEY: &str = "darkMode";

/// Loads the full todo sequence. Absent, unreadable, or malformed content
/// falls back to an empty sequence; the failure is logged, never raised.
pub fn load_todos(store: &dyn KeyValueStore) -> Vec<Todo> {
    load_or_default(store, TODOS_KEY, Vec::new)
}

/// Writes the full sequence. Failures are logged and swallowed; the
/// in-memory collection stays the source of truth for the session.
pub fn save_todos(store: &dyn KeyValueStore, todos: &[Todo]) {
    write_json(store, TODOS_KEY, &todos);
}

pub fn load_dark_mode(store: &dyn KeyValueStore) -> bool {
    load_or_default(store, DARK_MODE_KEY, || false)
}

pub fn save_dark_mode(store: &dyn KeyValueStore, dark_mode: bool) {
    write_json(store, DARK_MODE_KEY, &dark_mode);
}

fn load_or_default<T, F>(store: &dyn KeyValueStore, key: &str, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match read_json(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => default(),
        Err(err) => {
            warn!(key, %err, "failed to load from storage, using default");
            default()
        }
    }
}

fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, AppError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(AppError::from)
        .and_then(|raw| store.set(key, &raw));

    if let Err(err) = result {
        warn!(key, %err, "failed to write to storage");
    }
}
