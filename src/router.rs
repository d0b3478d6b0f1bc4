use axum::Router;
use axum::extract::FromRef;
use axum::routing::{delete, get, post, put};
use axum_extra::extract::cookie::Key;

use crate::config::Config;
use crate::db::sqlite::TodoStorage;
use crate::handlers;

/// Shared state handed to every handler: the storage handle, the key
/// protecting session cookies, and the configured bcrypt cost. Constructed
/// once at startup and injected; nothing here is ambient.
#[derive(Clone)]
pub struct TasklistState {
    storage: TodoStorage,
    key: Key,
    bcrypt_cost: u32,
}

impl TasklistState {
    pub fn new(storage: TodoStorage, cfg: &Config) -> Self {
        Self {
            storage,
            key: Key::derive_from(cfg.secret_key.as_bytes()),
            bcrypt_cost: cfg.bcrypt_cost,
        }
    }

    pub fn storage(&self) -> &TodoStorage {
        &self.storage
    }

    pub fn cookie_key(&self) -> Key {
        self.key.clone()
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }
}

/// The private cookie jar takes its key from the router state.
impl FromRef<TasklistState> for Key {
    fn from_ref(state: &TasklistState) -> Key {
        state.key.clone()
    }
}

/// Build the service router: two public auth routes, four session-protected
/// todo routes.
pub fn tasklist_router(state: TasklistState) -> Router {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/get_todo", get(handlers::todos::list_todos))
        .route("/create_todo", post(handlers::todos::create_todo))
        .route("/update_todos/{id}", put(handlers::todos::update_todo))
        .route("/del_todos/{id}", delete(handlers::todos::delete_todo))
        .with_state(state)
}
