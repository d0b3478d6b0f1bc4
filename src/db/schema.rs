//! SQL DDL for initializing the task store.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `users`: `id` INTEGER PRIMARY KEY AUTOINCREMENT, `username` UNIQUE
///   (creates an index implicitly), bcrypt `password_hash`
/// - `todos`: `id` INTEGER PRIMARY KEY AUTOINCREMENT, `task` text, `status`
///   BOOLEAN (stored as INTEGER 0/1), owning `user_id` referencing `users`
/// - Index on `todos.user_id` since every todo query is ownership-scoped
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task TEXT NOT NULL,
    status INTEGER NOT NULL DEFAULT 0,
    user_id INTEGER NOT NULL REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_todos_user_id ON todos(user_id);
"#;
