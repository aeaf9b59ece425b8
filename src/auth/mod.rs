//! Authentication session lifecycle.
//!
//! [`AuthStore`] owns the session (token + username) and persists it through
//! an injected [`Storage`].

mod storage;
mod store;

pub use storage::{
    FileStorage, LANGUAGE_KEY, MemoryStorage, Storage, TOKEN_KEY, USERNAME_KEY, load_language,
    save_language,
};
pub use store::{AuthStore, Session};
