mod client;
mod error;
mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_SESSION};
pub use error::ApiError;
pub use types::{ChatMessage, ChatResponse, LoginData, LoginResponse, RegisterData, Sender};
