//! Configuration file management and resolution.

mod manager;

pub use manager::{
    API_URL_ENV, ApiConfig, ChatConfig, ConfigFile, ConfigManager, ResolveOptions, ResolvedConfig,
    resolve_config, validate_base_url,
};
