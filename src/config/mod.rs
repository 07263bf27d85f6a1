mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_PROVIDER, Defaults, ResolveOptions, ResolvedConfig,
    resolve_config,
};
