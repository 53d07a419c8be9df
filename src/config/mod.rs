#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_DECIMALS: usize = 1;
pub const MAX_DECIMALS: usize = 6;
