//! Configuration for doubles and verification output.
//!
//! Settings come from `.understudy.toml`, found by walking up from the
//! current directory. Builders snapshot the process-wide active config when
//! they are created; `with_config` overrides it per builder.

// Core configuration types
mod core;
mod loader;

pub use self::core::{DoublesConfig, NativeMembersConfig, VerificationConfig, DEFAULT_SENTINEL};
pub use self::loader::{
    active_config, directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_config, set_active_config, CONFIG_FILE_NAME,
};
