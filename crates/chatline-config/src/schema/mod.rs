//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod api;
mod defaults;
mod system;

pub use api::*;
pub use defaults::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Root configuration for chatline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatlineConfig {
    pub api: ApiConfig,
    pub defaults: DefaultsConfig,
    pub prompts: PromptsConfig,
    pub logging: LoggingConfig,
}
