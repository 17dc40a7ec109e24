pub mod app_config;
pub mod selector_config;

pub use app_config::*;
pub use selector_config::{CompiledSelectors, SelectorConfig};
