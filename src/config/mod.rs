//! Configuration management module

pub mod env;
pub mod parser;
pub mod validation;

pub use env::EnvManager;
pub use parser::{display_config_summary, load_config, ConfigParser};
pub use validation::{validate_config, ConfigValidator, ValidationLevel, ValidationWarning};

pub use crate::models::RunConfiguration;
