//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (compile every route, collect all problems)
//!     → RouteTableConfig (validated)
//!     → RouteTable::from_config (file order = priority)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal files
//! - Validation separates syntactic (serde) from semantic checks
//! - Validation builds routes the same way the table does, so a file that
//!   validates also loads

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with, ConfigError};
pub use schema::{EngineConfig, ObservabilityConfig, ParamConfig, RouteConfig, RouteTableConfig};
pub use validation::{validate_config, ValidationError};
