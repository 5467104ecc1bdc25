//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from route files.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::engine::native::DEFAULT_SIZE_LIMIT;
use crate::routing::RouteBuilder;

/// Root configuration for a route table.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouteTableConfig {
    /// Regex engine limits.
    pub engine: EngineConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Routes in priority order.
    pub routes: Vec<RouteConfig>,
}

/// Regex engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on a compiled program's size, in bytes.
    pub size_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or `EnvFilter` directive (e.g. "info", "route_template=debug").
    pub log_level: String,

    /// Emit JSON log lines instead of plain text.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

/// A single route definition.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouteConfig {
    /// Route template, e.g. "/item/{id: [0-9]+}".
    pub template: String,

    /// Opaque target handed back on resolution.
    pub target: String,

    /// Per-placeholder conversion and constraints.
    pub params: IndexMap<String, ParamConfig>,
}

impl RouteConfig {
    /// A builder carrying every declared parameter setting.
    pub fn builder(&self) -> RouteBuilder<String> {
        let mut builder = RouteBuilder::new(&self.template, self.target.clone());
        for (name, param) in &self.params {
            builder = builder.param_type(name, &param.value_type);
            if let Some(format) = &param.format {
                builder = builder.param_format(name, format);
            }
            if let Some(pattern) = &param.pattern {
                builder = builder.param_pattern(name, pattern);
            }
        }
        builder
    }
}

/// Parameter settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ParamConfig {
    /// Value type name or alias.
    #[serde(rename = "type")]
    pub value_type: String,

    /// Conversion format (dates).
    pub format: Option<String>,

    /// Constraint, for placeholders without an inline one.
    pub pattern: Option<String>,
}

impl Default for ParamConfig {
    fn default() -> Self {
        Self {
            value_type: "string".to_string(),
            format: None,
            pattern: None,
        }
    }
}
