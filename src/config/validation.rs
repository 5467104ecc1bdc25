//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every template and bind every declared type
//! - Detect structurally duplicate routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function:
//!   (RouteTableConfig, registry) → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::config::schema::RouteTableConfig;
use crate::engine::native::DEFAULT_SIZE_LIMIT;
use crate::engine::NativeEngine;
use crate::pattern::PatternCompiler;
use crate::routing::RouteError;
use crate::value::ValueTypeRegistry;

/// A single semantic problem, located by route index.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("engine.size_limit must be greater than zero")]
    ZeroSizeLimit,

    #[error("routes[{index}]: template is empty")]
    EmptyTemplate { index: usize },

    #[error("routes[{index}]: target is empty")]
    EmptyTarget { index: usize },

    #[error("routes[{index}]: {source}")]
    Route {
        index: usize,
        #[source]
        source: RouteError,
    },

    #[error("routes[{index}] `{template}` duplicates routes[{existing}]")]
    DuplicateRoute {
        index: usize,
        template: String,
        existing: usize,
    },
}

/// Validate a configuration, collecting every error.
pub fn validate_config(
    config: &RouteTableConfig,
    registry: &ValueTypeRegistry,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.engine.size_limit == 0 {
        errors.push(ValidationError::ZeroSizeLimit);
    }

    // Keep checking routes against a usable engine after a zero limit.
    let size_limit = match config.engine.size_limit {
        0 => DEFAULT_SIZE_LIMIT,
        limit => limit,
    };
    let engine = NativeEngine::with_size_limit(size_limit);
    let compiler = PatternCompiler::new(Arc::new(engine));
    let mut skeletons: HashMap<String, usize> = HashMap::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.template.is_empty() {
            errors.push(ValidationError::EmptyTemplate { index });
            continue;
        }
        if route.target.trim().is_empty() {
            errors.push(ValidationError::EmptyTarget { index });
        }

        let built = match route.builder().build(&compiler, registry) {
            Ok(built) => built,
            Err(source) => {
                errors.push(ValidationError::Route { index, source });
                continue;
            }
        };

        let skeleton = built.pattern().skeleton();
        if let Some(&existing) = skeletons.get(&skeleton) {
            errors.push(ValidationError::DuplicateRoute {
                index,
                template: route.template.clone(),
                existing,
            });
        } else {
            skeletons.insert(skeleton, index);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::warn!(errors = errors.len(), "Configuration rejected");
        Err(errors)
    }
}
