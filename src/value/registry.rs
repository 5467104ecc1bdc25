//! Value type registry.

use std::sync::Arc;

use crate::value::builtin::{
    BooleanType, ByteType, DateType, DoubleType, FloatType, IntegerType, LongType, ShortType,
    StringType,
};
use crate::value::ValueType;

/// Ordered collection of value types, looked up by name or alias.
///
/// Registering a type whose name or alias is already taken shadows the
/// earlier entry: lookups scan newest first. Iteration keeps registration
/// order. Extend the registry before sharing it; after that it is read-only.
#[derive(Debug, Clone)]
pub struct ValueTypeRegistry {
    types: Vec<Arc<dyn ValueType>>,
}

impl ValueTypeRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self { types: Vec::new() }
    }

    /// The builtin set: string, int, long, byte, short, float, double,
    /// boolean, date.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(StringType);
        registry.register(IntegerType);
        registry.register(LongType);
        registry.register(ByteType);
        registry.register(ShortType);
        registry.register(FloatType);
        registry.register(DoubleType);
        registry.register(BooleanType);
        registry.register(DateType);
        registry
    }

    /// Register a value type.
    pub fn register<V: ValueType + 'static>(&mut self, value_type: V) {
        self.register_arc(Arc::new(value_type));
    }

    /// Register an already shared value type.
    pub fn register_arc(&mut self, value_type: Arc<dyn ValueType>) {
        let shadowed: Vec<&str> = std::iter::once(value_type.name())
            .chain(value_type.aliases().iter().copied())
            .filter(|name| self.lookup(name).is_some())
            .collect();
        if !shadowed.is_empty() {
            tracing::debug!(
                value_type = value_type.name(),
                shadowed = ?shadowed,
                "Value type registration shadows earlier entries"
            );
        }
        self.types.push(value_type);
    }

    /// Find the most recently registered type answering to `name`.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ValueType>> {
        self.types.iter().rev().find(|t| t.answers_to(name)).cloned()
    }

    /// Registered types in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ValueType>> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for ValueTypeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
