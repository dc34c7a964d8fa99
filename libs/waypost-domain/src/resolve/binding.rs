//! Resolution bindings
//!
//! A binding is the static configuration of one metadata kind: where segments
//! declare their configuration, what resolves a segment that declares
//! nothing, what value stands for "nothing resolved", and which dynamic
//! resolvers are available. Exactly one binding exists per pipeline, created
//! at construction time and immutable afterwards.

use std::sync::Arc;

use super::ports::{ResolverRegistry, RouteResolver};

/// Static per-pipeline resolution configuration
pub struct ResolutionBinding<T> {
    /// Field name segments declare their configuration under
    field_name: String,

    /// Resolver used when a segment declares nothing
    default_resolver: Arc<dyn RouteResolver<T>>,

    /// Value substituted when resolution yields nothing or fails
    empty_value: T,

    /// Dynamic resolvers available to segments of this pipeline
    registry: ResolverRegistry<T>,
}

impl<T> ResolutionBinding<T> {
    /// Create a binding with an empty registry
    pub fn new(
        field_name: impl Into<String>,
        default_resolver: Arc<dyn RouteResolver<T>>,
        empty_value: T,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            default_resolver,
            empty_value,
            registry: ResolverRegistry::new(),
        }
    }

    /// Attach the registry of dynamic resolvers
    pub fn with_registry(mut self, registry: ResolverRegistry<T>) -> Self {
        self.registry = registry;
        self
    }

    /// Field name segments declare their configuration under
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Resolver used when a segment declares nothing
    pub fn default_resolver(&self) -> &Arc<dyn RouteResolver<T>> {
        &self.default_resolver
    }

    /// Value substituted when resolution yields nothing or fails
    pub fn empty_value(&self) -> &T {
        &self.empty_value
    }

    /// Dynamic resolvers available to this pipeline
    pub fn registry(&self) -> &ResolverRegistry<T> {
        &self.registry
    }
}
