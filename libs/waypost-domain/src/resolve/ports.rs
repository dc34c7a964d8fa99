//! Resolver capabilities and the resolver registry
//!
//! These traits are the contracts collaborators implement to plug metadata
//! production into the pipeline. They are object-safe (stored as trait
//! objects in the registry and in bindings), so they use `async_trait`
//! rather than the `impl Future` form used for statically dispatched ports.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{BoxStream, Stream, StreamExt};

use crate::navigation::{RouteChain, RouteSegment};

use super::data::ResolverId;
use super::error::Result;

/// What a resolver invocation produced
///
/// A resolver may answer with a single value (computed synchronously or
/// awaited) or with a live-updating sequence that keeps emitting until the
/// resolution pass is superseded.
pub enum ResolverOutput<T> {
    /// Exactly one value
    Value(T),
    /// A live sequence of values over time
    Stream(BoxStream<'static, T>),
}

impl<T> ResolverOutput<T> {
    /// Wrap a live-updating sequence
    pub fn stream(stream: impl Stream<Item = T> + Send + 'static) -> Self {
        Self::Stream(stream.boxed())
    }
}

/// A unit of logic producing one piece of metadata for one segment
///
/// Implementations receive the segment being resolved together with a
/// snapshot of the full active chain, and must not assume they are ever
/// polled to completion: a superseded pass abandons pending resolutions.
///
/// # Errors
///
/// Any error returned here is caught at the dispatch boundary, logged, and
/// replaced with the binding's empty value. It never aborts sibling segments.
#[async_trait]
pub trait RouteResolver<T>: Send + Sync {
    async fn resolve(&self, segment: &RouteSegment, chain: &RouteChain) -> Result<ResolverOutput<T>>;
}

/// The title formatting step
///
/// Invoked with the raw aggregated title and the initial title captured at
/// pipeline construction, producing the final published string.
#[async_trait]
pub trait TitleFormatter: Send + Sync {
    async fn format(&self, raw_title: &str, initial_title: &str) -> Result<String>;
}

/// Stock resolver producing the value type's default
///
/// Used as the binding default when a pipeline has no better fallback:
/// an empty title, no breadcrumbs.
pub struct NullResolver;

#[async_trait]
impl<T> RouteResolver<T> for NullResolver
where
    T: Default + Send + 'static,
{
    async fn resolve(
        &self,
        _segment: &RouteSegment,
        _chain: &RouteChain,
    ) -> Result<ResolverOutput<T>> {
        Ok(ResolverOutput::Value(T::default()))
    }
}

/// Constructor-time mapping from resolver ids to ready-to-use instances
///
/// The registry replaces an enclosing-scope injector: the pipeline's caller
/// owns resolver construction and hands the finished instances over once.
/// Immutable after construction.
pub struct ResolverRegistry<T> {
    resolvers: HashMap<ResolverId, Arc<dyn RouteResolver<T>>>,
}

impl<T> ResolverRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            resolvers: HashMap::new(),
        }
    }

    /// Register a resolver under the given id
    pub fn register(
        mut self,
        id: impl Into<ResolverId>,
        resolver: Arc<dyn RouteResolver<T>>,
    ) -> Self {
        self.resolvers.insert(id.into(), resolver);
        self
    }

    /// Look up a registered resolver
    pub fn get(&self, id: &ResolverId) -> Option<Arc<dyn RouteResolver<T>>> {
        self.resolvers.get(id).map(Arc::clone)
    }

    /// Number of registered resolvers
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl<T> Default for ResolverRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
