//! Per-segment resolver dispatch
//!
//! Given a segment and a binding, dispatch determines the correct resolver
//! (declared static value, declared dynamic resolver, or the binding
//! default), invokes it with the segment and a snapshot of the full chain,
//! and normalizes whatever comes back into one `ValueStream`.
//!
//! Failure handling is local and total: configuration errors, unknown
//! resolver ids and resolver invocation failures are logged and substituted
//! with the binding's empty value. One segment's failure never propagates to
//! or cancels a sibling's resolution in the same pass.

use std::sync::Arc;

use futures::future;
use futures::stream::{self, StreamExt};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::navigation::{RouteChain, RouteSegment};

use super::binding::ResolutionBinding;
use super::data::RouteData;
use super::ports::{ResolverOutput, RouteResolver};
use super::stream::ValueStream;

/// Resolve one segment under the given binding
///
/// Always returns a sequence; never fails outward. The sequence ends as soon
/// as `cancel` fires, abandoning any pending or live resolver work.
pub fn resolve_segment<T>(
    segment: Arc<RouteSegment>,
    chain: RouteChain,
    binding: &ResolutionBinding<T>,
    cancel: &CancellationToken,
) -> ValueStream<T>
where
    T: Clone + DeserializeOwned + Send + 'static,
{
    let empty = binding.empty_value().clone();

    let resolver: Arc<dyn RouteResolver<T>> = match segment.data(binding.field_name()) {
        // Declares nothing: the binding default takes over.
        None => Arc::clone(binding.default_resolver()),

        // Declared static value: wrapped directly as the sole result.
        Some(RouteData::Static(value)) => {
            return match serde_json::from_value::<T>(value.clone()) {
                Ok(decoded) => ValueStream::cancellable(
                    stream::once(future::ready(decoded)),
                    cancel,
                ),
                Err(err) => {
                    warn!(
                        field = binding.field_name(),
                        path = %segment.full_path(),
                        error = %err,
                        "Declared static route data failed to decode, substituting empty value"
                    );
                    ValueStream::once(empty)
                }
            };
        }

        // Declared dynamic resolver: obtained from the registry.
        Some(RouteData::Resolver(id)) => match binding.registry().get(id) {
            Some(resolver) => resolver,
            None => {
                warn!(
                    field = binding.field_name(),
                    resolver_id = %id,
                    path = %segment.full_path(),
                    "No resolver registered for declared id, substituting empty value"
                );
                return ValueStream::once(empty);
            }
        },
    };

    let field_name = binding.field_name().to_string();
    let invocation = async move {
        match resolver.resolve(&segment, &chain).await {
            Ok(ResolverOutput::Value(value)) => stream::once(future::ready(value)).boxed(),
            Ok(ResolverOutput::Stream(values)) => values,
            Err(err) => {
                warn!(
                    field = %field_name,
                    path = %segment.full_path(),
                    error = %err,
                    "Route resolver failed, substituting empty value"
                );
                stream::once(future::ready(empty)).boxed()
            }
        }
    };

    ValueStream::cancellable(stream::once(invocation).flatten(), cancel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::data::ResolverId;
    use crate::resolve::error::ResolveError;
    use crate::resolve::ports::{NullResolver, ResolverRegistry};
    use async_trait::async_trait;
    use futures::StreamExt;

    struct FixedResolver(String);

    #[async_trait]
    impl RouteResolver<String> for FixedResolver {
        async fn resolve(
            &self,
            _segment: &RouteSegment,
            _chain: &RouteChain,
        ) -> crate::resolve::error::Result<ResolverOutput<String>> {
            Ok(ResolverOutput::Value(self.0.clone()))
        }
    }

    struct FailingResolver;

    #[async_trait]
    impl RouteResolver<String> for FailingResolver {
        async fn resolve(
            &self,
            _segment: &RouteSegment,
            _chain: &RouteChain,
        ) -> crate::resolve::error::Result<ResolverOutput<String>> {
            Err(ResolveError::resolver("backend unreachable"))
        }
    }

    struct LiveResolver;

    #[async_trait]
    impl RouteResolver<String> for LiveResolver {
        async fn resolve(
            &self,
            _segment: &RouteSegment,
            _chain: &RouteChain,
        ) -> crate::resolve::error::Result<ResolverOutput<String>> {
            Ok(ResolverOutput::stream(stream::iter(vec![
                "first".to_string(),
                "second".to_string(),
            ])))
        }
    }

    fn title_binding() -> ResolutionBinding<String> {
        ResolutionBinding::new("title", Arc::new(NullResolver), String::new()).with_registry(
            ResolverRegistry::new()
                .register("fixed", Arc::new(FixedResolver("Orders".to_string())))
                .register("failing", Arc::new(FailingResolver))
                .register("live", Arc::new(LiveResolver)),
        )
    }

    fn chain_with_data(data: Option<RouteData>) -> RouteChain {
        let mut segment = RouteSegment::new(vec!["orders".to_string()]);
        if let Some(data) = data {
            segment = segment.with_data("title", data);
        }
        RouteChain::from_segments(vec![segment]).unwrap()
    }

    async fn resolve_all(chain: RouteChain, binding: &ResolutionBinding<String>) -> Vec<String> {
        let cancel = CancellationToken::new();
        resolve_segment(Arc::clone(chain.root()), chain.clone(), binding, &cancel)
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_declares_nothing_uses_default_resolver() {
        let values = resolve_all(chain_with_data(None), &title_binding()).await;

        assert_eq!(values, vec![String::new()]);
    }

    #[tokio::test]
    async fn test_static_value_wrapped_directly() {
        let chain = chain_with_data(Some(RouteData::value("Dashboard")));

        let values = resolve_all(chain, &title_binding()).await;

        assert_eq!(values, vec!["Dashboard".to_string()]);
    }

    #[tokio::test]
    async fn test_malformed_static_value_yields_empty() {
        let chain = chain_with_data(Some(RouteData::Static(serde_json::json!({
            "not": "a string"
        }))));

        let values = resolve_all(chain, &title_binding()).await;

        assert_eq!(values, vec![String::new()]);
    }

    #[tokio::test]
    async fn test_dynamic_resolver_invoked() {
        let chain = chain_with_data(Some(RouteData::resolver("fixed")));

        let values = resolve_all(chain, &title_binding()).await;

        assert_eq!(values, vec!["Orders".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_resolver_id_yields_empty() {
        let chain = chain_with_data(Some(RouteData::Resolver(ResolverId::new("nope"))));

        let values = resolve_all(chain, &title_binding()).await;

        assert_eq!(values, vec![String::new()]);
    }

    #[tokio::test]
    async fn test_resolver_failure_yields_empty() {
        let chain = chain_with_data(Some(RouteData::resolver("failing")));

        let values = resolve_all(chain, &title_binding()).await;

        assert_eq!(values, vec![String::new()]);
    }

    #[tokio::test]
    async fn test_live_resolver_streams_all_values() {
        let chain = chain_with_data(Some(RouteData::resolver("live")));

        let values = resolve_all(chain, &title_binding()).await;

        assert_eq!(values, vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn test_cancelled_dispatch_emits_nothing() {
        let chain = chain_with_data(Some(RouteData::resolver("fixed")));
        let binding = title_binding();

        let cancel = CancellationToken::new();
        cancel.cancel();

        let values: Vec<String> =
            resolve_segment(Arc::clone(chain.root()), chain.clone(), &binding, &cancel)
                .collect()
                .await;

        assert!(values.is_empty());
    }
}
