//! Demo resolvers
//!
//! Stand-ins for the dynamic resolvers a real host would register: they read
//! the captured order id and simulate a backend lookup before answering.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use waypost_domain::{
    Breadcrumb, ParamKind, ResolveError, ResolverOutput, RouteChain, RouteResolver, RouteSegment,
};

/// Resolves an order's display title from its path parameter
pub struct OrderTitleResolver;

#[async_trait]
impl RouteResolver<String> for OrderTitleResolver {
    async fn resolve(
        &self,
        segment: &RouteSegment,
        _chain: &RouteChain,
    ) -> waypost_domain::resolve::Result<ResolverOutput<String>> {
        // Simulated backend lookup.
        sleep(Duration::from_millis(30)).await;

        match segment.param("order_id", ParamKind::Path) {
            Some(id) => Ok(ResolverOutput::Value(format!("Order #{id}"))),
            None => Err(ResolveError::resolver("order_id parameter missing")),
        }
    }
}

/// Resolves the crumb for an order detail segment
pub struct OrderCrumbResolver;

#[async_trait]
impl RouteResolver<Vec<Breadcrumb>> for OrderCrumbResolver {
    async fn resolve(
        &self,
        segment: &RouteSegment,
        _chain: &RouteChain,
    ) -> waypost_domain::resolve::Result<ResolverOutput<Vec<Breadcrumb>>> {
        sleep(Duration::from_millis(30)).await;

        match segment.param("order_id", ParamKind::Path) {
            Some(id) => Ok(ResolverOutput::Value(vec![Breadcrumb::new(
                format!("Order #{id}"),
                segment.full_path(),
            )])),
            None => Err(ResolveError::resolver("order_id parameter missing")),
        }
    }
}
