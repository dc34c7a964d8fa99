//! WayDeck - Metadata Pipeline Demo
//!
//! Drives the Waypost pipelines over the in-memory router: builds a route
//! table with static and dynamic declarations, performs a scripted tour of
//! navigations plus a manual refresh, and logs every published aggregate.

mod resolvers;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::info;

use waypost_domain::{
    BreadcrumbsPipeline, DefaultTitleFormatter, NullResolver, ParamKind, ParamWatcher,
    PathBreadcrumbResolver, ResolutionBinding, ResolverRegistry, RouteData, TitlePipeline,
};
use waypost_memroute::{MemRouter, RouteDef};

use crate::resolvers::{OrderCrumbResolver, OrderTitleResolver};

/// The demo's route table: a dashboard, an order list and an order detail
/// page resolved dynamically from its path parameter
fn route_table() -> RouteDef {
    RouteDef::root()
        .with_child(RouteDef::new("dashboard").with_data("title", RouteData::value("Dashboard")))
        .with_child(
            RouteDef::new("orders")
                .with_data("title", RouteData::value("Orders"))
                .with_child(
                    RouteDef::new(":order_id")
                        .with_data("title", RouteData::resolver("order-title"))
                        .with_data("breadcrumbs", RouteData::resolver("order-crumb")),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting WayDeck metadata demo");

    // Load environment variables
    dotenvy::dotenv().ok();

    // The initial title stands in for whatever the host UI displayed before
    // the first navigation.
    let initial_title = std::env::var("WAYDECK_INITIAL_TITLE").unwrap_or_else(|_| {
        info!("WAYDECK_INITIAL_TITLE not set, using default: Waypost Demo");
        "Waypost Demo".to_string()
    });

    let router = Arc::new(MemRouter::new(route_table()));

    let titles = TitlePipeline::new(
        Arc::clone(&router),
        ResolutionBinding::new("title", Arc::new(NullResolver), String::new()).with_registry(
            ResolverRegistry::new().register("order-title", Arc::new(OrderTitleResolver)),
        ),
        Arc::new(DefaultTitleFormatter),
        initial_title,
    );

    let crumbs = BreadcrumbsPipeline::new(
        Arc::clone(&router),
        ResolutionBinding::new("breadcrumbs", Arc::new(PathBreadcrumbResolver), Vec::new())
            .with_registry(
                ResolverRegistry::new().register("order-crumb", Arc::new(OrderCrumbResolver)),
            ),
    );

    let params = ParamWatcher::new(Arc::clone(&router));
    let mut order_id = params.watch("order_id", ParamKind::Path);

    info!(title = %titles.title(), "Metadata before the first navigation");

    for path in ["/dashboard", "/orders", "/orders/42?tab=history", "/orders/7"] {
        info!(path = %path, "Navigating");
        router.navigate(path)?;

        // Let the resolution pass settle before reading the snapshot.
        sleep(Duration::from_millis(100)).await;

        let current_order = order_id.borrow_and_update().clone();
        info!(
            title = %titles.title(),
            breadcrumbs = ?crumbs.breadcrumbs(),
            order_id = ?current_order,
            "Published metadata"
        );
    }

    info!("Forcing a refresh of the current chain");
    titles.refresh();
    crumbs.refresh();
    sleep(Duration::from_millis(100)).await;

    info!(
        title = %titles.title(),
        breadcrumbs = ?crumbs.breadcrumbs(),
        "Published metadata after refresh"
    );

    titles.shutdown();
    crumbs.shutdown();

    Ok(())
}
