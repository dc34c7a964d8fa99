//! # Waypost Domain Layer
//!
//! This crate contains the route-metadata resolution pipeline: it derives a
//! display title, a breadcrumb trail and ambient path/query parameters from
//! the currently active chain of nested route segments. It follows hexagonal
//! architecture principles:
//!
//! - **Model**: the read-only navigation state (RouteSegment, RouteChain)
//! - **Ports**: trait definitions for collaborators (NavigationSource,
//!   RouteResolver, TitleFormatter)
//! - **Services**: the pipelines pairing resolver dispatch with an
//!   aggregation policy and supersede-safe re-computation
//!
//! ## Architecture
//!
//! This layer has NO dependency on any concrete navigation engine or UI.
//! Navigation is consumed through the `NavigationSource` port; dynamic
//! resolvers are handed in through a registry at construction time.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use waypost_domain::{
//!     BreadcrumbsPipeline, DefaultTitleFormatter, NavigationSource, NullResolver,
//!     ResolutionBinding, TitlePipeline,
//! };
//!
//! fn wire<N: NavigationSource + 'static>(source: Arc<N>) {
//!     let title = TitlePipeline::new(
//!         Arc::clone(&source),
//!         ResolutionBinding::new("title", Arc::new(NullResolver), String::new()),
//!         Arc::new(DefaultTitleFormatter),
//!         "My App",
//!     );
//!     let crumbs = BreadcrumbsPipeline::new(
//!         source,
//!         ResolutionBinding::new("breadcrumbs", Arc::new(NullResolver), Vec::new()),
//!     );
//!     println!("{} / {:?}", title.title(), crumbs.breadcrumbs());
//! }
//! ```

pub mod metadata;
pub mod navigation;
pub mod ports;
pub mod resolve;

// Re-export commonly used types
pub use metadata::{
    Breadcrumb, BreadcrumbsPipeline, DefaultTitleFormatter, ParamWatcher, PathBreadcrumbResolver,
    TitlePipeline, EMPTY_TITLE,
};
pub use navigation::{ParamKind, RouteChain, RouteNode, RouteSegment};
pub use ports::{NavigationEnd, NavigationSource};
pub use resolve::{
    NullResolver, ResolutionBinding, ResolveError, ResolverId, ResolverOutput, ResolverRegistry,
    RouteData, RouteResolver, TitleFormatter, ValueStream,
};
