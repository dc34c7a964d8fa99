//! Metadata pipelines
//!
//! The consumable services: title and breadcrumb pipelines (each pairing an
//! aggregation policy with the refresh/supersede controller) and the ambient
//! parameter watcher.

mod breadcrumb;
mod breadcrumbs;
mod controller;
mod params;
mod title;

pub use breadcrumb::{Breadcrumb, PathBreadcrumbResolver};
pub use breadcrumbs::BreadcrumbsPipeline;
pub use params::ParamWatcher;
pub use title::{DefaultTitleFormatter, TitlePipeline, EMPTY_TITLE};
