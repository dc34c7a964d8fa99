//! Breadcrumb model and stock resolvers

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::navigation::{RouteChain, RouteSegment};
use crate::resolve::{ResolverOutput, Result, RouteResolver};

/// One entry of the breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Display label
    pub label: String,
    /// Link target, the full path of the segment the crumb points at
    pub path: String,
}

impl Breadcrumb {
    /// Create a breadcrumb
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Default resolver deriving one crumb per segment from its path
///
/// The last path token becomes the label and the segment's full path the
/// link target. The root segment (no tokens) contributes no crumbs, as do
/// segments whose tokens are pure parameter values already covered by their
/// parent.
pub struct PathBreadcrumbResolver;

#[async_trait]
impl RouteResolver<Vec<Breadcrumb>> for PathBreadcrumbResolver {
    async fn resolve(
        &self,
        segment: &RouteSegment,
        _chain: &RouteChain,
    ) -> Result<ResolverOutput<Vec<Breadcrumb>>> {
        let crumbs = match segment.path_tokens().last() {
            Some(token) => vec![Breadcrumb::new(token.clone(), segment.full_path())],
            None => Vec::new(),
        };
        Ok(ResolverOutput::Value(crumbs))
    }
}
