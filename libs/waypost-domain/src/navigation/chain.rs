//! Active chain extraction and hierarchical parameter lookup

use std::sync::Arc;

use super::segment::{ParamKind, RouteSegment};

/// One node of the active navigation tree
///
/// The navigation source owns a tree of these and rebuilds it on every
/// navigation; the `active_child` link points at the currently activated
/// nested node, if any. The tree is immutable once published.
#[derive(Debug, Clone)]
pub struct RouteNode {
    segment: Arc<RouteSegment>,
    active_child: Option<Arc<RouteNode>>,
}

impl RouteNode {
    /// Create a leaf node for the given segment
    pub fn new(segment: RouteSegment) -> Self {
        Self {
            segment: Arc::new(segment),
            active_child: None,
        }
    }

    /// Attach the currently active nested node
    pub fn with_active_child(mut self, child: RouteNode) -> Self {
        self.active_child = Some(Arc::new(child));
        self
    }

    /// The segment this node wraps
    pub fn segment(&self) -> &Arc<RouteSegment> {
        &self.segment
    }

    /// The currently active nested node, if any
    pub fn active_child(&self) -> Option<&Arc<RouteNode>> {
        self.active_child.as_ref()
    }
}

/// The ordered root-to-leaf sequence of active segments
///
/// Extraction always yields at least the root segment, and terminates because
/// the active-child relation is acyclic and bounded by the tree depth.
#[derive(Debug, Clone)]
pub struct RouteChain {
    // Invariant: never empty.
    segments: Vec<Arc<RouteSegment>>,
}

impl RouteChain {
    /// Walk the active tree from the given root, collecting segments in
    /// root-to-leaf order
    pub fn extract(root: &RouteNode) -> Self {
        let mut segments = vec![Arc::clone(root.segment())];
        let mut current = root.active_child();

        while let Some(node) = current {
            segments.push(Arc::clone(node.segment()));
            current = node.active_child();
        }

        Self { segments }
    }

    /// Build a chain directly from segments, root first
    ///
    /// Returns `None` for an empty sequence; a chain always has a root.
    pub fn from_segments(segments: impl IntoIterator<Item = RouteSegment>) -> Option<Self> {
        let segments: Vec<Arc<RouteSegment>> =
            segments.into_iter().map(Arc::new).collect();

        if segments.is_empty() {
            return None;
        }

        Some(Self { segments })
    }

    /// All segments in root-to-leaf order
    pub fn segments(&self) -> &[Arc<RouteSegment>] {
        &self.segments
    }

    /// Number of segments in the chain (always >= 1)
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// A chain extracted from a tree is never empty
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The root segment
    pub fn root(&self) -> &Arc<RouteSegment> {
        &self.segments[0]
    }

    /// The deepest active segment
    pub fn leaf(&self) -> &Arc<RouteSegment> {
        &self.segments[self.segments.len() - 1]
    }

    /// Scan root-to-leaf for the first segment carrying the named parameter
    pub fn find_param(&self, name: &str, kind: ParamKind) -> Option<&str> {
        self.segments
            .iter()
            .find_map(|segment| segment.param(name, kind))
    }

    /// The complete rendered path of the leaf segment
    pub fn full_path(&self) -> String {
        self.leaf().full_path()
    }
}
