//! Ports (trait definitions) for external collaborators
//!
//! Following hexagonal architecture, the domain defines what it needs from
//! the outside world. The navigation engine (URL matching, route tree
//! construction, history) lives entirely behind `NavigationSource`; the
//! pipeline only reads the active tree and listens for completions.
//!
//! `NavigationSource` is consumed generically for static dispatch. The
//! resolver capabilities exposed to collaborators live in
//! [`crate::resolve`], where the registry stores them as trait objects.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use crate::navigation::{RouteChain, RouteNode};

/// Fired once per completed navigation
///
/// Carries no payload beyond the fact of completion; consumers re-read the
/// current chain from the source.
#[derive(Debug, Clone)]
pub struct NavigationEnd {
    /// When the navigation completed
    pub completed_at: DateTime<Utc>,
}

impl NavigationEnd {
    /// A completion event stamped with the current time
    pub fn now() -> Self {
        Self {
            completed_at: Utc::now(),
        }
    }
}

impl Default for NavigationEnd {
    fn default() -> Self {
        Self::now()
    }
}

/// Port for the external navigation engine
///
/// Implementations own the active navigation tree and must:
/// 1. Expose the current root node (and thereby the active chain)
/// 2. Broadcast a `NavigationEnd` after every completed navigation
///
/// The tree handed out must be an immutable snapshot: a navigation replaces
/// it wholesale rather than mutating nodes in place.
pub trait NavigationSource: Send + Sync {
    /// The root of the currently active navigation tree
    fn current_root(&self) -> Arc<RouteNode>;

    /// The active chain, extracted root-to-leaf from the current tree
    fn current_chain(&self) -> RouteChain {
        RouteChain::extract(&self.current_root())
    }

    /// Subscribe to navigation completion events
    fn subscribe(&self) -> broadcast::Receiver<NavigationEnd>;
}
