//! Navigation domain module
//!
//! The read-only model of the active navigation state: segments, the active
//! tree, chain extraction and hierarchical parameter lookup. Navigation
//! itself (matching, history) lives behind the `NavigationSource` port.

mod chain;
mod segment;

pub use chain::{RouteChain, RouteNode};
pub use segment::{ParamKind, RouteSegment};
