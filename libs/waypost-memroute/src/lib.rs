//! # Waypost MemRoute
//!
//! An in-memory navigation engine implementing the pipeline's
//! `NavigationSource` port. It plays the external "navigation event source"
//! collaborator for embedding hosts, demos and integration tests: it owns a
//! declarative nested route table, matches navigated paths against it,
//! rebuilds the active segment tree and broadcasts completion events.
//!
//! The pipeline itself never parses paths; all matching lives here, on the
//! engine side of the port.
//!
//! ## Example
//!
//! ```rust
//! use waypost_memroute::{MemRouter, RouteDef};
//! use waypost_domain::{NavigationSource, RouteData};
//!
//! let router = MemRouter::new(
//!     RouteDef::root().with_child(
//!         RouteDef::new("orders/:order_id")
//!             .with_data("title", RouteData::value("Order")),
//!     ),
//! );
//!
//! router.navigate("/orders/42").unwrap();
//! assert_eq!(router.current_chain().full_path(), "/orders/42");
//! ```

mod def;
mod error;

pub use def::RouteDef;
pub use error::{Result, RouterError};

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;
use tracing::debug;

use waypost_domain::{NavigationEnd, NavigationSource, RouteNode, RouteSegment};

/// One route table entry matched during navigation
struct Matched<'a> {
    def: &'a RouteDef,
    params: HashMap<String, String>,
    consumed: Vec<String>,
}

/// In-memory navigation engine
///
/// Holds the route table, the currently active segment tree and the
/// completion event channel. Navigations replace the tree wholesale; the
/// handed-out snapshots are immutable, as the port requires.
pub struct MemRouter {
    routes: RouteDef,
    root: RwLock<Arc<RouteNode>>,
    events: broadcast::Sender<NavigationEnd>,
}

impl MemRouter {
    /// Create a router over the given table
    ///
    /// The initial active chain is the bare table root, standing for the
    /// state before any navigation completes.
    pub fn new(routes: RouteDef) -> Self {
        let (events, _) = broadcast::channel(16);
        let root = RwLock::new(Arc::new(build_tree(
            &routes,
            &[],
            &HashMap::new(),
        )));

        Self {
            routes,
            root,
            events,
        }
    }

    /// Navigate to the given path, e.g. `/orders/42?tab=history`
    ///
    /// On a match the active tree is replaced and a completion event fires.
    /// An unmatched path leaves the current state untouched.
    ///
    /// # Errors
    ///
    /// Returns `RouterError::NoMatch` if no table entry matches the path.
    pub fn navigate(&self, path: &str) -> Result<()> {
        let (path_part, query_part) = match path.split_once('?') {
            Some((path_part, query_part)) => (path_part, Some(query_part)),
            None => (path, None),
        };

        let query = parse_query(query_part);
        let tokens: Vec<&str> = path_part.split('/').filter(|t| !t.is_empty()).collect();

        let (root_params, rest) =
            match_pattern(&self.routes, &tokens).ok_or_else(|| RouterError::no_match(path))?;
        let mut chain = descend(self.routes.children(), rest)
            .ok_or_else(|| RouterError::no_match(path))?;

        chain.insert(
            0,
            Matched {
                def: &self.routes,
                params: root_params,
                consumed: tokens[..tokens.len() - rest.len()]
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
            },
        );

        let tree = build_chain_tree(&chain, &query);

        *self.root.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(tree);
        let _ = self.events.send(NavigationEnd::now());

        debug!(path = %path, segments = chain.len(), "Navigation completed");
        Ok(())
    }
}

impl NavigationSource for MemRouter {
    fn current_root(&self) -> Arc<RouteNode> {
        Arc::clone(&self.root.read().unwrap_or_else(|e| e.into_inner()))
    }

    fn subscribe(&self) -> broadcast::Receiver<NavigationEnd> {
        self.events.subscribe()
    }
}

/// Match one entry's pattern against the head of the remaining tokens
///
/// Returns the captured parameters and the tokens left over, or `None` on a
/// literal mismatch.
fn match_pattern<'a>(
    def: &RouteDef,
    tokens: &'a [&'a str],
) -> Option<(HashMap<String, String>, &'a [&'a str])> {
    let pattern = def.pattern_tokens();
    if pattern.len() > tokens.len() {
        return None;
    }

    let mut params = HashMap::new();
    for (expected, actual) in pattern.iter().zip(tokens) {
        match expected.strip_prefix(':') {
            Some(name) => {
                params.insert(name.to_string(), actual.to_string());
            }
            None if expected == actual => {}
            None => return None,
        }
    }

    Some((params, &tokens[pattern.len()..]))
}

/// Depth-first match of the remaining tokens against a child list
///
/// Children are tried in declaration order; the first complete match wins.
fn descend<'a>(children: &'a [RouteDef], tokens: &[&str]) -> Option<Vec<Matched<'a>>> {
    if tokens.is_empty() {
        return Some(Vec::new());
    }

    for child in children {
        if let Some((params, rest)) = match_pattern(child, tokens) {
            if let Some(mut chain) = descend(child.children(), rest) {
                chain.insert(
                    0,
                    Matched {
                        def: child,
                        params,
                        consumed: tokens[..tokens.len() - rest.len()]
                            .iter()
                            .map(|t| t.to_string())
                            .collect(),
                    },
                );
                return Some(chain);
            }
        }
    }

    None
}

fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    if let Some(query) = query {
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some((name, value)) => params.insert(name.to_string(), value.to_string()),
                None => params.insert(pair.to_string(), String::new()),
            };
        }
    }
    params
}

fn build_segment(
    def: &RouteDef,
    tokens_from_root: Vec<String>,
    params: &HashMap<String, String>,
    query: &HashMap<String, String>,
) -> RouteSegment {
    let mut segment = RouteSegment::new(tokens_from_root).with_query_params(query.clone());

    for (name, value) in params {
        segment = segment.with_path_param(name.clone(), value.clone());
    }
    for (field, data) in def.data() {
        segment = segment.with_data(field.clone(), data.clone());
    }

    segment
}

/// The bare tree for an unmatched initial state
fn build_tree(
    root_def: &RouteDef,
    tokens: &[String],
    query: &HashMap<String, String>,
) -> RouteNode {
    RouteNode::new(build_segment(
        root_def,
        tokens.to_vec(),
        &HashMap::new(),
        query,
    ))
}

/// Assemble the active tree from the matched chain, leaf upward
fn build_chain_tree(chain: &[Matched<'_>], query: &HashMap<String, String>) -> RouteNode {
    let mut tokens_from_root: Vec<String> = Vec::new();
    let segments: Vec<RouteSegment> = chain
        .iter()
        .map(|matched| {
            tokens_from_root.extend(matched.consumed.iter().cloned());
            build_segment(
                matched.def,
                tokens_from_root.clone(),
                &matched.params,
                query,
            )
        })
        .collect();

    let mut node: Option<RouteNode> = None;
    for segment in segments.into_iter().rev() {
        node = Some(match node {
            Some(child) => RouteNode::new(segment).with_active_child(child),
            None => RouteNode::new(segment),
        });
    }

    // The chain always contains at least the root entry.
    node.unwrap_or_else(|| RouteNode::new(RouteSegment::root()))
}
