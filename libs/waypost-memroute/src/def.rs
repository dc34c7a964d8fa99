//! Declarative route table

use std::collections::HashMap;

use waypost_domain::RouteData;

/// One entry of the nested route table
///
/// The path pattern is relative to the parent and mixes literal tokens with
/// `:name` parameter captures, e.g. `"orders"` or `"orders/:order_id"`.
/// The root of the table uses an empty pattern.
#[derive(Debug, Clone)]
pub struct RouteDef {
    path: String,
    data: HashMap<String, RouteData>,
    children: Vec<RouteDef>,
}

impl RouteDef {
    /// The table root (empty pattern, matched by every navigation)
    pub fn root() -> Self {
        Self::new("")
    }

    /// A route matching the given pattern
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            data: HashMap::new(),
            children: Vec::new(),
        }
    }

    /// Declare configuration under the given binding field name
    pub fn with_data(mut self, field: impl Into<String>, data: RouteData) -> Self {
        self.data.insert(field.into(), data);
        self
    }

    /// Add a nested route
    ///
    /// Children are tried in declaration order; the first match wins.
    pub fn with_child(mut self, child: RouteDef) -> Self {
        self.children.push(child);
        self
    }

    /// Pattern tokens of this entry (empty for the root)
    pub(crate) fn pattern_tokens(&self) -> Vec<&str> {
        self.path.split('/').filter(|token| !token.is_empty()).collect()
    }

    pub(crate) fn data(&self) -> &HashMap<String, RouteData> {
        &self.data
    }

    pub(crate) fn children(&self) -> &[RouteDef] {
        &self.children
    }
}
