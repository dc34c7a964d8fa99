//! Ambient path/query parameter lookup and watching

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tracing::trace;

use crate::navigation::ParamKind;
use crate::ports::NavigationSource;

/// Hierarchical parameter access over the live navigation state
///
/// One-shot lookups scan the current chain; watches re-evaluate after every
/// completed navigation and suppress duplicate values, so a navigation that
/// keeps a parameter unchanged does not re-emit it.
pub struct ParamWatcher<N> {
    source: Arc<N>,
}

impl<N> ParamWatcher<N>
where
    N: NavigationSource + 'static,
{
    /// Create a watcher over the given navigation source
    pub fn new(source: Arc<N>) -> Self {
        Self { source }
    }

    /// The named parameter's value on the first chain segment carrying it
    pub fn get(&self, name: &str, kind: ParamKind) -> Option<String> {
        self.source
            .current_chain()
            .find_param(name, kind)
            .map(str::to_string)
    }

    /// Watch the named parameter across navigations
    ///
    /// The receiver holds the current value immediately. New values are
    /// emitted only when the looked-up value differs from the previously
    /// emitted one (comparison by value, not identity). The watch task ends
    /// when the last receiver is dropped.
    pub fn watch(&self, name: impl Into<String>, kind: ParamKind) -> watch::Receiver<Option<String>> {
        let name = name.into();
        let source = Arc::clone(&self.source);
        let (tx, rx) = watch::channel(self.get(&name, kind));
        let mut nav_rx = source.subscribe();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    event = nav_rx.recv() => match event {
                        Err(broadcast::error::RecvError::Closed) => break,
                        _ => {
                            let value = source
                                .current_chain()
                                .find_param(&name, kind)
                                .map(str::to_string);

                            tx.send_if_modified(|current| {
                                if *current != value {
                                    trace!(param = %name, value = ?value, "Watched parameter changed");
                                    *current = value;
                                    true
                                } else {
                                    false
                                }
                            });
                        }
                    },
                }
            }
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{RouteNode, RouteSegment};
    use crate::test_support::{settle, FakeNav, CHANGE_TIMEOUT};
    use tokio::time::timeout;

    fn tree_with_leaf_id(id: &str) -> RouteNode {
        RouteNode::new(RouteSegment::root()).with_active_child(RouteNode::new(
            RouteSegment::new(vec!["orders".to_string(), id.to_string()])
                .with_path_param("id", id),
        ))
    }

    #[tokio::test]
    async fn test_watch_emits_current_value_immediately() {
        let nav = Arc::new(FakeNav::new(tree_with_leaf_id("42")));
        let watcher = ParamWatcher::new(Arc::clone(&nav));

        let rx = watcher.watch("id", ParamKind::Path);

        assert_eq!(*rx.borrow(), Some("42".to_string()));
    }

    #[tokio::test]
    async fn test_watch_suppresses_duplicate_values() {
        let nav = Arc::new(FakeNav::new(tree_with_leaf_id("42")));
        let watcher = ParamWatcher::new(Arc::clone(&nav));
        let mut rx = watcher.watch("id", ParamKind::Path);
        rx.mark_unchanged();

        // Same value after navigation: no re-emission.
        nav.navigate(tree_with_leaf_id("42"));
        settle().await;
        assert!(!rx.has_changed().unwrap());

        // Different value: emitted.
        nav.navigate(tree_with_leaf_id("43"));
        timeout(CHANGE_TIMEOUT, rx.changed()).await.unwrap().unwrap();
        assert_eq!(*rx.borrow(), Some("43".to_string()));
    }

    #[tokio::test]
    async fn test_watch_reports_absent_param_as_none() {
        let nav = Arc::new(FakeNav::new(tree_with_leaf_id("42")));
        let watcher = ParamWatcher::new(Arc::clone(&nav));
        let mut rx = watcher.watch("id", ParamKind::Path);
        rx.mark_unchanged();

        nav.navigate(RouteNode::new(RouteSegment::root()));

        timeout(CHANGE_TIMEOUT, rx.changed()).await.unwrap().unwrap();
        assert_eq!(*rx.borrow(), None);
    }

    #[tokio::test]
    async fn test_get_scans_root_to_leaf() {
        let nav = Arc::new(FakeNav::new(
            RouteNode::new(RouteSegment::root().with_query_param("tab", "overview"))
                .with_active_child(RouteNode::new(RouteSegment::new(vec![
                    "orders".to_string()
                ]))),
        ));
        let watcher = ParamWatcher::new(Arc::clone(&nav));

        assert_eq!(
            watcher.get("tab", ParamKind::Query),
            Some("overview".to_string())
        );
        assert_eq!(watcher.get("tab", ParamKind::Path), None);
    }
}
