//! Integration tests for the resolution pipeline
//!
//! These tests verify that:
//! 1. Navigation completions trigger full resolution passes end-to-end
//! 2. A superseded pass never publishes, even if its resolver completes later
//! 3. Manual refresh re-resolves the current chain
//! 4. Shutdown stops the pipeline from reacting to further navigations

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::time::{sleep, timeout};

use waypost_domain::{
    DefaultTitleFormatter, NavigationEnd, NavigationSource, NullResolver, ResolutionBinding,
    ResolverOutput, ResolverRegistry, RouteChain, RouteData, RouteNode, RouteResolver,
    RouteSegment, TitlePipeline,
};

const CHANGE_TIMEOUT: Duration = Duration::from_secs(2);

/// Scriptable in-memory navigation source
struct ScriptedNav {
    root: RwLock<Arc<RouteNode>>,
    events: broadcast::Sender<NavigationEnd>,
}

impl ScriptedNav {
    fn new(root: RouteNode) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            root: RwLock::new(Arc::new(root)),
            events,
        }
    }

    fn navigate(&self, root: RouteNode) {
        *self.root.write().unwrap() = Arc::new(root);
        let _ = self.events.send(NavigationEnd::now());
    }
}

impl NavigationSource for ScriptedNav {
    fn current_root(&self) -> Arc<RouteNode> {
        Arc::clone(&self.root.read().unwrap())
    }

    fn subscribe(&self) -> broadcast::Receiver<NavigationEnd> {
        self.events.subscribe()
    }
}

/// First invocation answers slowly, later invocations immediately
struct SlowThenFastResolver {
    invocations: AtomicUsize,
    slow_value: String,
    fast_value: String,
    delay: Duration,
}

#[async_trait]
impl RouteResolver<String> for SlowThenFastResolver {
    async fn resolve(
        &self,
        _segment: &RouteSegment,
        _chain: &RouteChain,
    ) -> waypost_domain::resolve::Result<ResolverOutput<String>> {
        if self.invocations.fetch_add(1, Ordering::SeqCst) == 0 {
            sleep(self.delay).await;
            Ok(ResolverOutput::Value(self.slow_value.clone()))
        } else {
            Ok(ResolverOutput::Value(self.fast_value.clone()))
        }
    }
}

fn titled_tree(resolver_id: &str) -> RouteNode {
    RouteNode::new(RouteSegment::root()).with_active_child(RouteNode::new(
        RouteSegment::new(vec!["orders".to_string()])
            .with_data("title", RouteData::resolver(resolver_id)),
    ))
}

fn title_pipeline(nav: Arc<ScriptedNav>, registry: ResolverRegistry<String>) -> TitlePipeline {
    TitlePipeline::new(
        nav,
        ResolutionBinding::new("title", Arc::new(NullResolver), String::new())
            .with_registry(registry),
        Arc::new(DefaultTitleFormatter),
        "Initial",
    )
}

/// The supersede law: a refresh arriving while a pass is in flight cancels
/// it, and only the newest pass's value is ever published.
#[tokio::test]
async fn test_superseded_pass_never_publishes() {
    let nav = Arc::new(ScriptedNav::new(RouteNode::new(RouteSegment::root())));
    let registry = ResolverRegistry::new().register(
        "slow-then-fast",
        Arc::new(SlowThenFastResolver {
            invocations: AtomicUsize::new(0),
            slow_value: "X".to_string(),
            fast_value: "Y".to_string(),
            delay: Duration::from_millis(200),
        }),
    );
    let pipeline = title_pipeline(Arc::clone(&nav), registry);
    let mut rx = pipeline.subscribe();

    // First trigger: the resolver starts its slow computation toward X.
    nav.navigate(titled_tree("slow-then-fast"));
    sleep(Duration::from_millis(50)).await;

    // Second trigger while the first pass is still pending.
    pipeline.refresh();

    timeout(CHANGE_TIMEOUT, rx.changed()).await.unwrap().unwrap();
    assert_eq!(*rx.borrow_and_update(), "Y");

    // Wait past the slow resolver's delay: X must never surface.
    sleep(Duration::from_millis(400)).await;
    assert!(!rx.has_changed().unwrap());
    assert_eq!(pipeline.title(), "Y");
}

/// A newer navigation supersedes the pass started by an older one.
#[tokio::test]
async fn test_newer_navigation_wins() {
    let nav = Arc::new(ScriptedNav::new(RouteNode::new(RouteSegment::root())));
    let registry = ResolverRegistry::new().register(
        "slow-then-fast",
        Arc::new(SlowThenFastResolver {
            invocations: AtomicUsize::new(0),
            slow_value: "Old".to_string(),
            fast_value: "New".to_string(),
            delay: Duration::from_millis(200),
        }),
    );
    let pipeline = title_pipeline(Arc::clone(&nav), registry);
    let mut rx = pipeline.subscribe();

    nav.navigate(titled_tree("slow-then-fast"));
    sleep(Duration::from_millis(50)).await;
    nav.navigate(titled_tree("slow-then-fast"));

    timeout(CHANGE_TIMEOUT, rx.changed()).await.unwrap().unwrap();
    assert_eq!(*rx.borrow_and_update(), "New");

    sleep(Duration::from_millis(400)).await;
    assert_eq!(pipeline.title(), "New");
}

/// Refresh re-resolves the current chain without a navigation.
#[tokio::test]
async fn test_refresh_rederives_current_chain() {
    struct CountingResolver(AtomicUsize);

    #[async_trait]
    impl RouteResolver<String> for CountingResolver {
        async fn resolve(
            &self,
            _segment: &RouteSegment,
            _chain: &RouteChain,
        ) -> waypost_domain::resolve::Result<ResolverOutput<String>> {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(ResolverOutput::Value(format!("Pass {n}")))
        }
    }

    let nav = Arc::new(ScriptedNav::new(RouteNode::new(RouteSegment::root())));
    let registry =
        ResolverRegistry::new().register("counting", Arc::new(CountingResolver(AtomicUsize::new(0))));
    let pipeline = title_pipeline(Arc::clone(&nav), registry);
    let mut rx = pipeline.subscribe();

    nav.navigate(titled_tree("counting"));
    timeout(CHANGE_TIMEOUT, rx.changed()).await.unwrap().unwrap();
    assert_eq!(*rx.borrow_and_update(), "Pass 1");

    pipeline.refresh();
    timeout(CHANGE_TIMEOUT, rx.changed()).await.unwrap().unwrap();
    assert_eq!(*rx.borrow_and_update(), "Pass 2");
}

/// After shutdown the pipeline holds its last value and ignores navigations.
#[tokio::test]
async fn test_shutdown_stops_reacting() {
    let nav = Arc::new(ScriptedNav::new(RouteNode::new(RouteSegment::root())));
    let pipeline = title_pipeline(Arc::clone(&nav), ResolverRegistry::new());
    let mut rx = pipeline.subscribe();

    nav.navigate(RouteNode::new(
        RouteSegment::root().with_data("title", RouteData::value("Before")),
    ));
    timeout(CHANGE_TIMEOUT, rx.changed()).await.unwrap().unwrap();
    assert_eq!(*rx.borrow_and_update(), "Before");

    pipeline.shutdown();
    sleep(Duration::from_millis(50)).await;

    nav.navigate(RouteNode::new(
        RouteSegment::root().with_data("title", RouteData::value("After")),
    ));
    sleep(Duration::from_millis(100)).await;

    assert!(!rx.has_changed().unwrap());
    assert_eq!(pipeline.title(), "Before");
}
