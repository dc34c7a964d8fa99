//! Title resolution pipeline
//!
//! First-non-empty-from-leaf policy: segments resolve one at a time in
//! leaf-to-root order, short-circuiting at the first whose value differs from
//! the empty sentinel. The winning raw value then passes through the
//! formatting step together with the initial title captured at construction.
//!
//! Only a segment's first emission participates in the short-circuit; a live
//! title resolver that re-emits later does not move the winner within the
//! same pass. The next trigger re-evaluates from scratch.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::navigation::RouteChain;
use crate::ports::NavigationSource;
use crate::resolve::{resolve_segment, ResolutionBinding, Result, TitleFormatter};

use super::controller::{PassPublisher, SupersedeController};

/// The empty sentinel published when no segment resolves a title
pub const EMPTY_TITLE: &str = "";

/// Stock formatter: the raw title when present, the initial title otherwise
pub struct DefaultTitleFormatter;

#[async_trait]
impl TitleFormatter for DefaultTitleFormatter {
    async fn format(&self, raw_title: &str, initial_title: &str) -> Result<String> {
        if raw_title.is_empty() {
            Ok(initial_title.to_string())
        } else {
            Ok(raw_title.to_string())
        }
    }
}

/// Derives the display title from the active navigation chain
pub struct TitlePipeline {
    controller: SupersedeController<String>,
}

impl TitlePipeline {
    /// Create the pipeline and start listening for navigation completions
    ///
    /// `initial_title` is captured once, before any navigation, and handed to
    /// the formatter on every pass; it is also the published value until the
    /// first navigation completes.
    pub fn new<N>(
        source: Arc<N>,
        binding: ResolutionBinding<String>,
        formatter: Arc<dyn TitleFormatter>,
        initial_title: impl Into<String>,
    ) -> Self
    where
        N: NavigationSource + 'static,
    {
        let binding = Arc::new(binding);
        let initial: Arc<String> = Arc::new(initial_title.into());

        let published_initial = (*initial).clone();
        let controller = SupersedeController::spawn(
            source,
            published_initial,
            move |chain, cancel, publisher| {
                resolve_pass(
                    chain,
                    cancel,
                    publisher,
                    Arc::clone(&binding),
                    Arc::clone(&formatter),
                    Arc::clone(&initial),
                )
            },
        );

        Self { controller }
    }

    /// Synchronous snapshot of the current title
    pub fn title(&self) -> String {
        self.controller.current()
    }

    /// Live sequence of published titles
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.controller.subscribe()
    }

    /// Force a fresh resolution of the current chain
    pub fn refresh(&self) {
        self.controller.refresh();
    }

    /// Stop listening and cancel any in-flight resolution
    pub fn shutdown(&self) {
        self.controller.shutdown();
    }
}

/// One resolution pass: find the winning raw title, format, publish
async fn resolve_pass(
    chain: RouteChain,
    cancel: CancellationToken,
    publisher: PassPublisher<String>,
    binding: Arc<ResolutionBinding<String>>,
    formatter: Arc<dyn TitleFormatter>,
    initial: Arc<String>,
) {
    let raw = first_non_empty_from_leaf(&chain, &binding, &cancel).await;
    if cancel.is_cancelled() {
        return;
    }

    let title = match formatter.format(&raw, &initial).await {
        Ok(title) => title,
        Err(err) => {
            warn!(error = %err, "Title formatter failed, falling back to initial title");
            (*initial).clone()
        }
    };

    publisher.publish(title);
}

/// Resolve segments leaf-to-root, short-circuiting on the first non-empty
/// first emission
async fn first_non_empty_from_leaf(
    chain: &RouteChain,
    binding: &ResolutionBinding<String>,
    cancel: &CancellationToken,
) -> String {
    for segment in chain.segments().iter().rev() {
        let first = resolve_segment(Arc::clone(segment), chain.clone(), binding, cancel)
            .first()
            .await;

        match first {
            Some(title) if title != *binding.empty_value() => return title,
            _ => {}
        }
    }

    binding.empty_value().clone()
}
