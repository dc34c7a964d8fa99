//! Breadcrumb aggregation pipeline
//!
//! Concatenation policy: every segment of the active chain resolves to zero
//! or more crumbs, and the published trail is the flattening of all segments'
//! current values in root-to-leaf order. Aggregation has combine-latest
//! semantics: the first trail is published once every segment has emitted,
//! and any segment re-emitting recomputes the whole trail.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::navigation::RouteChain;
use crate::ports::NavigationSource;
use crate::resolve::{resolve_segment, ResolutionBinding};

use super::breadcrumb::Breadcrumb;
use super::controller::{PassPublisher, SupersedeController};

/// Derives the breadcrumb trail from the active navigation chain
///
/// Construct once per scope; drop (or call [`shutdown`](Self::shutdown)) to
/// cancel all in-flight resolutions.
pub struct BreadcrumbsPipeline {
    controller: SupersedeController<Vec<Breadcrumb>>,
}

impl BreadcrumbsPipeline {
    /// Create the pipeline and start listening for navigation completions
    pub fn new<N>(source: Arc<N>, binding: ResolutionBinding<Vec<Breadcrumb>>) -> Self
    where
        N: NavigationSource + 'static,
    {
        let binding = Arc::new(binding);
        let initial = binding.empty_value().clone();

        let controller =
            SupersedeController::spawn(source, initial, move |chain, cancel, publisher| {
                resolve_pass(chain, cancel, publisher, Arc::clone(&binding))
            });

        Self { controller }
    }

    /// Synchronous snapshot of the current trail
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.controller.current()
    }

    /// Live sequence of published trails
    pub fn subscribe(&self) -> watch::Receiver<Vec<Breadcrumb>> {
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

/// One resolution pass: dispatch every segment, combine latest emissions
async fn resolve_pass(
    chain: RouteChain,
    cancel: CancellationToken,
    publisher: PassPublisher<Vec<Breadcrumb>>,
    binding: Arc<ResolutionBinding<Vec<Breadcrumb>>>,
) {
    let count = chain.len();

    let per_segment: Vec<_> = chain
        .segments()
        .iter()
        .enumerate()
        .map(|(index, segment)| {
            resolve_segment(Arc::clone(segment), chain.clone(), &binding, &cancel)
                .map(move |crumbs| (index, crumbs))
                .boxed()
        })
        .collect();

    let mut merged = stream::select_all(per_segment);
    let mut latest: Vec<Option<Vec<Breadcrumb>>> = vec![None; count];

    while let Some((index, crumbs)) = merged.next().await {
        latest[index] = Some(crumbs);

        // Combine-latest: publish only once every segment has contributed,
        // then again on every re-emission.
        if latest.iter().all(Option::is_some) {
            let trail: Vec<Breadcrumb> = latest.iter().flatten().flatten().cloned().collect();
            if !publisher.publish(trail) {
                // Superseded; stop consuming the sequences.
                return;
            }
        }
    }
}
