use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::Context;

use mycelial_net::config::{GraphConfig, ViewMode};
use mycelial_net::graph::{GraphData, fetch_graph};
use mycelial_net::sheet::RowSource;

pub(crate) struct CompletedBuild {
    pub(crate) view_mode: ViewMode,
    pub(crate) result: Result<GraphData, String>,
}

struct BuildMessage {
    generation: u64,
    build: CompletedBuild,
}

/// Fetches and builds graphs on worker threads. Only the newest request can complete.
pub(crate) struct BuildLoader {
    source: Arc<dyn RowSource>,
    config: Arc<GraphConfig>,
    generation: u64,
    in_flight: bool,
    stale_dropped: usize,
    tx: Sender<BuildMessage>,
    rx: Receiver<BuildMessage>,
}

fn fetch_and_build(
    source: &dyn RowSource,
    view_mode: ViewMode,
    config: &GraphConfig,
) -> anyhow::Result<GraphData> {
    fetch_graph(source, view_mode, config)
        .with_context(|| format!("failed to load rows from {}", source.describe()))
}

impl BuildLoader {
    pub(crate) fn new(source: Arc<dyn RowSource>, config: Arc<GraphConfig>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            config,
            generation: 0,
            in_flight: false,
            stale_dropped: 0,
            tx,
            rx,
        }
    }

    /// Starts a new build; any build still running becomes stale.
    pub(crate) fn request(&mut self, view_mode: ViewMode) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = true;

        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let config = Arc::clone(&self.config);
        let tx = self.tx.clone();
        tracing::debug!(generation, %view_mode, "starting graph build");

        thread::spawn(move || {
            let result = fetch_and_build(source.as_ref(), view_mode, &config)
                .map_err(|error| format!("{error:#}"));
            if let Err(error) = &result {
                tracing::warn!(generation, %view_mode, "graph build failed: {error}");
            }
            let _ = tx.send(BuildMessage {
                generation,
                build: CompletedBuild { view_mode, result },
            });
        });

        generation
    }

    /// Drains finished builds, returning the current one if it has arrived.
    pub(crate) fn poll(&mut self) -> Option<CompletedBuild> {
        let mut current = None;
        while let Ok(message) = self.rx.try_recv() {
            if message.generation == self.generation {
                self.in_flight = false;
                current = Some(message.build);
            } else {
                self.stale_dropped += 1;
                tracing::debug!(
                    stale = message.generation,
                    current = self.generation,
                    "dropping result of superseded build"
                );
            }
        }
        current
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub(crate) fn source_label(&self) -> String {
        self.source.describe()
    }

    #[cfg(test)]
    fn stale_dropped(&self) -> usize {
        self.stale_dropped
    }
}
