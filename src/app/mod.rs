use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{self, Context, Vec2};

use mycelial_net::config::{GraphConfig, ViewMode};
use mycelial_net::graph::GraphData;
use mycelial_net::sheet::RowSource;

mod graph;
mod loader;
mod physics;
mod render_utils;
mod ui;

use loader::BuildLoader;

pub struct MycelialApp {
    loader: BuildLoader,
    view_mode: ViewMode,
    state: AppState,
}

enum AppState {
    Loading,
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: GraphData,
    render: RenderGraph,
    pan: Vec2,
    zoom: f32,
    search: String,
    search_matches: Option<(String, HashSet<usize>)>,
    selected: Option<usize>,
    dragging: Option<usize>,
    live_physics: bool,
}

struct RenderGraph {
    nodes: Vec<RenderNode>,
    edges: Vec<(usize, usize)>,
    scratch_forces: Vec<Vec2>,
}

struct RenderNode {
    world_pos: Vec2,
    velocity: Vec2,
    depth: u32,
    pinned: bool,
}

/// What the top bar asked for during a frame.
#[derive(Default)]
struct FrameRequests {
    view_mode: Option<ViewMode>,
    reload: bool,
}

impl MycelialApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        source: Arc<dyn RowSource>,
        config: GraphConfig,
        view_mode: ViewMode,
    ) -> Self {
        let mut loader = BuildLoader::new(source, Arc::new(config));
        loader.request(view_mode);
        Self {
            loader,
            view_mode,
            state: AppState::Loading,
        }
    }

    fn start_build(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
        self.loader.request(view_mode);
        self.state = AppState::Loading;
    }

    fn apply_requests(&mut self, requests: FrameRequests) {
        if let Some(view_mode) = requests.view_mode
            && view_mode != self.view_mode
        {
            self.start_build(view_mode);
        } else if requests.reload {
            self.start_build(self.view_mode);
        }
    }
}

impl eframe::App for MycelialApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        if let Some(build) = self.loader.poll() {
            self.state = match build.result {
                Ok(graph) => AppState::Ready(Box::new(ViewModel::new(graph))),
                Err(error) => AppState::Error(error),
            };
            self.view_mode = build.view_mode;
        }

        let source_label = self.loader.source_label();
        let mut requests = FrameRequests::default();
        let view_mode = self.view_mode;

        match &mut self.state {
            AppState::Loading => {
                ui::top_bar(ctx, view_mode, &source_label, None, &mut requests);
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading data...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                ui::top_bar(ctx, view_mode, &source_label, None, &mut requests);
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Loading failed");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        requests.reload = true;
                    }
                });
            }
            AppState::Ready(model) => {
                ui::top_bar(ctx, view_mode, &source_label, Some(model.as_mut()), &mut requests);
                model.show(ctx);
            }
        }

        self.apply_requests(requests);
        if self.loader.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
