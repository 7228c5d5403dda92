use eframe::egui::{self, Align, Context, Layout};

use mycelial_net::config::ViewMode;

use super::super::{FrameRequests, ViewModel};

pub(in crate::app) fn top_bar(
    ctx: &Context,
    view_mode: ViewMode,
    source_label: &str,
    model: Option<&mut ViewModel>,
    requests: &mut FrameRequests,
) {
    egui::TopBottomPanel::top("top_bar")
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("MycelialNet🌍");
                ui.separator();

                for mode in ViewMode::ALL {
                    if ui.radio(view_mode == mode, mode.label()).clicked() && mode != view_mode {
                        requests.view_mode = Some(mode);
                    }
                }
                ui.separator();

                let Some(model) = model else {
                    ui.label(format!("source: {source_label}"));
                    return;
                };

                ui.label("search:");
                ui.add(
                    egui::TextEdit::singleline(&mut model.search)
                        .hint_text("node name")
                        .desired_width(180.0),
                );
                ui.checkbox(&mut model.live_physics, "live physics");
                if ui.button("Re-seed layout").clicked() {
                    model.reseed_layout();
                }
                if ui.button("Reload").clicked() {
                    requests.reload = true;
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(format!(
                        "{} nodes · {} links · {}",
                        model.node_count(),
                        model.edge_count(),
                        source_label
                    ));
                    if model.graph.stats.rows_skipped > 0 {
                        ui.label(format!("{} rows skipped", model.graph.stats.rows_skipped));
                    }
                });
            });
        });
}

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.draw_graph(ui));
    }
}
