use eframe::egui::{self, Color32, Context, Pos2, RichText};

use super::super::ViewModel;

const LINK_TEXT: &str = "🌐 Website";
const TOOLTIP_WIDTH: f32 = 240.0;
const TOOLTIP_FILL: Color32 = Color32::from_rgb(0x50, 0x50, 0x50);

impl ViewModel {
    /// Floating card for the clicked node. Returns `true` when the user closes it.
    pub(in crate::app) fn draw_tooltip(&self, ctx: &Context, index: usize, anchor: Pos2) -> bool {
        let node = &self.graph.nodes[index];
        let mut close = false;

        egui::Area::new(egui::Id::new(("node_tooltip", &node.id)))
            .fixed_pos(anchor)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(TOOLTIP_FILL)
                    .show(ui, |ui| {
                        ui.set_max_width(TOOLTIP_WIDTH);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&node.label).strong().color(Color32::WHITE));
                            if ui.small_button("✕").clicked() {
                                close = true;
                            }
                        });
                        ui.label(RichText::new(&node.tooltip).color(Color32::WHITE));
                        if !node.description.is_empty() && node.description != node.tooltip {
                            ui.label(
                                RichText::new(&node.description)
                                    .small()
                                    .color(Color32::LIGHT_GRAY),
                            );
                        }
                        if !node.url.is_empty() {
                            ui.hyperlink_to(
                                RichText::new(LINK_TEXT).color(Color32::LIGHT_BLUE),
                                &node.url,
                            );
                        }
                    });
            });

        close
    }
}
