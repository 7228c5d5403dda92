use eframe::egui::{self, PointerButton, Pos2, Rect, Ui};

use super::super::ViewModel;
use super::super::render_utils::{screen_to_world, world_to_screen};

/// Radius of the disc drawn for roots and first-level nodes, in world units.
pub(in crate::app) const HUB_RADIUS: f32 = 20.0;
const LABEL_HIT_RADIUS: f32 = 14.0;

pub(in crate::app) fn hit_radius(depth: u32) -> f32 {
    if depth <= 1 { HUB_RADIUS } else { LABEL_HIT_RADIUS }
}

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.05, 6.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    /// Primary drag moves the grabbed node, or pans when it started on empty space.
    pub(in crate::app) fn handle_graph_drag(&mut self, rect: Rect, response: &egui::Response) {
        if response.drag_started_by(PointerButton::Primary) {
            self.dragging = response
                .interact_pointer_pos()
                .and_then(|pointer| self.node_at(rect, pointer));
            if let Some(index) = self.dragging {
                self.render.nodes[index].pinned = true;
            }
        }

        match self.dragging {
            Some(index) if response.dragged_by(PointerButton::Primary) => {
                if let Some(pointer) = response.interact_pointer_pos() {
                    self.render.nodes[index].world_pos =
                        screen_to_world(rect, self.pan, self.zoom, pointer);
                }
            }
            None if response.dragged() => {
                self.pan += response.drag_delta();
            }
            _ => {}
        }

        if response.drag_stopped()
            && let Some(index) = self.dragging.take()
        {
            self.render.nodes[index].pinned = false;
        }
    }

    /// Clicking a node with a tooltip opens it; clicking anything else closes it.
    pub(in crate::app) fn handle_graph_click(&mut self, rect: Rect, response: &egui::Response) {
        if !response.clicked() {
            return;
        }

        self.selected = response
            .interact_pointer_pos()
            .and_then(|pointer| self.tooltip_node_at(rect, pointer));
    }

    pub(in crate::app) fn handle_graph_hover(
        &self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if self.dragging.is_some() {
            return;
        }
        if response
            .hover_pos()
            .and_then(|pointer| self.tooltip_node_at(rect, pointer))
            .is_some()
        {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ZoomIn);
        }
    }

    fn tooltip_node_at(&self, rect: Rect, pointer: Pos2) -> Option<usize> {
        self.node_at(rect, pointer)
            .filter(|&index| !self.graph.nodes[index].tooltip.trim().is_empty())
    }

    /// Topmost node under `pointer`: the closest one within its hit radius.
    pub(in crate::app) fn node_at(&self, rect: Rect, pointer: Pos2) -> Option<usize> {
        self.render
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let screen = world_to_screen(rect, self.pan, self.zoom, node.world_pos);
                let distance = screen.distance(pointer);
                let radius = (hit_radius(node.depth) * self.zoom).max(6.0);
                (distance <= radius).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};
    use mycelial_net::config::{GraphConfig, ViewMode};
    use mycelial_net::graph::build_graph;

    use super::*;

    #[test]
    fn node_at_finds_closest_node() {
        let rows = [["Node", "Parent"], ["A", ""], ["B", "A"]]
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_owned()).collect())
            .collect::<Vec<Vec<String>>>();
        let mut model =
            ViewModel::new(build_graph(&rows, ViewMode::Industry, &GraphConfig::default()));
        model.zoom = 1.0;
        let rect = Rect::from_center_size(Pos2::ZERO, vec2(2000.0, 2000.0));

        assert_eq!(model.node_at(rect, pos2(3.0, 0.0)), model.index_of("A"));
        assert_eq!(model.node_at(rect, pos2(298.0, 4.0)), model.index_of("B"));
        assert_eq!(model.node_at(rect, pos2(150.0, 150.0)), None);
    }

    #[test]
    fn only_nodes_with_tooltips_are_selectable() {
        let rows = [
            ["Node", "Parent", "", "", "", "", "", "Tooltip"],
            ["A", "", "", "", "", "", "", ""],
            ["B", "A", "", "", "", "", "", "about B"],
        ]
        .iter()
        .map(|row| row.iter().map(|cell| (*cell).to_owned()).collect())
        .collect::<Vec<Vec<String>>>();
        let mut model =
            ViewModel::new(build_graph(&rows, ViewMode::Industry, &GraphConfig::default()));
        model.zoom = 1.0;
        let rect = Rect::from_center_size(Pos2::ZERO, vec2(2000.0, 2000.0));

        assert_eq!(model.tooltip_node_at(rect, pos2(0.0, 0.0)), None);
        assert_eq!(
            model.tooltip_node_at(rect, pos2(300.0, 0.0)),
            model.index_of("B")
        );
    }
}
