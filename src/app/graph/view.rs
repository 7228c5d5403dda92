use std::collections::HashSet;

use eframe::egui::{
    self, Align2, Color32, FontFamily, FontId, Painter, Pos2, Rect, Sense, Stroke, Ui, vec2,
};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use mycelial_net::util::wrap_words;

use super::super::physics::step_physics;
use super::super::render_utils::{
    circle_visible, dim_color, draw_background, node_color, world_to_screen,
};
use super::super::ViewModel;
use super::interaction::HUB_RADIUS;

const LINK_COLOR: Color32 = Color32::from_rgb(200, 200, 200);
const SELECTED_OUTLINE: Color32 = Color32::from_rgb(0x83, 0xff, 0x66);
const HUB_LABEL_CHARS: usize = 10;
const CULL_PADDING: f32 = 160.0;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// Label size in points for a node at `depth`, before zoom.
fn label_size(depth: u32) -> f32 {
    match depth {
        0 => 26.0,
        1 => 12.0,
        2 => 11.5,
        _ => 10.0,
    }
}

impl ViewModel {
    /// The simulation holds still while a tooltip is open.
    fn simulation_running(&self) -> bool {
        self.live_physics && self.selected.is_none()
    }

    fn refresh_search_matches(&mut self) {
        let query = self.search.trim();
        if query.is_empty() {
            self.search_matches = None;
            return;
        }

        if self
            .search_matches
            .as_ref()
            .is_some_and(|(cached, _)| cached == query)
        {
            return;
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .graph
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| {
                fuzzy_match_score(&matcher, &node.label, query).is_some()
                    || fuzzy_match_score(&matcher, &node.id, query).is_some()
            })
            .map(|(index, _)| index)
            .collect::<HashSet<_>>();
        self.search_matches = Some((query.to_owned(), matches));
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect, self.pan, self.zoom);

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_drag(rect, &response);
        self.handle_graph_click(rect, &response);
        self.handle_graph_hover(ui, rect, &response);
        self.refresh_search_matches();

        if self.simulation_running() {
            let delta_seconds = ui
                .ctx()
                .input(|input| input.stable_dt)
                .clamp(1.0 / 240.0, 1.0 / 20.0);
            if step_physics(&mut self.render, delta_seconds) {
                ui.ctx().request_repaint();
            }
        }
        if response.dragged() {
            ui.ctx().request_repaint();
        }

        let matches = self.search_matches.as_ref().map(|(_, matches)| matches);
        let screen_positions = self
            .render
            .nodes
            .iter()
            .map(|node| world_to_screen(rect, self.pan, self.zoom, node.world_pos))
            .collect::<Vec<_>>();

        let link_stroke = Stroke::new((1.2 * self.zoom).clamp(0.5, 2.0), LINK_COLOR);
        for &(from, to) in &self.render.edges {
            let (start, end) = (screen_positions[from], screen_positions[to]);
            if rect.contains(start)
                || rect.contains(end)
                || rect.intersects(Rect::from_two_pos(start, end))
            {
                painter.line_segment([start, end], link_stroke);
            }
        }

        let mut draw_order = (0..self.render.nodes.len()).collect::<Vec<_>>();
        draw_order.sort_by(|a, b| self.render.nodes[*b].depth.cmp(&self.render.nodes[*a].depth));

        for index in draw_order {
            let position = screen_positions[index];
            if !circle_visible(rect, position, CULL_PADDING) {
                continue;
            }

            let dimmed = matches.is_some_and(|matches| !matches.contains(&index));
            let selected = self.selected == Some(index);
            self.draw_node(&painter, index, position, dimmed, selected);
        }

        if let Some(index) = self.selected {
            let anchor = screen_positions[index] + vec2(6.0, 6.0);
            if self.draw_tooltip(ui.ctx(), index, anchor) {
                self.selected = None;
            }
        }
    }

    fn draw_node(
        &self,
        painter: &Painter,
        index: usize,
        position: Pos2,
        dimmed: bool,
        selected: bool,
    ) {
        let node = &self.graph.nodes[index];
        let mut fill = node_color(&node.color);
        if dimmed {
            fill = dim_color(fill, 0.35);
        }
        let text_color = if dimmed { Color32::from_gray(70) } else { Color32::BLACK };
        let font = FontId::new(
            (label_size(node.depth) * self.zoom.clamp(0.5, 2.5)).max(6.0),
            FontFamily::Monospace,
        );

        if node.depth <= 1 {
            let radius = HUB_RADIUS * self.zoom;
            painter.circle_filled(position, radius, fill);
            if selected {
                painter.circle_stroke(position, radius, Stroke::new(1.5, Color32::BLACK));
            }

            let lines = wrap_words(&node.label.to_uppercase(), HUB_LABEL_CHARS);
            let line_height = font.size;
            let top = position.y - (lines.len() as f32 * line_height) / 2.0;
            for (line_index, line) in lines.iter().enumerate() {
                let y = top + (line_index as f32 + 0.5) * line_height;
                painter.text(
                    Pos2::new(position.x, y),
                    Align2::CENTER_CENTER,
                    line,
                    font.clone(),
                    text_color,
                );
            }
        } else {
            let galley = painter.layout_no_wrap(node.label.clone(), font, text_color);
            let background = Rect::from_center_size(position, galley.size() + vec2(4.0, 2.0));
            painter.rect_filled(background, 0.0, fill);
            if selected {
                painter.rect_stroke(
                    background,
                    0.0,
                    Stroke::new(3.0, SELECTED_OUTLINE),
                    egui::StrokeKind::Outside,
                );
            }
            painter.galley(background.min + vec2(2.0, 1.0), galley, text_color);
        }
    }
}
