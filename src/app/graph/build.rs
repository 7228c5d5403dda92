use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use mycelial_net::graph::{GraphData, GraphNode};

use super::super::{RenderGraph, RenderNode, ViewModel};

fn seed_position(node: &GraphNode) -> Vec2 {
    vec2(node.position.x as f32, node.position.y as f32)
}

impl ViewModel {
    pub(in crate::app) fn new(graph: GraphData) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| RenderNode {
                world_pos: seed_position(node),
                velocity: Vec2::ZERO,
                depth: node.depth,
                pinned: false,
            })
            .collect::<Vec<_>>();

        let edges = {
            let index_by_id = graph
                .nodes
                .iter()
                .enumerate()
                .map(|(index, node)| (node.id.as_str(), index))
                .collect::<HashMap<_, _>>();
            graph
                .links
                .iter()
                .filter_map(|link| {
                    let source = *index_by_id.get(link.source.as_str())?;
                    let target = *index_by_id.get(link.target.as_str())?;
                    Some((source, target))
                })
                .collect::<Vec<_>>()
        };

        Self {
            graph,
            render: RenderGraph {
                nodes,
                edges,
                scratch_forces: Vec::new(),
            },
            pan: Vec2::ZERO,
            zoom: 0.6,
            search: String::new(),
            search_matches: None,
            selected: None,
            dragging: None,
            live_physics: true,
        }
    }

    /// Puts every node back on its concentric seed position.
    pub(in crate::app) fn reseed_layout(&mut self) {
        for (render_node, node) in self.render.nodes.iter_mut().zip(&self.graph.nodes) {
            render_node.world_pos = seed_position(node);
            render_node.velocity = Vec2::ZERO;
            render_node.pinned = false;
        }
        self.dragging = None;
    }

    pub(in crate::app) fn node_count(&self) -> usize {
        self.graph.nodes.len()
    }

    pub(in crate::app) fn edge_count(&self) -> usize {
        self.render.edges.len()
    }

    #[cfg(test)]
    pub(in crate::app) fn index_of(&self, id: &str) -> Option<usize> {
        self.graph.nodes.iter().position(|node| node.id == id)
    }
}

#[cfg(test)]
mod tests {
    use mycelial_net::config::{GraphConfig, ViewMode};
    use mycelial_net::graph::build_graph;

    use super::*;

    fn model() -> ViewModel {
        let rows = [["Node", "Parent"], ["A", ""], ["B", "A"], ["C", "A"]]
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_owned()).collect())
            .collect::<Vec<Vec<String>>>();
        ViewModel::new(build_graph(&rows, ViewMode::Industry, &GraphConfig::default()))
    }

    #[test]
    fn render_graph_mirrors_links() {
        let model = model();
        assert_eq!(model.node_count(), 3);
        let a = model.index_of("A").unwrap();
        let b = model.index_of("B").unwrap();
        assert!(model.render.edges.contains(&(a, b)));
        assert_eq!(model.edge_count(), 2);
    }

    #[test]
    fn reseed_restores_layout_positions() {
        let mut model = model();
        let b = model.index_of("B").unwrap();
        let seeded = model.render.nodes[b].world_pos;
        model.render.nodes[b].world_pos += vec2(500.0, -20.0);
        model.reseed_layout();
        assert_eq!(model.render.nodes[b].world_pos, seeded);
        assert_eq!(seeded, vec2(300.0, 0.0));
    }
}
