use std::collections::HashMap;

use serde::Serialize;

use crate::config::ViewMode;

/// Node as produced by the hierarchy builder, before any annotation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HierarchyNode {
    pub id: String,
    pub label: String,
    pub description: String,
    pub tooltip: String,
    pub url: String,
    /// Depth decided during construction (Country mode); `None` means resolve it from parents.
    pub fixed_depth: Option<u32>,
}

impl HierarchyNode {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Nodes and edges of one build. Read-only once the builder returns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hierarchy {
    pub(super) view_mode: ViewMode,
    pub(super) nodes: Vec<HierarchyNode>,
    pub(super) edges: Vec<GraphEdge>,
    pub(super) parents: HashMap<String, String>,
    pub(super) index_by_id: HashMap<String, usize>,
    pub(super) rows_used: usize,
}

impl Hierarchy {
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn nodes(&self) -> &[HierarchyNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node(&self, id: &str) -> Option<&HierarchyNode> {
        self.index_by_id.get(id).map(|&index| &self.nodes[index])
    }

    /// Parent recorded for `id` in Industry mode.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.parents.get(id).map(String::as_str)
    }

    pub fn rows_used(&self) -> usize {
        self.rows_used
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl Position {
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Fully annotated node handed to the renderer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub description: String,
    pub tooltip: String,
    pub url: String,
    pub depth: u32,
    pub color: String,
    #[serde(flatten)]
    pub position: Position,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub nodes: usize,
    pub edges: usize,
    pub depth_clamped: usize,
}

/// Renderer payload: annotated nodes plus links.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GraphData {
    pub view_mode: ViewMode,
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphEdge>,
    pub stats: BuildStats,
}

impl GraphData {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}
