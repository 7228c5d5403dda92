mod depth;
mod hierarchy;
mod model;
mod palette;
mod pipeline;

pub use depth::{ResolvedDepth, resolve_depth, resolve_depths};
pub use hierarchy::{build_country, build_industry, category_key};
pub use model::{BuildStats, GraphData, GraphEdge, GraphNode, Hierarchy, HierarchyNode, Position};
pub use palette::{Palette, parse_hex_color};
pub use pipeline::{annotate, build_graph, build_hierarchy, fetch_graph};
