use crate::config::{GraphConfig, ViewMode};
use crate::layout::concentric_layout;
use crate::sheet::{FetchError, RowSource, normalize_rows};

use super::depth::resolve_depths;
use super::hierarchy::{build_country, build_industry};
use super::model::{BuildStats, GraphData, GraphNode, Hierarchy};

/// Normalizes `rows` and builds the hierarchy for `view_mode`.
///
/// Returns the hierarchy together with the number of rows dropped on the way.
pub fn build_hierarchy(
    rows: &[Vec<String>],
    view_mode: ViewMode,
    config: &GraphConfig,
) -> (Hierarchy, usize) {
    match view_mode {
        ViewMode::Industry => {
            let normalized = normalize_rows(rows, |row| config.industry_columns.normalize(row));
            (build_industry(&normalized.rows), normalized.skipped)
        }
        ViewMode::Country => {
            let normalized = normalize_rows(rows, |row| config.country_columns.normalize(row));
            let hierarchy = build_country(&normalized.rows, &config.root_id);
            let filtered = normalized.rows.len() - hierarchy.rows_used();
            (hierarchy, normalized.skipped + filtered)
        }
    }
}

/// Runs every stage over one dataset: rows in, renderer payload out.
pub fn build_graph(rows: &[Vec<String>], view_mode: ViewMode, config: &GraphConfig) -> GraphData {
    let (hierarchy, rows_skipped) = build_hierarchy(rows, view_mode, config);
    annotate(&hierarchy, rows.len().saturating_sub(1), rows_skipped, config)
}

/// Fetches one table from `source` and runs the full pipeline over it.
pub fn fetch_graph(
    source: &dyn RowSource,
    view_mode: ViewMode,
    config: &GraphConfig,
) -> Result<GraphData, FetchError> {
    let rows = source.fetch_rows(view_mode)?;
    Ok(build_graph(&rows, view_mode, config))
}

/// Adds depth, color and seed position to every node of `hierarchy`.
pub fn annotate(
    hierarchy: &Hierarchy,
    rows_read: usize,
    rows_skipped: usize,
    config: &GraphConfig,
) -> GraphData {
    let depths = resolve_depths(hierarchy, config.palette.max_depth());
    let depth_values = depths.iter().map(|resolved| resolved.depth).collect::<Vec<_>>();
    let node_ids = hierarchy
        .nodes()
        .iter()
        .map(|node| node.id.clone())
        .collect::<Vec<_>>();
    let positions = concentric_layout(&node_ids, &depth_values, &config.layout);

    let nodes = hierarchy
        .nodes()
        .iter()
        .zip(depth_values.iter().zip(positions))
        .map(|(node, (&depth, position))| GraphNode {
            id: node.id.clone(),
            label: node.label.clone(),
            description: node.description.clone(),
            tooltip: node.tooltip.clone(),
            url: node.url.clone(),
            depth,
            color: config.palette.color(depth).to_owned(),
            position,
        })
        .collect::<Vec<_>>();

    let stats = BuildStats {
        rows_read,
        rows_skipped,
        nodes: nodes.len(),
        edges: hierarchy.edges().len(),
        depth_clamped: depths.iter().filter(|resolved| resolved.clamped).count(),
    };
    tracing::info!(
        view_mode = %hierarchy.view_mode(),
        rows = stats.rows_read,
        skipped = stats.rows_skipped,
        nodes = stats.nodes,
        edges = stats.edges,
        clamped = stats.depth_clamped,
        "built graph"
    );

    GraphData {
        view_mode: hierarchy.view_mode(),
        nodes,
        links: hierarchy.edges().to_vec(),
        stats,
    }
}
