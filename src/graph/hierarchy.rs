use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::config::ViewMode;
use crate::sheet::{CountryRow, IndustryRow};

use super::model::{GraphEdge, Hierarchy, HierarchyNode};

pub const COUNTRY_DEPTH: u32 = 1;
pub const CATEGORY_DEPTH: u32 = 2;
pub const ENTITY_DEPTH: u32 = 3;

/// Accumulators for a single build. Created and consumed by one call.
struct BuildContext {
    nodes: Vec<HierarchyNode>,
    index_by_id: HashMap<String, usize>,
    edges: Vec<GraphEdge>,
    seen_edges: HashSet<(String, String)>,
    parents: HashMap<String, String>,
}

impl BuildContext {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index_by_id: HashMap::with_capacity(capacity),
            edges: Vec::with_capacity(capacity),
            seen_edges: HashSet::with_capacity(capacity),
            parents: HashMap::new(),
        }
    }

    fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    /// Inserts `node` unless its id already exists; the first write wins.
    fn insert_node(&mut self, node: HierarchyNode) -> bool {
        if self.contains(&node.id) {
            return false;
        }
        self.index_by_id.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    fn insert_edge(&mut self, source: &str, target: &str) {
        if self
            .seen_edges
            .insert((source.to_owned(), target.to_owned()))
        {
            self.edges.push(GraphEdge::new(source, target));
        }
    }

    fn finish(self, view_mode: ViewMode, rows_used: usize) -> Hierarchy {
        Hierarchy {
            view_mode,
            nodes: self.nodes,
            edges: self.edges,
            parents: self.parents,
            index_by_id: self.index_by_id,
            rows_used,
        }
    }
}

/// Parent/child tree. Parents nobody defines become placeholder nodes after the defined ones.
///
/// Node text comes from the first row of an identity; the parent link from the last.
pub fn build_industry(rows: &[IndustryRow]) -> Hierarchy {
    let mut context = BuildContext::with_capacity(rows.len());
    let mut links = Vec::new();

    for row in rows {
        let identity = row.identity();
        let created = context.insert_node(HierarchyNode {
            description: row.description.clone(),
            tooltip: row.tooltip.clone(),
            url: row.url.clone(),
            ..HierarchyNode::new(identity)
        });
        if !created {
            tracing::debug!(id = identity, "duplicate node id; keeping first row");
        }

        if let Some(parent) = &row.parent_id {
            context.parents.insert(identity.to_owned(), parent.clone());
            links.push((parent.as_str(), identity));
        }
    }

    for (parent, child) in links {
        if !context.contains(parent) {
            tracing::debug!(id = parent, "materializing parent without its own row");
            context.insert_node(HierarchyNode::new(parent));
        }
        context.insert_edge(parent, child);
    }

    context.finish(ViewMode::Industry, rows.len())
}

/// Three tiers under a synthetic root: country, country/category, entity.
pub fn build_country(rows: &[CountryRow], root_id: &str) -> Hierarchy {
    let mut context = BuildContext::with_capacity(rows.len() + 1);
    context.insert_node(HierarchyNode {
        fixed_depth: Some(0),
        ..HierarchyNode::new(root_id)
    });

    let mut country_nodes: HashMap<String, String> = HashMap::new();
    let mut category_nodes: HashSet<String> = HashSet::new();
    let mut rows_used = 0usize;

    for row in rows {
        let Some(country) = row.country.as_deref() else {
            tracing::debug!(id = %row.node_id, "skipping row without country");
            continue;
        };
        rows_used += 1;

        let country_id = match country_nodes.entry(country.to_owned()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                let id = row
                    .country_display_name
                    .clone()
                    .unwrap_or_else(|| country.to_owned());
                let created = context.insert_node(HierarchyNode {
                    fixed_depth: Some(COUNTRY_DEPTH),
                    ..HierarchyNode::new(id.as_str())
                });
                if !created {
                    tracing::debug!(
                        %id,
                        "country id already used by another node; keeping its tier"
                    );
                }
                context.insert_edge(root_id, &id);
                entry.insert(id).clone()
            }
        };

        let category_key = category_key(country, &row.category);
        if category_nodes.insert(category_key.clone()) {
            let tooltip = if row.tooltip.is_empty() {
                format!("Category: {}", row.category)
            } else {
                row.tooltip.clone()
            };
            let created = context.insert_node(HierarchyNode {
                label: row.category.clone(),
                tooltip,
                fixed_depth: Some(CATEGORY_DEPTH),
                ..HierarchyNode::new(category_key.as_str())
            });
            if !created {
                tracing::debug!(
                    id = %category_key,
                    "category key already used by another node; keeping its tier"
                );
            }
            context.insert_edge(&country_id, &category_key);
        }

        let created = context.insert_node(HierarchyNode {
            description: row.description.clone(),
            tooltip: row.tooltip.clone(),
            url: row.url.clone(),
            fixed_depth: Some(ENTITY_DEPTH),
            ..HierarchyNode::new(row.node_id.as_str())
        });
        if !created {
            tracing::debug!(id = %row.node_id, "entity id already present; linking existing node");
        }
        context.insert_edge(&category_key, &row.node_id);
    }

    context.finish(ViewMode::Country, rows_used)
}

/// Key of the category node under a raw country value.
pub fn category_key(country: &str, category: &str) -> String {
    format!("{country}-{category}")
}
