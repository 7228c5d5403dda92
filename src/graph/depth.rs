use super::model::Hierarchy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedDepth {
    pub depth: u32,
    /// The walk stopped at `max_depth` while parents were still recorded.
    pub clamped: bool,
}

/// Counts parent hops from `id` up to its root, stopping at `max_depth`.
///
/// The bound also guards against cyclic parent maps: a cycle is walked until the
/// counter hits `max_depth` and reported as clamped instead of looping forever.
pub fn resolve_depth(hierarchy: &Hierarchy, id: &str, max_depth: u32) -> ResolvedDepth {
    let mut depth = 0u32;
    let mut current = id;

    while let Some(parent) = hierarchy.parent_of(current) {
        if depth >= max_depth {
            return ResolvedDepth {
                depth,
                clamped: true,
            };
        }
        current = parent;
        depth += 1;
    }

    ResolvedDepth {
        depth,
        clamped: false,
    }
}

/// Depth for every node, index-aligned with `hierarchy.nodes()`.
///
/// Depths fixed at construction are taken as-is; the rest are resolved from parents.
pub fn resolve_depths(hierarchy: &Hierarchy, max_depth: u32) -> Vec<ResolvedDepth> {
    hierarchy
        .nodes()
        .iter()
        .map(|node| match node.fixed_depth {
            Some(depth) => ResolvedDepth {
                depth,
                clamped: false,
            },
            None => {
                let resolved = resolve_depth(hierarchy, &node.id, max_depth);
                if resolved.clamped {
                    tracing::debug!(
                        id = %node.id,
                        max_depth,
                        "parent chain clamped at palette bound"
                    );
                }
                resolved
            }
        })
        .collect()
}
