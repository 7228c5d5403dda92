use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::config::LayoutParams;
use crate::graph::Position;
use crate::util::stable_pair;

/// Seeds positions on concentric rings, one ring per depth.
///
/// Nodes keep their input order within a ring. Ring `d` has radius
/// `d * ring_spacing`, so depth-0 nodes sit on the origin. The angular step is
/// `layer_angular_factor * PI / ring_len + angular_offset`; factors other than 2
/// wrap past or stop short of a full turn. When `z_spread` is set,
/// `z` is a per-id stable offset in `[-z_spread / 2, z_spread / 2]`.
pub fn concentric_layout(
    node_ids: &[String],
    depths: &[u32],
    params: &LayoutParams,
) -> Vec<Position> {
    let n = node_ids.len().min(depths.len());
    let mut positions = vec![
        Position {
            x: 0.0,
            y: 0.0,
            z: None,
        };
        n
    ];

    let mut layers: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    for (index, &depth) in depths.iter().enumerate().take(n) {
        layers.entry(depth).or_default().push(index);
    }

    for (depth, layer) in &layers {
        let radius = f64::from(*depth) * params.ring_spacing;
        let angular_step = (params.layer_angular_factor * PI) / layer.len() as f64
            + params.angular_offset;

        for (slot, &index) in layer.iter().enumerate() {
            let angle = slot as f64 * angular_step;
            let z = params.z_spread.map(|spread| {
                let (jitter, _) = stable_pair(&node_ids[index]);
                jitter * spread / 2.0
            });
            positions[index] = Position {
                x: radius * angle.cos(),
                y: radius * angle.sin(),
                z,
            };
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("node-{index}")).collect()
    }

    #[test]
    fn rings_match_depth_times_spacing() {
        let params = LayoutParams::default();
        let depths = [0, 1, 1, 1, 2, 2, 3];
        let positions = concentric_layout(&ids(depths.len()), &depths, &params);

        for (position, depth) in positions.iter().zip(depths) {
            let expected = f64::from(depth) * params.ring_spacing;
            assert!((position.radius() - expected).abs() < 1e-6);
            assert_eq!(position.z, None);
        }
    }

    #[test]
    fn roots_collapse_to_origin() {
        let depths = [0, 0, 0];
        let positions = concentric_layout(&ids(3), &depths, &LayoutParams::default());
        for position in positions {
            assert_eq!(position.x, 0.0);
            assert_eq!(position.y, 0.0);
        }
    }

    #[test]
    fn angles_follow_order_within_a_ring() {
        let params = LayoutParams {
            ring_spacing: 10.0,
            layer_angular_factor: 2.0,
            angular_offset: 0.0,
            z_spread: None,
        };
        let depths = [1, 1, 1, 1];
        let positions = concentric_layout(&ids(4), &depths, &params);

        let expected = [(10.0, 0.0), (0.0, 10.0), (-10.0, 0.0), (0.0, -10.0)];
        for (position, (x, y)) in positions.iter().zip(expected) {
            assert!((position.x - x).abs() < 1e-9);
            assert!((position.y - y).abs() < 1e-9);
        }
    }

    #[test]
    fn first_node_of_each_ring_sits_on_the_x_axis() {
        let depths = [2, 1, 2];
        let positions = concentric_layout(&ids(3), &depths, &LayoutParams::default());
        assert!((positions[1].x - 300.0).abs() < 1e-9);
        assert!((positions[0].x - 600.0).abs() < 1e-9);
        assert!(positions[0].y.abs() < 1e-9);
    }

    #[test]
    fn volumetric_z_is_bounded_and_stable() {
        let params = LayoutParams::volumetric();
        let depths = [0, 1, 2, 3, 3];
        let first = concentric_layout(&ids(5), &depths, &params);
        let second = concentric_layout(&ids(5), &depths, &params);
        assert_eq!(first, second);

        for position in first {
            let z = position.z.unwrap();
            assert!(z.abs() <= LayoutParams::VOLUMETRIC_Z_SPREAD / 2.0);
        }
    }

    #[test]
    fn empty_input_yields_no_positions() {
        assert!(concentric_layout(&[], &[], &LayoutParams::default()).is_empty());
    }
}
