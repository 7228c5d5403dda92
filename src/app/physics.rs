use eframe::egui::{Vec2, vec2};

use super::{RenderGraph, RenderNode};

const LINK_DISTANCE: f32 = 150.0;
const LINK_STRENGTH: f32 = 0.04;
const CHARGE_STRENGTH: f32 = 200.0;
const CHARGE_ALPHA: f32 = 0.3;
const CHARGE_SOFTENING: f32 = 400.0;
const LEAF_COLLISION_RADIUS: f32 = 60.0;
const BRANCH_COLLISION_RADIUS: f32 = 80.0;
const COLLISION_STRENGTH: f32 = 0.5;
const CENTER_PULL: f32 = 0.004;
const VELOCITY_DAMPING: f32 = 0.82;
const MAX_SPEED: f32 = 24.0;

fn collision_radius(node: &RenderNode) -> f32 {
    if node.depth >= 3 {
        LEAF_COLLISION_RADIUS
    } else {
        BRANCH_COLLISION_RADIUS
    }
}

/// One relaxation tick: link springs, charge repulsion, collision and a weak centering pull.
///
/// Pinned nodes (the one being dragged) feel no force. Returns whether anything still moves.
pub(super) fn step_physics(graph: &mut RenderGraph, delta_seconds: f32) -> bool {
    let node_count = graph.nodes.len();
    if node_count < 2 {
        return false;
    }

    let forces = &mut graph.scratch_forces;
    forces.clear();
    forces.resize(node_count, Vec2::ZERO);

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let delta = graph.nodes[i].world_pos - graph.nodes[j].world_pos;
            let distance_sq = delta.length_sq();
            let distance = distance_sq.sqrt();
            let direction = if distance > 0.0001 {
                delta / distance
            } else {
                let angle = ((i + j) as f32 * 0.618_034) * std::f32::consts::TAU;
                vec2(angle.cos(), angle.sin())
            };

            let charge = direction
                * (CHARGE_STRENGTH * CHARGE_ALPHA / (distance_sq + CHARGE_SOFTENING).sqrt());
            forces[i] += charge;
            forces[j] -= charge;

            let min_distance =
                collision_radius(&graph.nodes[i]) + collision_radius(&graph.nodes[j]);
            if distance < min_distance {
                let push = direction * (min_distance - distance) * COLLISION_STRENGTH;
                forces[i] += push;
                forces[j] -= push;
            }
        }
    }

    for &(from, to) in &graph.edges {
        if from >= node_count || to >= node_count || from == to {
            continue;
        }

        let delta = graph.nodes[from].world_pos - graph.nodes[to].world_pos;
        let distance = delta.length();
        if distance <= 0.0001 {
            continue;
        }
        let correction = delta / distance * (distance - LINK_DISTANCE) * LINK_STRENGTH;
        forces[from] -= correction;
        forces[to] += correction;
    }

    let time_step_scale = (delta_seconds * 60.0).clamp(0.25, 3.0);
    let damping_factor = VELOCITY_DAMPING.powf(time_step_scale);
    let max_speed_sq = MAX_SPEED * MAX_SPEED;
    let mut any_motion = false;

    for (node, force) in graph.nodes.iter_mut().zip(forces.iter()) {
        if node.pinned {
            node.velocity = Vec2::ZERO;
            continue;
        }

        let force = *force - node.world_pos * CENTER_PULL;
        let mut velocity = (node.velocity + force * time_step_scale) * damping_factor;
        let speed_sq = velocity.length_sq();
        if speed_sq > max_speed_sq {
            velocity *= MAX_SPEED / speed_sq.sqrt();
        }
        if velocity.length_sq() < 0.01 * 0.01 {
            velocity = Vec2::ZERO;
        } else {
            any_motion = true;
        }

        node.velocity = velocity;
        node.world_pos += velocity * time_step_scale;
    }

    any_motion
}
