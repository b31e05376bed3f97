use eframe::egui::{Vec2, vec2};

use super::store::NodeStore;

/// Two nodes closer than this multiple of their combined radii repel.
pub(in crate::app) const REPULSION_RADIUS_FACTOR: f32 = 3.5;
/// Separation a link spring pulls its endpoints toward.
pub(in crate::app) const LINK_TARGET_DISTANCE: f32 = 160.0;

const REPULSION_STRENGTH: f32 = 0.4;
const SPRING_STRENGTH: f32 = 0.06;
const CENTER_PULL: f32 = 0.0012;
const MAX_FORCE: f32 = 80.0;
const MAX_SPEED: f32 = 26.0;

#[derive(Clone, Copy)]
pub(in crate::app) struct PhysicsConfig {
    pub(in crate::app) intensity: f32,
    pub(in crate::app) damping: f32,
    pub(in crate::app) delta_seconds: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            damping: 0.86,
            delta_seconds: 1.0 / 60.0,
        }
    }
}

/// Separation distance and unit direction from `b` to `a`. Coincident points
/// are treated as distance 1 along a deterministic direction so NaN can never
/// enter the simulation.
fn separation(a: Vec2, b: Vec2, ia: usize, ib: usize) -> (f32, Vec2) {
    let delta = a - b;
    let distance = delta.length();
    if distance < 1e-4 {
        let angle = ((ia as f32) * 0.618_034 + (ib as f32) * 0.414_214) * std::f32::consts::TAU;
        (1.0, vec2(angle.cos(), angle.sin()))
    } else {
        (distance, delta / distance)
    }
}

/// Advance the simulation one step. Forces are accumulated in the order
/// repulsion, link springs, center gravity, then integrated with damping.
/// The dragged node, if any, is pinned for the duration of the step.
pub(in crate::app) fn step(
    store: &mut NodeStore,
    edges: &[(usize, usize)],
    center: Vec2,
    dragged: Option<usize>,
    config: PhysicsConfig,
) -> bool {
    let node_count = store.len();
    if node_count < 2 {
        return false;
    }

    let intensity = config.intensity.clamp(0.2, 2.5);
    let repulsion_strength = REPULSION_STRENGTH * intensity;
    let spring_strength = SPRING_STRENGTH * intensity;
    let time_step = (config.delta_seconds * 60.0).clamp(0.25, 3.0);
    let damping_factor = config.damping.clamp(0.5, 0.98).powf(time_step);

    let mut forces = vec![Vec2::ZERO; node_count];
    let nodes = store.nodes_mut();

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let (distance, direction) = separation(nodes[i].pos, nodes[j].pos, i, j);
            let threshold = REPULSION_RADIUS_FACTOR * (nodes[i].radius + nodes[j].radius);
            if distance < threshold {
                let push = (threshold - distance) * repulsion_strength;
                forces[i] += direction * push;
                forces[j] -= direction * push;
            }
        }
    }

    for &(a, b) in edges {
        if a >= node_count || b >= node_count || a == b {
            continue;
        }
        let (distance, direction) = separation(nodes[a].pos, nodes[b].pos, a, b);
        let pull = (distance - LINK_TARGET_DISTANCE) * spring_strength;
        forces[a] -= direction * pull;
        forces[b] += direction * pull;
    }

    for (index, force) in forces.iter_mut().enumerate() {
        *force -= (nodes[index].pos - center) * CENTER_PULL;
    }

    let mut any_motion = false;
    for (index, force) in forces.into_iter().enumerate() {
        if dragged == Some(index) {
            nodes[index].vel = Vec2::ZERO;
            continue;
        }

        let mut force = force;
        let force_sq = force.length_sq();
        if force_sq > MAX_FORCE * MAX_FORCE {
            force *= MAX_FORCE / force_sq.sqrt();
        }

        let mut velocity = (nodes[index].vel + force * time_step) * damping_factor;
        let speed_sq = velocity.length_sq();
        if speed_sq > MAX_SPEED * MAX_SPEED {
            velocity *= MAX_SPEED / speed_sq.sqrt();
        }

        nodes[index].vel = velocity;
        nodes[index].pos += velocity * time_step;
        if velocity.length_sq() > 1e-6 {
            any_motion = true;
        }
    }

    any_motion
}

/// Run `steps` fixed-timestep iterations outside the frame loop, for
/// pre-settling a fresh layout and for timing-independent tests.
pub(in crate::app) fn step_n(
    store: &mut NodeStore,
    edges: &[(usize, usize)],
    center: Vec2,
    steps: usize,
) {
    let config = PhysicsConfig::default();
    for _ in 0..steps {
        step(store, edges, center, None, config);
    }
}
