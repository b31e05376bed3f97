use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use crate::library::{Entry, Link, MediaType, Verdict};
use crate::util::stable_pair;

pub(in crate::app) const NODE_RADIUS: f32 = 18.0;
const LOVED_RADIUS_BOOST: f32 = 1.2;
const GOLDEN_ANGLE: f32 = 2.399;
const JITTER_SCALE: f32 = 12.0;

pub(in crate::app) fn node_radius(verdict: Verdict) -> f32 {
    if verdict == Verdict::Loved {
        NODE_RADIUS * LOVED_RADIUS_BOOST
    } else {
        NODE_RADIUS
    }
}

pub(in crate::app) struct GraphNode {
    pub(in crate::app) id: String,
    pub(in crate::app) title: String,
    pub(in crate::app) creator: Option<String>,
    pub(in crate::app) media_type: MediaType,
    pub(in crate::app) verdict: Verdict,
    pub(in crate::app) pos: Vec2,
    pub(in crate::app) vel: Vec2,
    pub(in crate::app) radius: f32,
}

/// Id-keyed arena of simulation state. Rebuilt by diffing id sets, so nodes
/// that survive a rebuild keep their position and velocity.
#[derive(Default)]
pub(in crate::app) struct NodeStore {
    nodes: Vec<GraphNode>,
    index_by_id: HashMap<String, usize>,
    revision: u64,
}

fn spiral_position(index: usize, id: &str, center: Vec2) -> Vec2 {
    let angle = index as f32 * GOLDEN_ANGLE;
    let radius = 60.0 + (index as f32).sqrt() * 80.0;
    let (jx, jy) = stable_pair(id);
    center + vec2(angle.cos(), angle.sin()) * radius + vec2(jx, jy) * JITTER_SCALE
}

impl NodeStore {
    pub(in crate::app) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(in crate::app) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(in crate::app) fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub(in crate::app) fn nodes_mut(&mut self) -> &mut [GraphNode] {
        &mut self.nodes
    }

    pub(in crate::app) fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Bumped whenever the id set changes; used to invalidate caches keyed
    /// on the node population.
    pub(in crate::app) fn revision(&self) -> u64 {
        self.revision
    }

    pub(in crate::app) fn rebuild(&mut self, entries: &[Entry], center: Vec2) {
        let mut prior = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect::<HashMap<_, _>>();

        let mut changed = false;
        let mut next = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if let Some(mut node) = prior.remove(&entry.id) {
                node.title = entry.title.clone();
                node.creator = entry.creator.clone();
                node.media_type = entry.media_type;
                node.verdict = entry.verdict;
                node.radius = node_radius(entry.verdict);
                next.push(node);
            } else {
                changed = true;
                next.push(GraphNode {
                    id: entry.id.clone(),
                    title: entry.title.clone(),
                    creator: entry.creator.clone(),
                    media_type: entry.media_type,
                    verdict: entry.verdict,
                    pos: spiral_position(index, &entry.id, center),
                    vel: Vec2::ZERO,
                    radius: node_radius(entry.verdict),
                });
            }
        }
        if !prior.is_empty() {
            changed = true;
        }

        self.nodes = next;
        self.index_by_id = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect();
        if changed {
            self.revision = self.revision.wrapping_add(1);
        }
    }

    /// Resolve raw links into deduplicated index pairs. Self-loops and links
    /// naming unknown ids are skipped.
    pub(in crate::app) fn resolve_edges(&self, links: &[Link]) -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(links.len());
        for link in links {
            let (Some(a), Some(b)) = (self.index_of(&link.a), self.index_of(&link.b)) else {
                continue;
            };
            if a == b {
                continue;
            }
            edges.push((a.min(b), a.max(b)));
        }
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    /// Closest node whose circle contains the given world point.
    pub(in crate::app) fn hit_test(&self, world: Vec2) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let distance = (node.pos - world).length();
                if distance <= node.radius {
                    Some((index, distance))
                } else {
                    None
                }
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
