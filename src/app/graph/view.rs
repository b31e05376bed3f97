use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Rect, Response, Sense, Ui, Vec2};

use crate::library::{Entry, Link};

use super::gestures::{GestureController, PointerEvent};
use super::paint::{paint_background, paint_scene};
use super::physics::{self, PhysicsConfig};
use super::scene::{SceneParams, build_scene, search_matches};
use super::store::NodeStore;
use super::transform::Transform;

pub(crate) struct MindmapResponse {
    pub(crate) selected: Option<String>,
}

struct SearchMatchCache {
    query: String,
    store_revision: u64,
    matches: Arc<HashSet<usize>>,
}

/// The mind-map widget: node store, camera and gesture state for one view.
/// Fed entries, links and the search term every frame; reports a node
/// selection when a click lands on a node.
pub(crate) struct MindmapView {
    store: NodeStore,
    transform: Transform,
    gestures: GestureController,
    hovered: Option<usize>,
    search_match_cache: Option<SearchMatchCache>,
    last_center: Vec2,
    pub(in crate::app) live_physics: bool,
    pub(in crate::app) physics_intensity: f32,
    pub(in crate::app) physics_damping: f32,
}

impl Default for MindmapView {
    fn default() -> Self {
        Self {
            store: NodeStore::default(),
            transform: Transform::default(),
            gestures: GestureController::default(),
            hovered: None,
            search_match_cache: None,
            last_center: Vec2::new(640.0, 360.0),
            live_physics: true,
            physics_intensity: 1.0,
            physics_damping: 0.86,
        }
    }
}

impl MindmapView {
    pub(in crate::app) fn reset_view(&mut self) {
        self.transform = Transform::default();
    }

    pub(in crate::app) fn node_count(&self) -> usize {
        self.store.len()
    }

    /// Run the layout outside the frame loop until it is visually calm.
    pub(in crate::app) fn settle(&mut self, entries: &[Entry], links: &[Link], steps: usize) {
        self.store.rebuild(entries, self.last_center);
        let edges = self.store.resolve_edges(links);
        physics::step_n(&mut self.store, &edges, self.last_center, steps);
    }

    pub(crate) fn ui(
        &mut self,
        ui: &mut Ui,
        entries: &[Entry],
        links: &[Link],
        search: &str,
        selected: Option<&str>,
    ) -> MindmapResponse {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        // World coordinates coincide with the viewport at identity transform,
        // so the surface midpoint doubles as the gravity center and the
        // spiral origin. Re-read every frame to absorb resizes.
        let center = Vec2::new(rect.width(), rect.height()) * 0.5;
        self.last_center = center;

        self.store.rebuild(entries, center);
        let edges = self.store.resolve_edges(links);

        let mut clicked = None;
        for event in gather_pointer_events(ui, rect, &response) {
            if let Some(index) = self.gestures.handle(event, &mut self.transform, &mut self.store) {
                clicked = self.store.nodes().get(index).map(|node| node.id.clone());
            }
        }

        self.hovered = response
            .hover_pos()
            .map(|pos| pos - rect.min.to_vec2())
            .and_then(|pos| self.store.hit_test(self.transform.to_world(pos)));
        if self.hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        if self.live_physics {
            let delta_seconds = ui
                .ctx()
                .input(|input| input.stable_dt)
                .clamp(1.0 / 240.0, 1.0 / 20.0);
            physics::step(
                &mut self.store,
                &edges,
                center,
                self.gestures.dragged_index(),
                PhysicsConfig {
                    intensity: self.physics_intensity,
                    damping: self.physics_damping,
                    delta_seconds,
                },
            );
        }

        // The layout is deliberately never at rest, so keep the frame loop
        // running for as long as the view is alive.
        if self.live_physics || self.gestures.is_active() {
            ui.ctx().request_repaint();
        }

        let matches = self.cached_search_matches(search);
        let scene_params = SceneParams {
            transform: self.transform,
            hovered: self.hovered,
            selected: selected.and_then(|id| self.store.index_of(id)),
            matches: matches.as_deref(),
        };
        let commands = build_scene(&self.store, &edges, &scene_params);

        paint_background(&painter, rect, &self.transform);
        paint_scene(&painter, rect, &commands);

        MindmapResponse { selected: clicked }
    }

    fn cached_search_matches(&mut self, search: &str) -> Option<Arc<HashSet<usize>>> {
        let query = search.trim();
        if query.is_empty() {
            self.search_match_cache = None;
            return None;
        }

        if let Some(cache) = &self.search_match_cache
            && cache.query == query
            && cache.store_revision == self.store.revision()
        {
            return Some(Arc::clone(&cache.matches));
        }

        let matches = Arc::new(search_matches(&self.store, query));
        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            store_revision: self.store.revision(),
            matches: Arc::clone(&matches),
        });
        Some(matches)
    }
}

/// Adapter from egui's input to the gesture layer's pointer vocabulary.
/// Mouse and touch presses arrive as the same pointer events; wheel and
/// two-finger pinch map onto the zoom events.
fn gather_pointer_events(ui: &Ui, rect: Rect, response: &Response) -> Vec<PointerEvent> {
    let origin = rect.min.to_vec2();
    let mut events = Vec::new();

    ui.input(|input| {
        for event in &input.events {
            match event {
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if *pressed {
                        if rect.contains(*pos) {
                            events.push(PointerEvent::Down(*pos - origin));
                        }
                    } else {
                        events.push(PointerEvent::Up);
                    }
                }
                egui::Event::PointerMoved(pos) => {
                    events.push(PointerEvent::Move(*pos - origin));
                }
                egui::Event::PointerGone => {
                    events.push(PointerEvent::Up);
                }
                _ => {}
            }
        }

        if response.hovered() {
            let scroll = input.raw_scroll_delta.y;
            if scroll.abs() > f32::EPSILON
                && let Some(pos) = input.pointer.hover_pos()
                && rect.contains(pos)
            {
                events.push(PointerEvent::Wheel {
                    pos: pos - origin,
                    delta: scroll,
                });
            }
        }

        if let Some(touch) = input.multi_touch()
            && rect.contains(touch.center_pos)
        {
            events.push(PointerEvent::Pinch {
                anchor: touch.center_pos - origin,
                factor: touch.zoom_delta,
                translation: touch.translation_delta,
            });
        }
    });

    events
}
