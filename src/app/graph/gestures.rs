use eframe::egui::{Pos2, Vec2};

use super::store::NodeStore;
use super::transform::Transform;

/// Pointer travel (in screen pixels) past which a press stops being a click.
pub(in crate::app) const DRAG_THRESHOLD: f32 = 4.0;
const WHEEL_ZOOM_RATE: f32 = 0.0018;

/// Input events after modality adapters (mouse, touch, wheel, pinch) have
/// been collapsed into one vocabulary. Positions are viewport-relative
/// screen coordinates.
#[derive(Clone, Copy, Debug)]
pub(in crate::app) enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up,
    Wheel { pos: Pos2, delta: f32 },
    Pinch { anchor: Pos2, factor: f32, translation: Vec2 },
}

#[derive(Clone, Copy)]
enum Phase {
    Idle,
    PendingNode { index: usize, origin: Pos2 },
    DraggingNode { index: usize, last: Pos2 },
    PendingPan { origin: Pos2 },
    Panning { last: Pos2 },
}

/// One state machine for all pointer modalities. A press either lands on a
/// node (pending click-or-drag) or on the canvas (pending pan); crossing the
/// movement threshold commits the gesture, releasing before it yields a
/// click. Zoom events can arrive in any state.
pub(in crate::app) struct GestureController {
    phase: Phase,
}

impl Default for GestureController {
    fn default() -> Self {
        Self { phase: Phase::Idle }
    }
}

impl GestureController {
    /// Index of the node currently being dragged, so the physics step can
    /// pin it.
    pub(in crate::app) fn dragged_index(&self) -> Option<usize> {
        match self.phase {
            Phase::DraggingNode { index, .. } => Some(index),
            _ => None,
        }
    }

    pub(in crate::app) fn is_active(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Feed one event through the state machine. Returns the index of a
    /// clicked node, at most once per press/release pair.
    pub(in crate::app) fn handle(
        &mut self,
        event: PointerEvent,
        transform: &mut Transform,
        store: &mut NodeStore,
    ) -> Option<usize> {
        match event {
            PointerEvent::Down(pos) => {
                self.phase = match store.hit_test(transform.to_world(pos)) {
                    Some(index) => Phase::PendingNode { index, origin: pos },
                    None => Phase::PendingPan { origin: pos },
                };
                None
            }
            PointerEvent::Move(pos) => {
                match self.phase {
                    Phase::PendingNode { index, origin } => {
                        if (pos - origin).length() > DRAG_THRESHOLD {
                            if let Some(node) = store.nodes_mut().get_mut(index) {
                                node.pos += (pos - origin) / transform.zoom;
                                node.vel = Vec2::ZERO;
                            }
                            self.phase = Phase::DraggingNode { index, last: pos };
                        }
                    }
                    Phase::DraggingNode { index, last } => {
                        if let Some(node) = store.nodes_mut().get_mut(index) {
                            node.pos += (pos - last) / transform.zoom;
                            node.vel = Vec2::ZERO;
                        }
                        self.phase = Phase::DraggingNode { index, last: pos };
                    }
                    Phase::PendingPan { origin } => {
                        if (pos - origin).length() > DRAG_THRESHOLD {
                            transform.pan += pos - origin;
                            self.phase = Phase::Panning { last: pos };
                        }
                    }
                    Phase::Panning { last } => {
                        transform.pan += pos - last;
                        self.phase = Phase::Panning { last: pos };
                    }
                    Phase::Idle => {}
                }
                None
            }
            PointerEvent::Up => {
                let clicked = match self.phase {
                    Phase::PendingNode { index, .. } => Some(index),
                    _ => None,
                };
                self.phase = Phase::Idle;
                clicked
            }
            PointerEvent::Wheel { pos, delta } => {
                let factor = (1.0 + delta * WHEEL_ZOOM_RATE).clamp(0.85, 1.15);
                transform.zoom_at(pos, factor);
                None
            }
            PointerEvent::Pinch { anchor, factor, translation } => {
                transform.zoom_at(anchor, factor);
                transform.pan += translation;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{Entry, MediaType, Status, Verdict};
    use eframe::egui::{pos2, vec2};

    use super::super::transform::{MAX_ZOOM, MIN_ZOOM};

    fn store_with_node_at(world: Vec2) -> NodeStore {
        let entries = [Entry {
            id: "a".to_owned(),
            title: "a".to_owned(),
            creator: None,
            media_type: MediaType::Film,
            verdict: Verdict::Fine,
            status: Status::Finished,
        }];
        let mut store = NodeStore::default();
        store.rebuild(&entries, Vec2::ZERO);
        store.nodes_mut()[0].pos = world;
        store
    }

    #[test]
    fn tap_on_a_node_is_a_click() {
        let mut transform = Transform::default();
        let mut store = store_with_node_at(vec2(100.0, 100.0));
        let mut controller = GestureController::default();

        let down = controller.handle(PointerEvent::Down(pos2(100.0, 100.0)), &mut transform, &mut store);
        assert_eq!(down, None);
        let up = controller.handle(PointerEvent::Up, &mut transform, &mut store);
        assert_eq!(up, Some(0));
    }

    #[test]
    fn sub_threshold_wiggle_is_still_a_click() {
        let mut transform = Transform::default();
        let mut store = store_with_node_at(vec2(100.0, 100.0));
        let mut controller = GestureController::default();

        controller.handle(PointerEvent::Down(pos2(100.0, 100.0)), &mut transform, &mut store);
        controller.handle(PointerEvent::Move(pos2(102.0, 101.0)), &mut transform, &mut store);
        let up = controller.handle(PointerEvent::Up, &mut transform, &mut store);
        assert_eq!(up, Some(0));
    }

    #[test]
    fn drag_moves_the_node_and_suppresses_the_click() {
        let mut transform = Transform {
            pan: Vec2::ZERO,
            zoom: 2.0,
        };
        let mut store = store_with_node_at(vec2(100.0, 100.0));
        let mut controller = GestureController::default();

        // Node center is at screen (200, 200) under 2x zoom.
        controller.handle(PointerEvent::Down(pos2(200.0, 200.0)), &mut transform, &mut store);
        controller.handle(PointerEvent::Move(pos2(210.0, 200.0)), &mut transform, &mut store);
        assert_eq!(controller.dragged_index(), Some(0));
        let up = controller.handle(PointerEvent::Up, &mut transform, &mut store);

        assert_eq!(up, None);
        assert!((store.nodes()[0].pos - vec2(105.0, 100.0)).length() < 1e-3);
        assert_eq!(controller.dragged_index(), None);
    }

    #[test]
    fn canvas_drag_pans_by_raw_screen_delta() {
        let mut transform = Transform::default();
        let mut store = store_with_node_at(vec2(1000.0, 1000.0));
        let mut controller = GestureController::default();

        controller.handle(PointerEvent::Down(pos2(50.0, 50.0)), &mut transform, &mut store);
        controller.handle(PointerEvent::Move(pos2(62.0, 57.0)), &mut transform, &mut store);
        controller.handle(PointerEvent::Move(pos2(65.0, 57.0)), &mut transform, &mut store);
        let up = controller.handle(PointerEvent::Up, &mut transform, &mut store);

        assert_eq!(up, None);
        assert_eq!(transform.pan, vec2(15.0, 7.0));
    }

    #[test]
    fn wheel_zoom_is_clamped_at_both_ends() {
        let mut transform = Transform::default();
        let mut store = NodeStore::default();
        let mut controller = GestureController::default();

        for _ in 0..300 {
            controller.handle(
                PointerEvent::Wheel { pos: pos2(400.0, 300.0), delta: 120.0 },
                &mut transform,
                &mut store,
            );
        }
        assert_eq!(transform.zoom, MAX_ZOOM);

        for _ in 0..300 {
            controller.handle(
                PointerEvent::Wheel { pos: pos2(400.0, 300.0), delta: -120.0 },
                &mut transform,
                &mut store,
            );
        }
        assert_eq!(transform.zoom, MIN_ZOOM);
    }

    #[test]
    fn wheel_zoom_keeps_the_cursor_world_point_fixed() {
        let mut transform = Transform {
            pan: vec2(30.0, 40.0),
            zoom: 1.0,
        };
        let mut store = NodeStore::default();
        let mut controller = GestureController::default();

        let cursor = pos2(200.0, 150.0);
        let before = transform.to_world(cursor);
        controller.handle(
            PointerEvent::Wheel { pos: cursor, delta: 90.0 },
            &mut transform,
            &mut store,
        );
        let after = transform.to_world(cursor);
        assert!((after - before).length() < 1e-3);
    }

    #[test]
    fn pinch_release_degrades_to_panning_without_a_jump() {
        let mut transform = Transform::default();
        let mut store = NodeStore::default();
        let mut controller = GestureController::default();

        controller.handle(
            PointerEvent::Pinch { anchor: pos2(100.0, 100.0), factor: 1.5, translation: vec2(5.0, 5.0) },
            &mut transform,
            &mut store,
        );
        assert_eq!(transform.zoom, 1.5);
        assert_eq!(transform.pan, vec2(-45.0, -45.0));

        // The remaining finger keeps panning from exactly where the pinch
        // left the transform.
        controller.handle(PointerEvent::Down(pos2(120.0, 120.0)), &mut transform, &mut store);
        controller.handle(PointerEvent::Move(pos2(130.0, 120.0)), &mut transform, &mut store);
        assert_eq!(transform.pan, vec2(-35.0, -45.0));
    }
}
