use std::collections::HashSet;

use eframe::egui::{Color32, Pos2, vec2};

use crate::util::truncate_label;

use super::super::style::{
    LABEL_COLOR, NODE_FILL, SELECTION_COLOR, blend_color, category_color, category_icon,
    dim_color, verdict_color,
};
use super::store::NodeStore;
use super::transform::Transform;
use crate::library::Verdict;

/// Labels become legible (and are drawn at all) above this zoom.
pub(in crate::app) const LABEL_MIN_ZOOM: f32 = 0.9;
const LABEL_MAX_CHARS: usize = 22;
const CURVE_BOW: f32 = 0.12;
const SEARCH_DIM: f32 = 0.22;

/// Everything the renderer needs besides the graph itself.
pub(in crate::app) struct SceneParams<'a> {
    pub(in crate::app) transform: Transform,
    pub(in crate::app) hovered: Option<usize>,
    pub(in crate::app) selected: Option<usize>,
    pub(in crate::app) matches: Option<&'a HashSet<usize>>,
}

/// One frame's worth of drawing, in paint order, in viewport-relative screen
/// coordinates. Regenerated from state every frame; rendering-correctness
/// tests inspect this list instead of pixels.
#[derive(Debug)]
pub(in crate::app) enum DrawCommand {
    LinkCurve {
        from: Pos2,
        control: Pos2,
        to: Pos2,
        from_color: Color32,
        to_color: Color32,
        width: f32,
    },
    LinkArrow {
        tip: Pos2,
        left: Pos2,
        right: Pos2,
        color: Color32,
    },
    Glow {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    HoverRing {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    NodeBody {
        center: Pos2,
        radius: f32,
        fill: Color32,
    },
    Ring {
        center: Pos2,
        radius: f32,
        width: f32,
        color: Color32,
    },
    Dot {
        center: Pos2,
        radius: f32,
        color: Color32,
    },
    Icon {
        center: Pos2,
        glyph: &'static str,
        size: f32,
        color: Color32,
    },
    Label {
        pos: Pos2,
        text: String,
        color: Color32,
    },
    StatusLine {
        text: String,
    },
}

/// Case-insensitive substring match over title, creator and media type.
pub(in crate::app) fn search_matches(store: &NodeStore, query: &str) -> HashSet<usize> {
    let needle = query.trim().to_lowercase();
    store
        .nodes()
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            let matched = node.title.to_lowercase().contains(&needle)
                || node
                    .creator
                    .as_ref()
                    .is_some_and(|creator| creator.to_lowercase().contains(&needle))
                || node.media_type.label().contains(&needle);
            matched.then_some(index)
        })
        .collect()
}

fn bezier_point(from: Pos2, control: Pos2, to: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    Pos2::new(
        u * u * from.x + 2.0 * u * t * control.x + t * t * to.x,
        u * u * from.y + 2.0 * u * t * control.y + t * t * to.y,
    )
}

pub(in crate::app) fn build_scene(
    store: &NodeStore,
    edges: &[(usize, usize)],
    params: &SceneParams<'_>,
) -> Vec<DrawCommand> {
    let transform = params.transform;
    let zoom = transform.zoom;
    let zoom_sqrt = zoom.sqrt();
    let mut commands = Vec::with_capacity(edges.len() * 2 + store.len() * 6 + 1);

    for &(a, b) in edges {
        let (Some(from_node), Some(to_node)) = (store.nodes().get(a), store.nodes().get(b)) else {
            continue;
        };

        let from = transform.to_screen(from_node.pos);
        let to = transform.to_screen(to_node.pos);
        let chord = to - from;
        let length = chord.length();
        if length < 1e-3 {
            continue;
        }

        let perpendicular = vec2(-chord.y, chord.x) / length;
        let control = from + chord * 0.5 + perpendicular * length * CURVE_BOW;

        let touches_hover = params.hovered == Some(a) || params.hovered == Some(b);
        let width = if touches_hover {
            (2.8 * zoom_sqrt).clamp(1.4, 5.0)
        } else {
            (1.6 * zoom_sqrt).clamp(0.8, 3.2)
        };

        let from_color = verdict_color(from_node.verdict);
        let to_color = verdict_color(to_node.verdict);
        commands.push(DrawCommand::LinkCurve {
            from,
            control,
            to,
            from_color,
            to_color,
            width,
        });

        // Cosmetic arrowhead at the curve midpoint, oriented along the local
        // tangent; the underlying link is undirected.
        let mid = bezier_point(from, control, to, 0.5);
        let ahead = bezier_point(from, control, to, 0.55);
        let tangent = (ahead - mid).normalized();
        let normal = vec2(-tangent.y, tangent.x);
        let size = (7.0 * zoom_sqrt).clamp(3.0, 11.0);
        commands.push(DrawCommand::LinkArrow {
            tip: mid + tangent * size,
            left: mid - tangent * size * 0.5 + normal * size * 0.6,
            right: mid - tangent * size * 0.5 - normal * size * 0.6,
            color: blend_color(from_color, to_color, 0.5),
        });
    }

    for (index, node) in store.nodes().iter().enumerate() {
        let center = transform.to_screen(node.pos);
        let radius = node.radius * zoom;
        let dimmed = params
            .matches
            .is_some_and(|matches| !matches.contains(&index));

        let verdict = verdict_color(node.verdict);
        let category = category_color(node.media_type);

        if node.verdict == Verdict::Loved && !dimmed {
            commands.push(DrawCommand::Glow {
                center,
                radius: radius * 1.8,
                color: Color32::from_rgba_unmultiplied(246, 206, 104, 26),
            });
        }

        if params.hovered == Some(index) {
            commands.push(DrawCommand::HoverRing {
                center,
                radius: radius + 5.0,
                color: Color32::from_gray(210),
            });
        }

        let apply_dim = |color: Color32| if dimmed { dim_color(color, SEARCH_DIM) } else { color };

        commands.push(DrawCommand::NodeBody {
            center,
            radius,
            fill: apply_dim(NODE_FILL),
        });
        commands.push(DrawCommand::Ring {
            center,
            radius,
            width: (2.2 * zoom_sqrt).clamp(1.0, 3.5),
            color: apply_dim(verdict),
        });

        if params.selected == Some(index) {
            commands.push(DrawCommand::Ring {
                center,
                radius: radius + 3.5,
                width: 2.6,
                color: SELECTION_COLOR,
            });
            commands.push(DrawCommand::Ring {
                center,
                radius: radius + 7.5,
                width: 1.2,
                color: Color32::from_rgba_unmultiplied(245, 206, 93, 90),
            });
        }

        commands.push(DrawCommand::Dot {
            center: center + vec2(radius * 0.72, -radius * 0.72),
            radius: (radius * 0.28).max(2.0),
            color: apply_dim(category),
        });
        commands.push(DrawCommand::Icon {
            center,
            glyph: category_icon(node.media_type),
            size: (radius * 0.95).clamp(6.0, 26.0),
            color: apply_dim(Color32::from_gray(230)),
        });

        if zoom > LABEL_MIN_ZOOM {
            commands.push(DrawCommand::Label {
                pos: center + vec2(0.0, radius + 6.0),
                text: truncate_label(&node.title, LABEL_MAX_CHARS),
                color: apply_dim(LABEL_COLOR),
            });
        }
    }

    commands.push(DrawCommand::StatusLine {
        text: format!("{} entries · {} links", store.len(), edges.len()),
    });

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{Entry, Link, MediaType, Status, Verdict};

    fn entry(id: &str, title: &str, media_type: MediaType, verdict: Verdict) -> Entry {
        Entry {
            id: id.to_owned(),
            title: title.to_owned(),
            creator: if id == "e1" { Some("Frank Herbert".to_owned()) } else { None },
            media_type,
            verdict,
            status: Status::Finished,
        }
    }

    fn sample_store() -> NodeStore {
        let entries = [
            entry("e1", "Dune", MediaType::Book, Verdict::Loved),
            entry("e2", "Blade Runner", MediaType::Film, Verdict::Liked),
        ];
        let mut store = NodeStore::default();
        store.rebuild(&entries, vec2(400.0, 300.0));
        store
    }

    fn params(matches: Option<&HashSet<usize>>) -> SceneParams<'_> {
        SceneParams {
            transform: Transform::default(),
            hovered: None,
            selected: None,
            matches,
        }
    }

    fn curve_count(commands: &[DrawCommand]) -> usize {
        commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::LinkCurve { .. }))
            .count()
    }

    fn body_fills(commands: &[DrawCommand]) -> Vec<Color32> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::NodeBody { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn duplicate_links_draw_one_curve_and_one_arrowhead() {
        let store = sample_store();
        let links = [
            Link { a: "e1".to_owned(), b: "e2".to_owned() },
            Link { a: "e2".to_owned(), b: "e1".to_owned() },
            Link { a: "e1".to_owned(), b: "e2".to_owned() },
        ];
        let edges = store.resolve_edges(&links);
        let commands = build_scene(&store, &edges, &params(None));

        assert_eq!(curve_count(&commands), 1);
        assert_eq!(
            commands
                .iter()
                .filter(|command| matches!(command, DrawCommand::LinkArrow { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn search_dims_non_matching_nodes_and_clearing_restores_them() {
        let store = sample_store();
        let positions_before = store.nodes().iter().map(|node| node.pos).collect::<Vec<_>>();

        let matches = search_matches(&store, "dune");
        assert_eq!(matches.len(), 1);

        let dimmed = build_scene(&store, &[], &params(Some(&matches)));
        let fills = body_fills(&dimmed);
        assert_ne!(fills[0], fills[1]);
        let non_match = fills[store.index_of("e2").unwrap()];
        assert!(non_match.a() < NODE_FILL.a());

        let restored = build_scene(&store, &[], &params(None));
        for fill in body_fills(&restored) {
            assert_eq!(fill, NODE_FILL);
        }
        let positions_after = store.nodes().iter().map(|node| node.pos).collect::<Vec<_>>();
        assert_eq!(positions_before, positions_after);
    }

    #[test]
    fn search_matches_creator_and_media_type() {
        let store = sample_store();
        assert_eq!(search_matches(&store, "herbert").len(), 1);
        assert_eq!(search_matches(&store, "FILM").len(), 1);
        assert_eq!(search_matches(&store, "zzz").len(), 0);
    }

    #[test]
    fn labels_appear_only_above_the_zoom_threshold() {
        let store = sample_store();

        let mut zoomed_out = params(None);
        zoomed_out.transform.zoom = 0.5;
        let commands = build_scene(&store, &[], &zoomed_out);
        assert!(!commands.iter().any(|command| matches!(command, DrawCommand::Label { .. })));

        let commands = build_scene(&store, &[], &params(None));
        assert_eq!(
            commands
                .iter()
                .filter(|command| matches!(command, DrawCommand::Label { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn loved_nodes_glow_and_hover_ring_follows_hover() {
        let store = sample_store();
        let mut with_hover = params(None);
        with_hover.hovered = store.index_of("e2");
        let commands = build_scene(&store, &[], &with_hover);

        assert_eq!(
            commands
                .iter()
                .filter(|command| matches!(command, DrawCommand::Glow { .. }))
                .count(),
            1
        );
        assert_eq!(
            commands
                .iter()
                .filter(|command| matches!(command, DrawCommand::HoverRing { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn status_line_reports_counts() {
        let store = sample_store();
        let links = [Link { a: "e1".to_owned(), b: "e2".to_owned() }];
        let edges = store.resolve_edges(&links);
        let commands = build_scene(&store, &edges, &params(None));

        let Some(DrawCommand::StatusLine { text }) = commands.last() else {
            panic!("status line should be the last command");
        };
        assert!(text.contains("2 entries"));
        assert!(text.contains("1 links"));
    }

    #[test]
    fn empty_store_still_produces_a_status_line() {
        let store = NodeStore::default();
        let commands = build_scene(&store, &[], &params(None));
        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], DrawCommand::StatusLine { .. }));
    }
}
