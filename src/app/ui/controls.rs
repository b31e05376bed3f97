use eframe::egui::{self, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::ViewModel;

const JUMP_RESULT_LIMIT: usize = 8;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Mind Map");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search (title, creator or media type)")
            .on_hover_text("Dims non-matching nodes without hiding them.");
        ui.text_edit_singleline(&mut self.search);

        if !self.search.trim().is_empty() {
            ui.add_space(4.0);
            self.draw_jump_list(ui);
        }

        ui.separator();

        ui.label("Physics");
        ui.checkbox(&mut self.mindmap.live_physics, "Live layout")
            .on_hover_text("Keep the simulation simmering every frame.");
        ui.add(
            egui::Slider::new(&mut self.mindmap.physics_intensity, 0.2..=2.5).text("intensity"),
        );
        ui.add(
            egui::Slider::new(&mut self.mindmap.physics_damping, 0.70..=0.97).text("damping"),
        );
        if ui
            .button("Settle layout")
            .on_hover_text("Run the simulation to a calm state right now.")
            .clicked()
        {
            self.mindmap.settle(&self.entries, &self.library.links, 240);
        }

        ui.separator();

        ui.label("View");
        if ui.button("Reset view").clicked() {
            self.mindmap.reset_view();
        }
        ui.checkbox(&mut self.show_fps_bar, "Show frame rate");

        ui.add_space(8.0);
        ui.label(format!("{} nodes in the map", self.mindmap.node_count()));
    }

    fn draw_jump_list(&mut self, ui: &mut Ui) {
        let query = self.search.trim().to_owned();
        let matcher = SkimMatcherV2::default();

        let mut ranked = self
            .entries
            .iter()
            .filter_map(|entry| {
                let mut score = fuzzy_match_score(&matcher, &entry.title, &query);
                if let Some(creator) = &entry.creator {
                    let creator_score = fuzzy_match_score(&matcher, creator, &query);
                    score = score.max(creator_score);
                }
                score.map(|score| (score, entry.id.clone(), entry.title.clone()))
            })
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.truncate(JUMP_RESULT_LIMIT);

        if ranked.is_empty() {
            ui.weak("No matching entries.");
            return;
        }

        for (_score, id, title) in ranked {
            if ui.small_button(title).clicked() {
                self.select_entry(Some(id));
            }
        }
    }
}
