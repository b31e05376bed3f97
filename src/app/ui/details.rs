use std::collections::HashSet;

use eframe::egui::{RichText, Ui};

use super::super::ViewModel;
use super::super::style::{category_icon, verdict_color};

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Entry");
        ui.separator();

        let Some(selected_id) = self.selected.clone() else {
            ui.add_space(6.0);
            ui.weak("Click a node to inspect it.");
            return;
        };

        let Some(entry) = self.library.entry(&selected_id).cloned() else {
            // Selection can outlive a reload that dropped the entry.
            self.select_entry(None);
            return;
        };

        ui.add_space(4.0);
        ui.label(RichText::new(&entry.title).strong().size(16.0));
        if let Some(creator) = &entry.creator {
            ui.label(creator);
        }
        ui.horizontal(|ui| {
            ui.label(format!("{} {}", category_icon(entry.media_type), entry.media_type.label()));
            ui.separator();
            ui.label(RichText::new(entry.verdict.label()).color(verdict_color(entry.verdict)));
        });

        ui.separator();
        ui.label("Linked entries");

        let mut linked = Vec::new();
        let mut seen = HashSet::new();
        for link in &self.library.links {
            let other = if link.a == selected_id {
                &link.b
            } else if link.b == selected_id {
                &link.a
            } else {
                continue;
            };
            if other != &selected_id
                && seen.insert(other.clone())
                && let Some(other_entry) = self.library.entry(other)
            {
                linked.push((other_entry.id.clone(), other_entry.title.clone()));
            }
        }

        if linked.is_empty() {
            ui.weak("No links yet.");
        } else {
            for (id, title) in linked {
                if ui.small_button(title).clicked() {
                    self.select_entry(Some(id));
                }
            }
        }

        ui.add_space(10.0);
        if ui.button("Clear selection").clicked() {
            self.select_entry(None);
        }
    }
}
