use std::collections::VecDeque;
use std::path::Path;

use eframe::egui::{self, Align, Context, Layout, Ui};

use crate::library::MediaLibrary;

use super::super::graph::MindmapView;
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(library: MediaLibrary) -> Self {
        let entries = library.finished_entries();
        Self {
            library,
            entries,
            search: String::new(),
            selected: None,
            mindmap: MindmapView::default(),
            show_fps_bar: true,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        library_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("logmap");
                    ui.separator();
                    ui.label(format!("log: {}", Self::library_file_name(library_path)));
                    ui.label(format!("finished entries: {}", self.entries.len()));
                    ui.label(format!("links: {}", self.library.links.len()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload log"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading media log...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }

    fn draw_graph(&mut self, ui: &mut Ui) {
        let response = self.mindmap.ui(
            ui,
            &self.entries,
            &self.library.links,
            &self.search,
            self.selected.as_deref(),
        );

        if let Some(id) = response.selected {
            self.select_entry(Some(id));
        }
    }

    pub(in crate::app) fn select_entry(&mut self, selected: Option<String>) {
        self.selected = selected;
    }
}
