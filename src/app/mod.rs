use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};

use crate::library::{Entry, MediaLibrary, load_library};

mod graph;
mod style;
mod ui;

use graph::MindmapView;

pub struct MindmapApp {
    library_path: PathBuf,
    state: AppState,
    reload_rx: Option<Receiver<Result<MediaLibrary, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<MediaLibrary, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    library: MediaLibrary,
    entries: Vec<Entry>,
    search: String,
    selected: Option<String>,
    mindmap: MindmapView,
    show_fps_bar: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

impl MindmapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, library_path: PathBuf) -> Self {
        let state = Self::start_load(library_path.clone());
        Self {
            library_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(library_path: PathBuf) -> Receiver<Result<MediaLibrary, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_library(&library_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(library_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(library_path),
        }
    }
}

impl eframe::App for MindmapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(library) => AppState::Ready(Box::new(ViewModel::new(library))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading media log...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the media log");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.library_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.library_path, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.library_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            transition = Some(match result {
                                Ok(library) => AppState::Ready(Box::new(ViewModel::new(library))),
                                Err(error) => AppState::Error(error),
                            });
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}

impl ViewModel {
    fn library_file_name(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }
}
