mod app;
mod library;
mod util;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the media log JSON file.
    #[arg(long, default_value = "media-log.json")]
    library: PathBuf,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "logmap",
        options,
        Box::new(move |cc| Ok(Box::new(app::MindmapApp::new(cc, args.library.clone())))),
    )
}
