//! TapePilot desktop simulator
//!
//! Transport buttons and fault sliders on the right, the animated deck in the
//! middle, scrolling telemetry along the bottom.

mod app;
mod deck_view;
mod plots;

use simcore::{CONFIG_FILE_NAME, DeckConfig};
use simplelog::{ColorChoice, Config, LevelFilter, SimpleLogger, TermLogger, TerminalMode};

use crate::app::TapePilotApp;

const TITLE: &str = "TapePilot V1 - Simulator";

fn init_logging() {
    if TermLogger::init(LevelFilter::Info, Config::default(), TerminalMode::Mixed, ColorChoice::Auto).is_err() {
        let _ = SimpleLogger::init(LevelFilter::Info, Config::default());
    }
}

fn main() -> eframe::Result<()> {
    init_logging();

    let config = match DeckConfig::load_or_default(CONFIG_FILE_NAME) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}; falling back to default config");
            DeckConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.width, config.ui.height])
            .with_title(TITLE),
        ..Default::default()
    };
    eframe::run_native(
        TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(TapePilotApp::new(config)))),
    )
}
