//! Headless batch entry point.
//!
//! Loads the configuration from the default path (writing a default one on
//! first run) and synthesizes the RGB masks of every configured dataset folder.

use std::path::Path;
use std::process::ExitCode;

use cpat::config::AppConfig;
use cpat::data::DatasetLayout;
use cpat::format::{ColorMap, synthesize_side};
use cpat::model::Side;

fn main() -> ExitCode {
    let config = AppConfig::load_from_default_path().unwrap_or_default();

    env_logger::Builder::new()
        .filter_level(config.preferences.log_level.to_level_filter())
        .init();

    let config_missing = AppConfig::default_path().is_some_and(|path| !path.exists());
    if config_missing {
        match config.save_to_default_path() {
            Ok(()) => log::info!("Wrote a default configuration; fill in the dataset folders"),
            Err(e) => log::warn!("Could not write default configuration: {}", e),
        }
    }

    let Some(color_map_path) = config.preferences.color_map_file() else {
        log::error!(
            "No color map configured; set preferences.color_map_path in {:?}",
            AppConfig::default_path().unwrap_or_default()
        );
        return ExitCode::FAILURE;
    };

    let color_map = match ColorMap::load(color_map_path) {
        Ok(map) => map,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut failures = 0;
    let mut processed = 0;
    for side in Side::ALL {
        let Some(folder) = config.preferences.folder(side) else {
            log::info!("No {} dataset configured, skipping", side);
            continue;
        };
        processed += 1;

        let result = DatasetLayout::session_dir(Path::new(folder))
            .and_then(|session| synthesize_side(&session, side, &color_map));
        match result {
            Ok(output) => log::info!(
                "{}: {} objects -> {:?}",
                side,
                output.object_count,
                output.mask_path
            ),
            Err(e) => {
                log::error!("{}: {}", side, e);
                failures += 1;
            }
        }
    }

    if processed == 0 {
        log::warn!("No dataset folders configured, nothing to do");
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
