use crate::cli::TuiArgs;
use crate::config::{data_dir, load_settings, locate_settings, Overrides, Settings};
use crate::logging;
use crate::sound::{Muted, SoundPlayer, SoundResource, TerminalBell};
use crate::ui;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub fn tui(config: Option<PathBuf>, args: TuiArgs) -> Result<()> {
    let settings = current_settings(config)?.apply(&Overrides {
        silly: args.silly,
        night: args.night,
        mute: args.mute,
    });
    let log_dir = data_dir()?.join("logs");
    let _guard = logging::init(&log_dir, &settings.log_level)?;
    info!(?settings, "starting reminders");

    let (player, resource) = sound_setup(&settings);
    let result = ui::run(&settings, player, resource);
    if let Err(err) = &result {
        tracing::error!(error = %err, "reminders exited with an error");
    }
    result
}

pub fn show_config(config: Option<PathBuf>) -> Result<()> {
    let location = locate_settings(config)?;
    let settings = load_settings(&location)?;
    println!(
        "Settings: {} ({})",
        location.path.display(),
        if location.exists { "found" } else { "defaults" }
    );
    let rendered = serde_yaml::to_string(&settings).context("serializing settings")?;
    print!("{}", rendered);
    Ok(())
}

fn sound_setup(settings: &Settings) -> (Arc<dyn SoundPlayer>, SoundResource) {
    match settings.sound_resource() {
        Some(resource) => (Arc::new(TerminalBell::default()), resource),
        None => (Arc::new(Muted), SoundResource::Bell),
    }
}

fn current_settings(config: Option<PathBuf>) -> Result<Settings> {
    let location = locate_settings(config)?;
    load_settings(&location)
}
