//! Ambience - ambient sound mixer
//!
//! Entry point and main application loop.

mod config;

use ambience_audio::{AudioOutput, Mixer, PlaybackSession};
use ambience_control::{
    Controller, CountdownTimer, JsonFileStore, Notice, PresetEngine, ThemeMode, ThemePreference,
};
use ambience_core::Catalog;
use ambience_media::AssetLoader;
use ambience_ui::{show_notice, MixerPanel, Theme};
use anyhow::Result;
use clap::Parser;
use config::{AppConfig, Cli};
use eframe::egui;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Repaint interval while something changes without user input.
const BACKGROUND_REPAINT: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = AppConfig::from_cli(Cli::parse());
    info!(
        assets = %config.asset_root.display(),
        settings = %config.settings_path.display(),
        master = config.master_volume,
        "Ambience starting..."
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([480.0, 400.0])
            .with_title("Ambience"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "Ambience",
        options,
        Box::new(move |_cc| Ok(Box::new(AmbienceApp::new(config)))),
    )?;

    Ok(())
}

struct AmbienceApp {
    controller: Controller,
    loader: AssetLoader,
    /// Keeps the device stream alive.
    _output: Option<AudioOutput>,
    /// Set when audio output could not be opened; the mixer stays disabled.
    fatal: Option<String>,
    notice: Option<Notice>,
    panel: MixerPanel,
    applied_theme: Option<ThemeMode>,
}

impl AmbienceApp {
    fn new(config: AppConfig) -> Self {
        let catalog = Arc::new(Catalog::builtin());
        let mixer = Mixer::shared();

        let (output, fatal) = match AudioOutput::open(Arc::clone(&mixer)) {
            Ok(output) => (Some(output), None),
            Err(e) => {
                error!("Audio output unavailable: {}", e);
                let message = format!(
                    "Audio playback is not supported on this system, so the mixer is disabled.\n\n{}",
                    e
                );
                (None, Some(message))
            }
        };

        let loader = if fatal.is_none() {
            AssetLoader::spawn_catalog(&catalog, &config.asset_root)
        } else {
            AssetLoader::new()
        };

        let mut session = PlaybackSession::new(catalog, mixer);
        session.set_master_volume(config.master_volume);

        let theme = ThemePreference::load(Box::new(JsonFileStore::open(&config.settings_path)));
        let controller = Controller::new(
            session,
            PresetEngine::default(),
            CountdownTimer::new(),
            theme,
        );

        Self {
            controller,
            loader,
            _output: output,
            fatal,
            notice: None,
            panel: MixerPanel::new(),
            applied_theme: None,
        }
    }
}

impl eframe::App for AmbienceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.pump_loader(&mut self.loader);
        if let Some(notice) = self.controller.poll_timer() {
            self.notice = Some(notice);
        }

        let mode = self.controller.theme().mode();
        if self.applied_theme != Some(mode) {
            Theme::apply(ctx, mode);
            self.applied_theme = Some(mode);
        }

        let enabled = self.fatal.is_none();
        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| self.panel.show(ui, &self.controller, enabled))
            .inner;
        for action in actions {
            self.controller.dispatch(action);
        }

        if let Some(message) = &self.fatal {
            show_notice(ctx, "Audio unavailable", message, false);
        } else if let Some(notice) = &self.notice {
            if show_notice(ctx, "Sleep Timer", notice.message(), true) {
                self.notice = None;
            }
        }

        if self.controller.timer().is_running() || !self.loader.is_idle() {
            ctx.request_repaint_after(BACKGROUND_REPAINT);
        }
    }
}
