//! Ambience UI - egui widgets for the mixer
//!
//! Provides UI components:
//! - Sound cards with play/stop and volume
//! - Master bar, presets and sleep timer
//! - Light/dark palettes
//! - Modal notices
//!
//! Widgets never touch playback state directly; they return [`Action`]s for
//! the host to dispatch.

pub mod controls;
pub mod sound_card;
pub mod theme;

pub use sound_card::{icon_glyph, CardView};
pub use theme::{Palette, Theme};

use ambience_control::{Action, Controller};
use controls::TimerView;

/// Per-window UI state that is not part of the mixer.
pub struct MixerPanel {
    /// Selected timer duration in minutes.
    pub timer_choice: i32,
    timer_was_running: bool,
}

impl MixerPanel {
    pub fn new() -> Self {
        Self {
            timer_choice: 0,
            timer_was_running: false,
        }
    }

    /// Track the countdown; the selector goes back to "Off" once it stops.
    pub fn sync_timer(&mut self, running: bool) {
        if self.timer_was_running && !running {
            self.timer_choice = 0;
        }
        self.timer_was_running = running;
    }

    /// Draw the whole mixer. Everything is greyed out when `enabled` is false.
    pub fn show(&mut self, ui: &mut egui::Ui, controller: &Controller, enabled: bool) -> Vec<Action> {
        let mut actions = Vec::new();
        let mode = controller.theme().mode();
        let palette = Palette::for_mode(mode);
        let session = controller.session();

        ui.add_enabled_ui(enabled, |ui| {
            ui.heading(egui::RichText::new("Ambience").size(Theme::FONT_LG).strong());
            ui.add_space(Theme::SPACE_SM);

            controls::show_master_bar(ui, session.master_volume(), mode, palette, &mut actions);
            controls::show_presets(ui, controller.presets().table(), palette, &mut actions);

            let timer = controller.timer();
            self.sync_timer(timer.is_running());
            let timer_view = TimerView {
                running: timer.is_running(),
                remaining: timer.format_remaining(),
            };
            controls::show_timer(ui, &mut self.timer_choice, &timer_view, palette, &mut actions);

            ui.add_space(Theme::SPACE_MD);
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for sound in session.catalog().iter() {
                        let view = CardView {
                            sound,
                            status: session.buffers().status(sound.id.as_str()),
                            playing: session.is_playing(sound.id.as_str()),
                            volume: session.slider_volume(sound.id.as_str()).unwrap_or(0.0),
                        };
                        if let Some(action) = sound_card::show_sound_card(ui, &view, palette) {
                            actions.push(action);
                        }
                    }
                });
            });
        });

        actions
    }
}

impl Default for MixerPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Centered modal notice. Returns `true` when the user dismisses it.
///
/// With `dismissable` false there is no button and the notice stays up.
pub fn show_notice(ctx: &egui::Context, title: &str, message: &str, dismissable: bool) -> bool {
    let mut dismissed = false;

    egui::Area::new(egui::Id::new("notice_scrim"))
        .order(egui::Order::Middle)
        .fixed_pos(egui::Pos2::ZERO)
        .show(ctx, |ui| {
            let screen = ctx.screen_rect();
            ui.allocate_rect(screen, egui::Sense::click());
            ui.painter()
                .rect_filled(screen, 0.0, egui::Color32::from_black_alpha(100));
        });

    egui::Window::new(title)
        .order(egui::Order::Foreground)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            ui.label(message);
            if dismissable {
                ui.add_space(Theme::SPACE_SM);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            }
        });

    dismissed
}
