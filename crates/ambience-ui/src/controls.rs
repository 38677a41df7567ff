//! Control bar: master volume, transport, presets, timer and theme toggle.

use crate::sound_card::volume_slider;
use crate::theme::{Palette, Theme};
use ambience_control::{Action, ThemeMode};
use ambience_core::{defaults, PresetTable};
use egui::{self, Vec2};

/// Snapshot of the timer for drawing.
pub struct TimerView {
    pub running: bool,
    /// Remaining time as `m:ss`.
    pub remaining: String,
}

/// Label for a timer choice.
pub fn timer_choice_label(minutes: i32) -> String {
    if minutes <= 0 {
        "Off".to_string()
    } else {
        format!("{} min", minutes)
    }
}

pub fn show_master_bar(
    ui: &mut egui::Ui,
    master_volume: f32,
    theme: ThemeMode,
    palette: &Palette,
    actions: &mut Vec<Action>,
) {
    Theme::bar_frame(palette).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Master").size(Theme::FONT_MD).strong());
            ui.allocate_ui(Vec2::new(260.0, 24.0), |ui| {
                if let Some(level) = volume_slider(ui, master_volume, palette.accent, palette) {
                    actions.push(Action::SetMasterVolume(level));
                }
            });

            ui.add_space(Theme::SPACE_MD);
            if ui.button("▶ Play All").clicked() {
                actions.push(Action::PlayAll);
            }
            if ui.button("⏹ Stop All").clicked() {
                actions.push(Action::StopAll);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = match theme {
                    ThemeMode::Light => "🌙 Dark",
                    ThemeMode::Dark => "☀ Light",
                };
                if ui.button(label).clicked() {
                    actions.push(Action::ToggleTheme);
                }
            });
        });
    });
}

pub fn show_presets(ui: &mut egui::Ui, presets: &PresetTable, palette: &Palette, actions: &mut Vec<Action>) {
    Theme::bar_frame(palette).show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new("Presets").size(Theme::FONT_MD).strong());
            for preset in presets.iter() {
                if ui.button(&preset.name).clicked() {
                    actions.push(Action::ApplyPreset(preset.key.clone()));
                }
            }
        });
    });
}

/// Timer selector. `choice` is the selected duration in minutes.
pub fn show_timer(
    ui: &mut egui::Ui,
    choice: &mut i32,
    timer: &TimerView,
    palette: &Palette,
    actions: &mut Vec<Action>,
) {
    Theme::bar_frame(palette).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Sleep Timer").size(Theme::FONT_MD).strong());

            ui.add_enabled_ui(!timer.running, |ui| {
                egui::ComboBox::from_id_salt("timer_duration")
                    .selected_text(timer_choice_label(*choice))
                    .show_ui(ui, |ui| {
                        for &minutes in defaults::TIMER_CHOICES_MINUTES {
                            ui.selectable_value(choice, minutes, timer_choice_label(minutes));
                        }
                    });
                if ui.button("Start Timer").clicked() {
                    actions.push(Action::StartTimer(*choice));
                }
            });

            if timer.running {
                ui.label(
                    egui::RichText::new(format!("Timer: {}", timer.remaining))
                        .family(egui::FontFamily::Monospace)
                        .color(palette.accent),
                );
                if ui.small_button("Cancel").clicked() {
                    actions.push(Action::ResetTimer);
                }
            }
        });
    });
}
