//! One card per catalog track: icon, name, play/stop and a volume slider.

use crate::theme::{Palette, Theme};
use ambience_control::Action;
use ambience_core::{defaults, SoundDefinition};
use ambience_media::LoadStatus;
use egui::{self, Color32, Pos2, Rect, Rounding, Vec2};

/// Everything a card needs to draw itself.
pub struct CardView<'a> {
    pub sound: &'a SoundDefinition,
    pub status: LoadStatus,
    pub playing: bool,
    /// Current slider position.
    pub volume: f32,
}

/// Glyph for a catalog icon name.
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon {
        "cloud-rain" => "🌧",
        "water" => "🌊",
        "bolt" => "⚡",
        "tree" => "🌲",
        "wind" => "💨",
        "fire" => "🔥",
        "coffee" => "☕",
        "train" => "🚆",
        _ => "🎵",
    }
}

/// Snap a slider position to the volume step.
pub fn quantize_volume(value: f32) -> f32 {
    let steps = (value.clamp(0.0, 1.0) / defaults::VOLUME_STEP).round();
    (steps * defaults::VOLUME_STEP).clamp(0.0, 1.0)
}

pub fn show_sound_card(ui: &mut egui::Ui, view: &CardView<'_>, palette: &Palette) -> Option<Action> {
    let mut action = None;
    let id = &view.sound.id;

    Theme::card_frame(palette, view.playing).show(ui, |ui| {
        ui.set_width(Theme::CARD_WIDTH);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(icon_glyph(&view.sound.icon)).size(Theme::ICON_SIZE));
            ui.label(
                egui::RichText::new(&view.sound.name)
                    .size(Theme::FONT_MD)
                    .strong(),
            );

            match view.status {
                LoadStatus::Pending => {
                    ui.label(
                        egui::RichText::new("Loading…")
                            .size(Theme::FONT_SM)
                            .color(palette.text_muted),
                    );
                }
                LoadStatus::Failed => {
                    ui.label(
                        egui::RichText::new("Unavailable")
                            .size(Theme::FONT_SM)
                            .color(palette.danger),
                    );
                }
                LoadStatus::Ready => {
                    let (label, next) = if view.playing {
                        ("⏹ Stop", Action::Stop(id.clone()))
                    } else {
                        ("▶ Play", Action::Play(id.clone()))
                    };
                    if ui.button(label).clicked() {
                        action = Some(next);
                    }
                }
            }

            ui.add_space(Theme::SPACE_XS);
            let accent = if view.playing { palette.accent } else { palette.text_muted };
            if let Some(volume) = volume_slider(ui, view.volume, accent, palette) {
                action = Some(Action::SetVolume(id.clone(), volume));
            }
        });
    });

    action
}

/// Horizontal 0..=1 slider. Returns the new value when the user moves it.
pub fn volume_slider(ui: &mut egui::Ui, value: f32, accent: Color32, palette: &Palette) -> Option<f32> {
    let mut changed = None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing = Vec2::new(6.0, 0.0);

        let track_width = (ui.available_width() - 44.0).max(60.0);
        let (track_resp, painter) =
            ui.allocate_painter(Vec2::new(track_width, 20.0), egui::Sense::click_and_drag());
        let bar_rect = Rect::from_center_size(track_resp.rect.center(), Vec2::new(track_width, 4.0));

        painter.rect_filled(bar_rect, Rounding::same(2.0), palette.widget);

        let frac = value.clamp(0.0, 1.0);
        let fill_rect = Rect::from_min_size(bar_rect.min, Vec2::new(bar_rect.width() * frac, 4.0));
        painter.rect_filled(fill_rect, Rounding::same(2.0), accent);

        let thumb_x = bar_rect.left() + frac * bar_rect.width();
        painter.circle_filled(Pos2::new(thumb_x, bar_rect.center().y), 6.0, accent);

        if track_resp.dragged() || track_resp.clicked() {
            if let Some(pos) = track_resp.interact_pointer_pos() {
                let rel = (pos.x - bar_rect.left()) / bar_rect.width();
                let next = quantize_volume(rel);
                if (next - value).abs() > f32::EPSILON {
                    changed = Some(next);
                }
            }
        }

        ui.label(
            egui::RichText::new(format!("{:.0}%", changed.unwrap_or(value) * 100.0))
                .size(Theme::FONT_SM)
                .color(palette.text_muted)
                .family(egui::FontFamily::Monospace),
        );
    });

    changed
}
