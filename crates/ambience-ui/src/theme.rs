//! Light and dark palettes and egui styling.

use ambience_control::ThemeMode;
use egui::{Color32, Rounding, Stroke, Vec2};

/// Colors for one theme mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: Color32,
    pub card: Color32,
    pub card_active: Color32,
    pub widget: Color32,
    pub widget_hover: Color32,
    pub text: Color32,
    pub text_muted: Color32,
    pub border: Color32,
    pub accent: Color32,
    pub danger: Color32,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        bg: Color32::from_rgb(243, 244, 248),
        card: Color32::from_rgb(255, 255, 255),
        card_active: Color32::from_rgb(232, 238, 255),
        widget: Color32::from_rgb(228, 230, 238),
        widget_hover: Color32::from_rgb(214, 218, 230),
        text: Color32::from_rgb(28, 30, 38),
        text_muted: Color32::from_rgb(110, 114, 128),
        border: Color32::from_rgb(220, 222, 230),
        accent: Color32::from_rgb(72, 110, 235),
        danger: Color32::from_rgb(220, 70, 68),
    };

    pub const DARK: Palette = Palette {
        bg: Color32::from_rgb(18, 18, 22),
        card: Color32::from_rgb(35, 35, 42),
        card_active: Color32::from_rgb(34, 42, 70),
        widget: Color32::from_rgb(45, 45, 55),
        widget_hover: Color32::from_rgb(55, 55, 68),
        text: Color32::from_rgb(235, 235, 235),
        text_muted: Color32::from_rgb(153, 153, 153),
        border: Color32::from_rgb(50, 50, 60),
        accent: Color32::from_rgb(86, 130, 255),
        danger: Color32::from_rgb(255, 88, 85),
    };

    pub fn for_mode(mode: ThemeMode) -> &'static Palette {
        match mode {
            ThemeMode::Light => &Self::LIGHT,
            ThemeMode::Dark => &Self::DARK,
        }
    }
}

/// Layout constants and style application.
pub struct Theme;

impl Theme {
    pub const FONT_SM: f32 = 13.0;
    pub const FONT_MD: f32 = 15.0;
    pub const FONT_LG: f32 = 20.0;
    pub const ICON_SIZE: f32 = 28.0;

    pub const SPACE_XS: f32 = 4.0;
    pub const SPACE_SM: f32 = 8.0;
    pub const SPACE_MD: f32 = 16.0;

    pub const RADIUS: f32 = 6.0;
    pub const RADIUS_LG: f32 = 12.0;

    pub const CARD_WIDTH: f32 = 180.0;

    /// Frame around one sound card.
    pub fn card_frame(palette: &Palette, active: bool) -> egui::Frame {
        let (fill, stroke) = if active {
            (palette.card_active, palette.accent)
        } else {
            (palette.card, palette.border)
        };
        egui::Frame::none()
            .fill(fill)
            .stroke(Stroke::new(1.0, stroke))
            .rounding(Rounding::same(Self::RADIUS_LG))
            .inner_margin(egui::Margin::same(Self::SPACE_MD))
    }

    /// Frame around the control bar.
    pub fn bar_frame(palette: &Palette) -> egui::Frame {
        egui::Frame::none()
            .fill(palette.card)
            .stroke(Stroke::new(1.0, palette.border))
            .rounding(Rounding::same(Self::RADIUS_LG))
            .inner_margin(egui::Margin::symmetric(Self::SPACE_MD, Self::SPACE_SM))
    }

    /// Apply the palette for `mode` to an egui context.
    pub fn apply(ctx: &egui::Context, mode: ThemeMode) {
        let palette = Palette::for_mode(mode);
        let mut style = (*ctx.style()).clone();
        let visuals = &mut style.visuals;
        *visuals = if mode.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.panel_fill = palette.bg;
        visuals.window_fill = palette.card;
        visuals.extreme_bg_color = palette.widget;
        visuals.faint_bg_color = palette.card;
        visuals.override_text_color = Some(palette.text);

        visuals.widgets.noninteractive.bg_fill = palette.card;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.border);
        visuals.widgets.noninteractive.rounding = Rounding::same(Self::RADIUS);

        visuals.widgets.inactive.bg_fill = palette.widget;
        visuals.widgets.inactive.weak_bg_fill = palette.widget;
        visuals.widgets.inactive.rounding = Rounding::same(Self::RADIUS);

        visuals.widgets.hovered.bg_fill = palette.widget_hover;
        visuals.widgets.hovered.weak_bg_fill = palette.widget_hover;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, palette.accent);
        visuals.widgets.hovered.rounding = Rounding::same(Self::RADIUS);

        visuals.widgets.active.bg_fill = palette.accent;
        visuals.widgets.active.weak_bg_fill = palette.accent;
        visuals.widgets.active.rounding = Rounding::same(Self::RADIUS);

        visuals.selection.bg_fill = palette.accent;
        visuals.selection.stroke = Stroke::new(1.0, palette.accent);

        visuals.window_rounding = Rounding::same(Self::RADIUS_LG);
        visuals.window_stroke = Stroke::new(1.0, palette.border);
        visuals.window_shadow = egui::epaint::Shadow {
            offset: Vec2::new(0.0, 4.0),
            blur: 20.0,
            spread: 0.0,
            color: Color32::from_black_alpha(60),
        };

        style.spacing.item_spacing = Vec2::new(Self::SPACE_SM, Self::SPACE_SM);

        ctx.set_style(style);
    }
}
