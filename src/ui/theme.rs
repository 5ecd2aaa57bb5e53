use egui::{Color32, FontFamily, FontId, Stroke, Vec2};
use serde::{Deserialize, Serialize};

/// Theme mode enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Next mode in the Light → Dark → System cycle of the header toggle.
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
            ThemeMode::System => ThemeMode::Light,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ThemeMode::Light => "☀",
            ThemeMode::Dark => "🌙",
            ThemeMode::System => "🖥",
        }
    }
}

/// Detect system theme preference
pub fn detect_system_theme() -> Result<ThemeMode, String> {
    match dark_light::detect().map_err(|e| e.to_string())? {
        dark_light::Mode::Dark => Ok(ThemeMode::Dark),
        dark_light::Mode::Light => Ok(ThemeMode::Light),
        dark_light::Mode::Unspecified => Ok(ThemeMode::Light),
    }
}

/// Resolve the actual theme to use based on preference
pub fn resolve_theme_mode(preference: ThemeMode) -> ThemeMode {
    match preference {
        ThemeMode::System => detect_system_theme()
            .inspect_err(|e| tracing::warn!("Failed to detect system theme: {}", e))
            .unwrap_or(ThemeMode::Light),
        other => other,
    }
}

/// Fund brand palette
pub struct FundColors;

impl FundColors {
    /// Art Blocks orange (#fd6e4e)
    pub const ACCENT: Color32 = Color32::from_rgb(253, 110, 78);
    pub const ACCENT_DARK: Color32 = Color32::from_rgb(196, 74, 47);
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);

    pub const SUCCESS: Color32 = Color32::from_rgb(39, 174, 96);
    pub const ERROR: Color32 = Color32::from_rgb(235, 87, 87);
    pub const INFO: Color32 = Color32::from_rgb(52, 152, 219);

    pub const BACKGROUND: Color32 = Color32::from_rgb(244, 243, 240);
    pub const SURFACE: Color32 = Color32::WHITE;
    pub const BORDER: Color32 = Color32::from_rgb(226, 224, 218);
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(24, 24, 27);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(110, 110, 120);

    pub const DARK_BACKGROUND: Color32 = Color32::from_rgb(18, 18, 18);
    pub const DARK_SURFACE: Color32 = Color32::from_rgb(32, 32, 32);
    pub const DARK_BORDER: Color32 = Color32::from_rgb(60, 60, 60);
    pub const DARK_TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 240);
    pub const DARK_TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 160, 160);

    pub fn background(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_BACKGROUND
        } else {
            Self::BACKGROUND
        }
    }

    pub fn surface(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_SURFACE
        } else {
            Self::SURFACE
        }
    }

    pub fn border(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_BORDER
        } else {
            Self::BORDER
        }
    }

    pub fn text_primary(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_TEXT_PRIMARY
        } else {
            Self::TEXT_PRIMARY
        }
    }

    pub fn text_secondary(dark_mode: bool) -> Color32 {
        if dark_mode {
            Self::DARK_TEXT_SECONDARY
        } else {
            Self::TEXT_SECONDARY
        }
    }

    pub fn error_color(dark_mode: bool) -> Color32 {
        if dark_mode {
            Color32::from_rgb(255, 120, 120)
        } else {
            Self::ERROR
        }
    }
}

pub struct Typography;

impl Typography {
    pub const SCALE_SM: f32 = 14.0;
    pub const SCALE_BASE: f32 = 16.0;
    pub const SCALE_XXL: f32 = 24.0;
    pub const SCALE_XXXL: f32 = 30.0;

    pub fn heading_large() -> FontId {
        FontId::new(Self::SCALE_XXXL, FontFamily::Proportional)
    }

    pub fn heading_medium() -> FontId {
        FontId::new(Self::SCALE_XXL, FontFamily::Proportional)
    }

    pub fn body() -> FontId {
        FontId::new(Self::SCALE_BASE, FontFamily::Proportional)
    }

    pub fn body_small() -> FontId {
        FontId::new(Self::SCALE_SM, FontFamily::Proportional)
    }
}

/// Spacing constants for consistent layout
pub struct Spacing;

impl Spacing {
    pub const SM: f32 = 8.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;

    // For egui Margin which expects i8
    pub const MD_I8: i8 = 16;

    pub const CARD_WIDTH: f32 = 180.0;
}

pub struct Shape;

impl Shape {
    pub const RADIUS_MD: u8 = 12;
    pub const BORDER_WIDTH: f32 = 1.0;
}

pub fn apply_theme(ctx: &egui::Context, theme_mode: ThemeMode) {
    let resolved_theme = resolve_theme_mode(theme_mode);
    let dark_mode = resolved_theme == ThemeMode::Dark;

    let mut style = (*ctx.style()).clone();
    style.visuals = if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    style.visuals.window_fill = FundColors::background(dark_mode);
    style.visuals.panel_fill = FundColors::background(dark_mode);
    style.visuals.faint_bg_color = FundColors::background(dark_mode);
    style.visuals.window_stroke = Stroke::new(Shape::BORDER_WIDTH, FundColors::border(dark_mode));
    style.visuals.override_text_color = Some(FundColors::text_primary(dark_mode));
    style.visuals.hyperlink_color = FundColors::ACCENT;

    style.visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, FundColors::ACCENT);
    style.visuals.widgets.active.bg_fill = FundColors::ACCENT;
    style.visuals.widgets.active.weak_bg_fill = FundColors::ACCENT;
    style.visuals.widgets.active.fg_stroke.color = FundColors::WHITE;
    style.visuals.widgets.open.bg_stroke = Stroke::new(2.0, FundColors::ACCENT);
    style.visuals.selection.stroke = Stroke::new(1.0, FundColors::ACCENT);

    style.spacing.item_spacing = Vec2::new(Spacing::SM, Spacing::SM);
    style.spacing.button_padding = Vec2::new(16.0, 8.0);

    ctx.set_style(style);
    tracing::debug!(?theme_mode, dark_mode, "theme applied");
}
