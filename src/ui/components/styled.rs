use crate::ui::theme::{FundColors, Shape, Spacing, Typography};
use egui::{Button, Frame, Margin, Response, RichText, Stroke, Ui, Vec2};

/// Styled button variants
pub(crate) enum ButtonVariant {
    Primary,
    Secondary,
}

/// A button in the fund's colors
pub(crate) struct StyledButton {
    text: String,
    variant: ButtonVariant,
    enabled: bool,
    min_width: Option<f32>,
}

impl StyledButton {
    pub fn primary(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            variant: ButtonVariant::Primary,
            enabled: true,
            min_width: None,
        }
    }

    pub fn secondary(text: impl Into<String>) -> Self {
        Self {
            variant: ButtonVariant::Secondary,
            ..Self::primary(text)
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        let dark_mode = ui.ctx().style().visuals.dark_mode;

        let (text_color, bg_color, stroke) = match self.variant {
            ButtonVariant::Primary => (FundColors::WHITE, FundColors::ACCENT, Stroke::NONE),
            ButtonVariant::Secondary => (
                FundColors::text_primary(dark_mode),
                FundColors::surface(dark_mode),
                Stroke::new(Shape::BORDER_WIDTH, FundColors::ACCENT),
            ),
        };
        let fill = if self.enabled {
            bg_color
        } else {
            bg_color.gamma_multiply(0.4)
        };

        let mut button = Button::new(
            RichText::new(self.text)
                .size(Typography::SCALE_BASE)
                .color(text_color),
        )
        .fill(fill)
        .stroke(stroke)
        .corner_radius(egui::CornerRadius::same(Shape::RADIUS_MD));

        if let Some(min_width) = self.min_width {
            button = button.min_size(Vec2::new(min_width, 0.0));
        }

        let response = ui.add_enabled(self.enabled, button);
        if response.hovered() && self.enabled {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        response
    }
}

/// Rounded panel with an optional heading
pub(crate) struct StyledCard {
    title: Option<String>,
    padding: i8,
}

impl StyledCard {
    pub fn new() -> Self {
        Self {
            title: None,
            padding: Spacing::MD_I8,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn show<R>(self, ui: &mut Ui, content: impl FnOnce(&mut Ui) -> R) -> R {
        let dark_mode = ui.ctx().style().visuals.dark_mode;

        Frame::new()
            .fill(FundColors::surface(dark_mode))
            .stroke(Stroke::new(Shape::BORDER_WIDTH, FundColors::border(dark_mode)))
            .corner_radius(egui::CornerRadius::same(Shape::RADIUS_MD))
            .inner_margin(Margin::same(self.padding))
            .show(ui, |ui| {
                if let Some(title) = self.title {
                    ui.label(RichText::new(title).font(Typography::heading_medium()));
                    ui.add_space(Spacing::SM);
                }
                content(ui)
            })
            .inner
    }
}

impl Default for StyledCard {
    fn default() -> Self {
        Self::new()
    }
}

/// Large value with a caption below it, e.g. "Total Deposits".
pub(crate) fn stat(ui: &mut Ui, caption: &str, value: &str) {
    let dark_mode = ui.ctx().style().visuals.dark_mode;
    ui.vertical(|ui| {
        ui.label(RichText::new(value).font(Typography::heading_large()).strong());
        ui.label(
            RichText::new(caption)
                .font(Typography::body_small())
                .color(FundColors::text_secondary(dark_mode)),
        );
    });
}

pub(crate) fn error_label(ui: &mut Ui, message: &str) -> Response {
    let dark_mode = ui.ctx().style().visuals.dark_mode;
    ui.colored_label(FundColors::error_color(dark_mode), message)
}

pub(crate) fn success_label(ui: &mut Ui, message: &str) -> Response {
    ui.colored_label(FundColors::SUCCESS, message)
}

pub(crate) fn muted_label(ui: &mut Ui, message: &str) -> Response {
    let dark_mode = ui.ctx().style().visuals.dark_mode;
    ui.label(
        RichText::new(message)
            .font(Typography::body())
            .color(FundColors::text_secondary(dark_mode)),
    )
}
