use crate::model::amount::Amount;
use crate::ui::components::component_trait::{Component, ComponentResponse};
use egui::{InnerResponse, Response, TextEdit, Ui, WidgetText};

/// Amount input that validates decimal text as it is typed.
///
/// Precision and unit come from the domain [Amount] the input is created with. The
/// raw text is kept as typed so the caller can build a request from exactly what the
/// user sees.
pub struct AmountInput {
    template: Amount,
    amount_str: String,
    label: Option<WidgetText>,
    hint_text: Option<WidgetText>,
    desired_width: Option<f32>,
}

/// Response from the amount input widget
#[derive(Clone)]
pub struct AmountInputResponse {
    /// The response from the text edit widget
    pub response: Response,
    pub changed: bool,
    pub error_message: Option<String>,
}

impl ComponentResponse for AmountInputResponse {
    fn has_changed(&self) -> bool {
        self.changed
    }

    fn is_valid(&self) -> bool {
        self.error_message.is_none()
    }

    fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl AmountInput {
    pub fn label<T: Into<WidgetText>>(mut self, label: T) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn hint_text<T: Into<WidgetText>>(mut self, hint_text: T) -> Self {
        self.hint_text = Some(hint_text.into());
        self
    }

    pub fn desired_width(mut self, width: f32) -> Self {
        self.desired_width = Some(width);
        self
    }

    /// Text as typed by the user.
    pub fn text(&self) -> &str {
        &self.amount_str
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.amount_str = text.into();
    }

    pub fn clear(&mut self) {
        self.amount_str.clear();
    }

    /// Validates `text` against the configured precision and unit.
    ///
    /// Empty input is not an error here; it simply has no value yet.
    pub fn validate(&self, text: &str) -> Result<Option<Amount>, String> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let decimal_places = self.template.decimal_places();
        match self.template.unit_name() {
            Some(unit) => Amount::parse_with_unit(text, decimal_places, unit),
            None => Amount::parse_with_decimals(text, decimal_places),
        }
        .map(Some)
        .map_err(|e| e.to_string())
    }
}

impl Component for AmountInput {
    type DomainType = Amount;
    type Response = AmountInputResponse;

    fn new(domain_object: Self::DomainType) -> Self {
        Self {
            template: domain_object,
            amount_str: String::new(),
            label: None,
            hint_text: None,
            desired_width: None,
        }
    }

    fn show(&mut self, ui: &mut Ui) -> InnerResponse<Self::Response> {
        ui.horizontal(|ui| {
            if let Some(label) = self.label.clone() {
                ui.label(label);
            }

            let mut text_edit = TextEdit::singleline(&mut self.amount_str);
            if let Some(hint) = self.hint_text.clone() {
                text_edit = text_edit.hint_text(hint);
            }
            if let Some(width) = self.desired_width {
                text_edit = text_edit.desired_width(width);
            }

            let text_response = ui.add(text_edit);
            let changed = text_response.changed();

            if let Some(unit) = self.template.unit_name() {
                ui.label(unit);
            }

            AmountInputResponse {
                response: text_response,
                changed,
                error_message: self.validate(&self.amount_str).err(),
            }
        })
    }
}
