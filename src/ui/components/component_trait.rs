use egui::{InnerResponse, Ui};

/// Generic response trait for UI components.
///
/// All component responses implement this trait to provide consistent access to
/// basic response properties.
pub trait ComponentResponse: Clone {
    /// Returns whether the component input/state has changed
    fn has_changed(&self) -> bool;

    /// Returns whether the component is in a valid state (no error)
    fn is_valid(&self) -> bool;

    /// Returns any error message from the component
    fn error_message(&self) -> Option<&str>;
}

/// Core trait for self-contained UI components.
///
/// A component owns its internal state, is created lazily from a domain object
/// (usually as `Option<Component>` on the screen), and communicates with the screen
/// only through the response returned by [Component::show].
///
/// ```ignore
/// let input = self
///     .amount_input
///     .get_or_insert_with(|| AmountInput::new(Amount::eth(0)).label("Amount:"));
/// let response = input.show(ui);
/// if response.inner.has_changed() && !response.inner.is_valid() {
///     self.clear_data();
/// }
/// ```
pub trait Component {
    /// The domain object that configures the component's behavior
    /// (e.g. decimal places and unit name of an amount).
    type DomainType;

    /// The response type returned by [Component::show].
    type Response: ComponentResponse;

    fn new(domain_object: Self::DomainType) -> Self;

    /// Renders the component and returns the result of the interaction.
    fn show(&mut self, ui: &mut Ui) -> InnerResponse<Self::Response>;
}
