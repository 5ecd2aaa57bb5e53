use crate::app::AppAction;
use crate::backend_task::{
    BackendTask, BackendTaskSuccessResult, ChainDataTask, TaskError, TransferTask,
};
use crate::context::AppContext;
use crate::model::amount::Amount;
use crate::model::nft::NftPage;
use crate::model::query::{QuerySlot, QueryState};
use crate::model::transfer::{TransferError, TransferRequest};
use crate::ui::components::amount_input::AmountInput;
use crate::ui::components::nft_grid::nft_grid;
use crate::ui::components::styled::{
    StyledButton, StyledCard, error_label, muted_label, stat, success_label,
};
use crate::ui::components::{Component, ComponentResponse};
use crate::ui::theme::Spacing;
use crate::ui::{MessageType, ScreenLike};
use egui::{CentralPanel, Context, ScrollArea, Ui};
use std::sync::Arc;
use std::time::{Duration, Instant};

const NOT_LOADED: &str = "--";

#[derive(Debug, Clone, PartialEq)]
pub enum DonationStatus {
    NotStarted,
    WaitingForResult(Instant),
    ErrorMessage(TransferError),
    Complete(String),
}

/// The fund page: collection on the left, balance and donation form on the right.
pub struct FundScreen {
    pub app_context: Arc<AppContext>,
    balance: QuerySlot<Amount>,
    nfts: QuerySlot<NftPage>,
    amount_input: Option<AmountInput>,
    donation_status: DonationStatus,
    refresh_balance_requested: bool,
    message: Option<(String, MessageType)>,
}

impl FundScreen {
    pub fn new(app_context: &Arc<AppContext>) -> Self {
        Self {
            app_context: app_context.clone(),
            balance: QuerySlot::default(),
            nfts: QuerySlot::default(),
            amount_input: None,
            donation_status: DonationStatus::NotStarted,
            refresh_balance_requested: false,
            message: None,
        }
    }

    pub fn donation_status(&self) -> &DonationStatus {
        &self.donation_status
    }

    pub fn balance(&self) -> &QuerySlot<Amount> {
        &self.balance
    }

    pub fn nfts(&self) -> &QuerySlot<NftPage> {
        &self.nfts
    }

    fn amount_input(&mut self) -> &mut AmountInput {
        let chain = self.app_context.chain();
        self.amount_input.get_or_insert_with(|| {
            AmountInput::new(Amount::native(0, chain))
                .label("Amount:")
                .hint_text("0.0")
                .desired_width(140.0)
        })
    }

    fn refresh_balance(&mut self) -> AppAction {
        let ticket = self.balance.start();
        AppAction::BackendTask(BackendTask::ChainDataTask(
            ChainDataTask::FetchNativeBalance { ticket },
        ))
    }

    /// Validates the typed amount and claims the submission slot.
    ///
    /// The slot is claimed here, on the UI thread, so a second click in the same
    /// frame is already rejected.
    fn donate(&mut self) -> AppAction {
        let amount_text = self.amount_input().text().to_string();
        let request = match TransferRequest::build(
            &amount_text,
            self.app_context.chain(),
            self.app_context.fund_address(),
        ) {
            Ok(request) => request,
            Err(e) => {
                self.donation_status = DonationStatus::ErrorMessage(e);
                return AppAction::None;
            }
        };

        match self
            .app_context
            .transfer_submitter()
            .begin(self.app_context.wallet(), request)
        {
            Ok(pending) => {
                self.donation_status = DonationStatus::WaitingForResult(Instant::now());
                AppAction::BackendTask(BackendTask::TransferTask(TransferTask::Submit(pending)))
            }
            Err(TransferError::AlreadyPending) => {
                tracing::debug!("donation already in flight, ignoring click");
                AppAction::None
            }
            Err(e) => {
                self.donation_status = DonationStatus::ErrorMessage(e);
                AppAction::None
            }
        }
    }

    fn render_collection(&mut self, ui: &mut Ui) {
        let collection_name = self.app_context.config().collection_name.clone();
        let image_base_url = self.app_context.config().image_base_url.clone();

        StyledCard::new().title(&collection_name).show(ui, |ui| {
            let pieces = match self.nfts.state() {
                QueryState::Data(page) => page.total().to_string(),
                _ => NOT_LOADED.to_string(),
            };
            stat(ui, "Pieces Collected", &pieces);
            ui.add_space(Spacing::MD);

            match self.nfts.state() {
                QueryState::Idle => {}
                QueryState::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading collection…");
                    });
                }
                QueryState::Error(error) => {
                    error_label(ui, error);
                }
                QueryState::Data(page) => {
                    nft_grid(ui, page.in_collection(&collection_name), &image_base_url);
                }
            }
        });
    }

    fn render_fund(&mut self, ui: &mut Ui) -> AppAction {
        let mut action = AppAction::None;
        let authenticated = self.app_context.wallet().is_authenticated();
        let pending = self.app_context.transfer_submitter().is_pending();

        StyledCard::new().title("Fund").show(ui, |ui| {
            ui.horizontal(|ui| {
                let deposits = match self.balance.state() {
                    QueryState::Data(balance) => balance.to_string(),
                    _ => NOT_LOADED.to_string(),
                };
                stat(ui, "Total Deposits", &deposits);
                if self.balance.is_loading() {
                    ui.spinner();
                }
            });
            if let QueryState::Error(error) = self.balance.state() {
                error_label(ui, error);
            }
            ui.add_space(Spacing::MD);

            let response = ui
                .add_enabled_ui(!pending, |ui| self.amount_input().show(ui))
                .inner;
            if let Some(error) = response.inner.error_message() {
                error_label(ui, error);
            }
            if response.inner.has_changed()
                && matches!(self.donation_status, DonationStatus::ErrorMessage(_))
            {
                self.donation_status = DonationStatus::NotStarted;
            }

            ui.add_space(Spacing::SM);
            let can_submit = authenticated && !pending && response.inner.is_valid();
            if StyledButton::primary("Donate")
                .enabled(can_submit)
                .min_width(120.0)
                .show(ui)
                .clicked()
            {
                action = self.donate();
            }
            if !authenticated {
                muted_label(ui, "Connect wallet to donate");
            }

            ui.add_space(Spacing::SM);
            self.render_donation_status(ui);
        });

        action
    }

    fn render_donation_status(&self, ui: &mut Ui) {
        match &self.donation_status {
            DonationStatus::NotStarted => {}
            DonationStatus::WaitingForResult(started) => {
                let elapsed = started.elapsed().as_secs();
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!(
                        "Donating… {} seconds. Confirm the transaction in your wallet.",
                        elapsed
                    ));
                });
                ui.ctx().request_repaint_after(Duration::from_secs(1));
            }
            DonationStatus::ErrorMessage(error) => {
                error_label(ui, &error.to_string());
            }
            DonationStatus::Complete(tx_hash) => {
                success_label(ui, "Thank you for your donation!");
                ui.label(egui::RichText::new(format!("Transaction {}", tx_hash)).monospace());
            }
        }
    }
}

impl ScreenLike for FundScreen {
    fn refresh(&mut self) -> AppAction {
        let balance_ticket = self.balance.start();
        let nfts_ticket = self.nfts.start();
        AppAction::BackendTasks(vec![
            BackendTask::ChainDataTask(ChainDataTask::FetchNativeBalance {
                ticket: balance_ticket,
            }),
            BackendTask::ChainDataTask(ChainDataTask::FetchNfts {
                ticket: nfts_ticket,
            }),
        ])
    }

    fn ui(&mut self, ctx: &Context) -> AppAction {
        let mut action = AppAction::None;
        if std::mem::take(&mut self.refresh_balance_requested) {
            action |= self.refresh_balance();
        }

        CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal(|ui| {
                    let loading = self.balance.is_loading() || self.nfts.is_loading();
                    if ui
                        .add_enabled(!loading, egui::Button::new("Refresh"))
                        .clicked()
                    {
                        action |= AppAction::Refresh;
                    }
                    if let Some((message, message_type)) = &self.message {
                        let dark_mode = ui.ctx().style().visuals.dark_mode;
                        ui.colored_label(message_type.color(dark_mode), message);
                    }
                });
                ui.add_space(Spacing::MD);

                ui.columns(2, |columns| {
                    self.render_collection(&mut columns[0]);
                    action |= self.render_fund(&mut columns[1]);
                });
            });
        });

        action
    }

    fn display_message(&mut self, message: &str, message_type: MessageType) {
        self.message = Some((message.to_string(), message_type));
    }

    fn display_task_result(&mut self, backend_task_success_result: BackendTaskSuccessResult) {
        match backend_task_success_result {
            BackendTaskSuccessResult::Authenticated(session) => {
                self.display_message(
                    &format!("Connected as {}", session.account().short()),
                    MessageType::Success,
                );
            }
            BackendTaskSuccessResult::NativeBalance { ticket, balance } => {
                if !self.balance.resolve(ticket, Ok(balance)) {
                    tracing::debug!(?ticket, "discarding stale balance result");
                }
            }
            BackendTaskSuccessResult::Nfts { ticket, page } => {
                if !self.nfts.resolve(ticket, Ok(page)) {
                    tracing::debug!(?ticket, "discarding stale NFT result");
                }
            }
            BackendTaskSuccessResult::TransferSubmitted { tx_hash } => {
                self.donation_status = DonationStatus::Complete(tx_hash);
                self.amount_input().clear();
                self.refresh_balance_requested = true;
            }
        }
    }

    fn display_task_error(&mut self, error: TaskError) {
        match error {
            TaskError::NativeBalance { ticket, error } => {
                if !self.balance.resolve(ticket, Err(error.to_string())) {
                    tracing::debug!(?ticket, "discarding stale balance error");
                }
            }
            TaskError::Nfts { ticket, error } => {
                if !self.nfts.resolve(ticket, Err(error.to_string())) {
                    tracing::debug!(?ticket, "discarding stale NFT error");
                }
            }
            TaskError::Transfer(error) => {
                self.donation_status = DonationStatus::ErrorMessage(error);
            }
            other @ TaskError::Authentication(_) => {
                self.display_message(&other.to_string(), MessageType::Error);
            }
        }
    }
}
