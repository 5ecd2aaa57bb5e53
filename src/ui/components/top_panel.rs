use crate::app::AppAction;
use crate::backend_task::{BackendTask, WalletTask};
use crate::context::AppContext;
use crate::ui::components::styled::StyledButton;
use crate::ui::theme::{FundColors, Spacing, ThemeMode, Typography};
use egui::{Align, Context, Frame, Layout, Margin, RichText, TopBottomPanel, Ui};
use std::sync::Arc;

pub const APP_TITLE: &str = "Collectooorr Mek";

fn add_wallet_controls(ui: &mut Ui, app_context: &Arc<AppContext>, connecting: bool) -> AppAction {
    let mut action = AppAction::None;
    let dark_mode = ui.ctx().style().visuals.dark_mode;

    match app_context.wallet().session() {
        Some(session) => {
            if StyledButton::secondary("Disconnect").show(ui).clicked() {
                action = AppAction::Logout;
            }
            ui.label(
                RichText::new(session.account().short())
                    .monospace()
                    .color(FundColors::text_secondary(dark_mode)),
            )
            .on_hover_text(session.account().to_string());
        }
        None if connecting => {
            ui.add_enabled(false, egui::Button::new("Connecting…"));
            ui.spinner();
        }
        None => {
            if StyledButton::primary("Connect").show(ui).clicked() {
                action = AppAction::BackendTask(BackendTask::WalletTask(WalletTask::Authenticate));
            }
        }
    }
    action
}

/// Header with the title, the theme switch and the wallet button.
pub fn add_top_panel(
    ctx: &Context,
    app_context: &Arc<AppContext>,
    theme_mode: ThemeMode,
    connecting: bool,
) -> AppAction {
    let mut action = AppAction::None;
    let dark_mode = ctx.style().visuals.dark_mode;

    TopBottomPanel::top("top_panel")
        .frame(
            Frame::new()
                .fill(FundColors::surface(dark_mode))
                .inner_margin(Margin::symmetric(Spacing::MD_I8, 10)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(APP_TITLE).font(Typography::heading_medium()).strong());
                let chain = app_context.chain();
                ui.label(
                    RichText::new(chain.as_str())
                        .font(Typography::body_small())
                        .color(FundColors::text_secondary(dark_mode)),
                )
                .on_hover_text(if chain.is_testnet() {
                    "Test network"
                } else {
                    "Main network"
                });

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    action |= add_wallet_controls(ui, app_context, connecting);

                    let theme_button = ui
                        .button(theme_mode.icon())
                        .on_hover_text(format!("Theme: {:?}", theme_mode));
                    if theme_button.clicked() {
                        action |= AppAction::SetTheme(theme_mode.next());
                    }
                });
            });
        });

    action
}
