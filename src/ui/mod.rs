use crate::app::AppAction;
use crate::backend_task::{BackendTaskSuccessResult, TaskError};
use crate::ui::theme::FundColors;
use egui::{Color32, Context};

pub mod components;
pub mod fund_screen;
pub mod theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Info,
    Error,
}

impl MessageType {
    pub fn color(&self, dark_mode: bool) -> Color32 {
        match self {
            MessageType::Success => FundColors::SUCCESS,
            MessageType::Info => FundColors::INFO,
            MessageType::Error => FundColors::error_color(dark_mode),
        }
    }
}

pub trait ScreenLike {
    /// Re-issues the screen's queries.
    fn refresh(&mut self) -> AppAction {
        AppAction::None
    }
    fn ui(&mut self, ctx: &Context) -> AppAction;
    fn display_message(&mut self, _message: &str, _message_type: MessageType) {}
    fn display_task_result(&mut self, _backend_task_success_result: BackendTaskSuccessResult) {
        self.display_message("Success", MessageType::Success)
    }
    fn display_task_error(&mut self, error: TaskError) {
        self.display_message(&error.to_string(), MessageType::Error)
    }
}
