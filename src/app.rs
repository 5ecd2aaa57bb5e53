use crate::backend_task::{BackendTask, BackendTaskSuccessResult, TaskError, WalletTask};
use crate::context::AppContext;
use crate::ui::components::top_panel::add_top_panel;
use crate::ui::fund_screen::FundScreen;
use crate::ui::theme::{ThemeMode, apply_theme};
use crate::ui::{MessageType, ScreenLike};
use crate::utils::egui_mpsc::{EguiMpscAsync, SenderAsync};
use crate::utils::tasks::TaskManager;
use eframe::{App, egui};
use std::ops::BitOrAssign;
use std::sync::Arc;
use tokio::sync::mpsc;

const THEME_STORAGE_KEY: &str = "theme_mode";

#[derive(Debug)]
pub enum TaskResult {
    Success(Box<BackendTaskSuccessResult>),
    Error(TaskError),
}

impl From<Result<BackendTaskSuccessResult, TaskError>> for TaskResult {
    fn from(value: Result<BackendTaskSuccessResult, TaskError>) -> Self {
        match value {
            Ok(result) => TaskResult::Success(Box::new(result)),
            Err(e) => TaskResult::Error(e),
        }
    }
}

#[derive(Debug)]
pub enum AppAction {
    None,
    Refresh,
    BackendTask(BackendTask),
    BackendTasks(Vec<BackendTask>),
    Logout,
    SetTheme(ThemeMode),
    /// Several actions raised in the same frame, applied in order.
    Batch(Vec<AppAction>),
}

impl AppAction {
    fn is_backend_task(&self) -> bool {
        matches!(self, AppAction::BackendTask(_) | AppAction::BackendTasks(_))
    }
}

impl BitOrAssign for AppAction {
    fn bitor_assign(&mut self, rhs: Self) {
        match (std::mem::replace(self, AppAction::None), rhs) {
            // If rhs is None, keep the current value.
            (current, AppAction::None) => *self = current,
            (AppAction::None, rhs) => *self = rhs,
            // Backend tasks accumulate so that none is lost within a frame.
            (AppAction::BackendTask(a), AppAction::BackendTask(b)) => {
                *self = AppAction::BackendTasks(vec![a, b])
            }
            (AppAction::BackendTasks(mut tasks), AppAction::BackendTask(b)) => {
                tasks.push(b);
                *self = AppAction::BackendTasks(tasks)
            }
            (AppAction::BackendTask(a), AppAction::BackendTasks(mut tasks)) => {
                tasks.insert(0, a);
                *self = AppAction::BackendTasks(tasks)
            }
            (AppAction::BackendTasks(mut tasks), AppAction::BackendTasks(more)) => {
                tasks.extend(more);
                *self = AppAction::BackendTasks(tasks)
            }
            (AppAction::Batch(mut actions), rhs) => {
                actions.push(rhs);
                *self = AppAction::Batch(actions)
            }
            (current, AppAction::Batch(mut actions)) => {
                actions.insert(0, current);
                *self = AppAction::Batch(actions)
            }
            // A task carries a claimed donation, so it is never replaced.
            (current, rhs) if current.is_backend_task() || rhs.is_backend_task() => {
                *self = AppAction::Batch(vec![current, rhs])
            }
            // Otherwise, assign rhs to self.
            (_, rhs) => *self = rhs,
        }
    }
}

pub struct AppState {
    pub fund_screen: FundScreen,
    pub app_context: Arc<AppContext>,
    pub task_result_sender: SenderAsync<TaskResult>,
    pub task_result_receiver: mpsc::Receiver<TaskResult>,
    pub theme_mode: ThemeMode,
    /// A wallet authentication request is waiting for the user
    pub authenticating: bool,
    task_manager: TaskManager,
    animations: bool,
}

impl AppState {
    /// Creates the app and issues the initial queries.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(ctx: egui::Context, app_context: Arc<AppContext>) -> Self {
        let (task_result_sender, task_result_receiver) =
            mpsc::channel::<TaskResult>(256).with_egui_ctx(ctx.clone());

        let mut app = Self {
            fund_screen: FundScreen::new(&app_context),
            app_context,
            task_result_sender,
            task_result_receiver,
            theme_mode: ThemeMode::default(),
            authenticating: false,
            task_manager: TaskManager::new(),
            animations: true,
        };
        apply_theme(&ctx, app.theme_mode);

        let action = app.fund_screen.refresh();
        app.handle_action(action);
        app
    }

    /// Restores the theme saved by a previous run.
    pub fn with_storage(mut self, ctx: &egui::Context, storage: Option<&dyn eframe::Storage>) -> Self {
        if let Some(theme_mode) =
            storage.and_then(|s| eframe::get_value::<ThemeMode>(s, THEME_STORAGE_KEY))
        {
            self.theme_mode = theme_mode;
            apply_theme(ctx, theme_mode);
        }
        self
    }

    pub fn with_animations(mut self, enabled: bool) -> Self {
        self.animations = enabled;
        self
    }

    /// Handle the backend task in a separate task.
    pub fn handle_backend_task(&mut self, task: BackendTask) {
        if matches!(task, BackendTask::WalletTask(WalletTask::Authenticate)) {
            self.authenticating = true;
        }

        let sender = self.task_result_sender.clone();
        let app_context = self.app_context.clone();

        self.task_manager.spawn(async move {
            let result = app_context.run_backend_task(task).await;
            if let Err(e) = sender.send(result.into()).await {
                tracing::error!("Failed to send backend task result: {}", e);
            }
        });
    }

    pub fn handle_backend_tasks(&mut self, tasks: Vec<BackendTask>) {
        for task in tasks {
            self.handle_backend_task(task);
        }
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::None => {}
            AppAction::Refresh => {
                let action = self.fund_screen.refresh();
                self.handle_action(action);
            }
            AppAction::BackendTask(task) => self.handle_backend_task(task),
            AppAction::BackendTasks(tasks) => self.handle_backend_tasks(tasks),
            AppAction::Logout => {
                self.app_context.wallet().logout();
                self.fund_screen
                    .display_message("Wallet disconnected", MessageType::Info);
            }
            AppAction::SetTheme(theme_mode) => {
                self.theme_mode = theme_mode;
            }
            AppAction::Batch(actions) => {
                for action in actions {
                    self.handle_action(action);
                }
            }
        }
    }

    fn handle_task_result(&mut self, task_result: TaskResult) {
        match task_result {
            TaskResult::Success(result) => {
                if matches!(*result, BackendTaskSuccessResult::Authenticated(_)) {
                    self.authenticating = false;
                }
                self.fund_screen.display_task_result(*result);
            }
            TaskResult::Error(error) => {
                if matches!(error, TaskError::Authentication(_)) {
                    self.authenticating = false;
                }
                tracing::debug!(%error, "backend task failed");
                self.fund_screen.display_task_error(error);
            }
        }
    }
}

impl App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Results are applied in the order their tasks finished.
        while let Ok(task_result) = self.task_result_receiver.try_recv() {
            self.handle_task_result(task_result);
        }

        if !self.animations {
            ctx.style_mut(|s| s.animation_time = 0.0);
        }

        let previous_theme = self.theme_mode;
        let mut action = add_top_panel(ctx, &self.app_context, self.theme_mode, self.authenticating);
        action |= self.fund_screen.ui(ctx);
        self.handle_action(action);

        if self.theme_mode != previous_theme {
            apply_theme(ctx, self.theme_mode);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, THEME_STORAGE_KEY, &self.theme_mode);
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        if tokio::runtime::Handle::try_current().is_ok() {
            tokio::task::block_in_place(|| self.task_manager.shutdown());
        } else {
            self.task_manager.cancellation_token.cancel();
        }
    }
}
