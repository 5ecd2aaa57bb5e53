use eframe::egui;
use tokio::sync::mpsc;

/// A tokio sender that wakes the UI after every delivered message.
///
/// Backend tasks finish while egui is idle; without the repaint their results would
/// sit in the channel until the next input event.
pub struct SenderAsync<T> {
    sender: mpsc::Sender<T>,
    ctx: egui::Context,
}

impl<T> SenderAsync<T> {
    pub fn new(sender: mpsc::Sender<T>, ctx: egui::Context) -> Self {
        Self { sender, ctx }
    }

    /// Send a message and trigger a repaint
    pub async fn send(&self, value: T) -> Result<(), mpsc::error::SendError<T>> {
        let result = self.sender.send(value).await;
        if result.is_ok() {
            self.ctx.request_repaint();
        }
        result
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<T> Clone for SenderAsync<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            ctx: self.ctx.clone(),
        }
    }
}

pub trait EguiMpscAsync<T> {
    fn with_egui_ctx(self, ctx: egui::Context) -> (SenderAsync<T>, mpsc::Receiver<T>);
}

impl<T> EguiMpscAsync<T> for (mpsc::Sender<T>, mpsc::Receiver<T>) {
    fn with_egui_ctx(self, ctx: egui::Context) -> (SenderAsync<T>, mpsc::Receiver<T>) {
        let sender = SenderAsync::new(self.0, ctx);
        (sender, self.1)
    }
}
