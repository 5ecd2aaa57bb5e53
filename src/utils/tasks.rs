use std::sync::{Arc, Mutex};
use tokio::task::JoinSet;
use tokio::time::{Duration, timeout};
use tokio_util::sync::CancellationToken;

/// Timeout duration for graceful shutdown.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// TaskManager tracks spawned backend tasks and allows for graceful shutdown of all of them.
#[derive(Debug, Clone)]
pub struct TaskManager {
    pub cancellation_token: CancellationToken,
    tasks: Arc<Mutex<JoinSet<()>>>,
}

impl TaskManager {
    pub fn new() -> Self {
        TaskManager {
            cancellation_token: CancellationToken::new(),
            tasks: Arc::new(Mutex::new(JoinSet::new())),
        }
    }

    /// Spawn a future on the current runtime; it is dropped as soon as shutdown starts.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(&self, future: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let cancel = self.cancellation_token.clone();
        let mut tasks = self.lock_tasks();
        // reap what already finished so the set does not grow with every click
        while let Some(result) = tasks.try_join_next() {
            if let Err(e) = result
                && !e.is_cancelled()
            {
                tracing::error!("Backend task failed: {:?}", e);
            }
        }
        tasks.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = future => {}
            }
        });
    }

    pub fn running(&self) -> usize {
        self.lock_tasks().len()
    }

    /// Cancel all tasks and wait for them to finish, up to [SHUTDOWN_TIMEOUT].
    ///
    /// Blocks the calling thread, so it must not run on a current-thread runtime.
    pub fn shutdown(&self) {
        self.cancellation_token.cancel();
        let mut tasks = std::mem::take(&mut *self.lock_tasks());
        if tasks.is_empty() {
            return;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            // no runtime left to drive them; dropping the set aborts them
            return;
        };
        let (tx, rx) = std::sync::mpsc::channel::<usize>();
        handle.spawn(async move {
            let mut completed = 0;
            timeout(SHUTDOWN_TIMEOUT, async {
                while let Some(result) = tasks.join_next().await {
                    if let Err(e) = result
                        && !e.is_cancelled()
                    {
                        tracing::error!("Backend task failed: {:?}", e);
                    }
                    completed += 1;
                }
            })
            .await
            .ok();
            tasks.shutdown().await;
            let _ = tx.send(completed);
        });

        match rx.recv_timeout(SHUTDOWN_TIMEOUT + Duration::from_secs(1)) {
            Ok(completed) => tracing::debug!(
                "Shutdown complete, {} backend tasks finished cleanly",
                completed
            ),
            Err(_) => tracing::warn!("Backend tasks did not stop within the shutdown timeout"),
        }
    }

    fn lock_tasks(&self) -> std::sync::MutexGuard<'_, JoinSet<()>> {
        self.tasks.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        TaskManager::new()
    }
}
