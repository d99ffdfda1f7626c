pub mod color_scheme;

use std::collections::HashMap;
use std::future::Future;
use tokio::task::JoinHandle;

/// Where the executor sends its asynchronous work.
///
/// Production spawns onto the tokio runtime; tests run the futures to
/// completion inline so every event is available right after the command.
pub trait TaskSpawner {
    /// Run `future` under `task_id`, replacing any task with the same id
    fn spawn_task<F>(&mut self, task_id: &str, future: F)
    where
        F: Future<Output = ()> + Send + 'static;

    /// Cancel all running tasks (used on shutdown)
    fn cancel_all(&mut self) {}
}

/// Manages background tasks for session and preference work
/// Tracks running tasks and provides cancellation support
pub struct BackgroundTaskManager {
    tasks: HashMap<String, JoinHandle<()>>,
}

impl BackgroundTaskManager {
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
        }
    }

    /// Number of tracked tasks that have not finished yet
    pub fn running(&self) -> usize {
        self.tasks.values().filter(|h| !h.is_finished()).count()
    }
}

impl TaskSpawner for BackgroundTaskManager {
    fn spawn_task<F>(&mut self, task_id: &str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Cancel existing task with same ID (prevents stale results)
        if let Some(handle) = self.tasks.remove(task_id) {
            if !handle.is_finished() {
                tracing::debug!("Replacing running task '{}'", task_id);
            }
            handle.abort();
        }

        self.tasks.retain(|_, handle| !handle.is_finished());

        let handle = tokio::spawn(future);
        self.tasks.insert(task_id.to_string(), handle);
    }

    fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

impl Default for BackgroundTaskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BackgroundTaskManager {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Runs every task to completion before returning
#[derive(Debug, Default)]
pub struct InlineTasks {
    completed: Vec<String>,
}

impl InlineTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of the tasks run so far, oldest first
    pub fn completed(&self) -> &[String] {
        &self.completed
    }
}

impl TaskSpawner for InlineTasks {
    fn spawn_task<F>(&mut self, task_id: &str, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        futures::executor::block_on(future);
        self.completed.push(task_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn respawning_an_id_aborts_the_previous_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut manager = BackgroundTaskManager::new();

        let slow = tx.clone();
        manager.spawn_task("save_settings", async move {
            tokio::time::sleep(Duration::from_secs(60)).await;
            let _ = slow.send("first");
        });
        manager.spawn_task("save_settings", async move {
            let _ = tx.send("second");
        });

        assert_eq!(rx.recv().await, Some("second"));
        // the first sender was dropped with its aborted task
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn cancel_all_stops_everything() {
        let mut manager = BackgroundTaskManager::new();
        for id in ["a", "b"] {
            manager.spawn_task(id, async {
                tokio::time::sleep(Duration::from_secs(60)).await;
            });
        }
        assert_eq!(manager.running(), 2);

        manager.cancel_all();
        assert_eq!(manager.running(), 0);
    }

    #[test]
    fn inline_tasks_complete_before_returning() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = InlineTasks::new();

        tasks.spawn_task("restore_session", async move {
            let _ = tx.send(42);
        });

        assert_eq!(rx.try_recv().ok(), Some(42));
        assert_eq!(tasks.completed(), ["restore_session"]);
    }
}
