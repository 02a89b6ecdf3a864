//! Task runner - executes work on a bounded pool of blocking workers
//!
//! Each task gets two channels back to the interactive side: an ordered stream
//! of [`TaskEvent`]s and a single-fire channel for its result. The interactive
//! side calls [`TaskRunner::pump`] to drain both; callbacks and status updates
//! only ever run there.

use std::sync::Arc;

use anyhow::anyhow;
use tokio::runtime::Handle;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::sync::{mpsc, oneshot, Semaphore};

use crate::constants::SUCCESS_MESSAGE;
use crate::messages::TaskEvent;
use crate::models::{TaskId, TaskOutcome, TaskState};
use crate::shell::status::StatusSink;
use crate::shell::ViewShell;
use crate::tasks::reporter::ProgressReporter;

type SuccessHandler<P, T> = Box<dyn FnOnce(&mut ViewShell<P>, T) + Send>;
type ErrorHandler<P> = Box<dyn FnOnce(&mut ViewShell<P>, anyhow::Error) + Send>;

/// A submitted task as seen from the interactive side
trait PendingTask<P>: Send {
    fn id(&self) -> TaskId;
    fn name(&self) -> &str;
    fn state(&self) -> TaskState;
    /// Deliver whatever is ready. Returns the terminal state once finished.
    fn poll(&mut self, shell: &mut ViewShell<P>) -> Option<TaskState>;
}

struct Pending<P, T> {
    id: TaskId,
    name: String,
    state: TaskState,
    events: mpsc::UnboundedReceiver<TaskEvent>,
    result: oneshot::Receiver<anyhow::Result<T>>,
    on_success: Option<SuccessHandler<P, T>>,
    on_error: Option<ErrorHandler<P>>,
}

impl<P, T: Send> Pending<P, T> {
    /// Apply queued events. Only the latest percentage is rendered; the latest
    /// non-empty message goes with it.
    fn drain_events(&mut self, status: &mut StatusSink) {
        let mut percent = None;
        let mut message = None;

        while let Ok(event) = self.events.try_recv() {
            match event {
                TaskEvent::Started => {
                    if self.state == TaskState::Pending {
                        self.state = TaskState::Running;
                        tracing::debug!(task = %self.id, name = %self.name, "Task running");
                    }
                }
                TaskEvent::Progress(progress) => {
                    percent = Some(progress.percent);
                    if let Some(text) = progress.message.filter(|m| !m.is_empty()) {
                        message = Some(text);
                    }
                }
            }
        }

        if let Some(percent) = percent {
            status.set_progress(percent, message.as_deref());
        }
    }
}

impl<P, T: Send> PendingTask<P> for Pending<P, T> {
    fn id(&self) -> TaskId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> TaskState {
        self.state
    }

    fn poll(&mut self, shell: &mut ViewShell<P>) -> Option<TaskState> {
        // Check the result before draining: anything emitted before the result
        // is already queued by then, so completion is always delivered last.
        let finished = match self.result.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(anyhow!("la tâche s'est arrêtée sans résultat"))),
        };

        self.drain_events(&mut shell.status);

        match finished? {
            Ok(value) => {
                self.state = TaskState::Succeeded;
                shell.status.stop_spinner();
                shell.status.set_message(SUCCESS_MESSAGE);
                if let Some(on_success) = self.on_success.take() {
                    on_success(shell, value);
                }
            }
            Err(err) => {
                self.state = TaskState::Failed;
                tracing::warn!(task = %self.id, name = %self.name, error = %err, "Task failed");
                shell.report_error(&err.to_string());
                if let Some(on_error) = self.on_error.take() {
                    on_error(shell, err);
                }
            }
        }
        Some(self.state)
    }
}

/// Runs work off the interactive thread and reports back to a [`ViewShell`]
pub struct TaskRunner<P> {
    handle: Handle,
    workers: Arc<Semaphore>,
    next_id: u64,
    // Submission order
    pending: Vec<Box<dyn PendingTask<P>>>,
    wake_tx: mpsc::UnboundedSender<TaskId>,
    wake_rx: mpsc::UnboundedReceiver<TaskId>,
}

impl<P: 'static> TaskRunner<P> {
    /// Create a runner spawning onto `handle`, with at most `max_workers`
    /// tasks executing at once.
    pub fn new(handle: Handle, max_workers: usize) -> Self {
        let (wake_tx, wake_rx) = mpsc::unbounded_channel();
        TaskRunner {
            handle,
            workers: Arc::new(Semaphore::new(max_workers.max(1))),
            next_id: 1,
            pending: Vec::new(),
            wake_tx,
            wake_rx,
        }
    }

    /// Submit `work`. The status bar shows the task name with a spinning
    /// indicator right away; exactly one of `on_success` / `on_error` runs
    /// later, from [`TaskRunner::pump`].
    pub fn submit<T, W, S, E>(
        &mut self,
        shell: &mut ViewShell<P>,
        name: impl Into<String>,
        work: W,
        on_success: S,
        on_error: E,
    ) -> TaskId
    where
        T: Send + 'static,
        W: FnOnce(&ProgressReporter) -> anyhow::Result<T> + Send + 'static,
        S: FnOnce(&mut ViewShell<P>, T) + Send + 'static,
        E: FnOnce(&mut ViewShell<P>, anyhow::Error) + Send + 'static,
    {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let name = name.into();

        shell.status.set_message(format!("{}...", name));
        shell.status.start_spinner();
        tracing::info!(task = %id, name = %name, "Task submitted");

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (result_tx, result_rx) = oneshot::channel();
        let reporter = ProgressReporter::new(id, event_tx, self.wake_tx.clone());
        let workers = Arc::clone(&self.workers);
        let wake_tx = self.wake_tx.clone();

        self.handle.spawn(async move {
            let _permit = workers.acquire_owned().await;
            reporter.started();

            let result = match tokio::task::spawn_blocking(move || work(&reporter)).await {
                Ok(result) => result,
                Err(err) if err.is_panic() => Err(anyhow!(
                    "la tâche a été interrompue: {}",
                    panic_message(err.into_panic())
                )),
                Err(err) => Err(anyhow!(err)),
            };

            let _ = result_tx.send(result);
            let _ = wake_tx.send(id);
        });

        self.pending.push(Box::new(Pending {
            id,
            name,
            state: TaskState::Pending,
            events: event_rx,
            result: result_rx,
            on_success: Some(Box::new(on_success)),
            on_error: Some(Box::new(on_error)),
        }));
        id
    }

    /// Submit work that never reports progress
    pub fn submit_indeterminate<T, W, S, E>(
        &mut self,
        shell: &mut ViewShell<P>,
        name: impl Into<String>,
        work: W,
        on_success: S,
        on_error: E,
    ) -> TaskId
    where
        T: Send + 'static,
        W: FnOnce() -> anyhow::Result<T> + Send + 'static,
        S: FnOnce(&mut ViewShell<P>, T) + Send + 'static,
        E: FnOnce(&mut ViewShell<P>, anyhow::Error) + Send + 'static,
    {
        self.submit(shell, name, move |_| work(), on_success, on_error)
    }

    /// Deliver progress and completions that are ready, in submission order.
    /// Returns the tasks that finished during this call.
    pub fn pump(&mut self, shell: &mut ViewShell<P>) -> Vec<TaskOutcome> {
        // Wake-ups sent after this point trigger another pump
        while self.wake_rx.try_recv().is_ok() {}

        let mut outcomes = Vec::new();
        let mut index = 0;
        while index < self.pending.len() {
            match self.pending[index].poll(shell) {
                Some(state) => {
                    let task = self.pending.remove(index);
                    tracing::info!(task = %task.id(), name = %task.name(), state = ?state, "Task finished");
                    outcomes.push(TaskOutcome {
                        id: task.id(),
                        name: task.name().to_string(),
                        state,
                        finished_at: chrono::Utc::now(),
                    });
                }
                None => index += 1,
            }
        }
        outcomes
    }

    /// Wait until some task has something to deliver
    pub async fn changed(&mut self) {
        let _ = self.wake_rx.recv().await;
    }

    /// Pump until every submitted task has finished
    pub async fn run_until_idle(&mut self, shell: &mut ViewShell<P>) -> Vec<TaskOutcome> {
        let mut outcomes = self.pump(shell);
        while !self.pending.is_empty() {
            self.changed().await;
            outcomes.extend(self.pump(shell));
        }
        outcomes
    }

    /// State of a task still in flight; `None` once it has been delivered
    pub fn state(&self, id: TaskId) -> Option<TaskState> {
        self.pending.iter().find(|task| task.id() == id).map(|task| task.state())
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        String::from("panique inconnue")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::status::MessageTone;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    fn runner(max_workers: usize) -> (TaskRunner<String>, ViewShell<String>) {
        (TaskRunner::new(Handle::current(), max_workers), ViewShell::default())
    }

    #[tokio::test]
    async fn test_progress_then_success() {
        let (mut runner, mut shell) = runner(2);
        let errors = Arc::new(AtomicUsize::new(0));
        let errors_seen = Arc::clone(&errors);

        let id = runner.submit(
            &mut shell,
            "Connexion",
            |reporter| {
                for percent in [20, 50, 80] {
                    reporter.update_progress(percent);
                    std::thread::sleep(Duration::from_millis(5));
                }
                Ok(String::from("OK"))
            },
            |shell, result: String| {
                assert!(shell.add_page(result, "result"));
            },
            move |_, _| {
                errors_seen.fetch_add(1, Ordering::SeqCst);
            },
        );

        assert!(shell.status.is_spinning());
        assert_eq!(shell.status.message(), "Connexion...");

        let outcomes = runner.run_until_idle(&mut shell).await;
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].id, id);
        assert_eq!(outcomes[0].state, TaskState::Succeeded);

        assert_eq!(shell.pages.get("result").map(String::as_str), Some("OK"));
        assert_eq!(errors.load(Ordering::SeqCst), 0);
        assert!(!shell.status.is_spinning());
        assert_eq!(shell.status.message(), SUCCESS_MESSAGE);
        assert!(runner.state(id).is_none());
    }

    #[tokio::test]
    async fn test_error_flashes_then_reverts() {
        let (mut runner, mut shell) = runner(2);
        let successes = Arc::new(AtomicUsize::new(0));
        let successes_seen = Arc::clone(&successes);

        runner.submit(
            &mut shell,
            "Connexion",
            |_| -> anyhow::Result<()> { anyhow::bail!("bad credentials") },
            move |_, _| {
                successes_seen.fetch_add(1, Ordering::SeqCst);
            },
            |shell, err| {
                assert_eq!(err.to_string(), "bad credentials");
                shell.add_page(String::from("error"), "error-dialog");
            },
        );

        let outcomes = runner.run_until_idle(&mut shell).await;
        assert_eq!(outcomes[0].state, TaskState::Failed);
        assert_eq!(successes.load(Ordering::SeqCst), 0);
        assert!(shell.has_page("error-dialog"));
        assert!(!shell.status.is_spinning());
        assert_eq!(shell.status.message(), "Erreur: bad credentials");
        assert_eq!(shell.status.tone(), MessageTone::Error);

        shell.tick(Instant::now() + Duration::from_millis(3001));
        assert_eq!(shell.status.tone(), MessageTone::Normal);
    }

    #[tokio::test]
    async fn test_panicking_work_reaches_error_handler() {
        let (mut runner, mut shell) = runner(1);
        let errors = Arc::new(AtomicUsize::new(0));
        let errors_seen = Arc::clone(&errors);

        runner.submit_indeterminate(
            &mut shell,
            "Chargement",
            || -> anyhow::Result<u32> { panic!("disque plein") },
            |_, _| panic!("success handler must not run"),
            move |_, err| {
                assert!(err.to_string().contains("disque plein"));
                errors_seen.fetch_add(1, Ordering::SeqCst);
            },
        );

        runner.run_until_idle(&mut shell).await;
        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert!(shell.status.message().starts_with("Erreur: "));
    }

    #[tokio::test]
    async fn test_progress_is_never_rendered_out_of_order() {
        let (mut runner, mut shell) = runner(1);
        runner.submit(
            &mut shell,
            "Traitement",
            |reporter| {
                for percent in 0..=100u8 {
                    reporter.update_progress_message(percent, format!("Fichier {}", percent));
                }
                Ok(())
            },
            |_, _| {},
            |_, _| {},
        );

        let mut seen = Vec::new();
        while runner.in_flight() > 0 {
            runner.changed().await;
            // Sample what the previous pump rendered, before completion resets it
            let before = runner.in_flight();
            runner.pump(&mut shell);
            if runner.in_flight() == before {
                if let Some(percent) = shell.status.progress() {
                    assert_eq!(shell.status.message(), format!("Fichier {}", percent));
                    seen.push(percent);
                }
            }
        }

        assert!(seen.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(shell.status.message(), SUCCESS_MESSAGE);
    }

    #[tokio::test]
    async fn test_pool_bounds_concurrent_work() {
        let (mut runner, mut shell) = runner(2);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        for index in 0..5 {
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            runner.submit_indeterminate(
                &mut shell,
                format!("Tâche {}", index),
                move || {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(30));
                    running.fetch_sub(1, Ordering::SeqCst);
                    Ok(index)
                },
                |_, _| {},
                |_, _| {},
            );
        }

        let outcomes = runner.run_until_idle(&mut shell).await;
        assert_eq!(outcomes.len(), 5);
        assert!(outcomes.iter().all(|o| o.state == TaskState::Succeeded));
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_queued_task_stays_pending_until_a_worker_frees() {
        let (mut runner, mut shell) = runner(1);
        let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();

        let first = runner.submit_indeterminate(
            &mut shell,
            "Premier",
            move || {
                let _ = release_rx.recv();
                Ok(())
            },
            |_, _| {},
            |_, _| {},
        );
        let second = runner.submit_indeterminate(&mut shell, "Second", || Ok(()), |_, _| {}, |_, _| {});

        while runner.state(first) != Some(TaskState::Running) {
            runner.changed().await;
            runner.pump(&mut shell);
        }
        assert_eq!(runner.state(second), Some(TaskState::Pending));

        release_tx.send(()).unwrap();
        let outcomes = runner.run_until_idle(&mut shell).await;
        let order: Vec<_> = outcomes.iter().map(|o| o.id).collect();
        assert_eq!(order.len(), 2);
        assert!(order.contains(&first) && order.contains(&second));
        assert_eq!(runner.in_flight(), 0);
    }
}
