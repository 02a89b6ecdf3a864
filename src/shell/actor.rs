//! Shell actor - the interactive side of the application
//!
//! Owns the [`ViewShell`] and the [`TaskRunner`]; every mutation of pages,
//! navigation and status happens inside its message loop.

use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::config::ShellConfig;
use crate::constants::SPINNER_TICK_MS;
use crate::messages::{RenderState, UiEvent};
use crate::models::ButtonAction;
use crate::pages::{self, Page};
use crate::shell::ViewShell;
use crate::tasks::TaskRunner;

pub struct ShellActor {
    shell: ViewShell<Page>,
    runner: TaskRunner<Page>,
    config: ShellConfig,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl ShellActor {
    pub fn new(config: ShellConfig, handle: Handle, render_tx: mpsc::UnboundedSender<RenderState>) -> Self {
        let mut shell = ViewShell::new(config.error_flash());
        pages::install(&mut shell);

        ShellActor {
            shell,
            runner: TaskRunner::new(handle, config.max_workers),
            config,
            render_tx,
        }
    }

    /// Run the actor message loop until quit is confirmed or the UI goes away
    pub async fn run(mut self, mut ui_rx: mpsc::UnboundedReceiver<UiEvent>) {
        self.publish();
        let mut spinner = tokio::time::interval(Duration::from_millis(SPINNER_TICK_MS));
        spinner.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let deadline = self.shell.next_deadline();

            tokio::select! {
                event = ui_rx.recv() => {
                    match event {
                        Some(event) => {
                            if self.handle_ui_event(event) {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                _ = self.runner.changed() => {
                    for outcome in self.runner.pump(&mut self.shell) {
                        tracing::debug!(task = %outcome.id, state = ?outcome.state, at = %outcome.finished_at, "Task delivered");
                    }
                }
                _ = sleep_until(deadline) => {
                    self.shell.tick(Instant::now());
                }
                _ = spinner.tick(), if self.shell.status.is_spinning() => {
                    self.shell.status.advance_spinner();
                }
            }

            self.publish();
        }

        tracing::info!(in_flight = self.runner.in_flight(), "Shell actor stopped");
    }

    /// Handle a UI event, returns true if quit was confirmed
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        if self.shell.quit_requested() {
            match event {
                UiEvent::ConfirmQuit | UiEvent::Quit => return true,
                UiEvent::CancelQuit => self.shell.cancel_quit(),
                _ => {}
            }
            return false;
        }

        match event {
            UiEvent::Quit => return true,
            UiEvent::ClickButton(index) => {
                self.shell.click_at(index);
            }
            UiEvent::Back => {
                let top = self
                    .shell
                    .navigation
                    .top()
                    .filter(|button| button.action != ButtonAction::Quit)
                    .map(|button| button.name.clone());
                if let Some(name) = top {
                    self.shell.click(&name);
                }
            }
            UiEvent::ConfirmQuit | UiEvent::CancelQuit => {}
            other => {
                pages::handle_event(&other, &mut self.shell, &mut self.runner, &self.config.database_name);
            }
        }
        false
    }

    fn publish(&self) {
        let _ = self.render_tx.send(RenderState::from_shell(&self.shell));
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::PageView;

    async fn next_state(render_rx: &mut mpsc::UnboundedReceiver<RenderState>) -> RenderState {
        tokio::time::timeout(Duration::from_secs(5), render_rx.recv())
            .await
            .expect("render state in time")
            .expect("actor alive")
    }

    #[tokio::test]
    async fn test_quit_needs_confirmation() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let actor = ShellActor::new(ShellConfig::default(), Handle::current(), render_tx);
        let running = tokio::spawn(actor.run(ui_rx));

        let initial = next_state(&mut render_rx).await;
        assert_eq!(initial.buttons.len(), 1);
        assert!(initial.buttons[0].is_quit);
        assert!(matches!(initial.page, Some(PageView::Login { .. })));

        ui_tx.send(UiEvent::ClickButton(0)).unwrap();
        assert!(next_state(&mut render_rx).await.show_quit_confirm);

        ui_tx.send(UiEvent::CancelQuit).unwrap();
        assert!(!next_state(&mut render_rx).await.show_quit_confirm);

        // Back never pops the quit button
        ui_tx.send(UiEvent::Back).unwrap();
        assert_eq!(next_state(&mut render_rx).await.buttons.len(), 1);

        ui_tx.send(UiEvent::ClickButton(0)).unwrap();
        next_state(&mut render_rx).await;
        ui_tx.send(UiEvent::ConfirmQuit).unwrap();
        tokio::time::timeout(Duration::from_secs(5), running)
            .await
            .expect("actor stops")
            .unwrap();
    }

    #[tokio::test]
    async fn test_typing_reaches_login_page() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let actor = ShellActor::new(ShellConfig::default(), Handle::current(), render_tx);
        tokio::spawn(actor.run(ui_rx));
        next_state(&mut render_rx).await;

        for c in "adm".chars() {
            ui_tx.send(UiEvent::Char(c)).unwrap();
        }
        let mut state = None;
        for _ in 0..3 {
            state = Some(next_state(&mut render_rx).await);
        }
        match state.and_then(|state| state.page) {
            Some(PageView::Login { login, .. }) => assert_eq!(login, "adm"),
            other => panic!("unexpected page: {:?}", other),
        }
        drop(ui_tx);
    }
}
