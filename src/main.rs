//! Mami - terminal shell of the membership-management application
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - Shell Layer - actor owning pages, navigation and the status bar
//! - Task Layer (Tokio) - background work on a bounded blocking pool

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use mami_shell::constants::APP_NAME;
use mami_shell::messages::ui_events::key_to_ui_event;
use mami_shell::messages::{RenderState, UiEvent};
use mami_shell::pages::{LoginField, PageView};
use mami_shell::ui::{centered_rect, render_input, render_nav_bar, tone_color};
use mami_shell::{ShellActor, ShellConfig};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ShellConfig::load()?;

    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", &config.log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(max_workers = config.max_workers, "Starting {}", APP_NAME);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn shell actor
    let shell_actor = ShellActor::new(config, tokio::runtime::Handle::current(), render_tx);
    let shell_task = tokio::spawn(shell_actor.run(ui_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx, &shell_task).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop until the shell actor stops
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
    shell_task: &tokio::task::JoinHandle<()>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    while !shell_task.is_finished() {
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.show_quit_confirm) {
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }

        // Let the actor run between frames
        tokio::task::yield_now().await;
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Navigation + user
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_top_bar(f, state, main_chunks[0]);
    draw_page(f, state, main_chunks[1]);
    draw_status_bar(f, state, main_chunks[2]);

    if state.show_quit_confirm {
        draw_quit_popup(f, area);
    }
}

fn draw_top_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(area);

    let nav = Paragraph::new(render_nav_bar(&state.buttons))
        .block(Block::default().borders(Borders::BOTTOM).title(format!(" {} ", APP_NAME)));
    f.render_widget(nav, chunks[0]);

    if let Some(user) = &state.user {
        let lines = vec![
            Line::from(Span::styled(user.greeting.as_str(), Style::default().fg(Color::DarkGray))),
            Line::from(Span::styled(user.display_name.as_str(), Style::default().bold())),
        ];
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Right),
            chunks[1],
        );
    }
}

fn draw_page(f: &mut Frame, state: &RenderState, area: Rect) {
    match &state.page {
        Some(PageView::Login { login, password_len, focus, error, busy }) => {
            let form_area = centered_rect(50, 60, area);
            f.render_widget(Clear, form_area);
            let block = Block::default().borders(Borders::ALL).title(" Connexion ");
            let inner = block.inner(form_area);
            f.render_widget(block, form_area);

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ])
                .split(inner);

            f.render_widget(
                render_input(login.clone(), " Identifiant ", *focus == LoginField::Login),
                rows[0],
            );
            f.render_widget(
                render_input("•".repeat(*password_len), " Mot de passe ", *focus == LoginField::Password),
                rows[1],
            );

            let (text, color) = match (busy, error) {
                (true, _) => ("Connexion en cours...".to_string(), Color::Gray),
                (false, Some(error)) => (error.clone(), Color::Red),
                (false, None) => ("Tab: champ suivant | Entrée: connexion".to_string(), Color::DarkGray),
            };
            f.render_widget(Paragraph::new(text).style(Style::default().fg(color)), rows[2]);
        }
        Some(PageView::Home { modules, selected }) => {
            let items: Vec<ListItem> = modules
                .iter()
                .map(|(title, description)| {
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{:<20}", title), Style::default().bold()),
                        Span::styled(description.as_str(), Style::default().fg(Color::DarkGray)),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(" Accueil (↑/↓, Entrée) "))
                .highlight_style(Style::default().fg(Color::Yellow).bold())
                .highlight_symbol("› ");

            let mut list_state = ListState::default();
            list_state.select(Some(*selected));
            f.render_stateful_widget(list, centered_rect(60, 60, area), &mut list_state);
        }
        Some(PageView::Module { title, description }) => {
            let content = format!("{}\n\nModule en cours de développement", description);
            let paragraph = Paragraph::new(content)
                .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false });
            f.render_widget(paragraph, centered_rect(60, 40, area));
        }
        None => {}
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(40),
            Constraint::Percentage(15),
        ])
        .split(area);

    let message = Paragraph::new(format!(" {}", state.status_message))
        .style(Style::default().fg(tone_color(state.status_tone)));
    f.render_widget(message, chunks[0]);

    if let Some(connection) = &state.connection {
        let label = Paragraph::new(connection.as_str())
            .style(Style::default().fg(Color::DarkGray).italic())
            .alignment(Alignment::Center);
        f.render_widget(label, chunks[1]);
    }

    if let Some(glyph) = state.spinner {
        let text = match state.progress {
            Some(percent) => format!("{:>3}% {} ", percent, glyph),
            None => format!("{} ", glyph),
        };
        let spinner = Paragraph::new(text)
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Right);
        f.render_widget(spinner, chunks[2]);
    }
}

fn draw_quit_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(40, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Confirmation ")
        .style(Style::default().bg(Color::Black));

    let text = Paragraph::new("Voulez-vous vraiment quitter l'application ?\n\n(o/y) Oui    (n/Esc) Non")
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(text, popup_area);
}
