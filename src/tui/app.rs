//! Main TUI application wiring the engine to the terminal

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::TrueGuardError;
use crate::presentation::{PresentationModel, SessionController};
use crate::services::{AnalyzeBackend, AnalyzeRequest, PhotoAttachment};
use crate::types::AnalysisResult;

use super::views;
use super::{EventLoop, TerminalConfig, TerminalManager, TuiEvent};

/// Application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    /// Running normally
    Running,
    /// Quit requested
    Quitting,
}

/// Settled analyze call, tagged with its submission token
type AnalyzeOutcome = (u64, std::result::Result<AnalysisResult, TrueGuardError>);

/// Main TUI application
pub struct TuiApp {
    /// Terminal manager
    terminal: TerminalManager,
    /// Event loop
    event_loop: EventLoop,
    /// Chat text being edited
    input: String,
    /// Optional photo attachment (selected at launch)
    photo: Option<PathBuf>,
    /// Presentation state machine, single writer
    controller: SessionController,
    /// Analyze collaborator
    backend: Arc<dyn AnalyzeBackend>,
    /// Channel carrying settled analyze calls back to the event loop
    outcome_tx: mpsc::UnboundedSender<AnalyzeOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<AnalyzeOutcome>,
    /// Application state
    state: AppState,
}

impl TuiApp {
    /// Create new TUI application
    pub fn new(backend: Arc<dyn AnalyzeBackend>, photo: Option<PathBuf>) -> Result<Self> {
        let terminal = TerminalManager::new(TerminalConfig::default())?;
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            event_loop: EventLoop::default(),
            input: String::new(),
            photo,
            controller: SessionController::new(),
            backend,
            outcome_tx,
            outcome_rx,
            state: AppState::Running,
        })
    }

    /// Run the application
    pub async fn run(mut self) -> Result<()> {
        loop {
            // Apply any settled analyze calls; the controller's sequence
            // guard discards stale ones
            self.drain_outcomes();

            // Render UI (also advances the score animations)
            self.render()?;

            // Poll for events
            if let Some(event) = self.event_loop.poll_event()? {
                self.handle_event(event);
            }

            if self.state == AppState::Quitting {
                break;
            }
        }

        Ok(())
    }

    fn drain_outcomes(&mut self) {
        while let Ok((token, outcome)) = self.outcome_rx.try_recv() {
            match outcome {
                Ok(result) => {
                    self.controller.resolve_success(token, result, Instant::now());
                }
                Err(err) => {
                    self.controller.resolve_failure(token, err.to_string());
                }
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        let model = PresentationModel::snapshot(&self.controller, Instant::now());
        let input = self.input.clone();
        let has_photo = self.photo.is_some();
        self.terminal
            .terminal_mut()
            .draw(|frame| views::draw(frame, &input, has_photo, &model))?;
        Ok(())
    }

    fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Quit => {
                self.state = AppState::Quitting;
            }
            TuiEvent::Key(key) => self.handle_key(key),
            TuiEvent::Resize(..) | TuiEvent::Tick => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => self.submit(),
                KeyCode::Char('k') => {
                    let acknowledged = self
                        .controller
                        .gate()
                        .map(|g| g.is_acknowledged())
                        .unwrap_or(false);
                    self.controller.set_gate_acknowledged(!acknowledged);
                }
                KeyCode::Char('g') => {
                    self.controller.confirm_gate();
                }
                KeyCode::Char('r') => {
                    self.controller.reset();
                    self.input.clear();
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab => self.controller.cycle_tab(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.input.push('\n'),
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    /// Start an analysis for the current input
    fn submit(&mut self) {
        let has_photo = self.photo.is_some();
        let token = match self.controller.begin_submission(&self.input, has_photo) {
            Ok(token) => token,
            // Rejected locally; the controller already surfaced it
            Err(_) => return,
        };

        let photo = match self.load_photo() {
            Ok(photo) => photo,
            Err(err) => {
                self.controller.resolve_failure(token, err.to_string());
                return;
            }
        };

        let request = AnalyzeRequest {
            chat_text: self.input.trim().to_string(),
            photo,
        };

        debug!(token, "spawning analyze call");
        let backend = Arc::clone(&self.backend);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let outcome = backend.analyze(request).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send((token, outcome));
        });
    }

    fn load_photo(&self) -> std::io::Result<Option<PhotoAttachment>> {
        let Some(path) = &self.photo else {
            return Ok(None);
        };
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        Ok(Some(PhotoAttachment { file_name, bytes }))
    }
}
