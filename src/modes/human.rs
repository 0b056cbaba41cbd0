use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::{Stream, StreamExt};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, stderr, Stderr};
use tracing::{info, warn};

use crate::game::{GameEngine, Phase, StepResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Hud, Renderer, SnakePalette};

use super::scheduler::TickScheduler;

/// What the session hands back to its caller once it ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    /// Score on the board when the player left
    pub final_score: u32,
    pub games_played: u32,
    pub high_score: u32,
    pub total_xp: u32,
}

pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    training: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(engine: GameEngine, training: bool) -> Self {
        let renderer = Renderer::new(
            SnakePalette::for_profile(engine.profile()),
            engine.config().cell_size,
        );

        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            training,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<SessionReport> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = restore_on_error(Self::setup_terminal(), || {
            let _ = execute!(stderr(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal, EventStream::new()).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result?;
        Ok(self.report())
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    /// Play until the player quits or the event stream ends.
    ///
    /// The tick timer and the event stream are both released before this
    /// returns, so nothing reaches the engine afterwards.
    async fn run_game_loop<B, S>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut event_stream: S,
    ) -> Result<()>
    where
        B: Backend,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        let mut scheduler = TickScheduler::new(self.engine.tick_interval());

        info!(
            profile = %self.engine.profile().name,
            multiplier = self.engine.profile().scoring_multiplier,
            training = self.training,
            "session opened"
        );
        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => {
                            if self.handle_event(event, &mut scheduler) {
                                self.draw(terminal)?;
                            }
                        }
                        Some(Err(err)) => warn!(%err, "failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, only armed while a game is running
                _ = scheduler.tick(), if self.engine.phase() == Phase::Running => {
                    self.update_game(&mut scheduler);
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        // No ticks or key events may reach a torn-down session
        drop(scheduler);
        drop(event_stream);

        info!(score = self.engine.score(), "session closed");
        Ok(())
    }

    /// Returns whether the screen needs redrawing
    fn handle_event(&mut self, event: Event, scheduler: &mut TickScheduler) -> bool {
        let key = match event {
            Event::Key(key) => key,
            Event::Resize(..) => return true,
            _ => return false,
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return false;
        }

        let phase = self.engine.phase();
        let action = if phase == Phase::Running {
            self.input_handler
                .handle_with_heading(key, self.engine.state().snake.direction)
        } else {
            self.input_handler.handle_key_event(key)
        };

        match action {
            KeyAction::Steer(direction) => {
                let accepted = self.engine.set_pending_direction(direction);
                if accepted && phase == Phase::NotStarted {
                    self.metrics.on_game_start();
                    scheduler.restart(self.engine.tick_interval());
                    return true;
                }
                false
            }
            KeyAction::Restart if phase == Phase::GameOver => {
                self.engine.reset();
                self.metrics.on_game_start();
                scheduler.restart(self.engine.tick_interval());
                true
            }
            KeyAction::Quit => {
                self.should_quit = true;
                false
            }
            KeyAction::Restart | KeyAction::None => false,
        }
    }

    fn update_game(&mut self, scheduler: &mut TickScheduler) {
        match self.engine.step() {
            StepResult::GameOver(outcome) => {
                let xp = self.metrics.on_game_over(outcome, self.training);
                info!(
                    score = outcome.final_score,
                    xp,
                    games_played = self.metrics.games_played,
                    "game finished"
                );
            }
            StepResult::Advanced { .. } => self.metrics.update(),
            StepResult::Idle(_) => {}
        }

        scheduler.sync(self.engine.tick_interval());
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        let snapshot = self.engine.snapshot();
        let hud = Hud {
            profile: self.engine.profile(),
            metrics: &self.metrics,
            training: self.training,
        };

        terminal
            .draw(|frame| self.renderer.render(frame, &snapshot, &hud))
            .context("Failed to draw frame")?;
        Ok(())
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            final_score: self.engine.score(),
            games_played: self.metrics.games_played,
            high_score: self.metrics.high_score,
            total_xp: self.metrics.total_xp,
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Run `restore` when `result` is an error, then pass the result through
fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        restore();
    }
    result
}
