use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{CellPicker, Flow, GameConfig, GameEngine, Intent};
use crate::input::InputHandler;
use crate::metrics::SessionMetrics;
use crate::render::Renderer;

/// Render at ~30 FPS, independent of the simulation rate
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive terminal session: keyboard in, ratatui frames out, one engine tick per tick interval
pub struct PlayMode<P> {
    engine: GameEngine<P>,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<P: CellPicker> PlayMode<P> {
    pub fn new(config: GameConfig, picker: P) -> Self {
        Self {
            engine: GameEngine::new(config, picker),
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!("Game started");
        let result = self.run_game_loop(&mut terminal).await;

        // Restore the terminal even if the loop failed
        let cleanup = self.cleanup_terminal(&mut terminal);
        if let Err(err) = &result {
            warn!("Game loop ended with error: {:#}", err);
        }
        info!(
            "Session over: {} games, best score {}",
            self.metrics.games_played, self.metrics.best_score
        );

        result.and(cleanup)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut render_timer = interval(RENDER_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let snapshot = self.engine.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quit requested");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        if let Some(intent) = self.input_handler.handle_key_event(key) {
            self.apply_intent(intent);
        }
    }

    fn apply_intent(&mut self, intent: Intent) {
        let was_playing = self.engine.status().is_playing();

        match self.engine.handle_intent(intent) {
            Flow::Quit => self.should_quit = true,
            Flow::Continue => {
                if !was_playing && self.engine.status().is_playing() {
                    debug!("Restarted after {:?}", intent);
                    self.metrics.on_game_start();
                }
            }
        }
    }

    fn update_game(&mut self) {
        let outcome = self.engine.tick();
        if outcome.moved {
            self.metrics
                .on_tick(outcome, self.engine.status(), self.engine.score());
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
