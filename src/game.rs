//! Frame driver and command handling
//!
//! `Game` owns the simulation state and its collaborators. The shell feeds it
//! user commands and calls `frame` once per display refresh; `Game` samples
//! input, ticks the simulation, routes the resulting events to audio,
//! notifications and the high score, then paints.

use glam::Vec2;

use crate::audio::AudioSink;
use crate::error::ConfigError;
use crate::highscores::HighScore;
use crate::persistence::ScoreStore;
use crate::platform::InputSource;
use crate::renderer::{Renderer, build_frame};
use crate::settings::{Difficulty, Settings};
use crate::sim::{GameEvent, GamePhase, GameState, Outcome, tick};

/// User actions coming from the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the laid-out run
    Play,
    /// Lay out a fresh run (does not start it)
    Reset,
    /// Pick the difficulty for the next reset, by identifier
    SelectDifficulty(String),
}

/// Player-facing messages produced by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    VaultStolen { elapsed_secs: u32, score: u32 },
    RunEnded(Outcome),
    NewHighScore(u32),
}

impl Notification {
    /// Whether this message closes a run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Notification::RunEnded(_))
    }

    pub fn message(&self) -> String {
        match self {
            Notification::VaultStolen {
                elapsed_secs,
                score,
            } => format!("Vault stolen in {} seconds! Score: {}", elapsed_secs, score),
            Notification::RunEnded(outcome) => outcome.message().to_string(),
            Notification::NewHighScore(score) => format!("New high score: {}!", score),
        }
    }
}

/// Game instance holding the state and its collaborators
pub struct Game<A: AudioSink, S: ScoreStore> {
    pub state: GameState,
    pub high_score: HighScore,
    audio: A,
    store: S,
    notifications: Vec<Notification>,
}

impl<A: AudioSink, S: ScoreStore> Game<A, S> {
    /// Lay out an idle board and read the stored high score
    pub fn new(difficulty: Difficulty, arena: Vec2, audio: A, store: S) -> Self {
        let high_score = HighScore::load(&store);
        log::info!(
            "Game initialized ({} difficulty, {}x{} arena, high score {})",
            difficulty,
            arena.x,
            arena.y,
            high_score.best
        );
        Self {
            state: GameState::new(difficulty, arena),
            high_score,
            audio,
            store,
            notifications: Vec::new(),
        }
    }

    /// Apply a user command
    pub fn handle(&mut self, command: Command, now_ms: f64) -> Result<(), ConfigError> {
        match command {
            Command::Play => {
                self.play(now_ms);
            }
            Command::Reset => {
                self.reset();
            }
            Command::SelectDifficulty(id) => self.select_difficulty(&id)?,
        }
        Ok(())
    }

    /// Start the run if the board is idle. Returns whether it started.
    pub fn play(&mut self, now_ms: f64) -> bool {
        if !self.state.start(now_ms) {
            log::debug!("Play ignored in {:?}", self.state.phase);
            return false;
        }
        self.audio.set_ambient_loop(true);
        log::info!("Run started ({} difficulty)", self.state.difficulty);
        true
    }

    /// Reset the board, if a finished run is waiting for it
    pub fn reset(&mut self) -> bool {
        if !self.reset_available() {
            log::debug!("Reset ignored in {:?}", self.state.phase);
            return false;
        }
        self.state.reset();
        self.audio.set_ambient_loop(false);
        log::info!("Board reset ({} difficulty)", self.state.difficulty);
        true
    }

    /// Select the difficulty for the next reset
    ///
    /// Unknown identifiers are rejected and the current selection is kept.
    pub fn select_difficulty(&mut self, id: &str) -> Result<(), ConfigError> {
        match id.parse::<Difficulty>() {
            Ok(difficulty) => {
                self.state.select_difficulty(difficulty);
                log::info!("Difficulty set to {} (applies at next reset)", difficulty);
                Ok(())
            }
            Err(err) => {
                log::warn!("{}; keeping {}", err, self.state.difficulty);
                Err(err)
            }
        }
    }

    /// Push changed volumes or mute state to the audio sink
    pub fn apply_settings(&mut self, settings: &Settings) {
        log::info!("Audio {}", if settings.muted { "muted" } else { "unmuted" });
        self.audio.apply_settings(settings);
    }

    pub fn reset_available(&self) -> bool {
        self.state.reset_available
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Run one display frame. Returns true while the loop should keep going.
    pub fn frame<I, R>(&mut self, input: &I, renderer: &mut R, now_ms: f64) -> bool
    where
        I: InputSource,
        R: Renderer,
    {
        if self.state.is_running() {
            let held = input.sample();
            tick(&mut self.state, &held, now_ms);
            self.dispatch_events();
        }
        self.render(renderer);
        self.state.is_running()
    }

    /// Paint the current state without advancing it
    pub fn render<R: Renderer>(&self, renderer: &mut R) {
        renderer.render(&build_frame(&self.state, self.high_score.best));
    }

    /// Take all notifications produced since the last call
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound(effect) => self.audio.play_effect(effect),
                GameEvent::VaultStolen {
                    elapsed_secs,
                    score,
                } => self.notifications.push(Notification::VaultStolen {
                    elapsed_secs,
                    score,
                }),
                GameEvent::RunEnded(outcome) => {
                    self.audio.set_ambient_loop(false);
                    self.notifications.push(Notification::RunEnded(outcome));
                    let score = self.state.score;
                    if self.high_score.offer_and_save(score, &mut self.store) {
                        log::info!("New high score: {}", score);
                        self.notifications.push(Notification::NewHighScore(score));
                    }
                }
            }
        }
    }
}
