//! Screen flow and run driver
//!
//! `Game` owns the active run, the leaderboard and preferences. Screens
//! change only in response to commands, except Playing/Paused/GameOver
//! which follow the run's own pause and terminal flags.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::MAX_NAME_LEN;
use crate::highscores::HighScores;
use crate::input::HeldKeys;
use crate::persistence::Storage;
use crate::settings::{Settings, VOLUME_STEP};
use crate::sim::{GameEvent, GameState, TickInput, VehicleKind, tick};

/// Name recorded when the player confirms an empty name
pub const DEFAULT_NAME: &str = "Player";

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    HighScores,
    NameEntry,
    VehicleSelect,
    Playing,
    Paused,
    GameOver,
}

impl Screen {
    pub const ALL: [Screen; 7] = [
        Screen::Start,
        Screen::HighScores,
        Screen::NameEntry,
        Screen::VehicleSelect,
        Screen::Playing,
        Screen::Paused,
        Screen::GameOver,
    ];

    /// DOM id of the overlay shown for this screen
    pub fn overlay_id(&self) -> &'static str {
        match self {
            Screen::Start => "screen-start",
            Screen::HighScores => "screen-scores",
            Screen::NameEntry => "screen-name",
            Screen::VehicleSelect => "screen-vehicle",
            Screen::Playing => "hud",
            Screen::Paused => "screen-paused",
            Screen::GameOver => "screen-game-over",
        }
    }
}

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start -> NameEntry
    Begin,
    /// Start -> HighScores
    ViewScores,
    /// HighScores -> Start
    Back,
    /// Append a character to the name
    Type(char),
    /// Remove the last character of the name
    Erase,
    /// NameEntry -> VehicleSelect
    Confirm,
    /// VehicleSelect -> Playing with a fresh run
    SelectVehicle(VehicleKind),
    Jump,
    TogglePause,
    ToggleAutopilot,
    /// GameOver -> VehicleSelect
    Restart,
    /// End the session
    Quit,
    ToggleMute,
    ToggleFps,
    ToggleReducedMotion,
    VolumeUp,
    VolumeDown,
}

/// Pending one-shot inputs, consumed by the next tick
#[derive(Debug, Clone, Copy, Default)]
struct OneShots {
    jump: bool,
    pause: bool,
}

/// The whole game: screens, the active run and persisted data
pub struct Game {
    screen: Screen,
    player_name: String,
    run: Option<GameState>,
    high_scores: HighScores,
    settings: Settings,
    storage: Box<dyn Storage>,
    /// Produces a fresh seed for every run
    seeder: Pcg32,
    pending: OneShots,
    autopilot: bool,
    /// Rank achieved by the last finished run
    last_rank: Option<usize>,
    quit: bool,
    events: Vec<GameEvent>,
}

impl Game {
    /// Load persisted data and show the start screen
    pub fn new(storage: Box<dyn Storage>, seed: u64) -> Self {
        let high_scores = HighScores::load(storage.as_ref());
        let settings = Settings::load(storage.as_ref());
        log::info!("Game created (seed {seed})");
        Self {
            screen: Screen::Start,
            player_name: String::new(),
            run: None,
            high_scores,
            settings,
            storage,
            seeder: Pcg32::seed_from_u64(seed),
            pending: OneShots::default(),
            autopilot: false,
            last_rank: None,
            quit: false,
            events: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// The active (or just finished) run
    pub fn run(&self) -> Option<&GameState> {
        self.run.as_ref()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Apply one player command. Commands that don't belong to the
    /// current screen are ignored.
    pub fn handle(&mut self, command: Command) {
        match (self.screen, command) {
            (
                _,
                Command::ToggleMute
                | Command::ToggleFps
                | Command::ToggleReducedMotion
                | Command::VolumeUp
                | Command::VolumeDown,
            ) => self.change_setting(command),
            (Screen::Start, Command::Begin) => self.screen = Screen::NameEntry,
            (Screen::Start, Command::ViewScores) => self.screen = Screen::HighScores,
            (Screen::HighScores, Command::Back) => self.screen = Screen::Start,
            (Screen::NameEntry, Command::Type(c)) => {
                if self.player_name.chars().count() < MAX_NAME_LEN {
                    self.player_name.push(c);
                }
            }
            (Screen::NameEntry, Command::Erase) => {
                self.player_name.pop();
            }
            (Screen::NameEntry, Command::Confirm) => {
                let trimmed = self.player_name.trim();
                self.player_name = if trimmed.is_empty() {
                    DEFAULT_NAME.to_string()
                } else {
                    trimmed.to_string()
                };
                log::info!("Player: {}", self.player_name);
                self.screen = Screen::VehicleSelect;
            }
            (Screen::VehicleSelect, Command::SelectVehicle(kind)) => self.start_run(kind),
            (Screen::Playing, Command::Jump) => self.pending.jump = true,
            (Screen::Playing | Screen::Paused, Command::TogglePause) => self.pending.pause = true,
            (Screen::Playing, Command::ToggleAutopilot) => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
            (Screen::GameOver, Command::Restart) => {
                self.run = None;
                self.last_rank = None;
                self.screen = Screen::VehicleSelect;
            }
            (Screen::GameOver, Command::Quit) => {
                log::info!("Quit requested");
                self.quit = true;
            }
            (screen, command) => log::trace!("Ignoring {command:?} on {screen:?}"),
        }
    }

    /// Pause immediately if a run is in progress (focus lost, tab hidden)
    pub fn pause_if_playing(&mut self) {
        if self.screen != Screen::Playing {
            return;
        }
        if let Some(run) = self.run.as_mut() {
            run.paused = true;
            self.pending = OneShots::default();
            self.screen = Screen::Paused;
            log::info!("Auto-paused");
        }
    }

    /// Advance the active run by one tick.
    ///
    /// Fails only when the leaderboard cannot be written at game over.
    pub fn update(&mut self, held: &HeldKeys) -> anyhow::Result<()> {
        if !matches!(self.screen, Screen::Playing | Screen::Paused) {
            return Ok(());
        }
        let Some(run) = self.run.as_mut() else {
            return Ok(());
        };

        let input = TickInput {
            left: held.left,
            right: held.right,
            jump: self.pending.jump,
            pause: self.pending.pause,
            autopilot: self.autopilot,
        };
        self.pending = OneShots::default();

        tick(run, &input);
        self.events.extend(run.drain_events());

        if run.terminal {
            self.finish_run()?;
        } else {
            self.screen = if run.paused {
                Screen::Paused
            } else {
                Screen::Playing
            };
        }
        Ok(())
    }

    /// Take the gameplay events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a preference command and persist the result
    fn change_setting(&mut self, command: Command) {
        let settings = &mut self.settings;
        match command {
            Command::ToggleMute => settings.muted = !settings.muted,
            Command::ToggleFps => settings.show_fps = !settings.show_fps,
            Command::ToggleReducedMotion => settings.reduced_motion = !settings.reduced_motion,
            Command::VolumeUp => settings.step_volume(VOLUME_STEP),
            Command::VolumeDown => settings.step_volume(-VOLUME_STEP),
            _ => return,
        }
        log::info!("Settings: {:?}", self.settings);
        self.settings.save(self.storage.as_mut());
    }

    fn start_run(&mut self, kind: VehicleKind) {
        let seed = self.seeder.random::<u64>();
        log::info!("Run started: {} (seed {seed})", kind.as_str());
        self.run = Some(GameState::new(seed, kind));
        self.pending = OneShots::default();
        self.screen = Screen::Playing;
    }

    fn finish_run(&mut self) -> anyhow::Result<()> {
        let score = self.run.as_ref().map_or(0, |run| run.score);
        self.screen = Screen::GameOver;
        self.last_rank = self.high_scores.record(&self.player_name, score);
        log::info!(
            "Game over: {} scored {score} (rank {:?})",
            self.player_name,
            self.last_rank
        );
        self.high_scores.save(self.storage.as_mut())
    }
}
