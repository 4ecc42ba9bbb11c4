//! App: screen state machine, tick timing, terminal init and main loop.

use crate::audio::{AudioSink, Speaker};
use crate::board::{Board, Sound};
use crate::config::{GameConfig, MIN_TICK_RATE};
use crate::grid::GridError;
use crate::input::{Action, key_to_action};
use crate::source::PieceSource;
use crate::theme::Theme;
use crate::ui::LineClearFlash;
use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Frame budget for input polling (~60 fps).
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Seconds between gravity ticks: `1 / (score / step + base)`.
pub fn tick_interval(score: u32, base_rate: f64, score_step: f64) -> Duration {
    let step = if score_step > 0.0 { score_step } else { f64::INFINITY };
    let rate = (f64::from(score) / step + base_rate).max(MIN_TICK_RATE);
    Duration::from_secs_f64(1.0 / rate)
}

/// Board plus the screen it is shown on. Engine commands reach the board only
/// while `Playing`.
pub struct Session {
    config: GameConfig,
    board: Board<Box<dyn PieceSource>>,
    screen: Screen,
    games_started: u64,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self, GridError> {
        let board = Board::new(config.width, config.height, config.source(0))?;
        Ok(Self {
            config,
            board,
            screen: Screen::NotStarted,
            games_started: 0,
        })
    }

    #[inline]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[inline]
    pub fn board(&self) -> &Board<Box<dyn PieceSource>> {
        &self.board
    }

    pub fn tick_interval(&self) -> Duration {
        tick_interval(
            self.board.score(),
            self.config.base_rate,
            self.config.score_step,
        )
    }

    pub fn take_sounds(&mut self) -> Vec<Sound> {
        self.board.take_sounds()
    }

    pub fn handle(&mut self, action: Action) -> Flow {
        if action == Action::Quit {
            info!(score = self.board.score(), screen = ?self.screen, "quit");
            return Flow::Quit;
        }
        match self.screen {
            Screen::NotStarted => {
                if matches!(action, Action::Start | Action::HardDrop) {
                    self.screen = Screen::Playing;
                }
            }
            Screen::Paused => {
                if matches!(action, Action::Start | Action::HardDrop | Action::Pause) {
                    self.screen = Screen::Playing;
                }
            }
            Screen::GameOver => {
                if matches!(action, Action::Start | Action::HardDrop) {
                    self.restart();
                }
            }
            Screen::Playing => {
                match action {
                    Action::Pause => self.screen = Screen::Paused,
                    Action::MoveLeft => {
                        self.board.move_left();
                    }
                    Action::MoveRight => {
                        self.board.move_right();
                    }
                    Action::RotateCw => {
                        self.board.rotate_cw();
                    }
                    Action::RotateCcw => {
                        self.board.rotate_ccw();
                    }
                    Action::HardDrop => {
                        self.board.hard_drop();
                    }
                    Action::Start | Action::Quit | Action::None => {}
                }
                self.check_game_over();
            }
        }
        Flow::Continue
    }

    /// One gravity step; ignored unless playing.
    pub fn tick(&mut self) {
        if self.screen == Screen::Playing {
            self.board.advance_one_step();
            self.check_game_over();
        }
    }

    fn check_game_over(&mut self) {
        if self.board.is_game_over() {
            self.screen = Screen::GameOver;
        }
    }

    fn restart(&mut self) {
        self.games_started += 1;
        let source = self.config.source(self.games_started);
        // Dimensions were validated when the session was built.
        match Board::new(self.config.width, self.config.height, source) {
            Ok(board) => {
                self.board = board;
                self.screen = Screen::Playing;
                debug!(game = self.games_started, "new game");
            }
            Err(e) => warn!(error = %e, "could not start a new game"),
        }
    }
}

pub struct App {
    session: Session,
    theme: Theme,
    speaker: Speaker,
    last_tick: Instant,
    /// Row-clear flash on the playfield, created when rows clear.
    flash: Option<LineClearFlash>,
}

impl App {
    pub fn new(config: GameConfig, theme: Theme, speaker: Speaker) -> Result<Self> {
        Ok(Self {
            session: Session::new(config)?,
            theme,
            speaker,
            last_tick: Instant::now(),
            flash: None,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal =
            DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        info!("terminal ready");

        let result = self.run_loop(&mut terminal);

        let _ = terminal.show_cursor();
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;
        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();
            terminal.draw(|f| {
                crate::ui::draw(f, &self.session, &self.theme, &mut self.flash, now)
            })?;
            if self.flash.as_ref().is_some_and(LineClearFlash::done) {
                self.flash = None;
            }

            let timeout = FRAME.saturating_sub(now.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        let before = self.session.screen();
                        if self.session.handle(key_to_action(key)) == Flow::Quit {
                            return Ok(());
                        }
                        // Gravity restarts from a full interval after start or resume.
                        if before != Screen::Playing && self.session.screen() == Screen::Playing {
                            self.last_tick = Instant::now();
                        }
                    }
                }
            }

            if self.session.screen() == Screen::Playing
                && self.last_tick.elapsed() >= self.session.tick_interval()
            {
                self.last_tick = Instant::now();
                self.session.tick();
            }
            self.play_sounds();
        }
    }

    /// Forward queued sounds; a row clear also starts the flash effect.
    fn play_sounds(&mut self) {
        let sounds = self.session.take_sounds();
        if sounds.contains(&Sound::ClearRow) {
            let rows = self.session.board().last_cleared_rows().to_vec();
            self.flash = Some(LineClearFlash::new(rows));
        }
        if let Err(e) = self.speaker.play_all(sounds) {
            warn!(error = %e, "audio output failed");
        }
    }
}
