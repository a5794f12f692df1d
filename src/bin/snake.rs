use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyEventKind},
    execute, queue,
    style::{Print, PrintStyledContent, Stylize},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::info;
use snake_leaderboard::{
    client::{LeaderboardClient, LeaderboardDisplay, DEFAULT_SERVER},
    game::{Direction, GameConfig, GameEngine, Position, MAX_GRID_SIZE},
    input::{map_key, Command, InputMode},
    session::Session,
};

/// Play snake in the terminal and compete on the online leaderboard.
/// Logs go to stderr, e.g. `RUST_LOG=info snake 2> snake.log`.
#[derive(Parser)]
#[command(name = "snake", version)]
struct Cli {
    /// Base URL of the leaderboard server
    #[arg(long, default_value = DEFAULT_SERVER)]
    server: String,

    /// Grid width
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u16).range(1..=100))]
    width: u16,

    /// Grid height
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u16).range(1..=100))]
    height: u16,

    /// Milliseconds between two steps
    #[arg(long, default_value = "150")]
    tick_ms: u64,
}

/// Columns between the left edge of the grid and the leaderboard
const LEADERBOARD_GAP: u16 = 4;

struct App {
    engine: GameEngine,
    session: Session,
    client: LeaderboardClient,
    leaderboard: LeaderboardDisplay,
    pending_turn: Option<Direction>,
    should_quit: bool,
}

impl App {
    fn new(config: GameConfig, client: LeaderboardClient) -> Self {
        let mut engine = GameEngine::new(config);
        let session = Session::start(&mut engine);
        Self {
            engine,
            session,
            client,
            leaderboard: LeaderboardDisplay::new(),
            pending_turn: None,
            should_quit: false,
        }
    }

    fn input_mode(&self) -> InputMode {
        if self.session.is_asking_name() {
            InputMode::NameEntry
        } else {
            InputMode::Playing
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Turn(direction) => self.pending_turn = Some(direction),
            Command::Restart => {
                self.session.restart(&mut self.engine);
                self.pending_turn = None;
            }
            Command::Quit => self.should_quit = true,
            Command::Type(c) => self.session.push_name_char(c),
            Command::Erase => self.session.pop_name_char(),
            Command::Confirm => self.submit(),
            Command::Cancel => self.session.decline(),
            Command::None => {}
        }
    }

    fn submit(&mut self) {
        let pending = match self.session.confirm_name() {
            Some(pending) => pending,
            None => return,
        };

        // No retry: a lost submission is only reported in the log
        let result = self.client.submit(&pending.name, pending.score);
        if result.is_ok() {
            info!("Saved score {} for {}", pending.score, pending.name);
        }
        self.leaderboard.after_submission(result, &self.client);
    }

    fn tick(&mut self) {
        if let Some(collision) = self.session.tick(&mut self.engine, self.pending_turn.take()) {
            info!(
                "Game over ({:?}) with score {}",
                collision,
                self.session.score()
            );
        }
    }

    fn run(&mut self, out: &mut Stdout) -> Result<()> {
        let tick = self.engine.config().tick;
        let mut last_tick = Instant::now();

        while !self.should_quit {
            self.draw(out).context("Failed to draw frame")?;

            let timeout = tick.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).context("Failed to poll terminal events")? {
                if let Event::Key(key) = event::read().context("Failed to read terminal event")? {
                    // Only process presses, not releases
                    if key.kind == KeyEventKind::Press {
                        self.handle_command(map_key(key, self.input_mode()));
                    }
                }
            }

            if last_tick.elapsed() >= tick {
                self.tick();
                last_tick = Instant::now();
            }
        }

        Ok(())
    }

    fn draw(&self, out: &mut Stdout) -> std::io::Result<()> {
        let state = self.session.state();
        let width = u16::try_from(state.grid_width).unwrap_or(MAX_GRID_SIZE);
        let height = u16::try_from(state.grid_height).unwrap_or(MAX_GRID_SIZE);

        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        queue!(out, Print(format!("Score: {}", state.score)))?;

        // Border
        let horizontal = "-".repeat(width as usize * 2);
        queue!(out, MoveTo(0, 1), Print(format!("+{}+", horizontal)))?;
        queue!(out, MoveTo(0, height + 2), Print(format!("+{}+", horizontal)))?;
        for row in 0..height {
            queue!(
                out,
                MoveTo(0, row + 2),
                Print("|"),
                MoveTo(width * 2 + 1, row + 2),
                Print("|")
            )?;
        }

        for segment in state.snake.segments() {
            queue!(out, MoveTo(cell_column(*segment), cell_row(*segment)))?;
            queue!(out, PrintStyledContent("██".blue()))?;
        }
        if let Some(food) = state.food {
            queue!(out, MoveTo(cell_column(food), cell_row(food)))?;
            queue!(out, PrintStyledContent("██".red()))?;
        }

        // Leaderboard beside the grid
        let column = width * 2 + 2 + LEADERBOARD_GAP;
        queue!(out, MoveTo(column, 1), PrintStyledContent("Leaderboard".bold()))?;
        for (index, line) in self.leaderboard.lines().iter().enumerate() {
            let row = u16::try_from(index).unwrap_or(u16::MAX).saturating_add(3);
            queue!(out, MoveTo(column, row), Print(line))?;
        }

        let status_row = height + 4;
        match &self.session {
            Session::Running(_) => {
                queue!(out, MoveTo(0, status_row), Print("Arrows/WASD: move  r: restart  q: quit"))?;
            }
            Session::Ended(game_over) => {
                queue!(
                    out,
                    MoveTo(0, status_row),
                    PrintStyledContent("Game Over!".red().bold()),
                    MoveTo(0, status_row + 1),
                    Print(format!(
                        "Enter your name: {}_  (Enter: save, Esc: skip)",
                        game_over.name
                    ))
                )?;
            }
            Session::Submitted { .. } | Session::Declined { .. } => {
                queue!(
                    out,
                    MoveTo(0, status_row),
                    PrintStyledContent("Game Over!".red().bold()),
                    MoveTo(0, status_row + 1),
                    Print("r: restart  q: quit")
                )?;
            }
        }

        out.flush()
    }
}

fn cell_column(pos: Position) -> u16 {
    u16::try_from(pos.x).unwrap_or(0) * 2 + 1
}

fn cell_row(pos: Position) -> u16 {
    u16::try_from(pos.y).unwrap_or(0) + 2
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config =
        GameConfig::new(cli.width, cli.height).with_tick(Duration::from_millis(cli.tick_ms));
    let client = LeaderboardClient::new(&cli.server).context("Failed to create HTTP client")?;
    info!("Using leaderboard at {}", client.scores_url());

    let mut app = App::new(config, client);
    app.leaderboard.refresh(&app.client);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, Hide).context("Failed to enter alternate screen")?;

    let result = app.run(&mut out);

    // Restore the terminal even if the game loop failed
    execute!(out, Show, LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;

    result
}
