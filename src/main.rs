use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::{
    error::Error,
    fs::{self, OpenOptions},
    io::{self, stdin},
    time::SystemTime,
};
use tapgrid::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    grid::{Cell, GridSize},
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, GameEventSource, Runner, Ticker},
    session::{GameSession, SessionConfig},
    ui::{board_geometry, GameView},
};

/// reaction-time grid game scored in NTPM and bits per second
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Click the highlighted cell as fast and accurately as you can before the countdown runs out. Hits minus misses over the last minute give NTPM; NTPM and the board size give a bits-per-second score."
)]
pub struct Cli {
    /// cells per side of the board (defaults to the last size played)
    #[clap(short = 'g', long, value_enum)]
    grid_size: Option<GridSize>,

    /// length of a round in seconds (defaults to the stored setting, 70 out of the box)
    #[clap(
        short = 's',
        long,
        value_parser = clap::value_parser!(u64).range(1..=3600)
    )]
    seconds: Option<u64>,

    /// seed for a reproducible target sequence
    #[clap(long)]
    seed: Option<u64>,
}

impl Cli {
    /// Stored settings with any command line overrides applied
    fn session_config(&self, stored: &Config) -> SessionConfig {
        let mut config = SessionConfig::from(stored);
        if let Some(size) = self.grid_size {
            config.grid_size = size;
        }
        if let Some(secs) = self.seconds {
            config.round_secs = secs;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub session: GameSession,
    pub cursor: Cell,
    /// Last drawn terminal area, used to map mouse clicks onto the board
    pub area: Rect,
}

impl App {
    pub fn new(config: SessionConfig, seed: Option<u64>) -> Self {
        let session = match seed {
            Some(seed) => GameSession::with_seed(config, seed),
            None => GameSession::new(config),
        };
        Self {
            session,
            cursor: Cell::new(0, 0),
            area: Rect::default(),
        }
    }

    /// Returns true when the countdown moved and the screen needs a redraw
    fn on_tick(&mut self, now: SystemTime) -> bool {
        self.session.advance(now) > 0
    }

    fn on_key(&mut self, key: KeyEvent, now: SystemTime) -> Flow {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Flow::Quit;
        }

        if self.session.is_over() {
            if key.code == KeyCode::Char('r') {
                self.session.reset();
            }
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.session.click(self.cursor, now);
            }
            KeyCode::Char('g') => self.change_grid_size(self.session.grid_size().cycle()),
            KeyCode::Char('1') => self.change_grid_size(GridSize::Ten),
            KeyCode::Char('2') => self.change_grid_size(GridSize::Twenty),
            KeyCode::Char('3') => self.change_grid_size(GridSize::Thirty),
            _ => {}
        }
        Flow::Continue
    }

    fn on_mouse(&mut self, mouse: MouseEvent, now: SystemTime) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let hit = board_geometry(self.area, &self.session)
            .and_then(|geometry| geometry.cell_at(mouse.column, mouse.row));
        if let Some(cell) = hit {
            self.cursor = cell;
            self.session.click(cell, now);
        }
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let last = self.session.grid_size().side() as isize - 1;
        let row = (self.cursor.row as isize + d_row).clamp(0, last);
        let col = (self.cursor.col as isize + d_col).clamp(0, last);
        self.cursor = Cell::new(row as usize, col as usize);
    }

    fn change_grid_size(&mut self, size: GridSize) {
        if self.session.set_grid_size(size) {
            self.move_cursor(0, 0);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    init_logging();

    let store = FileConfigStore::new();
    let stored = store.load();
    let mut app = App::new(cli.session_config(&stored), cli.seed);
    info!(
        "starting on {} grid, {}s rounds",
        app.session.grid_size(),
        app.session.round_secs()
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = store.save(&Config::from(&app.session)) {
        warn!("could not save config to {}: {e}", store.path().display());
    }

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    run_loop(terminal, app, &runner)
}

/// Drive the app until the player quits or the event source closes
fn run_loop<B, E, T>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>>
where
    B: Backend,
    E: GameEventSource,
    T: Ticker,
{
    draw(terminal, app)?;

    loop {
        match runner.step() {
            GameEvent::Tick => {
                if app.on_tick(SystemTime::now()) {
                    draw(terminal, app)?;
                }
            }
            GameEvent::Resize => {
                draw(terminal, app)?;
            }
            GameEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.on_key(key, SystemTime::now()) == Flow::Quit {
                    break;
                }
                draw(terminal, app)?;
            }
            GameEvent::Mouse(mouse) => {
                app.on_mouse(mouse, SystemTime::now());
                draw(terminal, app)?;
            }
            GameEvent::Closed => {
                warn!("terminal event source closed, exiting");
                break;
            }
        }
    }

    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    terminal.draw(|f| {
        let area = f.area();
        app.area = area;
        f.render_widget(GameView::new(&app.session, app.cursor), area);
    })?;
    Ok(())
}

/// Log to a file in the state dir; stderr would scribble over the alternate screen
fn init_logging() {
    let Some(path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}
