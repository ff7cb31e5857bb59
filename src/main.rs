use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gridsnake::{CellState, Direction, Game, Pos, Status};
use log::info;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io;
use std::time::{Duration, Instant};

const GRID_SIZE: usize = 32;
const INITIAL_LENGTH: i32 = 3;
const FOOD_SYMBOL: &str = "♦";

fn main() -> Result<(), io::Error> {
    // Set up logging before anything else
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create("gridsnake.log")?,
    )
    .expect("Failed to initialize logger");

    info!("Starting gridsnake");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new();

    // Run game loop
    let tick_rate = Duration::from_millis(150);
    let mut last_tick = Instant::now();

    let mut ignore_input = false;
    loop {
        terminal.draw(|f| app.render(f))?;

        // Handle input
        if !ignore_input && event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                app.handle_input(key);
                ignore_input = true;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.update();
            last_tick = Instant::now();
            ignore_input = false;
        }

        if matches!(app.screen, Screen::Exit) {
            break;
        }
    }

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

fn new_game() -> Game {
    // Centered snake trailing off to the right, heading left
    let mid = (GRID_SIZE / 2) as i32;
    let body = (0..INITIAL_LENGTH).map(|i| Pos::new(mid + i, mid));
    let mut rng = rand::thread_rng();
    Game::new(GRID_SIZE, body, Direction::Left, &mut rng)
}

enum Screen {
    ReadyToStart,
    Playing(Game),
    Paused(Game),
    GameOver(Game),
    Exit,
}

struct App {
    screen: Screen,
}

impl App {
    fn new() -> Self {
        App {
            screen: Screen::ReadyToStart,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let layout = Layout::default()
            .direction(layout::Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Game area
            ])
            .split(size);

        frame.render_widget(
            Paragraph::new("GRIDSNAKE")
                .alignment(Alignment::Left)
                .block(Block::default().borders(Borders::ALL)),
            layout[0],
        );

        // Game area - different for each screen
        match &self.screen {
            Screen::ReadyToStart => {
                frame.render_widget(
                    Paragraph::new("Press SPACE to start")
                        .alignment(Alignment::Center)
                        .block(Block::default().borders(Borders::ALL)),
                    layout[1],
                );
            }
            Screen::Playing(game) => {
                let block = Block::default().title("Playing").borders(Borders::ALL);
                let inner_area = block.inner(layout[1]);

                frame.render_widget(block, layout[1]);
                frame.render_widget(BoardView(game), inner_area);
            }
            Screen::Paused(game) => {
                let block = Block::default()
                    .title("Paused. Press SPACE to continue")
                    .borders(Borders::ALL);
                let inner_area = block.inner(layout[1]);

                frame.render_widget(block, layout[1]);
                frame.render_widget(BoardView(game), inner_area);
            }
            Screen::GameOver(game) => {
                let block = Block::default().borders(Borders::ALL);
                let inner_area = block.inner(layout[1]);
                let message = match game.status() {
                    Status::Won => "YOU WIN\nPress SPACE to play again",
                    _ => "GAME OVER\nPress SPACE to play again",
                };

                frame.render_widget(block, layout[1]);
                frame.render_widget(BoardView(game), inner_area);
                frame.render_widget(
                    Paragraph::new(message).alignment(Alignment::Center),
                    inner_area,
                );
            }
            Screen::Exit => {}
        }
    }

    fn handle_input(&mut self, key: event::KeyEvent) {
        use event::KeyCode;

        let new_screen = match &mut self.screen {
            Screen::ReadyToStart => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(Screen::Exit),
                KeyCode::Char(' ') => Some(Screen::Playing(new_game())),
                _ => None,
            },
            Screen::Playing(game) => match key.code {
                KeyCode::Char('q') => Some(Screen::GameOver(game.clone())),
                KeyCode::Esc => Some(Screen::Exit),
                KeyCode::Char(' ') => Some(Screen::Paused(game.clone())),
                KeyCode::Up | KeyCode::Char('w') => {
                    game.set_direction(Direction::Up);
                    None
                }
                KeyCode::Down | KeyCode::Char('s') => {
                    game.set_direction(Direction::Down);
                    None
                }
                KeyCode::Left | KeyCode::Char('a') => {
                    game.set_direction(Direction::Left);
                    None
                }
                KeyCode::Right | KeyCode::Char('d') => {
                    game.set_direction(Direction::Right);
                    None
                }
                _ => None,
            },
            Screen::Paused(game) => match key.code {
                KeyCode::Char('q') => Some(Screen::GameOver(game.clone())),
                KeyCode::Esc => Some(Screen::Exit),
                KeyCode::Char(' ') => Some(Screen::Playing(game.clone())),
                _ => None,
            },
            Screen::GameOver(_) => match key.code {
                KeyCode::Esc => Some(Screen::Exit),
                KeyCode::Char(' ') | KeyCode::Char('q') => Some(Screen::ReadyToStart),
                _ => None,
            },
            Screen::Exit => None,
        };

        if let Some(new_screen) = new_screen {
            self.screen = new_screen;
        }
    }

    fn update(&mut self) {
        let new_screen = match &mut self.screen {
            Screen::Playing(game) => {
                let mut rng = rand::thread_rng();
                game.tick(&mut rng);
                let (_, alive) = game.snapshot();
                if alive {
                    None
                } else {
                    Some(Screen::GameOver(game.clone()))
                }
            }
            _ => None,
        };

        if let Some(new_screen) = new_screen {
            self.screen = new_screen;
        }
    }
}

struct BoardView<'a>(&'a Game);

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (grid, _) = self.0.snapshot();

        for pos in grid.positions() {
            let col = pos.x as u16;
            let row = pos.y as u16;
            if col >= area.width || row >= area.height {
                continue;
            }
            let cell = &mut buf[(col + area.x, row + area.y)];
            match grid.cell(pos) {
                CellState::Snake => {
                    cell.set_symbol(" ").set_bg(Color::Green);
                }
                CellState::Food => {
                    cell.set_symbol(FOOD_SYMBOL).set_fg(Color::LightRed);
                }
                CellState::Empty => {}
            }
        }
    }
}
