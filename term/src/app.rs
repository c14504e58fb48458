use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::Print;
use crossterm::{cursor, execute, terminal};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sapper_core::{GameConfig, MarkOutcome, Minefield, RevealOutcome};

use crate::effects::{Explosion, Frame};
use crate::layout::{Layout, Target};
use crate::render;

/// Redraw interval while an effect is playing.
const FRAME_INTERVAL: Duration = Duration::from_millis(20);
const IDLE_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    Primary { column: u16, row: u16 },
    Secondary { column: u16, row: u16 },
    Reset,
    Quit,
}

pub fn input_from_event(event: &Event) -> Option<Input> {
    match event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            ..
        }) => match button {
            MouseButton::Left => Some(Input::Primary {
                column: *column,
                row: *row,
            }),
            MouseButton::Right => Some(Input::Secondary {
                column: *column,
                row: *row,
            }),
            _ => None,
        },
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
            KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
            KeyCode::Char('r') => Some(Input::Reset),
            _ => None,
        },
        _ => None,
    }
}

/// Line shown under the reset button until the next one replaces it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Reset,
    Boom,
}

impl Notice {
    pub const fn text(self) -> &'static str {
        match self {
            Self::Reset => "Game Reset!",
            Self::Boom => "BOOM! Game Over!",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    config: GameConfig,
    field: Minefield,
    rng: SmallRng,
    layout: Layout,
    notice: Option<Notice>,
    explosion: Option<Explosion>,
    bell: bool,
}

impl App {
    pub fn new(config: GameConfig, seed: u64) -> anyhow::Result<Self> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let field = Minefield::generate(config, &mut rng).context("Could not generate minefield")?;
        Ok(Self::from_parts(field, rng))
    }

    pub fn from_parts(field: Minefield, rng: SmallRng) -> Self {
        let config = field.config();
        Self {
            config,
            field,
            rng,
            layout: Layout::new(config.size),
            notice: None,
            explosion: None,
            bell: false,
        }
    }

    pub fn field(&self) -> &Minefield {
        &self.field
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn explosion(&self) -> Option<Explosion> {
        self.explosion
    }

    pub fn frame(&self, now: Instant) -> Option<Frame> {
        self.explosion.and_then(|explosion| explosion.frame_at(now))
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.frame(now).is_some()
    }

    /// Returns whether a beep is due, clearing it.
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell)
    }

    pub fn handle(&mut self, input: Input, now: Instant) -> anyhow::Result<Flow> {
        match input {
            Input::Quit => return Ok(Flow::Quit),
            Input::Reset => self.reset()?,
            Input::Primary { column, row } => match self.layout.hit_test(column, row) {
                Some(Target::Reset) => self.reset()?,
                Some(Target::Cell(coords)) => {
                    let outcome = self.field.reveal(coords)?;
                    self.on_reveal(outcome, now);
                }
                None => {}
            },
            Input::Secondary { column, row } => {
                if let Some(Target::Cell(coords)) = self.layout.hit_test(column, row) {
                    match self.field.toggle_flag(coords)? {
                        MarkOutcome::Won => log::info!("Won by flagging {:?}", coords),
                        outcome => log::debug!("{:?} at {:?}", outcome, coords),
                    }
                }
            }
        }
        Ok(Flow::Continue)
    }

    fn on_reveal(&mut self, outcome: RevealOutcome, now: Instant) {
        match outcome {
            RevealOutcome::NoChange => {}
            RevealOutcome::Revealed(cells) => log::debug!("Opened {} cells", cells.len()),
            RevealOutcome::Won => log::info!("Board cleared"),
            RevealOutcome::Detonated(coords) => {
                log::info!("Hit a mine at {:?}", coords);
                self.explosion = Some(Explosion::new(coords, now));
                self.notice = Some(Notice::Boom);
                self.bell = true;
            }
        }
    }

    fn reset(&mut self) -> anyhow::Result<()> {
        self.field
            .reset(self.config, &mut self.rng)
            .context("Could not reset minefield")?;
        self.explosion = None;
        self.notice = Some(Notice::Reset);
        Ok(())
    }
}

/// Puts the terminal in game mode and restores it when dropped.
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut impl Write) -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("Could not enable raw mode")?;
        let guard = Self;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )
        .context("Could not prepare terminal")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if let Err(err) = execute!(
            stdout,
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        ) {
            log::error!("Could not restore terminal: {}", err);
        }
        if let Err(err) = terminal::disable_raw_mode() {
            log::error!("Could not disable raw mode: {}", err);
        }
    }
}

pub fn run(config: GameConfig, seed: u64) -> anyhow::Result<()> {
    let mut app = App::new(config, seed)?;
    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;

    let mut dirty = true;
    let mut was_animating = false;
    loop {
        let now = Instant::now();
        let animating = app.is_animating(now);
        if app.take_bell() {
            execute!(stdout, Print('\u{7}')).context("Could not ring bell")?;
        }
        if dirty || animating || was_animating {
            render::draw(&mut stdout, &app, now).context("Could not draw")?;
            dirty = false;
        }
        was_animating = animating;

        let timeout = if animating {
            FRAME_INTERVAL
        } else {
            IDLE_INTERVAL
        };
        if !event::poll(timeout).context("Could not poll terminal events")? {
            continue;
        }

        let event = event::read().context("Could not read terminal event")?;
        if let Event::Resize(..) = event {
            dirty = true;
        } else if let Some(input) = input_from_event(&event) {
            if app.handle(input, Instant::now())? == Flow::Quit {
                break;
            }
            dirty = true;
        }
    }

    log::debug!("Quit");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sapper_core::{GameState, MineLayout};

    fn app_with_mine_at_corner() -> App {
        let layout = MineLayout::from_mine_coords(3, &[(2, 2)]).unwrap();
        let field = Minefield::new(&layout).unwrap();
        App::from_parts(field, SmallRng::seed_from_u64(3))
    }

    fn click_cell(app: &mut App, coords: (u8, u8), primary: bool) -> Flow {
        let (column, row) = app.layout().cell_origin(coords);
        let input = if primary {
            Input::Primary { column, row }
        } else {
            Input::Secondary { column, row }
        };
        app.handle(input, Instant::now()).unwrap()
    }

    #[test]
    fn primary_click_reveals() {
        let mut app = app_with_mine_at_corner();

        assert_eq!(click_cell(&mut app, (0, 0), true), Flow::Continue);

        assert_eq!(app.field().revealed_count(), 8);
        assert_eq!(app.field().state(), GameState::Playing);
        assert!(!app.take_bell());
    }

    #[test]
    fn detonation_starts_effects() {
        let mut app = app_with_mine_at_corner();

        click_cell(&mut app, (2, 2), true);

        assert!(app.field().is_lost());
        assert_eq!(app.notice(), Some(Notice::Boom));
        assert_eq!(app.explosion().map(|e| e.cell()), Some((2, 2)));
        assert!(app.is_animating(Instant::now()));
        assert!(app.take_bell());
        assert!(!app.take_bell());
    }

    #[test]
    fn secondary_click_flags_and_can_win() {
        let mut app = app_with_mine_at_corner();

        click_cell(&mut app, (2, 2), false);
        assert!(app.field().cell_at((2, 2)).unwrap().is_flagged());

        click_cell(&mut app, (0, 0), true);
        assert!(app.field().is_won());
    }

    #[test]
    fn reset_button_starts_new_game() {
        let mut app = app_with_mine_at_corner();
        click_cell(&mut app, (2, 2), true);
        let button = app.layout().reset_button();

        app.handle(
            Input::Primary {
                column: button.left,
                row: button.top,
            },
            Instant::now(),
        )
        .unwrap();

        assert_eq!(app.field().state(), GameState::Fresh);
        assert_eq!(app.notice(), Some(Notice::Reset));
        assert_eq!(app.explosion(), None);
        assert_eq!(app.field().total_mines(), 1);
    }

    #[test]
    fn clicks_outside_the_board_are_ignored() {
        let mut app = app_with_mine_at_corner();
        app.handle(Input::Primary { column: 0, row: 0 }, Instant::now())
            .unwrap();
        app.handle(Input::Secondary { column: 0, row: 0 }, Instant::now())
            .unwrap();
        assert!(app.field().state().is_fresh());
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = app_with_mine_at_corner();
        assert_eq!(app.handle(Input::Quit, Instant::now()).unwrap(), Flow::Quit);
    }

    #[test]
    fn maps_terminal_events_to_inputs() {
        let click = |kind| {
            Event::Mouse(MouseEvent {
                kind,
                column: 7,
                row: 3,
                modifiers: KeyModifiers::NONE,
            })
        };
        assert_eq!(
            input_from_event(&click(MouseEventKind::Down(MouseButton::Left))),
            Some(Input::Primary { column: 7, row: 3 })
        );
        assert_eq!(
            input_from_event(&click(MouseEventKind::Down(MouseButton::Right))),
            Some(Input::Secondary { column: 7, row: 3 })
        );
        assert_eq!(
            input_from_event(&click(MouseEventKind::Up(MouseButton::Left))),
            None
        );

        let key = |code, modifiers| Event::Key(KeyEvent::new(code, modifiers));
        assert_eq!(
            input_from_event(&key(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Input::Reset)
        );
        assert_eq!(
            input_from_event(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Input::Quit)
        );
        assert_eq!(
            input_from_event(&key(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Input::Quit)
        );
        assert_eq!(
            input_from_event(&key(KeyCode::Char('x'), KeyModifiers::NONE)),
            None
        );
    }
}
