use std::io::{self, Write};
use std::time::Instant;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{Clear, ClearType};
use sapper_core::{CellContent, CellView, GameState};

use crate::app::App;
use crate::effects::Frame;
use crate::layout::{GRID_LEFT, RESET_LABEL, STATUS_ROW, TITLE_ROW};

const TITLE: &str = "Minesweeper";
const HELP: &str = "left: reveal  right: flag  r: reset  q: quit";

struct Style {
    fg: Color,
    bg: Color,
    glyph: String,
}

fn cell_style(view: CellView) -> Style {
    let (fg, bg, glyph) = match view.content {
        CellContent::Hidden => (Color::Reset, Color::DarkGrey, String::from("   ")),
        CellContent::Flagged => (Color::Black, Color::DarkYellow, String::from(" F ")),
        CellContent::Mine => (Color::White, Color::DarkRed, String::from(" * ")),
        CellContent::Number(0) => (Color::Black, Color::Green, String::from("   ")),
        CellContent::Number(count) => (Color::Black, Color::Green, format!(" {count} ")),
    };
    Style { fg, bg, glyph }
}

fn banner(state: GameState) -> Option<(Color, &'static str)> {
    match state {
        GameState::Exploded => Some((Color::Red, "Game Over! Click Reset to Try Again")),
        GameState::Won => Some((Color::Green, "Congratulations! You Win!")),
        GameState::Fresh | GameState::Playing => None,
    }
}

/// Full redraw of the game screen.
pub fn draw(out: &mut impl Write, app: &App, now: Instant) -> io::Result<()> {
    let field = app.field();
    let layout = app.layout();
    let frame = app.frame(now);
    let shake = match frame {
        Some(Frame::Shake { offset }) => offset,
        _ => 0,
    };

    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(GRID_LEFT, TITLE_ROW),
        SetAttribute(Attribute::Bold),
        Print(TITLE),
        SetAttribute(Attribute::Reset),
        Print("  "),
        Print(HELP),
        MoveTo(GRID_LEFT, STATUS_ROW),
        Print(format!("Mines left: {}", field.mines_left())),
    )?;

    for (coords, view) in field.iter_views() {
        let mut style = cell_style(view);
        if let (Some(Frame::Flash { lit }), Some(explosion)) = (frame, app.explosion()) {
            if explosion.cell() == coords {
                style = if lit {
                    Style {
                        fg: Color::White,
                        bg: Color::Red,
                        glyph: String::from(" * "),
                    }
                } else {
                    Style {
                        fg: Color::Reset,
                        bg: Color::Reset,
                        glyph: String::from("   "),
                    }
                };
            }
        }

        let (column, row) = layout.cell_origin(coords);
        queue!(
            out,
            MoveTo(column.saturating_add_signed(shake), row),
            SetForegroundColor(style.fg),
            SetBackgroundColor(style.bg),
            Print(style.glyph),
            ResetColor,
        )?;
    }

    if let Some((color, text)) = banner(field.state()) {
        queue!(
            out,
            MoveTo(GRID_LEFT, layout.banner_row()),
            SetForegroundColor(color),
            Print(text),
            ResetColor,
        )?;
    }

    let button = layout.reset_button();
    queue!(
        out,
        MoveTo(button.left, button.top),
        SetForegroundColor(Color::Black),
        SetBackgroundColor(Color::Green),
        Print(RESET_LABEL),
        ResetColor,
    )?;

    if let Some(notice) = app.notice() {
        queue!(
            out,
            MoveTo(GRID_LEFT, layout.message_row()),
            SetForegroundColor(Color::Red),
            Print(notice.text()),
            ResetColor,
        )?;
    }

    out.flush()
}
