/// Rendering layer: all terminal I/O lives here.
///
/// The game core hands over a list of draw commands in play-area units; this
/// module scales them to the terminal grid and prints them. No game logic is
/// performed here.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use sky_shooter::collision::Rect;
use sky_shooter::constants::{PLAY_HEIGHT, PLAY_WIDTH};
use sky_shooter::render::{DrawCommand, DrawList, Sprite};
use sky_shooter::{Session, SessionError};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_ENERGY_FULL: Color = Color::Green;
const C_ENERGY_EMPTY: Color = Color::DarkGrey;
const C_MISSILE: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
/// Used for everything while the intro overlay is still mostly opaque.
const C_FADED: Color = Color::DarkGrey;

const ENERGY_BAR_CELLS: usize = 20;

// ── Sprite atlas ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub struct Glyph {
    ch: char,
    color: Color,
    /// Draw only the border cells; large sprites would otherwise hide the field.
    outline: bool,
}

/// Terminal stand-ins for every sprite the core can ask for.
pub struct Atlas {
    glyphs: HashMap<Sprite, Glyph>,
}

fn glyph_for(sprite: Sprite) -> Glyph {
    let (ch, color, outline) = match sprite {
        Sprite::Background => (' ', Color::Black, false),
        Sprite::Player => ('▲', Color::White, false),
        Sprite::EnemyType1 => ('▓', Color::Green, true),
        Sprite::EnemyType2 => ('▓', Color::Red, true),
        Sprite::HealthItem => ('♥', Color::Magenta, false),
        Sprite::MissileItem => ('!', Color::Cyan, false),
    };
    Glyph { ch, color, outline }
}

impl Atlas {
    /// Register every sprite with the session, which becomes ready once the
    /// last one is in.
    pub fn load(session: &mut Session) -> Result<Atlas, SessionError> {
        let mut glyphs = HashMap::new();
        for sprite in Sprite::ALL {
            glyphs.insert(sprite, glyph_for(sprite));
            session.asset_loaded(sprite)?;
        }
        Ok(Atlas { glyphs })
    }

    fn get(&self, sprite: Sprite) -> Glyph {
        self.glyphs
            .get(&sprite)
            .copied()
            .unwrap_or_else(|| glyph_for(sprite))
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal grid the play area is scaled onto. Row 0 is the HUD, the last row
/// holds the controls hint, everything between is the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Viewport { cols, rows }
    }

    fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(2)
    }

    /// Logical x under terminal column `col`.
    pub fn column_to_x(&self, col: u16) -> f32 {
        if self.cols == 0 {
            return 0.0;
        }
        col as f32 * PLAY_WIDTH / self.cols as f32
    }

    /// Cells covered by `rect`, clipped to the field, as
    /// `(col_start, col_end, row_start, row_end)` with exclusive ends.
    pub fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let sx = self.cols as f32 / PLAY_WIDTH;
        let sy = self.field_rows() as f32 / PLAY_HEIGHT;

        let c0 = (rect.x * sx).floor().max(0.0);
        let c1 = ((rect.x + rect.w) * sx).ceil().min(self.cols as f32);
        let r0 = (rect.y * sy).floor().max(0.0);
        let r1 = ((rect.y + rect.h) * sy).ceil().min(self.field_rows() as f32);
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16, c1 as u16, r0 as u16 + 1, r1 as u16 + 1))
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame. `fade` is the intro overlay opacity.
pub fn render<W: Write>(
    out: &mut W,
    atlas: &Atlas,
    view: Viewport,
    draw: &DrawList,
    fade: f32,
) -> std::io::Result<()> {
    let faded = fade >= 0.5;

    for command in &draw.commands {
        match command {
            DrawCommand::Background => {
                out.queue(terminal::Clear(terminal::ClearType::All))?;
            }
            DrawCommand::StatusBar {
                energy_fraction,
                score,
            } => draw_hud(out, view, *energy_fraction, *score)?,
            DrawCommand::Sprite { sprite, rect } => {
                let mut glyph = atlas.get(*sprite);
                if faded {
                    glyph.color = C_FADED;
                }
                draw_rect(out, view, rect, glyph)?;
            }
            DrawCommand::FillRect { rect } => {
                let glyph = Glyph {
                    ch: '|',
                    color: if faded { C_FADED } else { C_MISSILE },
                    outline: false,
                };
                draw_rect(out, view, rect, glyph)?;
            }
            DrawCommand::GameOverText { score } => draw_game_over(out, view, *score)?,
        }
    }

    draw_controls_hint(out, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Title card shown while the session waits for the intro to end.
pub fn render_intro<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let lines: &[(&str, Color)] = &[
        ("★  SKY  SHOOTER  ★", Color::Cyan),
        ("", Color::White),
        ("Missiles fire on their own. Dodge, and catch what falls:", Color::White),
        ("♥  energy +30", Color::Magenta),
        ("!  faster fire, then wider volleys", Color::Cyan),
        ("", Color::White),
        ("Press any key", Color::DarkGrey),
    ];
    print_centered(out, view, lines)?;

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    view: Viewport,
    energy_fraction: f32,
    score: u32,
) -> std::io::Result<()> {
    // Energy bar, left
    let filled = ((energy_fraction.clamp(0.0, 1.0) * ENERGY_BAR_CELLS as f32).round()) as usize;
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_ENERGY_FULL))?;
    out.queue(Print("█".repeat(filled)))?;
    out.queue(style::SetForegroundColor(C_ENERGY_EMPTY))?;
    out.queue(Print("░".repeat(ENERGY_BAR_CELLS - filled)))?;

    // Score, right
    let text = format!("Score: {}", score);
    let x = view.cols.saturating_sub(text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(x, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&text))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_rect<W: Write>(
    out: &mut W,
    view: Viewport,
    rect: &Rect,
    glyph: Glyph,
) -> std::io::Result<()> {
    let Some((c0, c1, r0, r1)) = view.cells(rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(glyph.color))?;

    for row in r0..r1 {
        let edge_row = row == r0 || row + 1 == r1;
        if glyph.outline && !edge_row {
            out.queue(cursor::MoveTo(c0, row))?;
            out.queue(Print(glyph.ch))?;
            if c1 - c0 > 1 {
                out.queue(cursor::MoveTo(c1 - 1, row))?;
                out.queue(Print(glyph.ch))?;
            }
            continue;
        }
        let line: String = std::iter::repeat(glyph.ch).take((c1 - c0) as usize).collect();
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(line))?;
    }

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → ↑ ↓ / WASD : Move   Mouse drag : Steer   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, view: Viewport, score: u32) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];
    print_centered(out, view, lines)
}

fn print_centered<W: Write>(
    out: &mut W,
    view: Viewport,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_play_area_covers_the_field() {
        let view = Viewport::new(80, 32);
        let cells = view.cells(&Rect::new(0.0, 0.0, PLAY_WIDTH, PLAY_HEIGHT));
        assert_eq!(cells, Some((0, 80, 1, 31)));
    }

    #[test]
    fn rect_above_the_field_is_skipped() {
        let view = Viewport::new(80, 32);
        assert_eq!(view.cells(&Rect::new(100.0, -200.0, 50.0, 100.0)), None);
    }

    #[test]
    fn oversized_rect_is_clipped() {
        let view = Viewport::new(80, 32);
        let cells = view.cells(&Rect::new(-400.0, -1500.0, 1600.0, 1600.0));
        assert_eq!(cells, Some((0, 80, 1, 6)));
    }

    #[test]
    fn column_maps_back_to_play_units() {
        let view = Viewport::new(80, 32);
        assert_eq!(view.column_to_x(0), 0.0);
        assert_eq!(view.column_to_x(40), 400.0);
    }

    #[test]
    fn atlas_load_readies_the_session() {
        let mut session = Session::new();
        let atlas = Atlas::load(&mut session).unwrap();
        assert!(session.is_ready());
        assert_eq!(atlas.get(Sprite::Player).ch, '▲');
    }

    #[test]
    fn render_writes_game_over_text() {
        let mut session = Session::new();
        let atlas = Atlas::load(&mut session).unwrap();
        let mut draw = DrawList::default();
        draw.push(DrawCommand::Background);
        draw.push(DrawCommand::GameOverText { score: 42 });
        let mut buf: Vec<u8> = Vec::new();
        render(&mut buf, &atlas, Viewport::new(80, 24), &draw, 0.0).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("Final Score: 42"));
    }
}
