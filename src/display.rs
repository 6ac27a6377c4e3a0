/// Rendering layer — all terminal I/O lives here.
///
/// The game logic hands over a recorded `Frame`; this module replays it onto
/// the terminal, scaling arena pixels down to character cells.  No game logic
/// is performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use kitten_shooter::config::GameConfig;
use kitten_shooter::render::{Frame, RenderCommand, Sprite, TextStyle};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_STARS: Color = Color::DarkGrey;
const C_ENEMY: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PROJECTILE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

/// Arena pixels covered by the projectile sprite.
const PROJECTILE_SIZE: (f64, f64) = (25.0, 25.0);

/// Never zoom in further than this many arena pixels per column.
const MIN_PX_PER_COL: f64 = 6.0;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Mapping from arena pixels to terminal cells.  The arena is drawn inside a
/// one-cell border starting at the top-left corner of the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    px_per_col: f64,
    px_per_row: f64,
}

impl Viewport {
    /// Largest viewport that fits a `term_w` × `term_h` terminal, keeping
    /// cells twice as tall as they are wide.
    pub fn fit(config: &GameConfig, term_w: u16, term_h: u16) -> Self {
        let arena_w = config.arena_width as f64;
        let arena_h = config.arena_height as f64;
        // Two border columns; two border rows plus the hint line.
        let avail_cols = term_w.saturating_sub(2).max(1) as f64;
        let avail_rows = term_h.saturating_sub(3).max(1) as f64;

        let px_per_col = (arena_w / avail_cols)
            .max(arena_h / (2.0 * avail_rows))
            .max(MIN_PX_PER_COL);
        let px_per_row = 2.0 * px_per_col;

        Viewport {
            cols: (arena_w / px_per_col).ceil() as u16,
            rows: (arena_h / px_per_row).ceil() as u16,
            px_per_col,
            px_per_row,
        }
    }

    fn col(&self, x: f64) -> i32 {
        (x / self.px_per_col).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        (y / self.px_per_row).floor() as i32
    }

    /// Cell rectangle `(col0, row0, col1, row1)` (exclusive end) covering the
    /// pixel rectangle, clipped to the viewport.  `None` if fully outside.
    fn clip(&self, x: f64, y: f64, w: f64, h: f64) -> Option<(i32, i32, i32, i32)> {
        let c0 = self.col(x).max(0);
        let r0 = self.row(y).max(0);
        let c1 = ((x + w) / self.px_per_col).ceil() as i32;
        let r1 = ((y + h) / self.px_per_row).ceil() as i32;
        let c1 = c1.min(self.cols as i32);
        let r1 = r1.min(self.rows as i32);
        if c0 >= c1 || r0 >= r1 {
            None
        } else {
            Some((c0, r0, c1, r1))
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    frame: &Frame,
    view: &Viewport,
    config: &GameConfig,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;

    for command in &frame.commands {
        match command {
            RenderCommand::DrawSprite { sprite, x, y } => {
                draw_sprite(out, view, config, *sprite, *x, *y)?
            }
            RenderCommand::DrawText { text, x, y, style } => {
                draw_text(out, view, text, *x, *y, style)?
            }
            RenderCommand::PlayAudio(_) => {
                if config.audio {
                    out.queue(Print('\u{7}'))?;
                }
            }
        }
    }

    draw_controls_hint(out, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows + 2))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w))))?;

    out.queue(cursor::MoveTo(0, view.rows + 1))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w))))?;

    for row in 1..=view.rows {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols + 1, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn sprite_size(config: &GameConfig, sprite: Sprite) -> (f64, f64) {
    match sprite {
        Sprite::Stars => (config.arena_width as f64, config.arena_height as f64),
        Sprite::Enemy => (config.enemy_width as f64, config.enemy_height as f64),
        Sprite::Player => (config.player_width as f64, config.player_height as f64),
        Sprite::Projectile => PROJECTILE_SIZE,
    }
}

/// Glyph at `(c, r)` inside a `w` × `h` cell sprite.
fn glyph(sprite: Sprite, c: i32, r: i32, w: i32, h: i32) -> char {
    match sprite {
        // Sparse, stable starfield; blanks still paint over what was below.
        Sprite::Stars => {
            if (c * 7 + r * 13) % 23 == 0 {
                '.'
            } else {
                ' '
            }
        }
        //  ▲▒▒▲   ears
        //  ▒o▒o   eyes
        //  ▒▒▒▒   body
        Sprite::Enemy => {
            if r == 0 && (c == 0 || c == w - 1) {
                '▲'
            } else if r == h / 2 && (c == 1 || c == w - 2) {
                'o'
            } else {
                '▒'
            }
        }
        Sprite::Player => {
            if r == 0 {
                '▄'
            } else {
                '█'
            }
        }
        Sprite::Projectile => '*',
    }
}

fn sprite_color(sprite: Sprite) -> Color {
    match sprite {
        Sprite::Stars => C_STARS,
        Sprite::Enemy => C_ENEMY,
        Sprite::Player => C_PLAYER,
        Sprite::Projectile => C_PROJECTILE,
    }
}

fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    config: &GameConfig,
    sprite: Sprite,
    x: f64,
    y: f64,
) -> std::io::Result<()> {
    let (w, h) = sprite_size(config, sprite);
    let Some((c0, r0, c1, r1)) = view.clip(x, y, w, h) else {
        return Ok(());
    };
    // Full (unclipped) sprite extent in cells, for the glyph pattern.
    let left = view.col(x);
    let top = view.row(y);
    let cells_w = ((x + w) / view.px_per_col).ceil() as i32 - left;
    let cells_h = ((y + h) / view.px_per_row).ceil() as i32 - top;

    out.queue(style::SetForegroundColor(sprite_color(sprite)))?;
    for r in r0..r1 {
        let line: String = (c0..c1)
            .map(|c| glyph(sprite, c - left, r - top, cells_w, cells_h))
            .collect();
        out.queue(cursor::MoveTo(c0 as u16 + 1, r as u16 + 1))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

// ── Text ──────────────────────────────────────────────────────────────────────

/// `#rrggbb` to a terminal colour; anything else is white.
fn fill_color(fill: &str) -> Color {
    let hex = fill.trim_start_matches('#');
    if hex.len() != 6 {
        return Color::White;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb { r, g, b },
        _ => Color::White,
    }
}

fn draw_text<W: Write>(
    out: &mut W,
    view: &Viewport,
    text: &str,
    x: f64,
    y: f64,
    text_style: &TextStyle,
) -> std::io::Result<()> {
    let col = view.col(x).max(0);
    // The baseline sits on the row below the glyphs.
    let row = view.row(y) - 1;
    if row < 0 || row >= view.rows as i32 || col >= view.cols as i32 {
        return Ok(());
    }
    let room = (view.cols as i32 - col) as usize;
    let visible: String = text.chars().take(room).collect();

    out.queue(cursor::MoveTo(col as u16 + 1, row as u16 + 1))?;
    out.queue(style::SetForegroundColor(fill_color(text_style.fill)))?;
    out.queue(style::SetAttribute(style::Attribute::Bold))?;
    out.queue(Print(visible))?;
    out.queue(style::SetAttribute(style::Attribute::Reset))?;
    Ok(())
}

// ── Controls hint (below the arena) ───────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows + 2))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → : Move   ↑ SPACE : Shoot   R : Restart   Q : Quit"))?;
    Ok(())
}
