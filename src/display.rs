/// Rendering layer. All terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of what
/// to draw.  No game logic is performed; this module only translates state
/// into terminal commands.  The 800×640 playfield is scaled onto the rows
/// between the HUD (row 0) and the hint line (last row).
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_adventure::assets::{Assets, Sprite};
use space_adventure::entities::{GameSession, Playfield};
use space_adventure::stars::Starfield;
use space_adventure::ui::{self, Button, Tone};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::White;
const C_HUD_SCORE: Color = Color::White;
const C_HUD_HIGH: Color = Color::Yellow;
const C_HEALTH: Color = Color::Red;
const C_HEALTH_EMPTY: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Red;
const C_EXPLOSION: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const TITLE: &str = "2100: Space Adventure";
const HEALTH_BAR_CELLS: u32 = 10;

const STORY_LINES: &[&str] = &[
    "In the year 2100, humanity fights for survival...",
    "You are the last hope to defend Earth from alien invaders.",
    "Prepare your spaceship, sharpen your skills, and",
    "blast your way through waves of enemies.",
    "",
    "Good luck, pilot!",
];

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps playfield coordinates onto terminal cells.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    field: Playfield,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, field: Playfield) -> Self {
        Self { cols, rows, field }
    }

    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(2).max(1)
    }

    fn last_play_row(&self) -> i32 {
        self.play_rows() as i32
    }

    fn to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        let col = (x / self.field.width * self.cols as f32).floor() as i32;
        let row = 1 + (y / self.field.height * self.play_rows() as f32).floor() as i32;
        (col, row)
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one frame of the Playing screen.
pub fn render_game<W: Write>(
    out: &mut W,
    vp: &Viewport,
    session: &GameSession,
    assets: &Assets,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_stars(out, vp, &session.stars)?;

    for enemy in session.enemies.live() {
        draw_sprite(out, vp, &assets.enemy, enemy.body.x, enemy.body.y, C_ENEMY)?;
    }
    for bullet in session.player_bullets.live() {
        draw_sprite(out, vp, &assets.bullet, bullet.body.x, bullet.body.y, C_BULLET_PLAYER)?;
    }
    for bullet in session.enemy_bullets.live() {
        draw_sprite(out, vp, &assets.enemy_bullet, bullet.body.x, bullet.body.y, C_BULLET_ENEMY)?;
    }

    // Blink while invulnerable
    let player = &session.player;
    let hidden = player.invulnerable_until.is_some() && (session.frame / 4) % 2 == 0;
    if !hidden {
        draw_sprite(out, vp, &assets.player, player.body.x, player.body.y, C_PLAYER)?;
    }

    for explosion in session.explosions.live() {
        if let Some(frame) = explosion.current_frame().and_then(|i| assets.explosion.frame(i)) {
            draw_sprite(out, vp, frame, explosion.x, explosion.y, C_EXPLOSION)?;
        }
    }

    draw_hud(out, vp, session)?;
    draw_hint(out, vp, "← → ↑ ↓ / WASD : Move   SPACE : Shoot   ESC : Menu   Q : Quit")?;

    finish(out, vp)
}

pub fn render_menu<W: Write>(
    out: &mut W,
    vp: &Viewport,
    stars: &Starfield,
    buttons: &[Button],
    high_score: u32,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_stars(out, vp, stars)?;

    let title_row = vp.rows / 4;
    draw_centered(out, vp, title_row, TITLE, C_TITLE)?;
    draw_centered(
        out,
        vp,
        title_row + 2,
        &format!("High Score: {}", high_score),
        C_HUD_HIGH,
    )?;

    draw_buttons(out, buttons)?;
    draw_hint(out, vp, "Click a button, or press its first letter   ENTER : Start")?;
    finish(out, vp)
}

pub fn render_story<W: Write>(
    out: &mut W,
    vp: &Viewport,
    stars: &Starfield,
    buttons: &[Button],
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_stars(out, vp, stars)?;

    let start_row = vp.rows / 4;
    for (i, line) in STORY_LINES.iter().enumerate() {
        draw_centered(out, vp, start_row + 2 * i as u16, line, C_TITLE)?;
    }

    draw_buttons(out, buttons)?;
    finish(out, vp)
}

pub fn render_game_over<W: Write>(
    out: &mut W,
    vp: &Viewport,
    stars: &Starfield,
    buttons: &[Button],
    final_score: u32,
    high_score: u32,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_stars(out, vp, stars)?;

    let mid = vp.rows / 2;
    draw_centered(out, vp, mid.saturating_sub(4), "YOU DIED", Color::Red)?;
    draw_centered(
        out,
        vp,
        mid.saturating_sub(2),
        &format!("Your Score: {}", final_score),
        Color::White,
    )?;
    let best_color = if final_score >= high_score && final_score > 0 {
        Color::Yellow
    } else {
        Color::DarkYellow
    };
    draw_centered(
        out,
        vp,
        mid.saturating_sub(1),
        &format!("High Score: {}", high_score),
        best_color,
    )?;

    draw_buttons(out, buttons)?;
    finish(out, vp)
}

/// Solid white screen shown for a moment before Game Over.
pub fn render_flash<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    let blank = " ".repeat(vp.cols as usize);
    out.queue(style::SetBackgroundColor(Color::White))?;
    for row in 0..vp.rows {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print(&blank))?;
    }
    finish(out, vp)
}

// ── Pieces ────────────────────────────────────────────────────────────────────

fn finish<W: Write>(out: &mut W, vp: &Viewport) -> std::io::Result<()> {
    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, vp.rows.saturating_sub(1)))?;
    out.flush()
}

fn draw_stars<W: Write>(out: &mut W, vp: &Viewport, stars: &Starfield) -> std::io::Result<()> {
    for star in &stars.stars {
        let (col, row) = vp.to_cell(star.x, star.y);
        if col < 0 || col >= vp.cols as i32 || row < 1 || row > vp.last_play_row() {
            continue;
        }
        let (glyph, color) = match star.size {
            1 => ('.', Color::DarkGrey),
            2 => ('+', Color::Grey),
            _ => ('*', Color::White),
        };
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

/// Draw `sprite` centred on the playfield point `(x, y)`, clipped to the
/// play area.
fn draw_sprite<W: Write>(
    out: &mut W,
    vp: &Viewport,
    sprite: &Sprite,
    x: f32,
    y: f32,
    color: Color,
) -> std::io::Result<()> {
    let (col, row) = vp.to_cell(x, y);
    let left = col - sprite.width() as i32 / 2;
    let top = row - sprite.height() as i32 / 2;

    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in sprite.rows().iter().enumerate() {
        let r = top + i as i32;
        if r < 1 || r > vp.last_play_row() {
            continue;
        }
        let visible: String = line
            .chars()
            .enumerate()
            .filter(|(j, _)| {
                let c = left + *j as i32;
                c >= 0 && c < vp.cols as i32
            })
            .map(|(_, ch)| ch)
            .collect();
        if visible.is_empty() {
            continue;
        }
        out.queue(cursor::MoveTo(left.max(0) as u16, r as u16))?;
        out.queue(Print(visible))?;
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, vp: &Viewport, session: &GameSession) -> std::io::Result<()> {
    // Score and best on the left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", session.score)))?;
    out.queue(style::SetForegroundColor(C_HUD_HIGH))?;
    out.queue(Print(format!(
        "  Hi: {:>6}",
        session.high_score.max(session.score)
    )))?;

    // Health bar on the right
    let health = session.player.health;
    let max = session.rules.initial_health.max(1);
    let filled = ui::health_bar_fill(health, max, HEALTH_BAR_CELLS);
    let label = format!(" {}/{}", health, max);
    let total = 2 + HEALTH_BAR_CELLS as usize + label.chars().count();
    let col = vp.cols.saturating_sub(total as u16 + 1);

    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("["))?;
    out.queue(style::SetForegroundColor(C_HEALTH))?;
    out.queue(Print("█".repeat(filled as usize)))?;
    out.queue(style::SetForegroundColor(C_HEALTH_EMPTY))?;
    out.queue(Print("░".repeat((HEALTH_BAR_CELLS - filled) as usize)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("]"))?;
    out.queue(style::SetForegroundColor(C_HEALTH))?;
    out.queue(Print(label))?;

    Ok(())
}

fn draw_hint<W: Write>(out: &mut W, vp: &Viewport, hint: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, vp.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

fn draw_centered<W: Write>(
    out: &mut W,
    vp: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (vp.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Buttons ───────────────────────────────────────────────────────────────────

fn tone_colors(tone: Tone) -> (Color, Color) {
    // (idle, hovered)
    match tone {
        Tone::Green => (Color::DarkGreen, Color::Green),
        Tone::Red => (Color::DarkRed, Color::Red),
        Tone::Blue => (Color::DarkBlue, Color::Blue),
    }
}

fn draw_buttons<W: Write>(out: &mut W, buttons: &[Button]) -> std::io::Result<()> {
    for button in buttons {
        draw_button(out, button)?;
    }
    Ok(())
}

fn draw_button<W: Write>(out: &mut W, button: &Button) -> std::io::Result<()> {
    let inner = button.width.saturating_sub(2) as usize;
    let (idle, hover) = tone_colors(button.tone);
    let fill = if button.hovered { hover } else { idle };

    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(style::SetBackgroundColor(fill))?;

    out.queue(cursor::MoveTo(button.col, button.row))?;
    out.queue(Print(format!("╭{}╮", "─".repeat(inner))))?;
    for row in 1..button.height.saturating_sub(1) {
        out.queue(cursor::MoveTo(button.col, button.row + row))?;
        out.queue(Print(format!("│{:^inner$}│", button.label)))?;
    }
    out.queue(cursor::MoveTo(
        button.col,
        button.row + button.height.saturating_sub(1),
    ))?;
    out.queue(Print(format!("╰{}╯", "─".repeat(inner))))?;

    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}
