mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use space_adventure::assets::{Assets, AudioSink, Sound};
use space_adventure::compute::player_shoot;
use space_adventure::config::Settings;
use space_adventure::entities::{Controls, Playfield};
use space_adventure::high_score;
use space_adventure::screens::{Controller, Screen, ScreenEvent};
use space_adventure::stars::Starfield;
use space_adventure::ui;

use display::Viewport;

const BACKDROP_STARS: usize = 100;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// 8 frames @ 60 FPS ≈ 133 ms, shorter than a typical OS key-repeat gap.
const HOLD_WINDOW: u64 = 8;

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "space_adventure")]
#[command(about = "2100: Space Adventure, a terminal arcade shooter")]
struct Cli {
    /// JSON settings file; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding images/ and sounds/
    #[arg(long)]
    assets: Option<PathBuf>,
    #[arg(long)]
    fps: Option<u32>,
    /// Starting health
    #[arg(long)]
    health: Option<u32>,
    /// Go straight from the menu into the game
    #[arg(long)]
    skip_story: bool,
    /// Ring the terminal bell for sound effects
    #[arg(long)]
    bell: bool,
    #[arg(long)]
    high_score_file: Option<PathBuf>,
    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, default_value = "space_adventure.log")]
    log_file: PathBuf,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(dir) = &self.assets {
            settings.assets_dir = dir.clone();
        }
        if let Some(fps) = self.fps {
            settings.fps = fps;
        }
        if let Some(health) = self.health {
            settings.rules.initial_health = health;
        }
        if self.skip_story {
            settings.skip_story = true;
        }
        if self.bell {
            settings.bell = true;
        }
        if let Some(path) = &self.high_score_file {
            settings.high_score_file = Some(path.clone());
        }
        Ok(settings.sanitized())
    }
}

fn init_tracing(log_file: &Path) -> Result<()> {
    // The terminal is in raw mode while we run, so logs go to a file.
    let file = File::create(log_file)
        .with_context(|| format!("cannot create log file {}", log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Terminal lifetime ─────────────────────────────────────────────────────────

/// Raw mode, alternate screen, mouse capture and keyboard flags, all undone
/// on drop whichever way `run` exits.
struct TerminalGuard {
    keyboard_enhanced: bool,
}

impl TerminalGuard {
    fn acquire<W: Write>(out: &mut W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut guard = Self {
            keyboard_enhanced: false,
        };
        out.execute(terminal::EnterAlternateScreen)?;
        out.execute(cursor::Hide)?;
        out.execute(EnableMouseCapture)?;

        // Request key-release (and key-repeat) events from the terminal.
        // Kitty-protocol terminals support this; others fall back gracefully.
        guard.keyboard_enhanced = out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.keyboard_enhanced {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = out.execute(DisableMouseCapture);
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

// ── Sound ─────────────────────────────────────────────────────────────────────

/// The only speaker a terminal has.
struct TerminalBell {
    enabled: bool,
    pending: bool,
}

impl AudioSink for TerminalBell {
    fn play(&mut self, sound: &Sound) {
        tracing::trace!(sound = sound.name(), "play");
        self.pending |= self.enabled;
    }
}

impl TerminalBell {
    fn flush<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if std::mem::take(&mut self.pending) {
            out.queue(Print('\x07'))?;
            out.flush()?;
        }
        Ok(())
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Input gathered by draining the event queue once per frame.
///
/// Movement uses a `key_frame` map recording the frame each key was last
/// pressed or repeated; a key counts as held while that frame is recent.
/// Terminals with keyboard enhancement also send releases, which drop the
/// key at once.  Everything else is a one-shot for the current frame.
#[derive(Default)]
struct Input {
    key_frame: HashMap<KeyCode, u64>,
    mouse: (u16, u16),
    shots: u32,
    escape: bool,
    enter: bool,
    quit: bool,
    typed: Option<char>,
    click: Option<(u16, u16)>,
}

impl Input {
    fn drain(&mut self, frame: u64) -> io::Result<()> {
        self.shots = 0;
        self.escape = false;
        self.enter = false;
        self.typed = None;
        self.click = None;

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        self.key_frame.insert(code.clone(), frame);
                        match code {
                            KeyCode::Char(ch)
                                if ui::is_quit_key(ch, modifiers.contains(KeyModifiers::CONTROL)) =>
                            {
                                self.quit = true;
                            }
                            KeyCode::Esc => self.escape = true,
                            KeyCode::Enter => self.enter = true,
                            KeyCode::Char(' ') => self.shots += 1,
                            KeyCode::Char(ch) => self.typed = Some(ch),
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        self.key_frame.insert(code.clone(), frame);
                    }
                    KeyEventKind::Release => {
                        self.key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind, column, row, ..
                }) => {
                    self.mouse = (column, row);
                    if kind == MouseEventKind::Down(MouseButton::Left) {
                        self.click = Some((column, row));
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn is_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|key| {
            self.key_frame
                .get(key)
                .is_some_and(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        })
    }

    fn controls(&self, frame: u64) -> Controls {
        Controls {
            left: self.is_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
            right: self.is_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
            up: self.is_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
            down: self.is_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
        }
    }
}

// ── Screen loop ───────────────────────────────────────────────────────────────

/// One iteration per frame: drain input, advance the current screen,
/// render, then sleep off the rest of the frame budget.
fn run<W: Write>(out: &mut W, settings: &Settings, rng: &mut StdRng) -> Result<()> {
    let field = Playfield::default();
    let high_score_path = settings.high_score_path();
    let mut controller = Controller::new(
        settings.rules.clone(),
        field,
        high_score::load(&high_score_path),
        settings.skip_story,
    );
    let mut backdrop = Starfield::new(BACKDROP_STARS, &field, rng);
    let mut assets: Option<Assets> = None;
    let mut bell = TerminalBell {
        enabled: settings.bell,
        pending: false,
    };
    let mut input = Input::default();
    let frame_budget = Duration::from_secs_f64(1.0 / settings.fps as f64);
    let started = Instant::now();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        input.drain(frame)?;
        if input.quit {
            controller.handle(ScreenEvent::Quit);
        }

        let (cols, rows) = terminal::size()?;
        let vp = Viewport::new(cols, rows, field);

        match controller.screen() {
            Screen::Quit => break,
            Screen::Playing => {
                if controller.session().is_none() {
                    match Assets::load(&settings.assets_dir) {
                        Ok(loaded) => {
                            controller.begin_session(loaded.explosion.len(), rng);
                            assets = Some(loaded);
                        }
                        Err(err) => {
                            tracing::error!(%err, "cannot start a game, back to the menu");
                            controller.handle(ScreenEvent::AssetsFailed);
                        }
                    }
                }

                if input.escape {
                    controller.handle(ScreenEvent::BackToMenu);
                } else if let Some(loaded) = assets.as_ref() {
                    if let Some(session) = controller.session_mut() {
                        for _ in 0..input.shots {
                            if let Some(cue) = player_shoot(session) {
                                loaded.sound(cue).play(&mut bell);
                            }
                        }
                    }

                    let now_ms = started.elapsed().as_millis() as u64;
                    let report = controller.tick(input.controls(frame), rng, now_ms);
                    for cue in &report.cues {
                        loaded.sound(*cue).play(&mut bell);
                    }
                    if let Some(session) = controller.session() {
                        display::render_game(out, &vp, session, loaded)?;
                    }
                    bell.flush(out)?;

                    if let Some(death) = report.death {
                        flash(out, &vp, settings.flash_ms, frame_budget)?;
                        let previous_best = controller.high_score();
                        controller.handle(ScreenEvent::Died {
                            final_score: death.final_score,
                        });
                        if controller.high_score() > previous_best {
                            if let Err(err) =
                                high_score::save(&high_score_path, controller.high_score())
                            {
                                tracing::warn!(%err, "cannot save high score");
                            }
                        }
                    }
                }
            }
            screen => {
                let mut buttons = ui::buttons_for(screen, cols, rows);
                for button in &mut buttons {
                    button.check_hover(input.mouse.0, input.mouse.1);
                }
                let event = input
                    .click
                    .and_then(|(col, row)| ui::click(&buttons, col, row))
                    .or_else(|| ui::key(&buttons, input.typed, input.enter))
                    .or_else(|| (input.escape && screen == Screen::Menu).then_some(ScreenEvent::Quit));

                backdrop.update(rng);
                match screen {
                    Screen::Menu => display::render_menu(
                        out,
                        &vp,
                        &backdrop,
                        &buttons,
                        controller.high_score(),
                    )?,
                    Screen::Story => display::render_story(out, &vp, &backdrop, &buttons)?,
                    Screen::GameOver {
                        final_score,
                        high_score,
                    } => display::render_game_over(
                        out,
                        &vp,
                        &backdrop,
                        &buttons,
                        final_score,
                        high_score,
                    )?,
                    Screen::Playing | Screen::Quit => {}
                }

                if let Some(event) = event {
                    controller.handle(event);
                }
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }

    Ok(())
}

/// Hold a white screen for `duration_ms` before Game Over.  Input is not
/// read meanwhile.
fn flash<W: Write>(
    out: &mut W,
    vp: &Viewport,
    duration_ms: u64,
    frame_budget: Duration,
) -> io::Result<()> {
    let start = Instant::now();
    let duration = Duration::from_millis(duration_ms);
    while start.elapsed() < duration {
        display::render_flash(out, vp)?;
        thread::sleep(frame_budget.min(duration.saturating_sub(start.elapsed())));
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;
    let settings = cli.settings()?;

    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    tracing::info!(seed, fps = settings.fps, assets = %settings.assets_dir.display(), "starting");
    let mut rng = StdRng::seed_from_u64(seed);

    let mut out = BufWriter::new(stdout());
    let result = {
        let _terminal = TerminalGuard::acquire(&mut out).context("cannot set up the terminal")?;
        run(&mut out, &settings, &mut rng)
    };

    match &result {
        Ok(()) => tracing::info!("quit"),
        Err(err) => tracing::error!("{err:#}"),
    }
    result
}
