/// Clickable buttons for the menu, story and game-over screens, plus HUD
/// layout helpers.
///
/// Layout is in terminal cells; the frontend hit-tests mouse positions and
/// draws the same rectangles.
use crate::screens::{Screen, ScreenEvent};

const BUTTON_WIDTH: u16 = 20;
const BUTTON_HEIGHT: u16 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Green,
    Red,
    Blue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Button {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
    pub label: &'static str,
    /// Lower-case key that presses the button.
    pub shortcut: char,
    pub tone: Tone,
    pub event: ScreenEvent,
    pub hovered: bool,
}

impl Button {
    pub fn new(
        col: u16,
        row: u16,
        label: &'static str,
        shortcut: char,
        tone: Tone,
        event: ScreenEvent,
    ) -> Self {
        Self {
            col,
            row,
            width: BUTTON_WIDTH,
            height: BUTTON_HEIGHT,
            label,
            shortcut,
            tone,
            event,
            hovered: false,
        }
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.col
            && col < self.col.saturating_add(self.width)
            && row >= self.row
            && row < self.row.saturating_add(self.height)
    }

    pub fn check_hover(&mut self, col: u16, row: u16) -> bool {
        self.hovered = self.contains(col, row);
        self.hovered
    }
}

/// Buttons shown on `screen` for a terminal of `cols`×`rows`.  Playing and
/// Quit have none.
pub fn buttons_for(screen: Screen, cols: u16, rows: u16) -> Vec<Button> {
    let col = (cols / 2).saturating_sub(BUTTON_WIDTH / 2);
    let mid = rows / 2;
    match screen {
        Screen::Menu => vec![
            Button::new(col, mid, "Start Game", 's', Tone::Green, ScreenEvent::Start),
            Button::new(col, mid + 4, "Quit", 'q', Tone::Red, ScreenEvent::Quit),
        ],
        Screen::Story => vec![Button::new(
            col,
            rows.saturating_sub(BUTTON_HEIGHT + 2),
            "Continue",
            'c',
            Tone::Green,
            ScreenEvent::Continue,
        )],
        Screen::GameOver { .. } => vec![
            Button::new(col, mid + 3, "Play Again", 'r', Tone::Blue, ScreenEvent::Restart),
            Button::new(col, mid + 7, "Main Menu", 'm', Tone::Red, ScreenEvent::BackToMenu),
        ],
        Screen::Playing | Screen::Quit => Vec::new(),
    }
}

/// The event for a left click at `(col, row)`, if it landed on a button.
pub fn click(buttons: &[Button], col: u16, row: u16) -> Option<ScreenEvent> {
    buttons
        .iter()
        .find(|button| button.contains(col, row))
        .map(|button| button.event)
}

/// The event for a typed key: Enter presses the first button, otherwise the
/// button whose shortcut matches (case-insensitive).
pub fn key(buttons: &[Button], key: Option<char>, enter: bool) -> Option<ScreenEvent> {
    if enter {
        return buttons.first().map(|button| button.event);
    }
    let key = key?.to_ascii_lowercase();
    buttons
        .iter()
        .find(|button| button.shortcut == key)
        .map(|button| button.event)
}

/// Filled cells of a `cells`-wide health bar, rounded up so any health left
/// shows at least one cell.
pub fn health_bar_fill(health: u32, max: u32, cells: u32) -> u32 {
    let max = u64::from(max.max(1));
    let health = u64::from(health).min(max);
    let filled = (health * u64::from(cells)).div_ceil(max);
    // filled <= cells, so the conversion cannot fail
    u32::try_from(filled).unwrap_or(cells)
}

/// Keys that leave the game from any screen: `q` on its own or Ctrl+C.
pub fn is_quit_key(key: char, ctrl: bool) -> bool {
    match key {
        'q' | 'Q' => true,
        'c' | 'C' => ctrl,
        _ => false,
    }
}
