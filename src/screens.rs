//! Screen state machine.
//!
//! ```text
//! Menu ─Start─▶ Story ─Continue─▶ Playing ─Died─▶ GameOver ─Restart─▶ Playing
//!   ▲                               │                  │
//!   └──────────BackToMenu───────────┴─────BackToMenu───┘
//! ```
//!
//! Any screen goes to `Quit` on `Quit`.  Entering `Playing` is two steps:
//! `handle` switches the screen, then the frontend loads its assets and
//! calls `begin_session` (or reports `AssetsFailed`, which falls back to
//! the menu).

use rand::Rng;

use crate::compute::{self, FrameReport};
use crate::config::Rules;
use crate::entities::{Controls, GameSession, Playfield};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Story,
    Playing,
    GameOver { final_score: u32, high_score: u32 },
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenEvent {
    Start,
    Continue,
    Restart,
    BackToMenu,
    Quit,
    Died { final_score: u32 },
    AssetsFailed,
}

pub struct Controller {
    screen: Screen,
    high_score: u32,
    skip_story: bool,
    rules: Rules,
    playfield: Playfield,
    session: Option<GameSession>,
}

impl Controller {
    pub fn new(rules: Rules, playfield: Playfield, high_score: u32, skip_story: bool) -> Self {
        Self {
            screen: Screen::Menu,
            high_score,
            skip_story,
            rules,
            playfield,
            session: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    /// Apply one discrete event.  Events that mean nothing on the current
    /// screen are ignored.
    pub fn handle(&mut self, event: ScreenEvent) -> Screen {
        use ScreenEvent as E;

        let next = match (self.screen, event) {
            (_, E::Quit) | (Screen::Quit, _) => Screen::Quit,
            (Screen::Menu, E::Start) if self.skip_story => Screen::Playing,
            (Screen::Menu, E::Start) => Screen::Story,
            (Screen::Story, E::Continue) => Screen::Playing,
            (Screen::Playing, E::BackToMenu) | (Screen::Playing, E::AssetsFailed) => Screen::Menu,
            (Screen::Playing, E::Died { final_score }) => {
                self.high_score = self.high_score.max(final_score);
                Screen::GameOver {
                    final_score,
                    high_score: self.high_score,
                }
            }
            (Screen::GameOver { .. }, E::Restart) => Screen::Playing,
            (Screen::GameOver { .. }, E::BackToMenu) => Screen::Menu,
            (screen, _) => screen,
        };

        if next != self.screen {
            tracing::debug!(from = ?self.screen, to = ?next, ?event, "screen transition");
            // A session never outlives the Playing screen it was built for.
            self.session = None;
            self.screen = next;
        }
        next
    }

    /// Build the session for the Playing screen.  Does nothing elsewhere.
    pub fn begin_session(
        &mut self,
        explosion_frames: usize,
        rng: &mut impl Rng,
    ) -> Option<&mut GameSession> {
        if self.screen != Screen::Playing {
            return None;
        }
        let session = compute::new_session(
            &self.rules,
            self.playfield,
            self.high_score,
            explosion_frames,
            rng,
        );
        tracing::info!(
            health = session.player.health,
            high_score = self.high_score,
            "session started"
        );
        self.session = Some(session);
        self.session.as_mut()
    }

    /// Run one frame of the active session, if any.
    pub fn tick(&mut self, controls: Controls, rng: &mut impl Rng, now_ms: u64) -> FrameReport {
        match self.session.as_mut() {
            Some(session) => compute::tick(session, controls, rng, now_ms),
            None => FrameReport::default(),
        }
    }
}
