use space_adventure::config::Rules;
use space_adventure::entities::*;
use space_adventure::screens::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn controller(high_score: u32) -> Controller {
    let rules = Rules {
        spawn_interval: u32::MAX,
        ..Rules::default()
    };
    Controller::new(rules, Playfield::default(), high_score, false)
}

/// Drive a controller from the menu into a running session.
fn start_playing(c: &mut Controller, rng: &mut StdRng) {
    assert_eq!(c.handle(ScreenEvent::Start), Screen::Story);
    assert_eq!(c.handle(ScreenEvent::Continue), Screen::Playing);
    assert!(c.begin_session(4, rng).is_some());
}

fn ram_player(c: &mut Controller) {
    let session = c.session_mut().expect("session running");
    session.player.health = 1;
    session.enemies.insert(Enemy {
        body: Body::new(400.0, 580.0, (48.0, 48.0)).with_velocity(0.0, 2.0),
        shoot_timer: 0,
        shoot_interval: 1_000,
    });
}

// ── Transitions ───────────────────────────────────────────────────────────────

#[test]
fn starts_on_menu_without_session() {
    let c = controller(0);
    assert_eq!(c.screen(), Screen::Menu);
    assert!(c.session().is_none());
}

#[test]
fn menu_story_playing() {
    let mut c = controller(0);
    assert_eq!(c.handle(ScreenEvent::Start), Screen::Story);
    assert_eq!(c.handle(ScreenEvent::Continue), Screen::Playing);
    assert!(c.session().is_none(), "session waits for assets");

    let session = c.begin_session(4, &mut seeded_rng()).expect("on Playing");
    assert_eq!(session.score, 0);
    assert_eq!(session.player.health, 10);
    assert_eq!(session.explosion_frames, 4);
}

#[test]
fn skip_story_goes_straight_to_playing() {
    let mut c = Controller::new(Rules::default(), Playfield::default(), 0, true);
    assert_eq!(c.handle(ScreenEvent::Start), Screen::Playing);
}

#[test]
fn begin_session_only_on_playing() {
    let mut c = controller(0);
    assert!(c.begin_session(4, &mut seeded_rng()).is_none());
    c.handle(ScreenEvent::Start);
    assert!(c.begin_session(4, &mut seeded_rng()).is_none());
    assert!(c.session().is_none());
}

#[test]
fn irrelevant_events_are_ignored() {
    let mut c = controller(0);
    assert_eq!(c.handle(ScreenEvent::Continue), Screen::Menu);
    assert_eq!(c.handle(ScreenEvent::Restart), Screen::Menu);
    assert_eq!(c.handle(ScreenEvent::Died { final_score: 10 }), Screen::Menu);
    assert_eq!(c.high_score(), 0);

    let mut rng = seeded_rng();
    start_playing(&mut c, &mut rng);
    assert_eq!(c.handle(ScreenEvent::Start), Screen::Playing);
    assert!(c.session().is_some(), "ignored events keep the session");
}

#[test]
fn escape_from_playing_returns_to_menu() {
    let mut c = controller(0);
    let mut rng = seeded_rng();
    start_playing(&mut c, &mut rng);
    assert_eq!(c.handle(ScreenEvent::BackToMenu), Screen::Menu);
    assert!(c.session().is_none());
}

#[test]
fn asset_failure_falls_back_to_menu() {
    let mut c = controller(0);
    c.handle(ScreenEvent::Start);
    c.handle(ScreenEvent::Continue);
    assert_eq!(c.handle(ScreenEvent::AssetsFailed), Screen::Menu);
}

#[test]
fn quit_from_every_screen() {
    let mut rng = seeded_rng();

    let mut c = controller(0);
    assert_eq!(c.handle(ScreenEvent::Quit), Screen::Quit);

    let mut c = controller(0);
    c.handle(ScreenEvent::Start);
    assert_eq!(c.handle(ScreenEvent::Quit), Screen::Quit);

    let mut c = controller(0);
    start_playing(&mut c, &mut rng);
    assert_eq!(c.handle(ScreenEvent::Quit), Screen::Quit);
    assert!(c.session().is_none());

    let mut c = controller(0);
    start_playing(&mut c, &mut rng);
    c.handle(ScreenEvent::Died { final_score: 0 });
    assert_eq!(c.handle(ScreenEvent::Quit), Screen::Quit);

    // Quit is terminal
    assert_eq!(c.handle(ScreenEvent::Start), Screen::Quit);
}

// ── Death and restart ─────────────────────────────────────────────────────────

#[test]
fn death_carries_final_and_best_score() {
    let mut c = controller(300);
    let mut rng = seeded_rng();
    start_playing(&mut c, &mut rng);

    let screen = c.handle(ScreenEvent::Died { final_score: 500 });
    assert_eq!(
        screen,
        Screen::GameOver {
            final_score: 500,
            high_score: 500,
        }
    );
    assert_eq!(c.high_score(), 500);
    assert!(c.session().is_none());
}

#[test]
fn lower_score_keeps_previous_best() {
    let mut c = controller(900);
    let mut rng = seeded_rng();
    start_playing(&mut c, &mut rng);

    let screen = c.handle(ScreenEvent::Died { final_score: 200 });
    assert_eq!(
        screen,
        Screen::GameOver {
            final_score: 200,
            high_score: 900,
        }
    );
}

#[test]
fn restart_builds_a_fresh_session() {
    let mut c = controller(0);
    let mut rng = seeded_rng();
    start_playing(&mut c, &mut rng);
    {
        let session = c.session_mut().expect("session running");
        session.score = 700;
        session.player.health = 2;
    }
    c.handle(ScreenEvent::Died { final_score: 700 });

    assert_eq!(c.handle(ScreenEvent::Restart), Screen::Playing);
    let session = c.begin_session(4, &mut rng).expect("on Playing");
    assert_eq!(session.score, 0);
    assert_eq!(session.player.health, 10);
    assert_eq!(session.high_score, 700);
    assert!(session.enemies.is_empty());
}

#[test]
fn game_over_back_to_menu() {
    let mut c = controller(0);
    let mut rng = seeded_rng();
    start_playing(&mut c, &mut rng);
    c.handle(ScreenEvent::Died { final_score: 0 });
    assert_eq!(c.handle(ScreenEvent::BackToMenu), Screen::Menu);
    assert_eq!(c.handle(ScreenEvent::Start), Screen::Story);
}

#[test]
fn tick_drives_death_into_game_over() {
    let mut c = controller(100);
    let mut rng = seeded_rng();
    start_playing(&mut c, &mut rng);
    c.session_mut().expect("session running").score = 400;
    ram_player(&mut c);

    let report = c.tick(Controls::default(), &mut rng, 0);
    let death = report.death.expect("player died");
    assert_eq!(death.final_score, 400);
    assert_eq!(death.high_score, 400);

    let screen = c.handle(ScreenEvent::Died {
        final_score: death.final_score,
    });
    assert_eq!(
        screen,
        Screen::GameOver {
            final_score: 400,
            high_score: 400,
        }
    );
}

#[test]
fn tick_without_session_is_empty() {
    let mut c = controller(0);
    let report = c.tick(Controls::default(), &mut seeded_rng(), 0);
    assert_eq!(report, Default::default());
}
