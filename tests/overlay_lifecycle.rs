use std::time::{Duration, Instant};

use screenkey::overlay::{Overlay, OverlayConfig, Phase};

fn overlay() -> Overlay {
    Overlay::new(OverlayConfig::default())
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn starts_hidden_and_empty() {
    let ov = overlay();
    let now = Instant::now();
    assert_eq!(ov.phase(), Phase::Hidden);
    assert_eq!(ov.text(), "");
    assert_eq!(ov.opacity(now), 0.0);
    assert!(!ov.visible());
    assert!(!ov.topmost());
    assert!(ov.next_deadline(now).is_none());
}

#[test]
fn present_shows_and_accumulates_text() {
    let mut ov = overlay();
    let t0 = Instant::now();

    ov.present("A", t0);
    assert_eq!(ov.phase(), Phase::Showing);
    assert!(ov.visible());
    assert!(ov.topmost());

    ov.present("B", t0 + ms(20));
    ov.present("C", t0 + ms(40));
    assert_eq!(ov.text(), "ABC");
}

#[test]
fn entry_animation_promotes_to_visible() {
    let mut ov = overlay();
    let t0 = Instant::now();
    ov.present("A", t0);

    ov.tick(t0 + ms(100));
    assert_eq!(ov.phase(), Phase::Showing);

    ov.tick(t0 + ms(250));
    assert_eq!(ov.phase(), Phase::Visible);
}

#[test]
fn entry_fades_in_and_slides_up() {
    let mut ov = overlay();
    let t0 = Instant::now();
    ov.present("A", t0);

    assert_eq!(ov.opacity(t0), 0.0);
    assert!((ov.opacity(t0 + ms(100)) - 0.475).abs() < 1e-6);
    assert!((ov.opacity(t0 + ms(200)) - 0.95).abs() < 1e-6);

    assert!((ov.slide_offset(t0) - 30.0).abs() < 1e-4);
    assert!(ov.slide_offset(t0 + ms(250)).abs() < 1e-4);
}

#[test]
fn auto_hide_fires_after_the_quiet_period() {
    let mut ov = overlay();
    let t0 = Instant::now();
    ov.present("A", t0);

    ov.tick(t0 + Duration::from_secs(10));
    assert_eq!(ov.phase(), Phase::Hiding);
    // The accumulated text survives until the exit animation completes.
    assert_eq!(ov.text(), "A");

    ov.tick(t0 + Duration::from_secs(10) + ms(150));
    assert_eq!(ov.phase(), Phase::Hiding);
    assert_eq!(ov.text(), "A");

    ov.tick(t0 + Duration::from_secs(10) + ms(300));
    assert_eq!(ov.phase(), Phase::Hidden);
    assert_eq!(ov.text(), "");
    assert!(!ov.topmost());
}

#[test]
fn present_restarts_the_auto_hide_timer_from_zero() {
    let mut ov = overlay();
    let t0 = Instant::now();
    ov.present("A", t0);

    ov.tick(t0 + Duration::from_secs(9));
    ov.present("B", t0 + Duration::from_secs(9));

    ov.tick(t0 + Duration::from_secs(10) + ms(1));
    assert_eq!(ov.phase(), Phase::Visible, "timer must restart, not stack");

    ov.tick(t0 + Duration::from_secs(19));
    assert_eq!(ov.phase(), Phase::Hiding);
}

#[test]
fn exit_fade_is_linear_from_current_opacity() {
    let mut ov = overlay();
    let t0 = Instant::now();
    ov.present("A", t0);

    let hide_at = t0 + Duration::from_secs(10);
    ov.tick(hide_at);
    assert!((ov.opacity(hide_at) - 0.95).abs() < 1e-6);
    assert!((ov.opacity(hide_at + ms(150)) - 0.475).abs() < 1e-6);
}

#[test]
fn present_during_hiding_restarts_the_show_sequence() {
    let mut ov = overlay();
    let t0 = Instant::now();
    ov.present("A", t0);

    let hide_at = t0 + Duration::from_secs(10);
    ov.tick(hide_at);
    assert_eq!(ov.phase(), Phase::Hiding);

    let t1 = hide_at + ms(100);
    ov.present("B", t1);
    assert_eq!(ov.phase(), Phase::Showing);
    assert!(ov.topmost());
    // The interrupted cycle never reached its clear.
    assert_eq!(ov.text(), "AB");

    // And the new cycle gets a fresh auto-hide window.
    ov.tick(t1 + Duration::from_secs(10));
    assert_eq!(ov.phase(), Phase::Hiding);
}

#[test]
fn topmost_attribute_releases_after_its_deadline() {
    let mut ov = overlay();
    let t0 = Instant::now();
    ov.present("A", t0);
    assert!(ov.topmost());

    ov.tick(t0 + ms(349));
    assert!(ov.topmost());

    ov.tick(t0 + ms(350));
    assert!(!ov.topmost());
    assert!(ov.visible(), "releasing topmost must not hide the overlay");
}

#[test]
fn topmost_is_reacquired_on_the_next_show_cycle() {
    let mut ov = overlay();
    let t0 = Instant::now();
    ov.present("A", t0);
    ov.tick(t0 + ms(400));
    assert!(!ov.topmost());

    ov.tick(t0 + Duration::from_secs(10) + ms(400));
    ov.tick(t0 + Duration::from_secs(11));
    assert_eq!(ov.phase(), Phase::Hidden);

    let t1 = t0 + Duration::from_secs(12);
    ov.present("B", t1);
    assert!(ov.topmost());
    assert_eq!(ov.text(), "B");
}

#[test]
fn present_while_dim_rebrightens_quickly() {
    let mut ov = overlay();
    let t0 = Instant::now();
    ov.present("A", t0);

    // Halfway through the entry fade, a new key supersedes it with the fast
    // re-brighten ramp.
    let t1 = t0 + ms(100);
    ov.present("B", t1);
    assert!((ov.opacity(t1) - 0.475).abs() < 1e-6);
    assert!((ov.opacity(t1 + ms(120)) - 0.95).abs() < 1e-5);
}

#[test]
fn present_at_steady_opacity_does_not_restart_animations() {
    let mut ov = overlay();
    let t0 = Instant::now();
    ov.present("A", t0);
    ov.tick(t0 + ms(300));
    assert_eq!(ov.phase(), Phase::Visible);

    let t1 = t0 + ms(400);
    ov.present("B", t1);
    assert_eq!(ov.phase(), Phase::Visible);
    assert!((ov.opacity(t1) - 0.95).abs() < 1e-6);
    assert_eq!(ov.text(), "AB");
}

#[test]
fn next_deadline_tracks_the_nearest_timer() {
    let mut ov = overlay();
    let t0 = Instant::now();
    ov.present("A", t0);

    // While showing, the nearest wakeup is the entry fade end.
    let deadline = ov.next_deadline(t0).expect("active overlay has deadlines");
    assert_eq!(deadline, t0 + ms(200));

    ov.tick(t0 + ms(400));
    let deadline = ov.next_deadline(t0 + ms(400)).expect("auto-hide pending");
    assert_eq!(deadline, t0 + Duration::from_secs(10));
}
