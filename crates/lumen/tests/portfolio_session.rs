//! # Portfolio Session Integration Test
//!
//! The background and the page share one input stream and one frame loop.

use std::time::Duration;

use lumen::{Portfolio, TracingRenderer};
use lumen_core::{BackgroundConfig, EntityKind, FrameLoop, InputQueue, ManualClock, RecordingRenderer};
use lumen_page::{PageConfig, PageEffect, PageLayout, Section};
use lumen_shared::{InputEvent, Vec2, Viewport};

fn layout() -> PageLayout {
    PageLayout {
        sections: vec![Section::new("home", 0.0, 800.0), Section::new("about", 800.0, 800.0)],
        nav_links: vec!["#home".into(), "#about".into()],
        fade_in_groups: vec![vec![900.0]],
        timeline: vec![(900.0, 200.0)],
        subtitle: Some("Builder".into()),
    }
}

/// Test: one event stream drives both halves.
#[test]
fn test_events_reach_background_and_page() {
    let mut renderer = RecordingRenderer::new(Viewport::new(1024.0, 768.0));
    let mut portfolio =
        Portfolio::new(BackgroundConfig::default(), PageConfig::default(), layout(), &mut renderer).unwrap();
    let initial = portfolio.take_page_effects();
    assert!(initial.contains(&PageEffect::ActiveLink(Some("#home".into()))));

    let queue = InputQueue::new(32);
    let tx = queue.sender();
    let mut lp = FrameLoop::new(ManualClock::new(Duration::from_millis(10)), queue.receiver());

    assert!(tx.send(InputEvent::Click(Vec2::new(100.0, 100.0))));
    assert!(tx.send(InputEvent::Scroll { y: 700.0 }));
    lp.run_frames(1, &mut portfolio, &mut renderer);

    assert_eq!(renderer.count(EntityKind::Burst), 1);
    let effects = portfolio.take_page_effects();
    assert!(effects.contains(&PageEffect::NavbarScrolled(true)));
    assert!(effects.contains(&PageEffect::ActiveLink(Some("#about".into()))));
    assert!(effects.contains(&PageEffect::HeroParallax { translate_y: -350.0 }));
}

/// Test: a resize to 500px rebuilds the field and closes the open menu.
#[test]
fn test_resize_to_narrow() {
    let mut renderer = TracingRenderer::new(Viewport::new(1280.0, 800.0));
    let mut portfolio =
        Portfolio::new(BackgroundConfig::default(), PageConfig::default(), layout(), &mut renderer).unwrap();
    assert_eq!(renderer.live(EntityKind::Particle), 30);

    portfolio.dispatch(&InputEvent::MenuToggle, Duration::ZERO, &mut renderer);
    renderer.set_viewport(Viewport::new(500.0, 800.0));
    portfolio.dispatch(&InputEvent::Resize(Viewport::new(500.0, 800.0)), Duration::ZERO, &mut renderer);

    assert_eq!(renderer.live(EntityKind::Particle), 15);
    assert_eq!(renderer.live(EntityKind::Sparkle), 8);
    assert_eq!(renderer.live(EntityKind::Star), 12);
    assert!(!portfolio.page().menu().is_open());
    assert_eq!(
        portfolio.take_page_effects().last(),
        Some(&PageEffect::MenuOpen(false))
    );
}

/// Test: page timers advance with the frame loop clock.
#[test]
fn test_typewriter_follows_frames() {
    let mut renderer = RecordingRenderer::new(Viewport::new(1024.0, 768.0));
    let mut portfolio =
        Portfolio::new(BackgroundConfig::default(), PageConfig::default(), layout(), &mut renderer).unwrap();
    portfolio.take_page_effects();

    let queue = InputQueue::new(4);
    let mut lp = FrameLoop::new(ManualClock::new(Duration::from_millis(100)), queue.receiver());

    // t = 1400 ms: still the original text
    lp.run_frames(14, &mut portfolio, &mut renderer);
    assert!(portfolio.take_page_effects().is_empty());

    // t = 1500 ms: typing starts
    lp.run_frames(1, &mut portfolio, &mut renderer);
    assert_eq!(portfolio.take_page_effects(), vec![PageEffect::Subtitle("B".into())]);
}
