//! # Contact Flow Integration Test
//!
//! Drives the page through a visitor session: scroll, navigate, submit the
//! contact form, and watch the notifications come and go.

use std::time::Duration;

use lumen_page::{
    ContactFields, Notice, Page, PageConfig, PageEffect, PageLayout, Section, SubmitButton,
};
use lumen_shared::{InputEvent, Viewport};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn layout() -> PageLayout {
    PageLayout {
        sections: vec![Section::new("home", 0.0, 900.0), Section::new("contact", 900.0, 700.0)],
        nav_links: vec!["#home".into(), "#contact".into()],
        fade_in_groups: vec![vec![1000.0]],
        timeline: Vec::new(),
        subtitle: None,
    }
}

fn valid_fields() -> ContactFields {
    ContactFields {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        message: "Hello there".into(),
    }
}

/// Test: desktop submit shows "Sending...", then a thank-you dialog after 2 s.
#[test]
fn test_desktop_submit_cycle() {
    let mut page = Page::new(PageConfig::default(), layout(), Viewport::new(1280.0, 800.0), ms(0)).unwrap();
    page.fill_form(valid_fields());

    let fx = page.submit_form(ms(1000));
    assert_eq!(
        fx,
        vec![PageEffect::SubmitButton(SubmitButton {
            label: "Sending...",
            disabled: true
        })]
    );

    // a second click while sending does nothing
    assert!(page.submit_form(ms(1500)).is_empty());
    assert!(page.tick(ms(2999)).is_empty());

    let fx = page.tick(ms(3000));
    assert!(matches!(
        &fx[0],
        PageEffect::Notify(Notice::Dialog { message }) if message.starts_with("Thank you")
    ));
    assert!(fx.contains(&PageEffect::FormCleared));
    assert!(fx.contains(&PageEffect::SubmitButton(SubmitButton {
        label: "Send Message",
        disabled: false
    })));
    assert_eq!(page.form().fields(), &ContactFields::default());
}

/// Test: on mobile, validation errors are toasts that expire after 3 s.
#[test]
fn test_mobile_validation_toast() {
    let mut page = Page::new(PageConfig::default(), layout(), Viewport::new(390.0, 844.0), ms(0)).unwrap();
    page.fill_form(ContactFields {
        email: "not-an-email".into(),
        ..valid_fields()
    });

    let fx = page.submit_form(ms(100));
    let id = match &fx[..] {
        [PageEffect::Notify(Notice::Toast { id, message })] => {
            assert_eq!(message, "Please enter a valid email address.");
            *id
        }
        other => panic!("unexpected effects: {other:?}"),
    };

    assert!(page.tick(ms(3099)).is_empty());
    assert_eq!(page.tick(ms(3100)), vec![PageEffect::ToastExpired(id)]);
}

/// Test: empty fields are reported before a bad email.
#[test]
fn test_missing_fields_message() {
    let mut page = Page::new(PageConfig::default(), layout(), Viewport::new(1280.0, 800.0), ms(0)).unwrap();
    page.fill_form(ContactFields {
        name: String::new(),
        email: "bad".into(),
        message: "x".into(),
    });

    let fx = page.submit_form(ms(0));
    assert_eq!(
        fx,
        vec![PageEffect::Notify(Notice::Dialog {
            message: "Please fill in all fields.".into()
        })]
    );
}

/// Test: navigating to the contact section and scrolling there updates the
/// highlight and reveals the form.
#[test]
fn test_navigate_then_scroll() {
    let mut page = Page::new(PageConfig::default(), layout(), Viewport::new(1280.0, 800.0), ms(0)).unwrap();
    page.initial_effects();

    let fx = page.handle_input(&InputEvent::NavClick { href: "#contact".into() }, ms(0));
    assert_eq!(fx, vec![PageEffect::ScrollTo { y: 900.0 }]);

    let fx = page.handle_input(&InputEvent::Scroll { y: 900.0 }, ms(10));
    assert!(fx.contains(&PageEffect::ActiveLink(Some("#contact".into()))));
    assert!(fx.contains(&PageEffect::FadeInVisible { element: 0, delay_secs: 0.0 }));
    assert_eq!(page.links().active_href(), Some("#contact"));
}
