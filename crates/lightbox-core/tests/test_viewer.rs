mod common;

use std::time::Duration;

use approx::assert_relative_eq;
use lightbox_core::geometry::Point;
use lightbox_core::page::{Page, PageImage, PageNode, SubtreeObserver};
use lightbox_core::viewer::{
    Exemption, ExemptionRules, ImageRef, Key, ViewerController, ViewerEvent,
};

use common::{image_ref, viewer};

// ---------------------------------------------------------------------------
// open / close
// ---------------------------------------------------------------------------

#[test]
fn test_open_sets_defaults_and_suppresses_scroll() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));

    let state = v.state();
    assert!(state.is_open());
    assert_eq!(state.scale(), 1.0);
    assert_eq!(state.pan(), Point::ZERO);
    assert_eq!(state.image().unwrap().source_url(), "images/a.png");
    assert_eq!(v.scroll_lock().suppressed, 1);
}

#[test]
fn test_close_is_idempotent() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    v.close();
    v.close();

    assert!(!v.state().is_open());
    assert!(v.state().image().is_none());
    assert_eq!(v.scroll_lock().restored, 1);
}

#[test]
fn test_close_on_never_opened_viewer_does_not_restore_scroll() {
    let mut v = viewer();
    v.close();
    assert_eq!(v.scroll_lock().restored, 0);
}

#[test]
fn test_reopen_while_open_suppresses_scroll_once() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    v.open(image_ref("images/b.png"));
    assert_eq!(v.scroll_lock().suppressed, 1);
    assert_eq!(v.state().image().unwrap().source_url(), "images/b.png");
}

#[test]
fn test_open_after_close_shows_only_new_image_with_reset_zoom() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    v.zoom(-1.0, Point::new(40.0, 25.0));
    v.zoom(-1.0, Point::new(40.0, 25.0));
    assert!(v.begin_pan(Point::new(10.0, 10.0)));
    v.continue_pan(Point::new(70.0, -30.0));
    v.close();

    v.open(image_ref("images/b.png"));
    let state = v.state();
    assert_eq!(state.image(), Some(&image_ref("images/b.png")));
    assert_eq!(state.scale(), 1.0);
    assert_eq!(state.pan(), Point::ZERO);
    assert!(!state.is_panning());
}

#[test]
fn test_instructions_hide_after_duration() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    let opened = v.state().opened_at().unwrap();

    assert!(v.instructions_visible_at(opened));
    assert!(v.instructions_visible_at(opened + Duration::from_millis(2900)));
    assert!(!v.instructions_visible_at(opened + Duration::from_secs(3)));

    v.close();
    assert!(!v.instructions_visible_at(opened));
}

#[test]
fn test_image_ref_rejects_empty_source() {
    assert!(ImageRef::new("", "alt", "caption").is_err());
    assert!(ImageRef::new("   ", "alt", "caption").is_err());
}

// ---------------------------------------------------------------------------
// zoom
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_in_never_exceeds_max_scale() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    for _ in 0..50 {
        v.zoom(-120.0, Point::new(5.0, 5.0));
        assert!(v.state().scale() <= 4.0);
    }
    assert_relative_eq!(v.state().scale(), 4.0);
}

#[test]
fn test_zoom_out_never_drops_below_min_scale() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    for _ in 0..50 {
        v.zoom(120.0, Point::new(5.0, 5.0));
        assert!(v.state().scale() >= 0.5);
    }
    assert_relative_eq!(v.state().scale(), 0.5);
}

#[test]
fn test_zoom_factors_per_step() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    v.zoom(-1.0, Point::ZERO);
    assert_relative_eq!(v.state().scale(), 1.2);
    v.zoom(1.0, Point::ZERO);
    assert_relative_eq!(v.state().scale(), 0.96, epsilon = 1e-6);
}

#[test]
fn test_zoom_keeps_point_under_cursor_fixed() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    let cursor = Point::new(100.0, 50.0);
    v.zoom(-1.0, cursor);

    // pan = cursor - cursor * 1.2
    let pan = v.state().pan();
    assert_relative_eq!(pan.x, -20.0, epsilon = 1e-4);
    assert_relative_eq!(pan.y, -10.0, epsilon = 1e-4);
    assert!(v.state().is_zoomed());
}

#[test]
fn test_zoom_back_to_one_or_below_clears_pan() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    v.zoom(-1.0, Point::new(100.0, 50.0));
    v.begin_pan(Point::ZERO);
    v.continue_pan(Point::new(30.0, 30.0));
    v.end_pan();
    assert_ne!(v.state().pan(), Point::ZERO);

    v.zoom(1.0, Point::new(100.0, 50.0));
    assert!(v.state().scale() <= 1.0);
    assert_eq!(v.state().pan(), Point::ZERO);
    assert!(!v.state().is_zoomed());
}

#[test]
fn test_zoom_by_inverse_factor_restores_pan() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    v.zoom_by(2.0, Point::new(10.0, -5.0));
    let before = v.state().pan();
    let scale_before = v.state().scale();

    let cursor = Point::new(-37.5, 81.25);
    v.zoom_by(1.5, cursor);
    v.zoom_by(1.0 / 1.5, cursor);

    assert_relative_eq!(v.state().scale(), scale_before, epsilon = 1e-5);
    assert_relative_eq!(v.state().pan().x, before.x, epsilon = 1e-3);
    assert_relative_eq!(v.state().pan().y, before.y, epsilon = 1e-3);
}

#[test]
fn test_zoom_by_rejects_non_positive_factor() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    v.zoom_by(0.0, Point::ZERO);
    v.zoom_by(-2.0, Point::ZERO);
    v.zoom_by(f32::NAN, Point::ZERO);
    assert_eq!(v.state().scale(), 1.0);
}

// ---------------------------------------------------------------------------
// pan / reset
// ---------------------------------------------------------------------------

#[test]
fn test_begin_pan_requires_zoom() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    assert!(!v.begin_pan(Point::new(1.0, 1.0)));
    assert!(!v.state().is_panning());

    v.continue_pan(Point::new(50.0, 50.0));
    assert_eq!(v.state().pan(), Point::ZERO);
}

#[test]
fn test_pan_follows_pointer_without_bounds() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    v.zoom(-1.0, Point::ZERO);
    assert!(v.begin_pan(Point::new(10.0, 10.0)));
    assert_eq!(v.state().pan_anchor(), Point::new(10.0, 10.0));

    v.continue_pan(Point::new(5010.0, -4990.0));
    assert_eq!(v.state().pan(), Point::new(5000.0, -5000.0));

    v.end_pan();
    v.end_pan();
    assert!(!v.state().is_panning());
    v.continue_pan(Point::new(0.0, 0.0));
    assert_eq!(v.state().pan(), Point::new(5000.0, -5000.0));
}

#[test]
fn test_reset_zoom_is_idempotent() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    v.zoom(-1.0, Point::new(20.0, 20.0));
    v.zoom(-1.0, Point::new(20.0, 20.0));

    v.reset_zoom();
    let once = v.state().clone();
    v.reset_zoom();

    assert_eq!(v.state(), &once);
    assert_eq!(once.scale(), 1.0);
    assert_eq!(once.pan(), Point::ZERO);
    assert!(once.is_open());
}

// ---------------------------------------------------------------------------
// event dispatch
// ---------------------------------------------------------------------------

#[test]
fn test_dismissal_triggers_close_viewer() {
    for event in [
        ViewerEvent::CloseButton,
        ViewerEvent::Backdrop,
        ViewerEvent::Key(Key::Escape),
    ] {
        let mut v = viewer();
        v.open(image_ref("images/a.png"));
        v.handle(event);
        assert!(!v.state().is_open(), "{event:?} should close the viewer");
    }
}

#[test]
fn test_click_on_image_and_other_keys_keep_viewer_open() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    v.handle(ViewerEvent::ImageClick);
    v.handle(ViewerEvent::Key(Key::Other));
    assert!(v.state().is_open());
}

#[test]
fn test_events_drive_zoom_pan_and_reset() {
    let mut v = viewer();
    v.open(image_ref("images/a.png"));
    v.handle(ViewerEvent::Wheel {
        delta: -100.0,
        pointer: Point::ZERO,
    });
    assert_relative_eq!(v.state().scale(), 1.2);

    v.handle(ViewerEvent::PointerDown(Point::new(0.0, 0.0)));
    v.handle(ViewerEvent::PointerMove(Point::new(15.0, 5.0)));
    assert_eq!(v.state().pan(), Point::new(15.0, 5.0));
    v.handle(ViewerEvent::PointerUp);
    assert!(!v.state().is_panning());

    v.handle(ViewerEvent::DoubleClick);
    assert_eq!(v.state().scale(), 1.0);
    assert_eq!(v.state().pan(), Point::ZERO);
}

// ---------------------------------------------------------------------------
// click registration and exemptions
// ---------------------------------------------------------------------------

fn sample_page() -> Page {
    Page::from_root(
        "/index.html",
        PageNode::element(
            "body",
            &[],
            vec![
                PageNode::element(
                    "nav",
                    &["nav-logo"],
                    vec![PageNode::Image(PageImage::new("images/logo.png", "Logo"))],
                ),
                PageNode::Image(PageImage::new("images/eye.png", "Eye diagram")),
                PageNode::Image(PageImage::new(
                    "https://badges.example/count.svg",
                    "Site visitors",
                )),
                PageNode::element(
                    "div",
                    &["visitor-counter"],
                    vec![PageNode::Image(PageImage::new("images/badge.png", "Badge"))],
                ),
                PageNode::Image(PageImage::new("", "no source")),
            ],
        ),
    )
}

#[test]
fn test_attach_skips_exempt_and_sourceless_images() {
    let page = sample_page();
    let mut v = viewer();
    let attached = v.attach(page.root());

    assert_eq!(attached, 1);
    assert_eq!(v.clickable_count(), 1);
    let eye = page.images()[1].id;
    assert!(v.is_clickable(eye));
}

#[test]
fn test_click_on_alt_text_exempt_image_never_opens() {
    let page = sample_page();
    let mut v = viewer();
    v.attach(page.root());

    let counter = page
        .images()
        .into_iter()
        .find(|img| img.alt == "Site visitors")
        .unwrap()
        .id;
    assert!(!v.click(counter));
    assert!(!v.state().is_open());
    assert_eq!(v.scroll_lock().suppressed, 0);
}

#[test]
fn test_click_on_src_exempt_counter_never_opens() {
    let page = Page::from_root(
        "/index.html",
        PageNode::element(
            "body",
            &[],
            vec![PageNode::element(
                "div",
                &["stats"],
                vec![PageNode::Image(PageImage::new(
                    "https://visitor-badge.example/x.svg",
                    "Stats",
                ))],
            )],
        ),
    );
    let badge = page.images()[0];
    assert_eq!(
        ExemptionRules::default().exemption(badge),
        Some(Exemption::VisitorCounter)
    );

    let mut v = viewer();
    assert_eq!(v.attach(page.root()), 0);
    assert!(!v.is_clickable(badge.id));
    assert!(!v.click(badge.id));
    assert!(!v.state().is_open());
    assert_eq!(v.scroll_lock().suppressed, 0);
}

#[test]
fn test_image_with_own_logo_class_is_exempt() {
    let page = Page::from_root(
        "/index.html",
        PageNode::element(
            "body",
            &[],
            vec![PageNode::Image(
                PageImage::new("images/brand.png", "Brand").with_classes(&["logo"]),
            )],
        ),
    );
    let logo = page.images()[0];
    assert!(logo.ancestor_classes.is_empty());
    assert_eq!(
        ExemptionRules::default().exemption(logo),
        Some(Exemption::Logo)
    );

    let mut v = viewer();
    assert_eq!(v.attach(page.root()), 0);
    assert!(!v.click(logo.id));
    assert!(!v.state().is_open());
}

#[test]
fn test_click_on_registered_image_opens_with_caption_fallback() {
    let page = sample_page();
    let mut v = viewer();
    v.attach(page.root());

    let eye = page.images()[1].id;
    assert!(v.click(eye));
    let shown = v.state().image().unwrap();
    assert_eq!(shown.source_url(), "images/eye.png");
    assert_eq!(shown.caption_text(), "Eye diagram");
}

#[test]
fn test_inserted_subtree_becomes_clickable() {
    let mut page = sample_page();
    let mut v = viewer();
    v.attach(page.root());

    let subtree = PageNode::element(
        "section",
        &["gallery"],
        vec![PageNode::element(
            "figure",
            &[],
            vec![
                PageNode::Image(PageImage::new("images/late1.png", "Late one")),
                PageNode::Image(PageImage::new("images/late2.png", "Late two")),
            ],
        )],
    );
    let ids = page.insert(subtree, &mut v);

    assert_eq!(ids.len(), 2);
    assert!(ids.iter().all(|id| v.is_clickable(*id)));
    assert_eq!(v.clickable_count(), 3);
    assert!(v.click(ids[1]));
    assert_eq!(v.state().image().unwrap().source_url(), "images/late2.png");
}

#[test]
fn test_inserted_exempt_image_stays_unclickable() {
    let mut page = sample_page();
    let mut v = ViewerController::default();
    v.attach(page.root());

    let ids = page.insert(
        PageNode::element(
            "footer",
            &["visitor-counter"],
            vec![PageNode::Image(PageImage::new("images/hits.png", "Hits"))],
        ),
        &mut v,
    );
    assert!(!v.is_clickable(ids[0]));
}

#[test]
fn test_controller_is_a_subtree_observer() {
    let mut v = viewer();
    let node = PageNode::Image(PageImage::new("images/solo.png", "Solo"));
    let mut page = Page::new("/index.html");
    let ids = page.insert(node, &mut v);

    // Notifying again with the same subtree does not duplicate registrations.
    let inserted = page.root().clone();
    v.subtree_inserted(&inserted);
    assert_eq!(v.clickable_count(), 1);
    assert!(v.is_clickable(ids[0]));
}
