#![cfg(feature = "test-utils")]
mod support;

use davidmodal_core::testing::NodeId;
use davidmodal_core::{Callback, Dom};
use std::time::Duration;
use support::*;

/// A relocated modal, ready to be shown
fn relocated(page: &Page) -> (NodeId, NodeId) {
    let panel = page.dom.append_with_classes(page.body(), "div", &["davidmodal"]);
    page.controller.init();
    let container = page.controller.find_container(&panel).unwrap();
    (container, panel)
}

/// Callback recording the container's display and attachment at the moment it runs
fn recording_callback(page: &Page, log: &EventLog, container: NodeId) -> Callback {
    let dom = page.dom.clone();
    let log = log.clone();
    Box::new(move || {
        log.push(format!(
            "callback display={:?} attached={}",
            dom.inline_style(container, "display"),
            dom.is_attached(container)
        ));
    })
}

#[test]
fn test_show_swaps_markers_and_forces_display() {
    let page = Page::new();
    let (container, panel) = relocated(&page);
    page.dom.add_class(&container, HIDDEN).unwrap();

    assert_eq!(page.controller.show(&panel), Some(container));

    assert!(page.has(container, SHOWN));
    assert!(!page.has(container, HIDDEN));
    assert_eq!(page.display(container).as_deref(), Some("block"));
    assert_eq!(page.clock.pending(), 0, "show never waits");
    assert_eq!(page.controller.shown_container(), Some(container));
}

#[test]
fn test_show_on_element_outside_containers_is_a_noop() {
    let page = Page::new();
    let stray = page.dom.append(page.body(), "p");
    let mutations = page.dom.mutation_count();

    assert_eq!(page.controller.show(&stray), None);
    assert_eq!(page.dom.mutation_count(), mutations);
}

#[test]
fn test_hide_waits_for_animation_then_calls_back_once() {
    let page = Page::new().with_fade_ms(500);
    let (container, panel) = relocated(&page);
    let log = EventLog::default();

    page.controller.show(&panel);
    let hidden = page
        .controller
        .hide(Some(&panel), Some(recording_callback(&page, &log, container)));
    assert_eq!(hidden, Some(container));

    // Markers change immediately, display only after the fade
    assert!(page.has(container, HIDDEN));
    assert!(!page.has(container, SHOWN));
    assert_eq!(page.display(container).as_deref(), Some("block"));
    assert_eq!(page.clock.pending_delays(), vec![Duration::from_millis(500)]);

    assert_eq!(page.advance_ms(499), 0);
    assert!(log.events().is_empty());

    assert_eq!(page.advance_ms(1), 1);
    assert_eq!(page.display(container).as_deref(), Some("none"));
    assert_eq!(
        log.events(),
        vec![r#"callback display=Some("none") attached=true"#]
    );

    page.clock.run_until_idle();
    assert_eq!(log.events().len(), 1);
}

#[test]
fn test_hide_without_callback() {
    let page = Page::new().with_fade_ms(50);
    let (container, panel) = relocated(&page);
    page.controller.show(&panel);

    page.controller.hide(Some(&container), None);
    page.advance_ms(50);

    assert_eq!(page.display(container).as_deref(), Some("none"));
    assert!(page.dom.is_attached(container));
}

#[test]
fn test_hide_without_target_uses_shown_container() {
    let page = Page::new();
    let (container, panel) = relocated(&page);
    page.controller.show(&panel);

    assert_eq!(page.controller.hide(None, None), Some(container));
    page.advance_ms(0);
    assert_eq!(page.display(container).as_deref(), Some("none"));
}

#[test]
fn test_hide_with_unrelated_target_falls_back_to_shown_container() {
    let page = Page::new();
    let (container, panel) = relocated(&page);
    let stray = page.dom.append(page.body(), "span");
    page.controller.show(&panel);

    assert_eq!(page.controller.hide(Some(&stray), None), Some(container));
}

#[test]
fn test_no_argument_operations_without_shown_modal_do_nothing() {
    let page = Page::new();
    let (container, _panel) = relocated(&page);
    let log = EventLog::default();
    let mutations = page.dom.mutation_count();

    assert_eq!(page.controller.hide(None, Some(log.callback("hide"))), None);
    assert_eq!(page.controller.remove(None), None);
    assert_eq!(
        page.controller
            .hide_and_remove(None, Some(log.callback("hide_and_remove"))),
        None
    );

    page.clock.run_until_idle();
    assert_eq!(page.dom.mutation_count(), mutations);
    assert!(log.events().is_empty());
    assert!(page.dom.is_attached(container));
}

#[test]
fn test_remove_detaches_immediately() {
    let page = Page::new().with_fade_ms(1000);
    let (container, panel) = relocated(&page);
    page.controller.show(&panel);

    assert_eq!(page.controller.remove(Some(&panel)), Some(container));
    assert!(!page.dom.is_attached(container));
    assert_eq!(page.clock.pending(), 0);
}

#[test]
fn test_remove_without_target_removes_shown_container() {
    let page = Page::new();
    let (container, panel) = relocated(&page);
    page.controller.show(&panel);

    assert_eq!(page.controller.remove(None), Some(container));
    assert!(!page.dom.is_attached(container));
    assert_eq!(page.controller.shown_container(), None);
}

#[test]
fn test_hide_and_remove_calls_back_before_detaching() {
    let page = Page::new().with_fade_ms(300);
    let (container, panel) = relocated(&page);
    let log = EventLog::default();
    page.controller.show(&panel);

    page.controller
        .hide_and_remove(Some(&panel), Some(recording_callback(&page, &log, container)));
    assert!(page.dom.is_attached(container));

    page.advance_ms(300);
    assert_eq!(
        log.events(),
        vec![r#"callback display=Some("block") attached=true"#]
    );
    assert!(!page.dom.is_attached(container));
}

#[test]
fn test_hide_and_remove_without_callback() {
    let page = Page::new().with_fade_ms(10);
    let (container, panel) = relocated(&page);
    page.controller.show(&panel);

    page.controller.hide_and_remove(None, None);
    assert!(page.dom.is_attached(container));
    page.advance_ms(10);
    assert!(!page.dom.is_attached(container));
}

#[test]
fn test_reshow_during_fade_abandons_pending_hide() {
    let page = Page::new().with_fade_ms(400);
    let (container, panel) = relocated(&page);
    let log = EventLog::default();
    page.controller.show(&panel);

    page.controller.hide(Some(&panel), Some(log.callback("hidden")));
    page.advance_ms(200);
    page.controller.show(&panel);
    page.advance_ms(200);

    assert_eq!(page.display(container).as_deref(), Some("block"));
    assert!(page.has(container, SHOWN));
    assert!(log.events().is_empty());
}

#[test]
fn test_reshow_during_fade_keeps_embedded_modal_attached() {
    let page = Page::new().with_fade_ms(400);
    let link = page.dom.append_with_classes(page.body(), "a", &["davidmodal"]);
    page.dom.set_attribute(&link, "href", "/doc.html").unwrap();
    page.controller.init();
    let container = page.controller.open_embedded(&link).unwrap();
    let log = EventLog::default();

    page.controller
        .hide_and_remove(Some(&container), Some(log.callback("removed")));
    page.controller.show(&container);
    page.clock.run_until_idle();

    assert!(page.dom.is_attached(container));
    assert!(log.events().is_empty());
}

#[test]
fn test_hide_after_reshow_still_completes() {
    let page = Page::new().with_fade_ms(100);
    let (container, panel) = relocated(&page);
    let log = EventLog::default();

    page.controller.show(&panel);
    page.controller.hide(Some(&panel), Some(log.callback("first")));
    page.controller.show(&panel);
    page.controller.hide(Some(&panel), Some(log.callback("second")));
    page.clock.run_until_idle();

    assert_eq!(log.events(), vec!["second"]);
    assert_eq!(page.display(container).as_deref(), Some("none"));
}

#[test]
fn test_consecutive_hides_both_complete() {
    let page = Page::new().with_fade_ms(100);
    let (_container, panel) = relocated(&page);
    let log = EventLog::default();

    page.controller.show(&panel);
    page.controller.hide(Some(&panel), Some(log.callback("first")));
    page.advance_ms(50);
    page.controller.hide(Some(&panel), Some(log.callback("second")));
    page.clock.run_until_idle();

    assert_eq!(log.events(), vec!["first", "second"]);
}

#[test]
fn test_duration_is_read_from_computed_style_list() {
    let page = Page::new();
    page.dom
        .add_rule(CONTAINER, "animation-duration", "0.25s, 1.5s");
    let (container, panel) = relocated(&page);

    page.controller.show(&panel);
    assert_eq!(
        page.controller.animation_duration(&container),
        Duration::from_millis(1500)
    );
    page.controller.hide(Some(&container), None);
    assert_eq!(page.clock.pending_delays(), vec![Duration::from_millis(1500)]);
}

#[test]
fn test_enormous_duration_waits_forever_instead_of_failing() {
    let page = Page::new();
    page.dom.add_rule(CONTAINER, "animation-duration", "1e30s");
    let (container, panel) = relocated(&page);
    let log = EventLog::default();

    page.controller.show(&panel);
    assert_eq!(
        page.controller.hide(Some(&panel), Some(log.callback("hidden"))),
        Some(container)
    );

    assert!(page.has(container, HIDDEN));
    assert!(!page.has(container, SHOWN));
    assert_eq!(page.clock.pending_delays(), vec![Duration::MAX]);
    page.advance_ms(60_000);
    assert!(log.events().is_empty());
    assert_eq!(page.display(container).as_deref(), Some("block"));
}

#[test]
fn test_show_counter_wraps_and_still_abandons_pending_hide() {
    let page = Page::new().with_fade_ms(100);
    let (container, panel) = relocated(&page);
    let log = EventLog::default();
    page.dom
        .set_attribute(&container, "data-davidmodal-generation", &u64::MAX.to_string())
        .unwrap();

    page.controller.hide(Some(&panel), Some(log.callback("hidden")));
    page.controller.show(&panel);
    page.clock.run_until_idle();

    assert_eq!(
        page.dom.attribute(&container, "data-davidmodal-generation").as_deref(),
        Some("0")
    );
    assert!(log.events().is_empty());
    assert_eq!(page.display(container).as_deref(), Some("block"));
}

#[test]
fn test_hidden_state_rule_drives_the_wait() {
    let page = Page::new();
    page.dom.add_rule(HIDDEN, "animation-duration", "700ms");
    let (_container, panel) = relocated(&page);

    page.controller.show(&panel);
    page.controller.hide(Some(&panel), None);
    assert_eq!(page.clock.pending_delays(), vec![Duration::from_millis(700)]);
}

#[test]
fn test_close_control_hides_relocated_modal() {
    let page = Page::new().with_fade_ms(250);
    let (container, panel) = relocated(&page);
    page.controller.show(&panel);

    page.dom.click(page.close_control(container));
    assert!(page.has(container, HIDDEN));
    page.advance_ms(250);

    assert_eq!(page.display(container).as_deref(), Some("none"));
    assert!(page.dom.is_attached(container));

    // And it can be shown again
    page.controller.show(&panel);
    assert_eq!(page.display(container).as_deref(), Some("block"));
}

#[test]
fn test_pending_hide_is_dropped_with_the_controller() {
    let page = Page::new().with_fade_ms(100);
    let (container, panel) = relocated(&page);
    page.controller.show(&panel);
    page.controller.hide(Some(&panel), None);

    let Page { dom, clock, controller } = page;
    drop(controller);
    clock.run_until_idle();

    assert_eq!(dom.inline_style(container, "display").as_deref(), Some("block"));
}
