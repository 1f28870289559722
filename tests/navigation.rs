//! Navigator transitions as seen through observer events

mod common;

use codesteps::observer::NoopObserver;
use codesteps::syntax::PlainTokenizer;
use codesteps::{CodeSteps, CodeStepsError, HostOptions, RecordingObserver, StepEvent};
use common::{active_coords, test_host};

#[test]
fn test_construction_activates_first_step() {
    let mut rec = RecordingObserver::new();
    let host = CodeSteps::new(
        HostOptions::new("ab\ncd", "plain").with_steps("l2:Second line"),
        &mut PlainTokenizer,
        &mut rec,
    )
    .unwrap();

    assert_eq!(host.current(), Some(0));
    assert_eq!(
        rec.events,
        vec![StepEvent::Activated {
            index: 0,
            letters: host.steps()[0].letters.iter().copied().collect(),
            description: Some("Second line".to_string()),
            is_first: true,
            is_last: true,
        }]
    );
}

#[test]
fn test_diagnostics_are_reported_before_activation() {
    let mut rec = RecordingObserver::new();
    CodeSteps::new(
        HostOptions::new("ab", "plain").with_steps("lx:bad;l1:ok"),
        &mut PlainTokenizer,
        &mut rec,
    )
    .unwrap();
    assert!(matches!(rec.events[0], StepEvent::Diagnostic(_)));
    assert!(matches!(rec.events[1], StepEvent::Activated { .. }));
}

#[test]
fn test_go_to_same_step_twice() {
    let mut host = test_host("ab\ncd\nef", "l1:a;l2:b;l3:c");
    host.go_to(2, &mut NoopObserver).unwrap();
    host.go_to(2, &mut NoopObserver).unwrap();
    assert_eq!(host.current(), Some(2));
    assert_eq!(active_coords(&host), vec![(2, 0), (2, 1)]);
    assert_eq!(host.navigator().visible_description(), Some(2));
}

#[test]
fn test_go_to_out_of_range_is_surfaced() {
    let mut host = test_host("ab", "l1:a;l1c1:b");
    let err = host.go_to(2, &mut NoopObserver).unwrap_err();
    assert_eq!(err, CodeStepsError::IndexOutOfRange { index: 2, count: 2 });
    assert_eq!(host.current(), Some(0));
}

#[test]
fn test_deactivation_only_touches_previous_step() {
    let mut host = test_host("abcdef", "l1c1-l1c4:left;l1c3-l1c6:right");
    let mut rec = RecordingObserver::new();
    host.next(&mut rec);

    assert_eq!(
        active_coords(&host),
        vec![(0, 2), (0, 3), (0, 4), (0, 5)]
    );
    assert_eq!(rec.events[0], StepEvent::Deactivated { index: 0 });
    assert!(matches!(
        rec.events[1],
        StepEvent::Activated {
            index: 1,
            is_first: false,
            is_last: true,
            ..
        }
    ));
}

#[test]
fn test_boundary_flags() {
    let mut host = test_host("a\nb\nc", "l1:;l2:;l3:");
    let nav = host.navigator();
    assert!(!nav.can_previous() && nav.can_next());

    host.next(&mut NoopObserver);
    let nav = host.navigator();
    assert!(nav.can_previous() && nav.can_next());

    host.next(&mut NoopObserver);
    let nav = host.navigator();
    assert!(nav.can_previous() && !nav.can_next());
}

#[test]
fn test_disabled_input_is_dropped_not_queued() {
    let mut host = test_host("a\nb\nc", "l1:;l2:;l3:");
    host.disable(&mut NoopObserver);
    for _ in 0..5 {
        host.next(&mut NoopObserver);
    }
    host.enable(&mut NoopObserver).unwrap();
    assert_eq!(host.current(), Some(0));
    assert_eq!(active_coords(&host), vec![(0, 0)]);
}

#[test]
fn test_single_step_has_both_boundaries() {
    let mut host = test_host("abc", "");
    assert!(!host.next(&mut NoopObserver));
    assert!(!host.previous(&mut NoopObserver));
    assert_eq!(host.current(), Some(0));
    assert_eq!(active_coords(&host).len(), 3);
}
