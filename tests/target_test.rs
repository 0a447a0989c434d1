// Target wiring: width lock, gating, print handling and lifecycle

mod common;

use common::{phrases_config, target, RecordingSurface};
use typeloop_wasm::{AllowWrap, Environment, HostAction, Target, TargetConfig};

fn fast_loop(phrases: &[&str]) -> TargetConfig {
    TargetConfig {
        typing_speed: 70.0,
        looping: true,
        ..phrases_config(phrases)
    }
}

#[test]
fn test_width_lock_uses_widest_rendering() {
    let config = TargetConfig {
        prefix: ">".into(),
        ..phrases_config(&["ab", "abcd", "abc"])
    };
    let target = Target::new("k", config, RecordingSurface::with_char_width(10.0), Environment::default());
    // ">abcd" = 50px, plus 2px margin
    assert_eq!(target.surface().min_width, Some(52.0));
}

#[test]
fn test_width_lock_skipped_when_disabled_or_unmeasurable() {
    let disabled = TargetConfig {
        width_lock: false,
        ..phrases_config(&["abc"])
    };
    let target = Target::new("k", disabled, RecordingSurface::with_char_width(10.0), Environment::default());
    assert_eq!(target.surface().min_width, None);

    let zero_width = Target::new("k", phrases_config(&["abc"]), RecordingSurface::default(), Environment::default());
    assert_eq!(zero_width.surface().min_width, None);
}

#[test]
fn test_wrap_and_cursor_prepared_on_construction() {
    let config = TargetConfig {
        allow_wrap: AllowWrap::Soft,
        ..phrases_config(&["abc"])
    };
    let target = target(config);
    assert_eq!(target.surface().wrap, Some(AllowWrap::Soft));
    assert_eq!(target.surface().cursor, Some(true));
    assert!(target.surface().texts.is_empty());
}

#[test]
fn test_start_waits_for_gate() {
    let mut target = target(fast_loop(&["hello"]));
    target.connect();

    assert_eq!(target.start(0.0), HostAction::Idle);
    assert!(!target.is_running());

    assert_eq!(target.on_viewport(true, 0.0), HostAction::RequestFrame);
    assert!(target.is_running());
    // already running
    assert_eq!(target.start(5.0), HostAction::Idle);
}

#[test]
fn test_hidden_page_pauses_and_resumes_in_place() {
    let mut target = target(fast_loop(&["hello"]));
    target.connect();
    target.on_viewport(true, 0.0);

    assert!(target.frame(16.0));
    assert!(target.frame(32.0));
    assert_eq!(target.surface().last_text(), Some("he"));

    assert_eq!(target.on_page_visibility(false, 40.0), HostAction::CancelFrame);
    assert!(!target.is_running());
    let paused = target.state().clone();

    assert_eq!(target.on_page_visibility(true, 5_000.0), HostAction::RequestFrame);
    assert_eq!(target.state().char_index, paused.char_index);
    assert_eq!(target.state().phrase_index, paused.phrase_index);

    target.frame(5_016.0);
    assert_eq!(target.surface().last_text(), Some("hel"));
}

#[test]
fn test_leaving_viewport_pauses() {
    let mut target = target(fast_loop(&["hello"]));
    target.connect();
    target.on_viewport(true, 0.0);
    target.frame(16.0);

    assert_eq!(target.on_viewport(false, 20.0), HostAction::CancelFrame);
    assert!(!target.frame(36.0));
    assert_eq!(target.state().char_index, 1);
}

#[test]
fn test_reentry_rewinds_when_resume_disabled() {
    let config = TargetConfig {
        resume: false,
        ..fast_loop(&["hello"])
    };
    let mut target = target(config);
    target.connect();
    target.on_viewport(true, 0.0);
    target.frame(16.0);
    target.frame(32.0);
    assert_eq!(target.state().char_index, 2);

    target.on_viewport(false, 40.0);
    assert_eq!(target.state().char_index, 2);

    assert_eq!(target.on_viewport(true, 50.0), HostAction::RequestFrame);
    assert_eq!(target.state().char_index, 0);
    assert_eq!(target.surface().last_text(), Some(""));
}

#[test]
fn test_reentry_keeps_progress_when_resume_enabled() {
    let mut target = target(fast_loop(&["hello"]));
    target.connect();
    target.on_viewport(true, 0.0);
    target.frame(16.0);
    target.frame(32.0);

    target.on_viewport(false, 40.0);
    target.on_viewport(true, 50.0);
    assert_eq!(target.state().char_index, 2);
}

#[test]
fn test_print_shows_full_phrase_without_cursor() {
    let config = TargetConfig {
        prefix: "$ ".into(),
        ..fast_loop(&["whoami"])
    };
    let mut target = target(config);
    target.connect();
    target.on_viewport(true, 0.0);
    target.frame(16.0);

    assert_eq!(target.before_print(), HostAction::CancelFrame);
    assert_eq!(target.surface().last_text(), Some("$ whoami"));
    assert_eq!(target.surface().cursor, Some(false));
    assert_eq!(target.state().char_index, 8);

    // no ticking while the print dialog is up
    assert_eq!(target.start(20.0), HostAction::Idle);

    assert_eq!(target.after_print(30.0), HostAction::RequestFrame);
    assert_eq!(target.surface().cursor, Some(true));
}

#[test]
fn test_reduced_motion_renders_once_and_never_animates() {
    let env = Environment {
        reduced_motion: true,
        ..Environment::default()
    };
    let config = TargetConfig {
        suffix: ".".into(),
        ..phrases_config(&["static", "other"])
    };
    let mut target = Target::new("k", config, RecordingSurface::default(), env);
    assert_eq!(target.surface().cursor, Some(false));

    assert!(target.connect());
    assert_eq!(target.surface().texts, vec!["static."]);
    assert!(!target.wants_signals());

    assert_eq!(target.on_viewport(true, 0.0), HostAction::Idle);
    assert_eq!(target.start(0.0), HostAction::Idle);

    target.before_print();
    assert_eq!(target.after_print(10.0), HostAction::Idle);
    assert_eq!(target.surface().cursor, Some(false));
}

#[test]
fn test_missing_animation_apis_render_first_phrase() {
    let env = Environment {
        can_animate: false,
        ..Environment::default()
    };
    let mut target = Target::new("k", phrases_config(&["first", "second"]), RecordingSurface::default(), env);
    target.connect();

    assert_eq!(target.surface().last_text(), Some("first"));
    assert_eq!(target.surface().cursor, Some(false));
    assert_eq!(target.on_viewport(true, 0.0), HostAction::Idle);
}

#[test]
fn test_inert_target_renders_nothing() {
    let mut target = target(TargetConfig::default());
    target.connect();
    assert_eq!(target.on_viewport(true, 0.0), HostAction::Idle);
    assert!(target.surface().texts.is_empty());
    assert!(!target.is_running());
}

#[test]
fn test_connect_and_disconnect_are_idempotent() {
    let mut target = target(fast_loop(&["hello"]));
    assert!(target.connect());
    assert!(!target.connect());

    target.on_viewport(true, 0.0);
    assert!(target.is_running());

    assert!(target.disconnect());
    assert!(!target.is_running());
    assert!(!target.disconnect());
    assert_eq!(target.start(10.0), HostAction::Idle);
}

#[test]
fn test_snapshot_reports_progress() {
    let mut target = target(fast_loop(&["hello"]));
    target.connect();
    target.on_viewport(true, 0.0);
    target.frame(16.0);

    let snapshot = target.snapshot();
    assert_eq!(snapshot.key, "hero");
    assert!(snapshot.running);
    assert_eq!(snapshot.phrase_index, 0);
    assert_eq!(snapshot.char_index, 1);
    assert!(!snapshot.deleting);
}
