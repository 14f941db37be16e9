//! Integration tests for SimEngine
//!
//! These tests drive the engine the way a host does (timestamps, pointer
//! events, keys) and verify:
//! - Window z-order, hit testing and drag capture
//! - Toast lifetimes and stacking across channels
//! - Progress clamping, milestones and completion
//! - Phone call reveal and the modal interrupt blocking windows

use menusim_desktop::{
    CallPhase, Caller, Channel, ContentPools, DrawItem, HostSignal, InputOwner, Interval, Key,
    OverlayState, ProgressEngine, ScriptLine, SimConfig, SimEngine, Size, Speaker, ToastPayload,
    Vec2, WindowConfig, WindowContent,
};

/// Config with every random timer pushed far into the future
fn quiet_config() -> SimConfig {
    let far = Interval::new(1.0e12, 1.0e12);
    let mut config = SimConfig {
        seed: Some(1234),
        auto_rate_per_sec: 0.0,
        modal_interval_ms: far,
        call_interval_ms: far,
        ..SimConfig::default()
    };
    config.activity.interval_ms = far;
    config.mail.spawn_interval_ms = Some(far);
    config.messages.spawn_interval_ms = Some(far);
    config.slack.spawn_interval_ms = Some(far);
    config
}

fn quiet_engine() -> SimEngine {
    SimEngine::new(quiet_config(), ContentPools::builtin(), 0.0)
}

fn window_at(engine: &mut SimEngine, title: &str, x: f32, y: f32) -> u64 {
    engine.create_window(
        WindowConfig::new(title, Size::new(400.0, 300.0), WindowContent::default())
            .at(Vec2::new(x, y)),
    )
}

// =============================================================================
// Window Stack Tests
// =============================================================================

#[test]
fn test_click_promotes_bottom_window() {
    let mut engine = quiet_engine();
    let a = window_at(&mut engine, "A", 100.0, 100.0);
    let b = window_at(&mut engine, "B", 150.0, 150.0);
    let c = window_at(&mut engine, "C", 200.0, 200.0);

    let z: Vec<i64> = [a, b, c]
        .iter()
        .map(|id| engine.windows.get(*id).unwrap().z_index)
        .collect();
    assert_eq!(z, vec![0, 1, 2]);

    // Content of A, outside B and C
    let result = engine.pointer_down(120.0, 200.0);
    assert_eq!(result.owner(), Some(InputOwner::Window));
    assert_eq!(engine.windows.get(a).unwrap().z_index, 3);

    // A now wins everywhere the three overlap
    assert_eq!(engine.windows.hit_test(Vec2::new(300.0, 300.0)), Some(a));
    assert_eq!(engine.draw_list().window_ids(), vec![b, c, a]);
}

#[test]
fn test_drag_captures_until_release() {
    let mut engine = quiet_engine();
    let a = window_at(&mut engine, "A", 100.0, 100.0);
    let b = window_at(&mut engine, "B", 600.0, 100.0);

    engine.pointer_down(200.0, 120.0);
    // Pointer passes over B; A keeps the capture
    engine.pointer_move(700.0, 200.0);
    engine.pointer_move(800.0, 220.0);
    engine.pointer_up(800.0, 220.0);

    let window = engine.windows.get(a).unwrap();
    assert!((window.position.x - 700.0).abs() < 0.001);
    assert!((window.position.y - 200.0).abs() < 0.001);
    let other = engine.windows.get(b).unwrap();
    assert!((other.position.x - 600.0).abs() < 0.001);
    assert!(engine.windows.dragging().is_none());
}

#[test]
fn test_tab_cycles_in_creation_order() {
    let mut engine = quiet_engine();
    let a = window_at(&mut engine, "A", 0.0, 0.0);
    let b = window_at(&mut engine, "B", 50.0, 50.0);
    let c = window_at(&mut engine, "C", 100.0, 100.0);

    engine.handle_key(Key::Tab);
    assert_eq!(engine.windows.top(), Some(a));
    engine.handle_key(Key::Tab);
    assert_eq!(engine.windows.top(), Some(b));
    engine.handle_key(Key::Tab);
    assert_eq!(engine.windows.top(), Some(c));
    assert!(!engine.handle_key(Key::Other).is_handled());
}

// =============================================================================
// Overlay Tests
// =============================================================================

#[test]
fn test_toast_lifecycle_timing() {
    let mut engine = quiet_engine();
    let payload = ToastPayload::new(Channel::Messages, "Mom", "Call me back");
    let id = engine.notifications.push(payload, 0.0).unwrap();
    let state = |engine: &SimEngine| {
        engine
            .notifications
            .queue(Channel::Messages)
            .and_then(|q| q.get(id))
            .map(|e| e.state())
    };

    engine.tick(4900.0);
    assert_eq!(state(&engine), Some(OverlayState::Visible));
    engine.tick(5200.0);
    assert_eq!(state(&engine), Some(OverlayState::Dismissing));
    engine.tick(5500.0);
    assert_eq!(state(&engine), None);
    assert!(engine.notifications.is_empty());
}

#[test]
fn test_channels_stack_down_the_screen() {
    let mut engine = quiet_engine();
    engine.notifications.push(ToastPayload::new(Channel::Mail, "a", "1"), 0.0);
    engine.notifications.push(ToastPayload::new(Channel::Slack, "b", "2"), 0.0);
    engine.tick(16.0);

    let rects: Vec<_> = engine
        .draw_list()
        .iter()
        .filter_map(|item| match item {
            DrawItem::Toast { channel, rect, .. } => Some((*channel, *rect)),
            _ => None,
        })
        .collect();
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[0].0, Channel::Mail);
    assert!((rects[0].1.x - 1550.0).abs() < 0.001);
    assert!((rects[0].1.y - 70.0).abs() < 0.001);
    // Slack sits below the one mail slot (80 + 20)
    assert!((rects[1].1.y - 170.0).abs() < 0.001);
}

#[test]
fn test_clicked_mail_toast_opens_detail() {
    let mut engine = quiet_engine();
    engine.spawn_default_desktop();
    let mail = ContentPools::builtin().congratulations[0].clone();
    let mail_id = engine.deliver_mail(mail.clone());
    engine.notifications.push(
        ToastPayload::new(Channel::Mail, mail.sender.clone(), mail.subject.clone())
            .with_mail(mail.clone())
            .with_mail_id(mail_id),
        0.0,
    );

    let result = engine.pointer_down(1600.0, 100.0);
    assert_eq!(result.owner(), Some(InputOwner::Toast));
    let signals = engine.tick(16.0);
    let opened = signals.iter().find_map(|s| match s {
        HostSignal::DetailOpened { window_id } => Some(*window_id),
        _ => None,
    });
    let detail = engine.windows.get(opened.unwrap()).unwrap();
    assert_eq!(detail.title, mail.subject);
    assert_eq!(detail.parent, engine.mailbox_window());

    // Same effect on the inbox as clicking the row
    let entry = engine.mailbox().unwrap().get(mail_id.unwrap()).unwrap();
    assert!(entry.read && !entry.blinking);
}

#[test]
fn test_mail_toast_opens_its_own_copy_of_a_repeated_mail() {
    let mut engine = quiet_engine();
    engine.spawn_default_desktop();
    let mail = ContentPools::builtin().congratulations[0].clone();
    let older = engine.deliver_mail(mail.clone());
    engine.notifications.push(
        ToastPayload::new(Channel::Mail, mail.sender.clone(), mail.subject.clone())
            .with_mail(mail.clone())
            .with_mail_id(older),
        0.0,
    );
    let newer = engine.deliver_mail(mail.clone());

    engine.pointer_down(1600.0, 100.0);
    let detail = engine
        .take_signals()
        .iter()
        .find_map(|s| match s {
            HostSignal::DetailOpened { window_id } => Some(*window_id),
            _ => None,
        })
        .unwrap();
    match &engine.windows.get(detail).unwrap().content {
        WindowContent::MailDetail(opened) => assert_eq!(Some(opened.mail_id), older),
        other => panic!("not a detail window: {other:?}"),
    }

    let mailbox = engine.mailbox().unwrap();
    assert!(mailbox.get(older.unwrap()).unwrap().read);
    let untouched = mailbox.get(newer.unwrap()).unwrap();
    assert!(!untouched.read && untouched.blinking);
}

#[test]
fn test_mail_toast_without_inbox_entry_opens_nothing() {
    let mut engine = quiet_engine();
    engine.spawn_default_desktop();
    let mail = ContentPools::builtin().congratulations[0].clone();
    engine.notifications.push(
        ToastPayload::new(Channel::Mail, mail.sender.clone(), mail.subject.clone()).with_mail(mail),
        0.0,
    );
    let before = engine.windows.count();

    let result = engine.pointer_down(1600.0, 100.0);
    assert_eq!(result.owner(), Some(InputOwner::Toast));
    assert!(engine.take_signals().is_empty());
    assert_eq!(engine.windows.count(), before);
}

#[test]
fn test_overlay_ids_unique_across_layers() {
    let mut config = quiet_config();
    config.activity.interval_ms = Interval::new(1000.0, 1000.0);
    let mut engine = SimEngine::new(config, ContentPools::builtin(), 0.0);
    engine.spawn_default_desktop();
    engine.notifications.push(ToastPayload::new(Channel::Messages, "Mom", "hi"), 0.0);
    engine.notifications.push(ToastPayload::new(Channel::Slack, "ops", "deploy?"), 0.0);
    engine.raise_progress_to(30.0);
    engine.tick(1000.0);

    let mut ids: Vec<u64> = engine
        .draw_list()
        .iter()
        .filter_map(|item| match item {
            DrawItem::Toast { id, .. } | DrawItem::Banner { id, .. } | DrawItem::ProgressPopup { id, .. } => Some(*id),
            _ => None,
        })
        .collect();
    // Two toasts, the coworker toast, a popup and the 25% banner
    assert_eq!(ids.len(), 5);
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

// =============================================================================
// Progress Tests
// =============================================================================

#[test]
fn test_progress_clamps_and_completes_once() {
    let mut progress = ProgressEngine::new(0.05, 0.0).with_progress(99.96);
    progress.increase(0.1);
    assert_eq!(progress.progress(), 100.0);
    assert!(progress.take_completion());
    progress.increase(1.0);
    progress.tick(10.0);
    assert!(!progress.take_completion());
    assert_eq!(progress.progress(), 100.0);
}

#[test]
fn test_engine_completion_signal_once() {
    let mut engine = quiet_engine();
    engine.raise_progress_to(99.96);
    engine.progress.increase(0.1);

    let signals = engine.tick(16.0);
    let completions = signals
        .iter()
        .filter(|s| **s == HostSignal::ProgressComplete)
        .count();
    assert_eq!(completions, 1);
    assert!(engine.tick(32.0).is_empty());
    assert!(engine.is_complete());
}

#[test]
fn test_auto_progress_crosses_first_milestone() {
    let mut config = quiet_config();
    config.auto_rate_per_sec = 1.0;
    let mut engine = SimEngine::new(config, ContentPools::builtin(), 0.0);

    let mut crossed = Vec::new();
    for second in 1..=30 {
        for signal in engine.tick(second as f64 * 1000.0) {
            if let HostSignal::MilestoneCrossed { threshold } = signal {
                crossed.push(threshold);
            }
        }
    }
    assert_eq!(crossed, vec![25]);
    assert!((engine.progress.progress() - 30.0).abs() < 0.001);
}

// =============================================================================
// Modal and Call Tests
// =============================================================================

#[test]
fn test_call_ends_after_full_reveal() {
    let mut engine = quiet_engine();
    let a = window_at(&mut engine, "A", 100.0, 100.0);
    engine.tick(1000.0);

    engine.call.start(
        Caller { name: "Mama Velli".to_string(), number: "555-0100".to_string() },
        vec![
            ScriptLine::new(Speaker::Caller, "Hi"),
            ScriptLine::new(Speaker::Player, "Bye"),
        ],
    );
    engine.tick(1016.0);
    assert!(engine.windows.get(a).unwrap().blocked);

    let answer = engine.call.answer_button_rect();
    let result = engine.pointer_down(answer.x + 5.0, answer.y + 5.0);
    assert_eq!(result.owner(), Some(InputOwner::Call));
    assert_eq!(engine.call.phase(), CallPhase::Answered);

    // Hi (100 ms) + pause (800 ms) + Bye (150 ms) + pause (800 ms)
    engine.tick(1016.0 + 1000.0);
    assert_eq!(engine.call.phase(), CallPhase::Answered);
    assert_eq!(engine.call.current_line(), 1);

    let signals = engine.tick(1016.0 + 1900.0);
    assert_eq!(engine.call.phase(), CallPhase::Ended);
    assert!(signals.contains(&HostSignal::CallEnded));

    engine.tick(1016.0 + 1916.0);
    assert_eq!(engine.call.phase(), CallPhase::Idle);
    assert!(!engine.windows.get(a).unwrap().blocked);
}

#[test]
fn test_answered_call_leaves_toasts_clickable() {
    let mut engine = quiet_engine();
    engine.call.start(
        Caller { name: "x".to_string(), number: "1".to_string() },
        vec![ScriptLine::new(Speaker::Caller, "A long line that takes a while to type")],
    );
    engine.call.answer(0.0);
    engine.notifications.push(ToastPayload::new(Channel::Messages, "Mom", "hi"), 0.0);

    let result = engine.pointer_down(1600.0, 90.0);
    assert_eq!(result.owner(), Some(InputOwner::Toast));
}

#[test]
fn test_modal_owns_all_input_until_closed() {
    let mut config = quiet_config();
    config.modal_interval_ms = Interval::new(2000.0, 2000.0);
    let mut engine = SimEngine::new(config, ContentPools::builtin(), 0.0);
    let a = window_at(&mut engine, "A", 100.0, 100.0);

    let signals = engine.tick(2000.0);
    assert_eq!(signals, vec![HostSignal::ModalOpened]);
    assert!(engine.is_input_blocked());

    // Title bar click is swallowed by the modal
    let result = engine.pointer_down(200.0, 110.0);
    assert_eq!(result.owner(), Some(InputOwner::Modal));
    assert!(!engine.input.is_dragging());
    assert!(!engine.handle_key(Key::Tab).is_handled());

    let close = engine.modal.close_button_rect();
    engine.pointer_down(close.x + 2.0, close.y + 2.0);
    assert!(!engine.is_input_blocked());
    assert!(!engine.windows.get(a).unwrap().blocked);
    assert_eq!(engine.tick(2016.0), vec![HostSignal::ModalClosed]);
    assert!(engine.modal.next_trigger_at() >= 4000.0);

    let last = engine.draw_list();
    assert!(!last.iter().any(|item| matches!(item, DrawItem::Modal { .. })));
}
