use core_types::Rectangle;
use edit_core::{EditConfig, EditCtx, KeyCode, MemoryClipboard, Modifiers, SelectionMode};
use edit_test_support::{HostEvent, RecordingHost, editor};

#[test]
fn focus_creates_and_shows_the_caret() {
    let mut host = RecordingHost::new();
    let mut e = editor("abc", EditConfig::default());
    e.set_selection(SelectionMode::Leading(1), false);

    e.on_set_focus(&mut host);
    assert_eq!(
        host.events,
        vec![
            HostEvent::CreateCaret {
                width: 2.0,
                height: 12.0
            },
            HostEvent::SetCaretPos { x: 4.0, y: 0.0 },
            HostEvent::Invalidate,
            HostEvent::ShowCaret,
        ]
    );

    host.clear();
    e.on_kill_focus(&mut host);
    assert_eq!(host.events, vec![HostEvent::HideCaret]);
    assert!(!e.is_focused());
}

#[test]
fn unfocused_editor_does_not_touch_the_caret() {
    let mut host = RecordingHost::new();
    let mut clip = MemoryClipboard::new();
    let mut e = editor("abc", EditConfig::default());
    e.on_key(&mut EditCtx::new(&mut host, &mut clip), KeyCode::Right, Modifiers::NONE)
        .unwrap();
    e.update(&mut host);
    assert!(host.events.is_empty());
    assert_eq!(e.caret().absolute(), 1);
}

#[test]
fn navigation_moves_the_system_caret() {
    let mut host = RecordingHost::new();
    let mut clip = MemoryClipboard::new();
    let mut e = editor("abc", EditConfig::default());
    e.on_set_focus(&mut host);

    e.on_key(&mut EditCtx::new(&mut host, &mut clip), KeyCode::End, Modifiers::NONE)
        .unwrap();
    assert_eq!(host.last_caret_pos(), Some((14.0, 0.0)));

    host.clear();
    let moved = e
        .on_key(&mut EditCtx::new(&mut host, &mut clip), KeyCode::End, Modifiers::NONE)
        .unwrap();
    assert!(!moved);
    assert!(host.events.is_empty());
}

#[test]
fn render_includes_caret_only_with_focus() {
    let mut host = RecordingHost::new();
    let mut e = editor("abc", EditConfig::default());
    assert!(e.render(0.0, 0.0).caret.is_none());

    e.on_set_focus(&mut host);
    let frame = e.render(100.0, 50.0);
    assert_eq!(frame.caret, Some(Rectangle::new(99.0, 50.0, 2.0, 12.0)));
    assert_eq!(frame.lines.len(), 1);
    assert_eq!(frame.lines[0].text, "abc");
    assert_eq!(frame.selection_color, EditConfig::default().selection_color);
}
