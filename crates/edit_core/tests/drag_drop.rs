use edit_core::{DropEffect, DropPayload, EditConfig, EditError, EditableText, SelectionMode};
use edit_test_support::{HostEvent, RecordingHost, editor};

fn plain(text: &str) -> EditableText {
    editor(
        text,
        EditConfig {
            width: 400.0,
            ..EditConfig::default()
        },
    )
}

fn select(e: &mut EditableText, start: u32, len: u32) {
    e.set_selection(SelectionMode::Leading(start), false);
    e.set_selection(SelectionMode::RightChar(len), true);
}

#[test]
fn press_inside_selection_then_move_starts_a_drag() {
    let mut host = RecordingHost::new();
    let mut e = plain("hello world");
    select(&mut e, 0, 5);

    e.on_lbutton_down(&mut host, 6.0, 1.0, false);
    assert!(host.has_capture());
    assert!(e.on_lbutton_hold(&mut host, 6.0, 1.0, false).is_none());

    let request = e.on_lbutton_hold(&mut host, 20.0, 1.0, false).unwrap();
    assert_eq!(request.source, e.id());
    assert_eq!(request.payload.to_string_lossy().unwrap(), "hello");
    assert!(request.allowed.copy && request.allowed.allow_move);
    assert!(!host.has_capture());
    assert!(e.is_dragging());
}

#[test]
fn click_inside_selection_without_moving_collapses_it() {
    let mut host = RecordingHost::new();
    let mut e = plain("hello world");
    select(&mut e, 0, 5);

    e.on_lbutton_down(&mut host, 11.0, 1.0, false);
    assert_eq!(e.selection_range().len(), 5);
    e.on_lbutton_up(&mut host, 11.0, 1.0);
    assert!(e.selection_range().is_empty());
    assert_eq!(e.caret().absolute(), 2);
    assert!(!host.has_capture());
}

#[test]
fn press_outside_selection_drags_out_a_new_one() {
    let mut host = RecordingHost::new();
    let mut e = plain("hello world");
    e.on_lbutton_down(&mut host, 1.0, 1.0, false);
    assert!(e.on_lbutton_hold(&mut host, 26.0, 1.0, false).is_none());
    e.on_lbutton_up(&mut host, 26.0, 1.0);
    assert_eq!(e.selected_text(), "hello");
    assert!(!e.is_dragging());
}

#[test]
fn moving_text_later_in_the_same_editor() {
    let mut host = RecordingHost::new();
    let mut e = plain("hello world");
    select(&mut e, 0, 5);
    e.on_lbutton_down(&mut host, 6.0, 1.0, false);
    let request = e.on_lbutton_hold(&mut host, 20.0, 1.0, false).unwrap();

    assert!(!e.on_drag_enter(&mut host, &request.to_drop_payload()));
    assert!(!e.on_drag_over(&mut host, 11.0, 1.0), "inside the dragged range");
    assert!(e.on_drag_over(&mut host, 80.0, 1.0));
    assert_eq!(e.on_drop(&mut host, 80.0, 1.0, DropEffect::Move), Ok(DropEffect::Move));
    assert_eq!(e.text(), "hello worldhello");

    assert!(e.finish_drag(&mut host, DropEffect::Move).unwrap());
    assert_eq!(e.text(), " worldhello");
    assert_eq!(e.selection_range().start, 6);
    assert_eq!(e.selected_text(), "hello");
    assert!(!e.is_dragging());
}

#[test]
fn moving_text_earlier_in_the_same_editor() {
    let mut host = RecordingHost::new();
    let mut e = plain("hello world");
    select(&mut e, 6, 5);
    e.on_lbutton_down(&mut host, 40.0, 1.0, false);
    let request = e.on_lbutton_hold(&mut host, 41.0, 1.0, false).unwrap();

    e.on_drag_enter(&mut host, &request.to_drop_payload());
    assert!(e.on_drag_over(&mut host, 0.0, 1.0));
    e.on_drop(&mut host, 0.0, 1.0, DropEffect::Move).unwrap();
    assert_eq!(e.text(), "worldhello world");

    e.finish_drag(&mut host, DropEffect::Move).unwrap();
    assert_eq!(e.text(), "worldhello ");
    assert_eq!(e.selection_range().start, 0);
    assert_eq!(e.selected_text(), "world");
}

#[test]
fn dropping_onto_the_dragged_range_does_nothing() {
    let mut host = RecordingHost::new();
    let mut e = plain("hello world");
    select(&mut e, 0, 5);
    e.on_lbutton_down(&mut host, 6.0, 1.0, false);
    let request = e.on_lbutton_hold(&mut host, 20.0, 1.0, false).unwrap();

    e.on_drag_enter(&mut host, &request.to_drop_payload());
    assert_eq!(e.on_drop(&mut host, 11.0, 1.0, DropEffect::Move), Ok(DropEffect::None));
    assert!(!e.finish_drag(&mut host, DropEffect::None).unwrap());
    assert_eq!(e.text(), "hello world");
}

#[test]
fn moving_text_between_editors() {
    let mut host = RecordingHost::new();
    let mut source = plain("drag me");
    let mut target = plain("xy");
    select(&mut source, 0, 4);
    source.on_lbutton_down(&mut host, 2.0, 1.0, false);
    let request = source.on_lbutton_hold(&mut host, 30.0, 1.0, false).unwrap();

    assert!(target.on_drag_enter(&mut host, &request.to_drop_payload()));
    assert!(target.is_focused());
    assert!(target.on_drag_over(&mut host, 5.0, 1.0));
    assert_eq!(target.on_drop(&mut host, 5.0, 1.0, DropEffect::Move), Ok(DropEffect::Move));
    assert_eq!(target.text(), "xdragy");
    assert_eq!(target.selected_text(), "drag");

    assert!(source.finish_drag(&mut host, DropEffect::Move).unwrap());
    assert_eq!(source.text(), " me");
    assert_eq!(source.caret().absolute(), 0);
}

#[test]
fn copy_leaves_the_source_alone() {
    let mut host = RecordingHost::new();
    let mut source = plain("copy");
    let mut target = plain("");
    select(&mut source, 0, 4);
    source.on_lbutton_down(&mut host, 2.0, 1.0, false);
    let request = source.on_lbutton_hold(&mut host, 9.0, 1.0, false).unwrap();

    target.on_drag_enter(&mut host, &request.to_drop_payload());
    assert_eq!(target.on_drop(&mut host, 0.0, 0.0, DropEffect::Copy), Ok(DropEffect::Copy));
    assert!(!source.finish_drag(&mut host, DropEffect::Copy).unwrap());
    assert_eq!(source.text(), "copy");
    assert_eq!(target.text(), "copy");
}

#[test]
fn drag_without_text_is_refused() {
    let mut host = RecordingHost::new();
    let mut target = plain("xy");
    let data = DropPayload {
        source: None,
        payload: None,
    };
    assert!(!target.on_drag_enter(&mut host, &data));
    assert!(!target.on_drag_over(&mut host, 5.0, 1.0));
    assert_eq!(target.on_drop(&mut host, 5.0, 1.0, DropEffect::Copy), Ok(DropEffect::None));
    assert_eq!(target.text(), "xy");
}

#[test]
fn drag_leave_restores_focus_state() {
    let mut host = RecordingHost::new();
    let mut source = plain("abc");
    select(&mut source, 0, 3);
    source.on_lbutton_down(&mut host, 2.0, 1.0, false);
    let request = source.on_lbutton_hold(&mut host, 9.0, 1.0, false).unwrap();

    let mut target = plain("xy");
    target.on_drag_enter(&mut host, &request.to_drop_payload());
    assert!(target.is_focused());
    host.clear();
    target.on_drag_leave(&mut host);
    assert!(!target.is_focused());
    assert_eq!(host.count(HostEvent::HideCaret), 1);

    let mut focused = plain("xy");
    focused.on_set_focus(&mut host);
    focused.on_drag_enter(&mut host, &request.to_drop_payload());
    focused.on_drag_leave(&mut host);
    assert!(focused.is_focused());
}

#[test]
fn read_only_source_and_target() {
    let mut host = RecordingHost::new();
    let read_only = EditConfig {
        read_only: true,
        width: 400.0,
        ..EditConfig::default()
    };
    let mut source = editor("locked", read_only.clone());
    select(&mut source, 0, 6);
    source.on_lbutton_down(&mut host, 2.0, 1.0, false);
    let request = source.on_lbutton_hold(&mut host, 9.0, 1.0, false).unwrap();
    assert!(!request.allowed.allow_move);
    assert!(!source.finish_drag(&mut host, DropEffect::Move).unwrap());
    assert_eq!(source.text(), "locked");

    let mut target = editor("", read_only);
    target.on_drag_enter(&mut host, &request.to_drop_payload());
    host.clear();
    assert_eq!(
        target.on_drop(&mut host, 0.0, 0.0, DropEffect::Copy),
        Err(EditError::ReadOnly)
    );
    assert_eq!(host.beeps(), 1);
}
