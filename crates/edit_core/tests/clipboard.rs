use edit_core::{
    ClipboardError, ClipboardPayload, CopyFormat, EditConfig, EditCtx, EditError, KeyCode,
    MemoryClipboard, Modifiers, SelectionMode,
};
use edit_test_support::{FailingClipboard, RecordingHost, editor};

fn ctrl(key: KeyCode) -> (KeyCode, Modifiers) {
    (key, Modifiers::CONTROL)
}

#[test]
fn copy_requires_a_selection() {
    let e = editor("abc", EditConfig::default());
    assert_eq!(
        e.copy_to_payload(CopyFormat::PlainText),
        Err(EditError::EmptySelection)
    );
}

#[test]
fn rich_copy_is_reported_unsupported() {
    let mut e = editor("abc", EditConfig::default());
    e.set_selection(SelectionMode::SelectAll, false);
    assert_eq!(
        e.copy_to_payload(CopyFormat::RichText),
        Err(EditError::UnsupportedRichCopy)
    );
    let payload = e.copy_to_payload(CopyFormat::PlainText).unwrap();
    assert_eq!(payload.to_string_lossy().unwrap(), "abc");
}

#[test]
fn paste_replaces_selection_and_selects_pasted_text() {
    let mut e = editor("one two three", EditConfig::default());
    e.set_selection(SelectionMode::Leading(4), false);
    e.set_selection(SelectionMode::RightChar(3), true);

    let pasted = e
        .paste_from_payload(&ClipboardPayload::from_text("2\u{1F600}"))
        .unwrap();
    assert_eq!(pasted, 3);
    assert_eq!(e.text(), "one 2\u{1F600} three");
    assert_eq!(e.selected_text(), "2\u{1F600}");
}

#[test]
fn empty_or_malformed_payloads_are_rejected() {
    let mut e = editor("abc", EditConfig::default());
    assert_eq!(
        e.paste_from_payload(&ClipboardPayload::from_text("")),
        Err(EditError::EmptyPayload)
    );
    assert!(matches!(
        e.paste_from_payload(&ClipboardPayload::from_bytes(vec![1])),
        Err(EditError::Payload(_))
    ));
    assert_eq!(e.text(), "abc");

    let mut host = RecordingHost::new();
    let mut clip = MemoryClipboard::new();
    let (key, mods) = ctrl(KeyCode::V);
    assert_eq!(
        e.on_key(&mut EditCtx::new(&mut host, &mut clip), key, mods),
        Err(EditError::EmptyPayload)
    );
}

#[test]
fn unavailable_clipboard_surfaces_as_error() {
    let mut e = editor("abc", EditConfig::default());
    e.set_selection(SelectionMode::SelectAll, false);
    let mut host = RecordingHost::new();
    let mut clip = FailingClipboard;

    let (key, mods) = ctrl(KeyCode::C);
    let err = e
        .on_key(&mut EditCtx::new(&mut host, &mut clip), key, mods)
        .unwrap_err();
    assert!(matches!(err, EditError::Clipboard(ClipboardError::Unavailable(_))));

    // A failed cut must not delete the selection.
    let (key, mods) = ctrl(KeyCode::X);
    assert!(e.on_key(&mut EditCtx::new(&mut host, &mut clip), key, mods).is_err());
    assert_eq!(e.text(), "abc");

    let (key, mods) = ctrl(KeyCode::V);
    assert!(e.on_key(&mut EditCtx::new(&mut host, &mut clip), key, mods).is_err());
    assert_eq!(e.text(), "abc");
}

#[test]
fn read_only_paste_and_cut_beep() {
    let mut e = editor(
        "abc",
        EditConfig {
            read_only: true,
            ..EditConfig::default()
        },
    );
    let mut host = RecordingHost::new();
    let mut clip = MemoryClipboard::new();
    e.set_selection(SelectionMode::SelectAll, false);
    e.copy_to_clipboard(&mut clip).unwrap();

    assert_eq!(
        e.paste_from_clipboard(&mut EditCtx::new(&mut host, &mut clip)),
        Err(EditError::ReadOnly)
    );
    assert_eq!(host.beeps(), 1);

    // Cutting from a read-only editor copies but keeps the text.
    let (key, mods) = ctrl(KeyCode::X);
    assert_eq!(
        e.on_key(&mut EditCtx::new(&mut host, &mut clip), key, mods),
        Ok(false)
    );
    assert_eq!(e.text(), "abc");
    assert_eq!(clip.text().as_deref(), Some("abc"));
    assert_eq!(host.beeps(), 2);
}

#[test]
fn shift_insert_pastes_and_ctrl_insert_copies() {
    let mut e = editor("ab", EditConfig::default());
    let mut host = RecordingHost::new();
    let mut clip = MemoryClipboard::new();
    e.set_selection(SelectionMode::SelectAll, false);

    e.on_key(&mut EditCtx::new(&mut host, &mut clip), KeyCode::Insert, Modifiers::CONTROL)
        .unwrap();
    assert_eq!(clip.text().as_deref(), Some("ab"));

    e.set_selection(SelectionMode::Last, false);
    assert!(
        e.on_key(&mut EditCtx::new(&mut host, &mut clip), KeyCode::Insert, Modifiers::SHIFT)
            .unwrap()
    );
    assert_eq!(e.text(), "abab");
}
