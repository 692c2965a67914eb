use edit_core::{
    EditConfig, EditCtx, EditError, EditableText, KeyCode, MemoryClipboard, Modifiers,
    SelectionMode,
};
use edit_test_support::{FailSwitch, FailingLayoutFactory, RecordingHost, test_format};
use layout::{FontWeight, PropertyKind, RunProperty, TextRange};

fn failing_editor(text: &str, config: EditConfig) -> (EditableText, FailSwitch) {
    let (factory, switch) = FailingLayoutFactory::new();
    let editor = EditableText::new(Box::new(factory), test_format(), config, text)
        .unwrap_or_else(|err| panic!("initial layout: {err}"));
    (editor, switch)
}

#[test]
fn failed_insert_leaves_text_and_layout_untouched() {
    let (mut e, switch) = failing_editor("abc", EditConfig::default());
    e.set_selection(SelectionMode::Last, false);

    switch.fail();
    let err = e.on_char(&mut RecordingHost::new(), 'd').unwrap_err();
    assert!(matches!(err, EditError::LayoutCreationFailed(_)));
    assert_eq!(e.text(), "abc");
    assert_eq!(e.layout().text_len(), 3);
    assert_eq!(e.caret().absolute(), 3);

    switch.recover();
    assert!(e.on_char(&mut RecordingHost::new(), 'd').unwrap());
    assert_eq!(e.text(), "abcd");
    assert_eq!(e.layout().text_len(), 4);
}

#[test]
fn failed_remove_restores_removed_text() {
    let (mut e, switch) = failing_editor("hello world", EditConfig::default());
    e.set_selection(SelectionMode::Leading(5), false);
    e.set_selection(SelectionMode::RightChar(6), true);

    switch.fail();
    let mut host = RecordingHost::new();
    let mut clip = MemoryClipboard::new();
    let err = e
        .on_key(&mut EditCtx::new(&mut host, &mut clip), KeyCode::Delete, Modifiers::NONE)
        .unwrap_err();
    assert!(matches!(err, EditError::LayoutCreationFailed(_)));
    assert_eq!(e.text(), "hello world");
    assert_eq!(e.selection_range().len(), 6);
}

#[test]
fn failed_backspace_and_delete_leave_the_caret_in_place() {
    let (mut e, switch) = failing_editor("a\r\nb", EditConfig {
        multiline: true,
        ..EditConfig::default()
    });
    let mut host = RecordingHost::new();
    let mut clip = MemoryClipboard::new();

    for (key, at) in [(KeyCode::Back, 3), (KeyCode::Delete, 1)] {
        e.set_selection(SelectionMode::Leading(at), false);
        switch.fail();
        let err = e
            .on_key(&mut EditCtx::new(&mut host, &mut clip), key, Modifiers::NONE)
            .unwrap_err();
        assert!(matches!(err, EditError::LayoutCreationFailed(_)), "{key:?}");
        assert_eq!(e.text(), "a\r\nb", "{key:?}");
        assert_eq!(e.caret().absolute(), at, "{key:?}");
        assert_eq!(e.anchor(), at, "{key:?}");
        switch.recover();
    }

    e.set_selection(SelectionMode::Leading(3), false);
    assert!(e.on_key(&mut EditCtx::new(&mut host, &mut clip), KeyCode::Back, Modifiers::NONE).unwrap());
    assert_eq!(e.text(), "ab");
    assert_eq!(e.caret().absolute(), 1);
}

#[test]
fn failed_rebuild_keeps_rich_runs() {
    let (mut e, switch) = failing_editor(
        "abc",
        EditConfig {
            rich: true,
            ..EditConfig::default()
        },
    );
    let bold = RunProperty::FontWeight(FontWeight::BOLD);
    e.layout_mut().set_run_property(bold.clone(), TextRange::new(0, 3));

    switch.fail();
    assert!(e.insert(1, &[u16::from(b'x')]).is_err());
    assert!(e.recreate().is_err());
    assert!(e.resize(10.0, 10.0).is_err());
    assert_eq!(e.config().width, EditConfig::default().width);
    assert_eq!(e.layout().run_property(PropertyKind::FontWeight, 2).0, bold);

    switch.recover();
    e.insert(1, &[u16::from(b'x')]).unwrap();
    assert_eq!(e.text(), "axbc");
    assert_eq!(e.layout().run_property(PropertyKind::FontWeight, 3).0, bold);
}

#[test]
fn failed_set_text_keeps_previous_text() {
    let (mut e, switch) = failing_editor("old", EditConfig::default());
    switch.fail();
    assert!(e.set_text("new text").is_err());
    assert_eq!(e.text(), "old");
}
