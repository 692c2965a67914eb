//! TOML editing scenarios.
//!
//! ```toml
//! text = "Hello"
//!
//! [config]
//! multiline = true
//!
//! [[steps]]
//! op = "select"
//! mode = "Last"
//!
//! [[steps]]
//! op = "char"
//! ch = "!"
//!
//! [expect]
//! text = "Hello!"
//! caret = 6
//! ```

use std::fs;
use std::path::Path;

use edit_core::{
    EditConfig, EditCtx, EditError, EditableText, KeyCode, MemoryClipboard, Modifiers,
    SelectionMode,
};
use serde::Deserialize;

use crate::doubles::RecordingHost;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub config: EditConfig,
    /// Clipboard content before the first step.
    #[serde(default)]
    pub clipboard: Option<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
    pub expect: Expectation,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
    Focus,
    Select {
        mode: SelectionMode,
        #[serde(default)]
        extend: bool,
    },
    Point {
        x: f32,
        y: f32,
        #[serde(default)]
        extend: bool,
    },
    Char {
        ch: char,
        #[serde(default)]
        error: Option<String>,
    },
    Key {
        key: KeyCode,
        #[serde(default)]
        shift: bool,
        #[serde(default)]
        control: bool,
        #[serde(default)]
        error: Option<String>,
    },
    Insert {
        pos: u32,
        text: String,
    },
    Remove {
        pos: u32,
        len: u32,
    },
    DeleteSelection,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expectation {
    pub text: Option<String>,
    /// Absolute caret position.
    pub caret: Option<u32>,
    /// `[start, end]` of the selection.
    pub selection: Option<[u32; 2]>,
    pub clipboard: Option<String>,
    pub beeps: Option<usize>,
}

#[derive(Debug)]
pub struct ScenarioOutcome {
    pub editor: EditableText,
    pub host: RecordingHost,
    pub clipboard: MemoryClipboard,
}

impl ScenarioOutcome {
    /// Panic with a readable report when the outcome differs from `expect`.
    pub fn check(&self, name: &str, expect: &Expectation) {
        if let Some(text) = &expect.text {
            assert_eq!(
                crate::escape_text(&self.editor.text()),
                crate::escape_text(text),
                "{name}: text"
            );
        }
        if let Some(caret) = expect.caret {
            assert_eq!(self.editor.caret().absolute(), caret, "{name}: caret");
        }
        if let Some([start, end]) = expect.selection {
            let range = self.editor.selection_range();
            assert_eq!((range.start, range.end), (start, end), "{name}: selection");
        }
        if let Some(clip) = &expect.clipboard {
            assert_eq!(self.clipboard.text().as_deref(), Some(clip.as_str()), "{name}: clipboard");
        }
        if let Some(beeps) = expect.beeps {
            assert_eq!(self.host.beeps(), beeps, "{name}: beeps");
        }
    }
}

pub fn load_scenario(path: &Path) -> Scenario {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read scenario {path:?}: {err}"));
    let mut scenario: Scenario = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse scenario {path:?}: {err}"));
    if scenario.name.is_empty() {
        scenario.name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
    }
    scenario
}

/// Replay every step. A step naming an `error` must fail with that
/// [`EditError`] variant; any other failure panics.
pub fn run_scenario(scenario: &Scenario) -> ScenarioOutcome {
    let mut editor = crate::editor(&scenario.text, scenario.config.clone());
    let mut host = RecordingHost::new();
    let mut clipboard = MemoryClipboard::new();
    if let Some(text) = &scenario.clipboard {
        use edit_core::Clipboard;
        clipboard
            .set_payload(edit_core::ClipboardPayload::from_text(text))
            .unwrap_or_else(|err| panic!("{}: seeding clipboard: {err}", scenario.name));
    }

    for (i, step) in scenario.steps.iter().enumerate() {
        let label = format!("{} step {i} ({step:?})", scenario.name);
        match step {
            Step::Focus => editor.on_set_focus(&mut host),
            Step::Select { mode, extend } => {
                editor.set_selection(*mode, *extend);
            }
            Step::Point { x, y, extend } => {
                editor.set_selection_from_point(*x, *y, *extend);
            }
            Step::Char { ch, error } => {
                let result = editor.on_char(&mut host, *ch);
                check_result(&label, result, error.as_deref());
            }
            Step::Key {
                key,
                shift,
                control,
                error,
            } => {
                let mods = Modifiers {
                    shift: *shift,
                    control: *control,
                };
                let result = editor.on_key(&mut EditCtx::new(&mut host, &mut clipboard), *key, mods);
                check_result(&label, result, error.as_deref());
            }
            Step::Insert { pos, text } => {
                let units: Vec<u16> = text.encode_utf16().collect();
                editor
                    .insert(*pos, &units)
                    .unwrap_or_else(|err| panic!("{label}: {err}"));
            }
            Step::Remove { pos, len } => {
                editor
                    .remove(*pos, *len)
                    .unwrap_or_else(|err| panic!("{label}: {err}"));
            }
            Step::DeleteSelection => {
                editor
                    .delete_selection()
                    .unwrap_or_else(|err| panic!("{label}: {err}"));
            }
        }
    }

    ScenarioOutcome {
        editor,
        host,
        clipboard,
    }
}

fn check_result<T: std::fmt::Debug>(label: &str, result: Result<T, EditError>, expected: Option<&str>) {
    match (result, expected) {
        (Ok(_), None) => {}
        (Ok(value), Some(want)) => panic!("{label}: expected {want}, got Ok({value:?})"),
        (Err(err), Some(want)) => {
            let got = format!("{err:?}");
            assert!(
                got.starts_with(want),
                "{label}: expected {want}, got {got}"
            );
        }
        (Err(err), None) => panic!("{label}: unexpected error {err:?}"),
    }
}
