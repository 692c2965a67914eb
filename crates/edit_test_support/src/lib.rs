//! Test doubles and fixture loading for editor tests.

pub mod doubles;
pub mod scenario;

pub use doubles::{FailSwitch, FailingClipboard, FailingLayoutFactory, HostEvent, RecordingHost};
pub use scenario::{Expectation, Scenario, ScenarioOutcome, Step, load_scenario, run_scenario};

use edit_core::{EditConfig, EditableText};
use layout::{MonoLayoutFactory, TextFormat};

/// Format used by every fixture: 10px font, so 5px cells and 12px lines.
pub fn test_format() -> TextFormat {
    TextFormat {
        font_size: 10.0,
        ..TextFormat::default()
    }
}

/// An editor over the fixed-pitch layout with [`test_format`].
pub fn editor(text: &str, config: EditConfig) -> EditableText {
    EditableText::new(Box::new(MonoLayoutFactory), test_format(), config, text)
        .unwrap_or_else(|err| panic!("failed to build editor for {text:?}: {err}"))
}

/// Escape control characters so text diffs stay on one line.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch < ' ' => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}
