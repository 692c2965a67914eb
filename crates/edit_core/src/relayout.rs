//! Owns the current layout and rebuilds it when the text or box changes.
//!
//! A rebuild creates the replacement first and swaps it in only on success,
//! so a failed rebuild leaves the previous layout in place. The old layout is
//! kept only long enough to migrate formatting from it.

use crate::migrate;
use layout::{LayoutError, LayoutFactory, TextFormat, TextLayout};

/// What changed in the text since the current layout was built.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextChange {
    /// Same text, or a change that does not need run migration.
    Reflow,
    Inserted { pos: u32, len: u32 },
    Removed { pos: u32, len: u32 },
}

pub struct LayoutAdapter {
    factory: Box<dyn LayoutFactory>,
    format: TextFormat,
    width: f32,
    height: f32,
    layout: Box<dyn TextLayout>,
}

impl LayoutAdapter {
    pub fn new(
        factory: Box<dyn LayoutFactory>,
        format: TextFormat,
        width: f32,
        height: f32,
        text: &[u16],
    ) -> Result<Self, LayoutError> {
        let layout = factory.create_layout(text, &format, width, height)?;
        Ok(Self {
            factory,
            format,
            width,
            height,
            layout,
        })
    }

    #[inline]
    pub fn layout(&self) -> &dyn TextLayout {
        self.layout.as_ref()
    }

    #[inline]
    pub fn layout_mut(&mut self) -> &mut dyn TextLayout {
        self.layout.as_mut()
    }

    #[inline]
    pub fn format(&self) -> &TextFormat {
        &self.format
    }

    #[inline]
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Rebuild against `text`. Global properties always carry over; run
    /// formatting is migrated only when `rich` is set. Returns the number of
    /// runs migrated.
    pub fn rebuild(
        &mut self,
        text: &[u16],
        change: TextChange,
        rich: bool,
    ) -> Result<usize, LayoutError> {
        let mut next = self
            .factory
            .create_layout(text, &self.format, self.width, self.height)
            .inspect_err(|err| {
                log::error!(target: "edit.layout", "layout creation failed: {err}");
            })?;

        let old = self.layout.as_ref();
        let migrated = match change {
            TextChange::Inserted { pos, len } if rich => {
                migrate::migrate_after_insert(old, next.as_mut(), pos, len)
            }
            TextChange::Removed { pos, len } if rich => {
                migrate::migrate_after_remove(old, next.as_mut(), pos, len)
            }
            TextChange::Reflow if rich => {
                let len = old.text_len().min(next.text_len());
                migrate::copy_global_properties(old, next.as_mut());
                migrate::copy_ranged_properties(old, next.as_mut(), 0, len, migrate::Shift::NONE)
            }
            _ => {
                migrate::copy_global_properties(old, next.as_mut());
                0
            }
        };

        log::debug!(
            target: "edit.layout",
            "rebuilt layout: {} units, box {}x{}, {migrated} runs migrated",
            text.len(),
            self.width,
            self.height
        );
        self.layout = next;
        Ok(migrated)
    }

    /// Change the layout box. On failure the previous box and layout stay.
    pub fn resize(
        &mut self,
        text: &[u16],
        width: f32,
        height: f32,
        rich: bool,
    ) -> Result<(), LayoutError> {
        let previous = (self.width, self.height);
        self.width = width;
        self.height = height;
        if let Err(err) = self.rebuild(text, TextChange::Reflow, rich) {
            (self.width, self.height) = previous;
            return Err(err);
        }
        Ok(())
    }
}
