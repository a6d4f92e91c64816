//! Text leaf type
//!
//! Formatted text runs: the only leaves in the tree.

use bitflags::bitflags;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::attr::Attrs;

// =============================================================================
// TextFormat
// =============================================================================

bitflags! {
    /// Inline formatting bitmask, bit-compatible with the editor's `format` field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextFormat: u32 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
        const STRIKETHROUGH = 1 << 2;
        const UNDERLINE = 1 << 3;
        const CODE = 1 << 4;
        const SUBSCRIPT = 1 << 5;
        const SUPERSCRIPT = 1 << 6;
        const HIGHLIGHT = 1 << 7;
        const LOWERCASE = 1 << 8;
        const UPPERCASE = 1 << 9;
        const CAPITALIZE = 1 << 10;
    }
}

// =============================================================================
// TextMode
// =============================================================================

/// How the editor treats a text run during editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextMode {
    #[default]
    Normal,
    /// Edited as a single unit
    Token,
    /// Deleted word by word
    Segmented,
}

// =============================================================================
// Text
// =============================================================================

/// Text leaf node
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    /// Text payload
    pub text: String,
    /// Formatting bitmask
    pub format: TextFormat,
    /// Inline CSS style string
    pub style: CompactString,
    /// Editing mode
    pub mode: TextMode,
    /// Detail flags (directionless, unmergeable, ...)
    pub detail: u32,
    /// Remaining serialized fields (e.g. `version`)
    pub attrs: Attrs,
}

impl Text {
    /// Create a plain text leaf
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::empty(),
            style: CompactString::default(),
            mode: TextMode::Normal,
            detail: 0,
            attrs: Attrs::new(),
        }
    }

    /// Builder: set format flags
    pub fn with_format(mut self, format: TextFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder: set style string
    pub fn with_style(mut self, style: impl Into<CompactString>) -> Self {
        self.style = style.into();
        self
    }

    /// Builder: set mode
    pub fn with_mode(mut self, mode: TextMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder: set detail flags
    pub fn with_detail(mut self, detail: u32) -> Self {
        self.detail = detail;
        self
    }

    /// Toggle a format flag
    pub fn toggle_format(mut self, flag: TextFormat) -> Self {
        self.format.toggle(flag);
        self
    }

    /// Two leaves are format-equal iff format, style, mode and detail match.
    ///
    /// Extra attributes do not take part; a merged run keeps those of its
    /// first leaf.
    pub fn format_eq(&self, other: &Text) -> bool {
        self.format == other.format
            && self.style == other.style
            && self.mode == other.mode
            && self.detail == other.detail
    }

    /// Check if text payload is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Get text length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check for a format flag
    pub fn has_format(&self, flag: TextFormat) -> bool {
        self.format.contains(flag)
    }
}
