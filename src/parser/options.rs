//! Parsing options and configuration.

/// Options for turning cleaned narrative into content blocks.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Merge runs of blank lines into a single `Blank` block
    pub collapse_blank_lines: bool,

    /// Recognize `| a | b |` markdown tables
    pub detect_pipe_tables: bool,

    /// Recognize runs of `label：k1=v1，k2=v2` lines as tables
    pub detect_key_value_tables: bool,

    /// Glyph that replaces `- ` / `* ` list markers
    pub bullet_glyph: String,

    /// Header of the label column in key=value tables
    pub label_header: String,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep every blank line as its own block.
    pub fn keep_blank_lines(mut self) -> Self {
        self.collapse_blank_lines = false;
        self
    }

    /// Enable or disable markdown pipe table detection.
    pub fn with_pipe_tables(mut self, enabled: bool) -> Self {
        self.detect_pipe_tables = enabled;
        self
    }

    /// Enable or disable key=value table detection.
    pub fn with_key_value_tables(mut self, enabled: bool) -> Self {
        self.detect_key_value_tables = enabled;
        self
    }

    /// Only the core block grammar (headings, lists, paragraphs, blanks).
    pub fn core_only(self) -> Self {
        self.with_pipe_tables(false).with_key_value_tables(false)
    }

    /// Set the bullet glyph.
    pub fn with_bullet_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.bullet_glyph = glyph.into();
        self
    }

    /// Set the label column header for key=value tables.
    pub fn with_label_header(mut self, header: impl Into<String>) -> Self {
        self.label_header = header.into();
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            collapse_blank_lines: true,
            detect_pipe_tables: true,
            detect_key_value_tables: true,
            bullet_glyph: "•".to_string(),
            label_header: "Category".to_string(),
        }
    }
}
