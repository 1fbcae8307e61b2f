//! Normalization of raw LLM output before table extraction.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Options for text normalization.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Convert CRLF and lone CR to LF
    pub normalize_line_endings: bool,

    /// Remove BOM and zero-width characters
    pub strip_invisible: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Fix ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,

    /// Turn line-leading bullet glyphs (●, ○, ▪, ...) into `- ` list markers
    pub standardize_bullets: bool,
}

impl NormalizeOptions {
    /// Create options with everything enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only NFC and line endings.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            normalize_line_endings: true,
            strip_invisible: false,
            remove_replacement_char: false,
            fix_ligatures: false,
            standardize_bullets: false,
        }
    }

    /// Enable or disable bullet standardization.
    pub fn with_standardize_bullets(mut self, enabled: bool) -> Self {
        self.standardize_bullets = enabled;
        self
    }

    /// Enable or disable invisible character removal.
    pub fn with_strip_invisible(mut self, enabled: bool) -> Self {
        self.strip_invisible = enabled;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            normalize_line_endings: true,
            strip_invisible: true,
            remove_replacement_char: true,
            fix_ligatures: true,
            standardize_bullets: true,
        }
    }
}

/// Pre-pass that makes raw narrative predictable for the parsers.
pub struct TextNormalizer {
    options: NormalizeOptions,
    bullet_regex: Regex,
    ligature_map: [(char, &'static str); 7],
}

impl TextNormalizer {
    /// Create a normalizer with the given options.
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            options,
            bullet_regex: Regex::new(r"(?m)^([ \t]*)[•●○■□◆◇▪▫►▻][ \t]*")
                .expect("bullet pattern is valid"),
            ligature_map: [
                ('\u{FB00}', "ff"),
                ('\u{FB01}', "fi"),
                ('\u{FB02}', "fl"),
                ('\u{FB03}', "ffi"),
                ('\u{FB04}', "ffl"),
                ('\u{FB05}', "st"),
                ('\u{FB06}', "st"),
            ],
        }
    }

    /// Get the options.
    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize text.
    pub fn process(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect::<String>()
        } else {
            text.to_string()
        };

        if self.options.normalize_line_endings && result.contains('\r') {
            result = result.replace("\r\n", "\n").replace('\r', "\n");
        }

        if self.options.strip_invisible {
            result.retain(|c| !is_invisible(c));
        }

        if self.options.remove_replacement_char {
            result.retain(|c| c != '\u{FFFD}');
        }

        if self.options.fix_ligatures {
            for (ligature, replacement) in &self.ligature_map {
                if result.contains(*ligature) {
                    result = result.replace(*ligature, replacement);
                }
            }
        }

        if self.options.standardize_bullets {
            result = self.bullet_regex.replace_all(&result, "$1- ").into_owned();
        }

        result
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(NormalizeOptions::default())
    }
}

fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{FEFF}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{00AD}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_normalization() {
        let normalizer = TextNormalizer::new(NormalizeOptions::minimal());
        let result = normalizer.process("cafe\u{0301}");
        assert_eq!(result, "café");
    }

    #[test]
    fn test_line_endings() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.process("a\r\nb\rc"), "a\nb\nc");
    }

    #[test]
    fn test_strip_invisible() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.process("\u{FEFF}Sales\u{200B} up"), "Sales up");
    }

    #[test]
    fn test_ligature_fix() {
        let normalizer = TextNormalizer::default();
        assert_eq!(normalizer.process("ﬁnding ﬂowers"), "finding flowers");
    }

    #[test]
    fn test_bullet_standardization() {
        let normalizer = TextNormalizer::default();
        let result = normalizer.process("● Item 1\n  ○ Item 2\nA ● in text");
        assert_eq!(result, "- Item 1\n  - Item 2\nA ● in text");
    }

    #[test]
    fn test_bullets_kept_when_disabled() {
        let normalizer =
            TextNormalizer::new(NormalizeOptions::new().with_standardize_bullets(false));
        assert_eq!(normalizer.process("● Item"), "● Item");
    }
}
