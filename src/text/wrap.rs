//! Script-aware line wrapping.

use serde::{Deserialize, Serialize};

use super::script::contains_cjk;

/// Characters after which a line may break.
const BREAK_PUNCTUATION: [char; 4] = ['，', '。', '、', '；'];

/// Line wrapping configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapPolicy {
    /// Maximum fragment length in characters
    pub max_width: usize,

    /// Narrow the width to two thirds when the text contains CJK ideographs
    pub script_aware: bool,
}

impl Default for WrapPolicy {
    fn default() -> Self {
        Self {
            max_width: 80,
            script_aware: true,
        }
    }
}

impl WrapPolicy {
    /// Create a script-aware policy.
    pub fn new(max_width: usize) -> Self {
        Self {
            max_width,
            script_aware: true,
        }
    }

    /// Create a policy that ignores script.
    pub fn plain(max_width: usize) -> Self {
        Self {
            max_width,
            script_aware: false,
        }
    }

    /// Width actually used for `text` (never below 1).
    pub fn effective_width(&self, text: &str) -> usize {
        let width = if self.script_aware && contains_cjk(text) {
            self.max_width * 2 / 3
        } else {
            self.max_width
        };
        width.max(1)
    }
}

/// Wrap `text` to `max_width` characters, narrowing for CJK text.
pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
    wrap_with(text, &WrapPolicy::new(max_width))
}

/// Wrap `text` according to a policy.
///
/// A break is placed after the last whitespace or CJK clause punctuation
/// found in the back half of the window, or hard at the window edge when
/// there is none. Whitespace at the start of each continuation fragment is
/// dropped. Empty input yields no fragments.
pub fn wrap_with(text: &str, policy: &WrapPolicy) -> Vec<String> {
    let width = policy.effective_width(text);
    let chars: Vec<char> = text.chars().collect();
    let mut lines = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let remaining = &chars[start..];
        if remaining.len() <= width {
            lines.push(remaining.iter().collect());
            break;
        }

        let cut = (width / 2..width)
            .rev()
            .find(|&i| is_break_char(remaining[i]))
            .map(|i| i + 1)
            .unwrap_or(width);

        lines.push(remaining[..cut].iter().collect());
        start += cut;
        while start < chars.len() && chars[start].is_whitespace() {
            start += 1;
        }
    }

    lines
}

fn is_break_char(ch: char) -> bool {
    ch.is_whitespace() || BREAK_PUNCTUATION.contains(&ch)
}
