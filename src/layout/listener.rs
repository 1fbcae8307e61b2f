//! Callbacks fired while the engine flows blocks.
//!
//! # Example
//!
//! ```
//! use narraflow::layout::{FlowAction, FlowListener};
//! use narraflow::model::ContentBlock;
//!
//! struct SkipImages;
//!
//! impl FlowListener for SkipImages {
//!     fn before_block(&mut self, block: &ContentBlock) -> FlowAction {
//!         match block {
//!             ContentBlock::Image(_) => FlowAction::Skip,
//!             _ => FlowAction::Continue,
//!         }
//!     }
//! }
//! ```

use crate::model::ContentBlock;

/// Action returned by [`FlowListener::before_block`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FlowAction {
    /// Place the block as is.
    #[default]
    Continue,

    /// Place this block instead.
    Replace(ContentBlock),

    /// Do not place the block.
    Skip,
}

impl FlowAction {
    /// Check if this action skips the block.
    pub fn should_skip(&self) -> bool {
        matches!(self, FlowAction::Skip)
    }
}

/// Observer of one flow job. All methods default to no-ops.
pub trait FlowListener {
    /// Called before a block is placed.
    fn before_block(&mut self, block: &ContentBlock) -> FlowAction {
        let _ = block;
        FlowAction::Continue
    }

    /// Called after a page break; `page` is the new page index.
    fn on_page_break(&mut self, page: usize) {
        let _ = page;
    }

    /// Called when a table header row is placed.
    ///
    /// `repeated` is true when the header is re-emitted after a break.
    fn on_table_header(&mut self, page: usize, repeated: bool) {
        let _ = (page, repeated);
    }

    /// Called after a block has been placed; `page` is where it ended.
    fn on_block_placed(&mut self, block: &ContentBlock, page: usize) {
        let _ = (block, page);
    }
}

/// Listener that does nothing.
#[derive(Debug, Clone, Default)]
pub struct DefaultListener;

impl DefaultListener {
    /// Create a new default listener.
    pub fn new() -> Self {
        Self
    }
}

impl FlowListener for DefaultListener {}

/// Listener that fans out to several listeners.
///
/// For `before_block`, the first listener returning something other than
/// `Continue` decides; notifications go to every listener.
#[derive(Default)]
pub struct CompositeListener {
    listeners: Vec<Box<dyn FlowListener>>,
}

impl CompositeListener {
    /// Create a new composite listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener to the chain.
    pub fn with_listener<L: FlowListener + 'static>(mut self, listener: L) -> Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Add a boxed listener to the chain.
    pub fn push(&mut self, listener: Box<dyn FlowListener>) {
        self.listeners.push(listener);
    }

    /// Number of listeners in the chain.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl FlowListener for CompositeListener {
    fn before_block(&mut self, block: &ContentBlock) -> FlowAction {
        for listener in &mut self.listeners {
            let action = listener.before_block(block);
            if action != FlowAction::Continue {
                return action;
            }
        }
        FlowAction::Continue
    }

    fn on_page_break(&mut self, page: usize) {
        for listener in &mut self.listeners {
            listener.on_page_break(page);
        }
    }

    fn on_table_header(&mut self, page: usize, repeated: bool) {
        for listener in &mut self.listeners {
            listener.on_table_header(page, repeated);
        }
    }

    fn on_block_placed(&mut self, block: &ContentBlock, page: usize) {
        for listener in &mut self.listeners {
            listener.on_block_placed(block, page);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SkipBlanks;

    impl FlowListener for SkipBlanks {
        fn before_block(&mut self, block: &ContentBlock) -> FlowAction {
            if block.is_blank() {
                FlowAction::Skip
            } else {
                FlowAction::Continue
            }
        }
    }

    struct Uppercase;

    impl FlowListener for Uppercase {
        fn before_block(&mut self, block: &ContentBlock) -> FlowAction {
            match block {
                ContentBlock::Paragraph { text } => {
                    FlowAction::Replace(ContentBlock::paragraph(text.to_uppercase()))
                }
                _ => FlowAction::Continue,
            }
        }
    }

    #[test]
    fn test_default_listener_continues() {
        let mut listener = DefaultListener::new();
        let action = listener.before_block(&ContentBlock::Blank);
        assert_eq!(action, FlowAction::Continue);
    }

    #[test]
    fn test_composite_first_decision_wins() {
        let mut composite = CompositeListener::new()
            .with_listener(SkipBlanks)
            .with_listener(Uppercase);
        assert_eq!(composite.len(), 2);

        assert!(composite.before_block(&ContentBlock::Blank).should_skip());
        assert_eq!(
            composite.before_block(&ContentBlock::paragraph("up")),
            FlowAction::Replace(ContentBlock::paragraph("UP"))
        );
        assert_eq!(
            composite.before_block(&ContentBlock::heading(1, "Title")),
            FlowAction::Continue
        );
    }
}
