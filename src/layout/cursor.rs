//! Vertical cursor owned by the flow engine.

/// Position of the next placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// Top of the next line
    pub y: f32,

    /// Current page or slide (0-based)
    pub page: usize,

    /// Blocks (or block fragments) placed on the current page
    pub items_on_page: usize,

    /// Body rows of the current table placed on the current page
    pub rows_on_page: usize,

    /// Instructions emitted on the current page
    placed: usize,
}

impl Cursor {
    /// Create a cursor at the top of page 0.
    pub fn new(top: f32) -> Self {
        Self {
            y: top,
            page: 0,
            items_on_page: 0,
            rows_on_page: 0,
            placed: 0,
        }
    }

    /// Move to the top of the next page.
    pub fn next_page(&mut self, top: f32) {
        self.page += 1;
        self.y = top;
        self.items_on_page = 0;
        self.rows_on_page = 0;
        self.placed = 0;
    }

    /// Record an emitted instruction and advance by `height`.
    pub fn advance(&mut self, height: f32) {
        self.placed += 1;
        self.y += height;
    }

    /// Advance without emitting (spacing).
    pub fn skip(&mut self, height: f32) {
        self.y += height;
    }

    /// Check whether nothing has been drawn on the current page yet.
    pub fn is_fresh(&self) -> bool {
        self.placed == 0
    }
}
