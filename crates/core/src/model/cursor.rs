/// Index into an ordered question list, always within `[0, len - 1]`.
///
/// Moves clamp at the ends and out-of-range jumps are silent no-ops; cursor
/// movement never touches the answer sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.len == 0 || self.index == self.len - 1
    }

    /// Advance by one; a no-op at the last question.
    pub fn move_next(&mut self) {
        if !self.is_last() {
            self.index += 1;
        }
    }

    /// Step back by one; a no-op at the first question.
    pub fn move_previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Jump directly to `index`; rejected silently when out of range.
    pub fn jump_to(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }
}
