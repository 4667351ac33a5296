use std::ops::Range;

/// Number of recommendations visible at once
pub const WINDOW_SIZE: usize = 5;

/// Position of the visible window over a list of recommendations
///
/// Only full windows are shown. Stepping forward past the last full window
/// wraps to the start; stepping back from the first window wraps to the last
/// full window. Lists no longer than one window are shown whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    start: usize,
}

fn window_fits(len: usize, start: usize) -> bool {
    start
        .checked_add(WINDOW_SIZE)
        .is_some_and(|end| end <= len)
}

impl Carousel {
    /// A window at `start`, falling back to the first window if it would not be full
    pub fn new(len: usize, start: usize) -> Self {
        let start = if window_fits(len, start) { start } else { 0 };
        Self { len, start }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Indices of the visible items
    pub fn range(&self) -> Range<usize> {
        self.start..self.start.saturating_add(WINDOW_SIZE).min(self.len)
    }

    pub fn next(&self) -> Self {
        let start = self.start.saturating_add(WINDOW_SIZE);
        Self::new(self.len, start)
    }

    pub fn previous(&self) -> Self {
        match self.start.checked_sub(WINDOW_SIZE) {
            Some(start) => Self { len: self.len, start },
            None => Self {
                len: self.len,
                start: self.len.saturating_sub(WINDOW_SIZE),
            },
        }
    }
}
