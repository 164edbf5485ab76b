//! `<urange>` values.
//! Spec: <https://www.w3.org/TR/css-syntax-3/#urange>

use core::fmt;

/// An inclusive range of code points, such as `U+0-7F`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UnicodeRange {
    pub start: u32,
    pub end: u32,
}

impl UnicodeRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Code points present in both ranges, or `None` when they are disjoint.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }
}

impl fmt::Display for UnicodeRange {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(formatter, "U+{:x}", self.start)
        } else {
            write!(formatter, "U+{:x}-{:x}", self.start, self.end)
        }
    }
}
