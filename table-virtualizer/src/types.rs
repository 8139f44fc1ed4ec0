/// The contiguous range of row indexes currently materialized for display.
///
/// `end_index` is exclusive and never exceeds the row count it was computed for.
/// `pixel_top` is `start_index * row_height`, the offset of the absolutely positioned row
/// block inside the scroll body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start_index: usize,
    pub end_index: usize, // exclusive
    pub pixel_top: u64,
}

impl Window {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
        pixel_top: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

/// Measured size of a host element, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub height: u32,
    pub width: u32,
}

impl Extent {
    pub const ZERO: Self = Self {
        height: 0,
        width: 0,
    };

    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }
}

/// Whether a row sits at an even or odd absolute index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn of(index: usize) -> Self {
        if index % 2 == 0 { Self::Even } else { Self::Odd }
    }

    pub fn is_even(self) -> bool {
        matches!(self, Self::Even)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}
