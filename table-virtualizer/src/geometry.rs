//! Pure row-index geometry for fixed-height rows.
//!
//! Everything here is side-effect free: identical inputs always produce identical outputs.

use core::cmp;

use crate::{Align, Window};

/// Rounds a non-negative ratio up to the next whole row count.
///
/// Negative and NaN inputs yield 0; huge inputs saturate.
fn ceil_rows(x: f64) -> usize {
    if x.is_nan() || x <= 0.0 {
        return 0;
    }
    let whole = x as u64;
    let rows = if (whole as f64) < x {
        whole.saturating_add(1)
    } else {
        whole
    };
    usize::try_from(rows).unwrap_or(usize::MAX)
}

/// Number of whole-or-partial rows that fit in `viewport_height`.
pub fn visible_row_count(viewport_height: u32, row_height: u32) -> usize {
    if row_height == 0 {
        return 0;
    }
    viewport_height.div_ceil(row_height) as usize
}

/// Over-scan padding added on both ends of the window:
/// `ceil(overscan_factor * viewport_height / row_height)`.
pub fn overscan_rows(viewport_height: u32, row_height: u32, overscan_factor: f32) -> usize {
    if row_height == 0 {
        return 0;
    }
    ceil_rows(overscan_factor as f64 * viewport_height as f64 / row_height as f64)
}

/// Index of the row under `scroll_top` (not clamped to the row count).
pub fn top_row_index(scroll_top: u64, row_height: u32) -> usize {
    if row_height == 0 {
        return 0;
    }
    usize::try_from(scroll_top / row_height as u64).unwrap_or(usize::MAX)
}

/// Maps a scroll position to the window of rows to materialize.
///
/// - `start_index = max(0, top_row - padding)`
/// - `end_index = min(row_count, top_row + visible_rows + padding)`
///
/// A scroll position past the content is treated as the last reachable row so that
/// `0 <= start_index <= end_index <= row_count` always holds. `row_count == 0` or
/// `row_height == 0` yields [`Window::EMPTY`].
pub fn compute_window(
    scroll_top: u64,
    viewport_height: u32,
    row_height: u32,
    row_count: usize,
    overscan_factor: f32,
) -> Window {
    if row_count == 0 || row_height == 0 {
        return Window::EMPTY;
    }

    let top = cmp::min(top_row_index(scroll_top, row_height), row_count);
    let visible = visible_row_count(viewport_height, row_height);
    let padding = overscan_rows(viewport_height, row_height, overscan_factor);

    let end_index = cmp::min(
        row_count,
        top.saturating_add(visible).saturating_add(padding),
    );
    let start_index = cmp::min(top.saturating_sub(padding), end_index);

    Window {
        start_index,
        end_index,
        pixel_top: row_offset(start_index, row_height),
    }
}

/// Absolute vertical offset of row `index`.
pub fn row_offset(index: usize, row_height: u32) -> u64 {
    (index as u64).saturating_mul(row_height as u64)
}

/// Total height of the scroll body: `row_count * row_height`.
pub fn content_height(row_count: usize, row_height: u32) -> u64 {
    row_offset(row_count, row_height)
}

/// The largest scroll offset that still fills the viewport.
pub fn max_scroll_offset(row_count: usize, row_height: u32, viewport_height: u32) -> u64 {
    content_height(row_count, row_height).saturating_sub(viewport_height as u64)
}

/// Scroll offset that brings row `index` into view with the given alignment.
///
/// `current` is the present scroll offset, used by [`Align::Auto`] to avoid moving when the
/// row is already fully visible. The result is clamped to [`max_scroll_offset`].
pub fn scroll_to_row_offset(
    index: usize,
    align: Align,
    current: u64,
    row_height: u32,
    row_count: usize,
    viewport_height: u32,
) -> u64 {
    if row_count == 0 || row_height == 0 {
        return 0;
    }
    let index = index.min(row_count - 1);
    let start = row_offset(index, row_height);
    let end = start.saturating_add(row_height as u64);
    let view = viewport_height as u64;

    let target = match align {
        Align::Start => start,
        Align::End => end.saturating_sub(view),
        Align::Center => {
            let center = start.saturating_add(row_height as u64 / 2);
            center.saturating_sub(view / 2)
        }
        Align::Auto => {
            let cur_end = current.saturating_add(view);
            if start >= current && end <= cur_end {
                current
            } else if start < current {
                start
            } else {
                end.saturating_sub(view)
            }
        }
    };

    target.min(max_scroll_offset(row_count, row_height, viewport_height))
}
