//! Fixed-height row windowing.
//!
//! Everything here is a pure function of the list length, row height,
//! overscan and the viewport measurement, so frontends can recompute it on
//! every frame.

use std::ops::RangeInclusive;

use thiserror::Error;

/// Rows materialized beyond each viewport edge unless a table overrides it.
pub const DEFAULT_OVERSCAN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WindowError {
    #[error("row height must be a finite value greater than zero, got {0}")]
    InvalidRowHeight(f32),
}

/// Uniform pixel height shared by every row of a table.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RowHeight(f32);

impl RowHeight {
    pub fn try_new(px: f32) -> Result<Self, WindowError> {
        if px.is_finite() && px > 0.0 {
            Ok(Self(px))
        } else {
            Err(WindowError::InvalidRowHeight(px))
        }
    }

    /// # Panics
    /// Panics when `px` is not finite or not positive.
    pub fn new(px: f32) -> Self {
        match Self::try_new(px) {
            Ok(height) => height,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

/// Inclusive `[first, last]` index range of rows that must be materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub first: usize,
    pub last: usize,
}

impl VisibleRange {
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn indices(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// Height of the spacer that stands in for the whole list.
pub fn total_height(len: usize, row_height: f32) -> f32 {
    len as f32 * row_height
}

/// Upper bound on rows a viewport can show at once. A viewport scrolled to a
/// fractional offset straddles one row more than `ceil(height / row)`.
pub fn visible_row_count(row_height: f32, viewport_height: f32) -> usize {
    (viewport_height / row_height).ceil() as usize + 1
}

/// Rows to materialize for a viewport over a list of `len` rows.
///
/// Returns `None` when the list is empty or the viewport has not been
/// measured yet (`viewport_height == 0`). Scroll offsets past the end of the
/// list, as left behind when a filter shrinks it, are clamped back so the
/// range always lies inside `[0, len - 1]`.
///
/// # Panics
/// Panics when `row_height` is not a finite positive number, when
/// `scroll_top` is not finite, or when `viewport_height` is negative or not
/// finite. Those are caller bugs, not runtime conditions.
pub fn visible_range(
    len: usize,
    row_height: f32,
    overscan: usize,
    scroll_top: f32,
    viewport_height: f32,
) -> Option<VisibleRange> {
    assert!(
        row_height.is_finite() && row_height > 0.0,
        "row height must be finite and positive, got {row_height}"
    );
    assert!(scroll_top.is_finite(), "scroll offset must be finite, got {scroll_top}");
    assert!(
        viewport_height.is_finite() && viewport_height >= 0.0,
        "viewport height must be finite and non-negative, got {viewport_height}"
    );

    if len == 0 || viewport_height == 0.0 {
        return None;
    }

    let max_scroll = (total_height(len, row_height) - viewport_height).max(0.0);
    let scroll_top = scroll_top.clamp(0.0, max_scroll);

    let first_visible = (scroll_top / row_height).floor() as usize;
    let last_visible = first_visible + (viewport_height / row_height).ceil() as usize;

    let max_index = len - 1;
    let first = first_visible.saturating_sub(overscan).min(max_index);
    let last = last_visible.saturating_add(overscan).min(max_index);

    Some(VisibleRange { first, last })
}

/// Window expressed as a half-open row range plus the padding above and
/// below it, for frontends that stack rows between two spacers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualWindow {
    pub start: usize,
    pub end: usize,
    pub top_pad: f32,
    pub bottom_pad: f32,
}

impl VirtualWindow {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

pub fn virtual_window(
    total: usize,
    item_height: f32,
    viewport_height: f32,
    scroll_offset: f32,
    overscan: usize,
) -> VirtualWindow {
    let Some(range) = visible_range(total, item_height, overscan, scroll_offset, viewport_height)
    else {
        return VirtualWindow {
            start: 0,
            end: 0,
            top_pad: 0.0,
            bottom_pad: total_height(total, item_height),
        };
    };

    let start = range.first;
    let end = range.last + 1;
    VirtualWindow {
        start,
        end,
        top_pad: start as f32 * item_height,
        bottom_pad: total.saturating_sub(end) as f32 * item_height,
    }
}
