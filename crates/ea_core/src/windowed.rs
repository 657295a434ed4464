//! Generic windowed row renderer.
//!
//! [`WindowedRenderer`] turns a record slice plus a viewport measurement into
//! the handful of positioned row elements a frontend has to build. The
//! element type is whatever the consumer's `render_row` callback returns, so
//! the same renderer drives egui row views, dioxus nodes or plain strings in
//! the CLI.

use tracing::trace;

use crate::model::Record;
use crate::viewport::ViewportState;
use crate::virtual_list::{total_height, visible_range, RowHeight, VisibleRange, DEFAULT_OVERSCAN};

pub const EMPTY_STATE_MESSAGE: &str = "No records match current filters";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowedRenderer {
    row_height: RowHeight,
    overscan: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedRow<K, E> {
    pub key: K,
    pub index: usize,
    pub top: f32,
    pub element: E,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowWindow<K, E> {
    /// Always `len * row_height`, independent of how many rows were built.
    pub spacer_height: f32,
    pub range: VisibleRange,
    pub rows: Vec<PositionedRow<K, E>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WindowedFrame<K, E> {
    /// No records: frontends show [`EMPTY_STATE_MESSAGE`].
    Empty,
    /// Viewport not measured yet: render nothing until it is.
    Unmeasured,
    Rows(RowWindow<K, E>),
}

impl<K, E> WindowedFrame<K, E> {
    pub fn rows(&self) -> &[PositionedRow<K, E>] {
        match self {
            WindowedFrame::Rows(window) => &window.rows,
            WindowedFrame::Empty | WindowedFrame::Unmeasured => &[],
        }
    }

    pub fn spacer_height(&self) -> f32 {
        match self {
            WindowedFrame::Rows(window) => window.spacer_height,
            WindowedFrame::Empty | WindowedFrame::Unmeasured => 0.0,
        }
    }

    pub fn range(&self) -> Option<VisibleRange> {
        match self {
            WindowedFrame::Rows(window) => Some(window.range),
            WindowedFrame::Empty | WindowedFrame::Unmeasured => None,
        }
    }
}

impl WindowedRenderer {
    pub fn new(row_height: RowHeight) -> Self {
        Self {
            row_height,
            overscan: DEFAULT_OVERSCAN,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn row_height(&self) -> f32 {
        self.row_height.get()
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn spacer_height(&self, len: usize) -> f32 {
        total_height(len, self.row_height.get())
    }

    pub fn range(&self, len: usize, viewport: ViewportState) -> Option<VisibleRange> {
        visible_range(
            len,
            self.row_height.get(),
            self.overscan,
            viewport.scroll_top,
            viewport.height,
        )
    }

    /// Builds the positioned rows for `viewport`. Panics raised by
    /// `render_row` propagate to the caller unchanged.
    pub fn render<R, E>(
        &self,
        records: &[R],
        viewport: ViewportState,
        mut render_row: impl FnMut(&R, usize) -> E,
    ) -> WindowedFrame<R::Id, E>
    where
        R: Record,
    {
        match self.try_render(records, viewport, |record, index| {
            Ok::<E, std::convert::Infallible>(render_row(record, index))
        }) {
            Ok(frame) => frame,
            Err(never) => match never {},
        }
    }

    /// Like [`render`](Self::render) for fallible row builders. Stops at the
    /// first error and returns it.
    pub fn try_render<R, E, X>(
        &self,
        records: &[R],
        viewport: ViewportState,
        mut render_row: impl FnMut(&R, usize) -> Result<E, X>,
    ) -> Result<WindowedFrame<R::Id, E>, X>
    where
        R: Record,
    {
        self.try_render_with(records.len(), viewport, |index| {
            let record = &records[index];
            Ok((record.id(), render_row(record, index)?))
        })
    }

    /// Renders a list that is only reachable by index, such as a filtered
    /// view over a larger store. `row` is called once per materialized index
    /// and must return the row key and element.
    pub fn render_with<K, E>(
        &self,
        len: usize,
        viewport: ViewportState,
        mut row: impl FnMut(usize) -> (K, E),
    ) -> WindowedFrame<K, E> {
        match self.try_render_with(len, viewport, |index| {
            Ok::<(K, E), std::convert::Infallible>(row(index))
        }) {
            Ok(frame) => frame,
            Err(never) => match never {},
        }
    }

    pub fn try_render_with<K, E, X>(
        &self,
        len: usize,
        viewport: ViewportState,
        mut row: impl FnMut(usize) -> Result<(K, E), X>,
    ) -> Result<WindowedFrame<K, E>, X> {
        if len == 0 {
            return Ok(WindowedFrame::Empty);
        }
        let Some(range) = self.range(len, viewport) else {
            return Ok(WindowedFrame::Unmeasured);
        };

        let row_height = self.row_height.get();
        let mut rows = Vec::with_capacity(range.len());
        for index in range.indices() {
            let (key, element) = row(index)?;
            rows.push(PositionedRow {
                key,
                index,
                top: index as f32 * row_height,
                element,
            });
        }
        trace!(len, first = range.first, last = range.last, "materialized row window");

        Ok(WindowedFrame::Rows(RowWindow {
            spacer_height: self.spacer_height(len),
            range,
            rows,
        }))
    }
}
