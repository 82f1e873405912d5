//! Column filter popup state and placement.
//!
//! The hosting UI measures the header cell and the popup itself; this module
//! only turns those measurements into a position and tracks which column's
//! popup is open.

use serde::{Deserialize, Serialize};

use super::row::RowField;

/// A point in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Whether `point` lies inside or on the edge.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (self.x..=self.right()).contains(&point.x) && (self.y..=self.bottom()).contains(&point.y)
    }
}

/// Page scroll at the moment the popup opens.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub x: f64,
    pub y: f64,
}

impl ScrollOffset {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where to place a popup, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PopupAnchor {
    pub left: f64,
    pub top: f64,
    /// The popup is at least as wide as its header cell.
    pub min_width: f64,
}

impl PopupAnchor {
    /// Directly below a header cell measured in viewport coordinates.
    #[must_use]
    pub fn below(header: Rect, scroll: ScrollOffset) -> Self {
        Self {
            left: header.x + scroll.x,
            top: header.bottom() + scroll.y,
            min_width: header.width,
        }
    }
}

/// The open popup: which column, where, and the text typed so far.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenPopup<F> {
    pub field: F,
    pub anchor: PopupAnchor,
    pub draft: String,
}

/// Popup state of a whole table. At most one popup is open.
#[derive(Debug, Clone, PartialEq)]
pub enum PopupState<F: RowField> {
    Closed,
    Open(OpenPopup<F>),
}

impl<F: RowField> Default for PopupState<F> {
    fn default() -> Self {
        Self::Closed
    }
}

impl<F: RowField> PopupState<F> {
    /// Filter-icon click on `field`'s header.
    ///
    /// Opens the popup (replacing any other). Clicking the icon of the column
    /// whose popup is already open closes it.
    pub fn toggle(&mut self, field: F, anchor: PopupAnchor, draft: String) {
        if self.open_field() == Some(&field) {
            *self = Self::Closed;
        } else {
            *self = Self::Open(OpenPopup {
                field,
                anchor,
                draft,
            });
        }
    }

    /// Close the popup, returning what was open.
    pub fn close(&mut self) -> Option<OpenPopup<F>> {
        match std::mem::take(self) {
            Self::Open(popup) => Some(popup),
            Self::Closed => None,
        }
    }

    /// The open popup, if any.
    #[must_use]
    pub const fn open(&self) -> Option<&OpenPopup<F>> {
        match self {
            Self::Open(popup) => Some(popup),
            Self::Closed => None,
        }
    }

    /// The column whose popup is open, if any.
    #[must_use]
    pub fn open_field(&self) -> Option<&F> {
        self.open().map(|popup| &popup.field)
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    /// Replace the typed text of the open popup. No-op when closed.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Self::Open(popup) = self {
            popup.draft = text.into();
        }
    }
}
