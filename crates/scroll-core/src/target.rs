//! Scroll targets and the host capability the engine reads them through.
//!
//! The engine never touches DOM nodes directly. Elements are referred to by an
//! opaque [`TargetId`] handed out by the host; the host answers position and
//! layout queries for a handle and reports `None` once the element is gone.

use serde::{Deserialize, Serialize};

/// Opaque, non-owning handle to a scrollable element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub u32);

/// What the engine is scrolling: the document viewport or one element.
///
/// Serialized as `null` for the page and as the element handle otherwise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<TargetId>", into = "Option<TargetId>")]
pub enum ScrollTarget {
    #[default]
    Page,
    Element(TargetId),
}

impl ScrollTarget {
    pub fn element(&self) -> Option<TargetId> {
        match self {
            ScrollTarget::Page => None,
            ScrollTarget::Element(id) => Some(*id),
        }
    }
}

impl From<Option<TargetId>> for ScrollTarget {
    fn from(id: Option<TargetId>) -> Self {
        id.map_or(ScrollTarget::Page, ScrollTarget::Element)
    }
}

impl From<ScrollTarget> for Option<TargetId> {
    fn from(target: ScrollTarget) -> Self {
        target.element()
    }
}

impl From<TargetId> for ScrollTarget {
    fn from(id: TargetId) -> Self {
        ScrollTarget::Element(id)
    }
}

/// Current offset and scroll limit of a target, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub top: f64,
    pub max: f64,
}

impl Position {
    pub fn new(top: f64, max: f64) -> Self {
        Self { top, max }
    }

    /// Position of a box whose content is `scroll_height` tall and whose
    /// visible area is `client_height` tall.
    pub fn from_box(top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            top,
            max: scroll_height - client_height,
        }
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.top >= self.max
    }

    /// Pixels left before the limit, never negative.
    #[inline]
    pub fn room(&self) -> f64 {
        (self.max - self.top).max(0.0)
    }
}

/// Computed `overflow-y` keyword.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowY {
    #[default]
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
}

impl OverflowY {
    /// Parse a computed-style keyword; anything unrecognised counts as `visible`.
    pub fn parse(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "hidden" => OverflowY::Hidden,
            "clip" => OverflowY::Clip,
            "scroll" => OverflowY::Scroll,
            "auto" => OverflowY::Auto,
            _ => OverflowY::Visible,
        }
    }

    #[inline]
    pub fn allows_scrolling(&self) -> bool {
        matches!(self, OverflowY::Scroll | OverflowY::Auto)
    }
}

/// Layout facts needed to decide whether an element can be auto-scrolled.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementInfo {
    /// The element is the document root (`<html>`) or `<body>`.
    pub is_root: bool,
    pub scroll_height: f64,
    pub client_height: f64,
    pub overflow_y: OverflowY,
}

/// An element is scrollable when it is not the root, its content overflows
/// its box, and its computed `overflow-y` is `scroll` or `auto`.
#[inline]
pub fn is_scrollable(info: &ElementInfo) -> bool {
    !info.is_root && info.scroll_height > info.client_height && info.overflow_y.allows_scrolling()
}

/// The page itself is scrollable when the document is taller than the viewport.
#[inline]
pub fn is_page_scrollable(document_height: f64, viewport_height: f64) -> bool {
    document_height > viewport_height
}

/// Capability the engine uses to read and move scroll positions.
///
/// Element queries return `None` when the handle is unknown or the element
/// has been detached from the document.
pub trait ScrollHost {
    fn page_position(&self) -> Position;

    fn element_position(&self, id: TargetId) -> Option<Position>;

    fn element_info(&self, id: TargetId) -> Option<ElementInfo>;

    /// Instantly (non-animated) move the target by `delta` pixels.
    fn scroll_by(&mut self, target: ScrollTarget, delta: f64);

    /// Instantly move the target to the absolute offset `top`.
    fn scroll_to(&mut self, target: ScrollTarget, top: f64);

    fn position(&self, target: ScrollTarget) -> Option<Position> {
        match target {
            ScrollTarget::Page => Some(self.page_position()),
            ScrollTarget::Element(id) => self.element_position(id),
        }
    }
}
