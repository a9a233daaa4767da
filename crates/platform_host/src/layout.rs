//! Layout measurement contracts: screen rectangles, viewport size, and element-rect lookup.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in viewport (client) pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl ScreenRect {
    /// Builds a rectangle from its top-left corner and size.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (`x + w`).
    pub const fn right(self) -> i32 {
        self.x + self.w
    }

    /// Bottom edge (`y + h`).
    pub const fn bottom(self) -> i32 {
        self.y + self.h
    }

    /// Returns the rectangle translated by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Returns whether the two rectangles overlap; touching edges count as overlapping.
    pub const fn intersects(self, other: Self) -> bool {
        !(self.right() < other.x
            || self.x > other.right()
            || self.bottom() < other.y
            || self.y > other.bottom())
    }
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Fractional bounding box as reported by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementBounds {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ElementBounds {
    /// Builds bounds from the top-left corner and size.
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Horizontal center.
    pub fn center_x(self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Whole-pixel rectangle with every component rounded half up.
    pub fn to_screen_rect(self) -> ScreenRect {
        ScreenRect::new(
            round_half_up(self.left),
            round_half_up(self.top),
            round_half_up(self.width),
            round_half_up(self.height),
        )
    }
}

impl From<ScreenRect> for ElementBounds {
    fn from(rect: ScreenRect) -> Self {
        Self::new(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.w),
            f64::from(rect.h),
        )
    }
}

/// Visible viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    /// Viewport width.
    pub width: i32,
    /// Viewport height.
    pub height: i32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

/// Host capability that measures rendered elements on demand.
///
/// Rectangles are never cached by callers because they depend on the live layout.
pub trait ElementRectProvider {
    /// Returns the unrounded bounding box of the element registered under `element_id`.
    fn element_bounds(&self, element_id: &str) -> Option<ElementBounds>;

    /// Returns the element's bounding box rounded to whole pixels.
    fn element_rect(&self, element_id: &str) -> Option<ScreenRect> {
        self.element_bounds(element_id)
            .map(ElementBounds::to_screen_rect)
    }

    /// Returns the current viewport size.
    fn viewport_size(&self) -> ViewportSize;
}

#[derive(Debug, Clone, Copy, Default)]
/// Layout provider for hosts without a rendering surface.
pub struct NoopElementRectProvider;

impl ElementRectProvider for NoopElementRectProvider {
    fn element_bounds(&self, _element_id: &str) -> Option<ElementBounds> {
        None
    }

    fn viewport_size(&self) -> ViewportSize {
        ViewportSize::default()
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory layout provider whose rectangles are set explicitly.
pub struct MemoryElementRectProvider {
    bounds: Rc<RefCell<HashMap<String, ElementBounds>>>,
    viewport: Rc<RefCell<ViewportSize>>,
}

impl MemoryElementRectProvider {
    /// Registers (or replaces) the rectangle for `element_id`.
    pub fn set_rect(&self, element_id: impl Into<String>, rect: ScreenRect) {
        self.set_bounds(element_id, rect.into());
    }

    /// Registers (or replaces) fractional bounds for `element_id`.
    pub fn set_bounds(&self, element_id: impl Into<String>, bounds: ElementBounds) {
        self.bounds.borrow_mut().insert(element_id.into(), bounds);
    }

    /// Removes the rectangle for `element_id`, as if the element had unmounted.
    pub fn remove_rect(&self, element_id: &str) {
        self.bounds.borrow_mut().remove(element_id);
    }

    /// Replaces the reported viewport size.
    pub fn set_viewport(&self, viewport: ViewportSize) {
        *self.viewport.borrow_mut() = viewport;
    }
}

impl ElementRectProvider for MemoryElementRectProvider {
    fn element_bounds(&self, element_id: &str) -> Option<ElementBounds> {
        self.bounds.borrow().get(element_id).copied()
    }

    fn viewport_size(&self) -> ViewportSize {
        *self.viewport.borrow()
    }
}
