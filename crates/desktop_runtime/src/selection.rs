//! Desktop icon selection and the rubber-band (lasso) gesture.

use std::collections::BTreeSet;

use platform_host::ScreenRect;

use crate::model::{PointerPosition, WindowId};

/// Measured on-screen rectangle of one desktop icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconRect {
    pub id: WindowId,
    pub rect: ScreenRect,
}

/// In-progress lasso rectangle in desktop-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionBox {
    pub origin: PointerPosition,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SelectionBox {
    /// Axis-aligned box spanning `origin` and `current`, whichever direction the drag went.
    pub fn spanning(origin: PointerPosition, current: PointerPosition) -> Self {
        Self {
            origin,
            x: origin.x.min(current.x),
            y: origin.y.min(current.y),
            w: (current.x - origin.x).abs(),
            h: (current.y - origin.y).abs(),
        }
    }

    pub fn to_rect(self) -> ScreenRect {
        ScreenRect::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LassoGesture {
    /// Top-left of the desktop surface in viewport coordinates at gesture start.
    pub surface_origin: PointerPosition,
    pub selection_box: SelectionBox,
    /// Set once the box exceeds the drag threshold; separates a drag from a click.
    pub moved: bool,
}

impl LassoGesture {
    /// Lasso rectangle translated into viewport coordinates, where icon rects live.
    pub fn viewport_rect(&self) -> ScreenRect {
        self.selection_box
            .to_rect()
            .offset(self.surface_origin.x, self.surface_origin.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub selected: BTreeSet<WindowId>,
    pub lasso: Option<LassoGesture>,
}

impl SelectionState {
    pub fn is_selected(&self, icon_id: &WindowId) -> bool {
        self.selected.contains(icon_id)
    }

    pub fn is_lasso_active(&self) -> bool {
        self.lasso.is_some()
    }

    pub fn select_only(&mut self, icon_id: WindowId) {
        self.selected = BTreeSet::from([icon_id]);
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.lasso = None;
    }

    /// Starts a lasso at `pointer` (viewport coordinates) over the given desktop surface.
    pub fn begin_lasso(&mut self, pointer: PointerPosition, surface: ScreenRect) {
        let origin = PointerPosition::new(pointer.x - surface.x, pointer.y - surface.y);
        self.selected.clear();
        self.lasso = Some(LassoGesture {
            surface_origin: PointerPosition::new(surface.x, surface.y),
            selection_box: SelectionBox::spanning(origin, origin),
            moved: false,
        });
    }

    /// Resizes the lasso to `pointer` and replaces the selection with every intersected icon.
    ///
    /// Returns `false` when no lasso is active.
    pub fn update_lasso(
        &mut self,
        pointer: PointerPosition,
        icon_rects: &[IconRect],
        threshold: i32,
    ) -> bool {
        let Some(lasso) = self.lasso.as_mut() else {
            return false;
        };

        let current = PointerPosition::new(
            pointer.x - lasso.surface_origin.x,
            pointer.y - lasso.surface_origin.y,
        );
        lasso.selection_box = SelectionBox::spanning(lasso.selection_box.origin, current);
        if lasso.selection_box.w > threshold || lasso.selection_box.h > threshold {
            lasso.moved = true;
        }
        self.selected = icons_in_rect(lasso.viewport_rect(), icon_rects);
        true
    }

    /// Ends the gesture. A lasso that never moved past the threshold was a click and clears
    /// the selection.
    pub fn end_lasso(&mut self) -> bool {
        let Some(lasso) = self.lasso.take() else {
            return false;
        };
        if !lasso.moved {
            self.selected.clear();
        }
        true
    }
}

/// Ids of every icon whose rectangle intersects `selection` (touching edges included).
pub fn icons_in_rect(selection: ScreenRect, icon_rects: &[IconRect]) -> BTreeSet<WindowId> {
    icon_rects
        .iter()
        .filter(|icon| icon.rect.intersects(selection))
        .map(|icon| icon.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids() -> (WindowId, WindowId) {
        (WindowId::from("a"), WindowId::from("b"))
    }

    fn rects(a: &WindowId, b: &WindowId) -> Vec<IconRect> {
        vec![
            IconRect {
                id: a.clone(),
                rect: ScreenRect::new(0, 0, 50, 50),
            },
            IconRect {
                id: b.clone(),
                rect: ScreenRect::new(100, 100, 50, 50),
            },
        ]
    }

    #[test]
    fn spanning_normalizes_reverse_drags() {
        let boxed = SelectionBox::spanning(PointerPosition::new(40, 30), PointerPosition::new(10, 50));
        assert_eq!((boxed.x, boxed.y, boxed.w, boxed.h), (10, 30, 30, 20));
    }

    #[test]
    fn rect_covering_only_a_selects_a() {
        let (a, b) = ids();
        let selected = icons_in_rect(ScreenRect::new(0, 0, 50, 50), &rects(&a, &b));
        assert_eq!(selected, BTreeSet::from([a.clone()]));
    }

    #[test]
    fn touching_left_edge_intersects() {
        let (a, b) = ids();
        let selected = icons_in_rect(ScreenRect::new(60, 100, 40, 10), &rects(&a, &b));
        assert_eq!(selected, BTreeSet::from([b.clone()]));
    }

    #[test]
    fn lasso_translates_by_surface_offset() {
        let (a, b) = ids();
        let mut selection = SelectionState::default();
        selection.begin_lasso(PointerPosition::new(110, 110), ScreenRect::new(10, 10, 800, 600));
        assert!(selection.update_lasso(PointerPosition::new(130, 130), &rects(&a, &b), 2));

        let lasso = selection.lasso.expect("lasso");
        assert_eq!(lasso.selection_box.to_rect(), ScreenRect::new(100, 100, 20, 20));
        assert_eq!(lasso.viewport_rect(), ScreenRect::new(110, 110, 20, 20));
        assert!(lasso.moved);
        assert_eq!(selection.selected, BTreeSet::from([b.clone()]));
    }

    #[test]
    fn selection_is_recomputed_not_accumulated() {
        let (a, b) = ids();
        let mut selection = SelectionState::default();
        selection.begin_lasso(PointerPosition::new(0, 0), ScreenRect::default());
        selection.update_lasso(PointerPosition::new(120, 120), &rects(&a, &b), 2);
        assert_eq!(selection.selected.len(), 2);

        selection.update_lasso(PointerPosition::new(20, 20), &rects(&a, &b), 2);
        assert_eq!(selection.selected, BTreeSet::from([a.clone()]));
        assert!(selection.end_lasso());
        assert_eq!(selection.selected, BTreeSet::from([a.clone()]));
        assert!(selection.lasso.is_none());
    }

    #[test]
    fn click_without_movement_clears_selection() {
        let (a, b) = ids();
        let mut selection = SelectionState::default();
        selection.select_only(a.clone());
        selection.begin_lasso(PointerPosition::new(5, 5), ScreenRect::default());
        assert!(selection.selected.is_empty());

        selection.update_lasso(PointerPosition::new(7, 7), &rects(&a, &b), 2);
        assert_eq!(selection.selected, BTreeSet::from([a.clone()]));
        selection.end_lasso();
        assert!(selection.selected.is_empty());
    }
}
