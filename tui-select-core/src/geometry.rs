//! Anchor geometry and the forwarded anchor handle

use std::cell::Cell;
use std::rc::Rc;

use ratatui::layout::Rect;

/// Bounding box of an anchor as measured on its last layout pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutGeometry {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl LayoutGeometry {
    /// Whether a cell lies inside the box
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.rect().contains((column, row).into())
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Area directly below the anchor, as wide as it, clamped to `bounds`
    ///
    /// The top edge sits `height` rows below the anchor's top, so the overlay
    /// never covers the field. `desired_height` is cut to whatever fits.
    ///
    /// An anchor sitting on the last rows of `bounds` gets a zero-height area.
    /// The overlay is then not drawn, but it stays open for as long as the
    /// host says so and its keyboard cursor still works, so hosts should leave
    /// room below select fields.
    pub fn below(&self, desired_height: u16, bounds: Rect) -> Rect {
        let y = self.y.saturating_add(self.height);
        let bottom = bounds.y.saturating_add(bounds.height);
        let height = desired_height.min(bottom.saturating_sub(y));
        Rect::new(self.x, y, self.width, height).intersection(bounds)
    }
}

impl From<Rect> for LayoutGeometry {
    fn from(rect: Rect) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        }
    }
}

/// Handle to an anchor element, shared between the widget and its host
///
/// The widget writes the anchor's geometry on every render; the host can read
/// it back (to position its own popups, hit-test, scroll into view) without
/// reaching into the widget. Only the anchor is reachable through the handle.
#[derive(Debug, Clone, Default)]
pub struct AnchorRef {
    geometry: Rc<Cell<Option<LayoutGeometry>>>,
}

impl AnchorRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last measured geometry, `None` before the first render
    pub fn measure(&self) -> Option<LayoutGeometry> {
        self.geometry.get()
    }

    /// Whether a cell lies inside the last measured anchor box
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.measure()
            .is_some_and(|geometry| geometry.contains(column, row))
    }

    /// Record a layout pass
    pub fn set_layout(&self, geometry: LayoutGeometry) {
        self.geometry.set(Some(geometry));
    }

    /// Whether two handles point at the same anchor
    pub fn same_anchor(&self, other: &AnchorRef) -> bool {
        Rc::ptr_eq(&self.geometry, &other.geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_matches_anchor_width_and_offset() {
        let anchor = LayoutGeometry::from(Rect::new(4, 2, 30, 3));
        let overlay = anchor.below(6, Rect::new(0, 0, 80, 24));
        assert_eq!(overlay, Rect::new(4, 5, 30, 6));
    }

    #[test]
    fn test_below_clamps_to_bounds() {
        let anchor = LayoutGeometry::from(Rect::new(0, 18, 20, 3));
        let overlay = anchor.below(200, Rect::new(0, 0, 80, 24));
        assert_eq!(overlay.y, 21);
        assert_eq!(overlay.height, 3);
        assert_eq!(overlay.width, 20);
    }

    #[test]
    fn test_below_at_bottom_edge_is_empty() {
        let anchor = LayoutGeometry::from(Rect::new(0, 21, 20, 3));
        let overlay = anchor.below(10, Rect::new(0, 0, 80, 24));
        assert_eq!(overlay.height, 0);
    }

    #[test]
    fn test_anchor_ref_shares_geometry() {
        let handle = AnchorRef::new();
        let host_copy = handle.clone();
        assert_eq!(host_copy.measure(), None);
        assert!(!host_copy.contains(0, 0));

        handle.set_layout(Rect::new(2, 1, 10, 3).into());
        assert_eq!(
            host_copy.measure(),
            Some(LayoutGeometry {
                x: 2,
                y: 1,
                width: 10,
                height: 3
            })
        );
        assert!(host_copy.contains(11, 3));
        assert!(!host_copy.contains(12, 3));
        assert!(handle.same_anchor(&host_copy));
        assert!(!handle.same_anchor(&AnchorRef::new()));
    }
}
