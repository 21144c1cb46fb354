//! Geometry APIs
//!
//! DOMRect and per-element box metrics. There is no layout engine here: the
//! embedder supplies geometry through `Document::set_geometry`, elements
//! without it measure as zero-sized boxes at the origin.

/// DOMRect - rectangle geometry
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top edge (same as y)
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Left edge (same as x)
    pub fn left(&self) -> f64 {
        self.x
    }
}

/// Element box metrics
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ElementGeometry {
    /// Border box relative to the viewport
    pub offset_top: f64,
    pub offset_left: f64,
    pub offset_width: f64,
    pub offset_height: f64,

    /// Border widths (`clientTop` / `clientLeft`)
    pub client_top: f64,
    pub client_left: f64,
}

impl ElementGeometry {
    /// Box at `(left, top)` with the given size and no borders
    pub fn from_box(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            offset_top: top,
            offset_left: left,
            offset_width: width,
            offset_height: height,
            ..Self::default()
        }
    }

    /// Get bounding client rect
    pub fn bounding_client_rect(&self) -> DOMRect {
        DOMRect::from_xywh(
            self.offset_left,
            self.offset_top,
            self.offset_width,
            self.offset_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_rect() {
        let rect = DOMRect::from_xywh(10.0, 20.0, 100.0, 50.0);

        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.left(), 10.0);
    }

    #[test]
    fn test_geometry_rect() {
        let geometry = ElementGeometry::from_box(5.0, 7.0, 30.0, 40.0);
        assert_eq!(
            geometry.bounding_client_rect(),
            DOMRect::from_xywh(5.0, 7.0, 30.0, 40.0)
        );
        assert_eq!(geometry.client_top, 0.0);
    }
}
