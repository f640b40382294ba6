//! Pure hex-layout math: axial-to-pixel conversion, outline corners, and
//! exact point-in-hexagon containment.
//!
//! Everything here is free of Bevy ECS dependencies and operates on plain
//! numeric / `Vec2` inputs, making it straightforward to unit-test. Pixel
//! positions are always derived on demand from `(q, r)` plus the current
//! layout and pan offset; nothing in the model caches them.

use bevy::math::Vec2;

/// Which pair of hexagon sides is horizontal.
///
/// A layout-wide configuration choice, not a per-call parameter: mixing
/// orientations within one grid would break the tiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HexOrientation {
    /// Vertex at the top; rows of cells share a horizontal axis.
    #[default]
    PointyTop,
    /// Flat side at the top.
    FlatTop,
}

/// Converts axial coordinates to pixel space for a fixed hexagon size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexLayout {
    /// Corner layout variant.
    pub orientation: HexOrientation,
    /// Distance from a hexagon's center to any of its corners, in pixels.
    pub hex_size: f32,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self {
            orientation: HexOrientation::PointyTop,
            hex_size: 40.0,
        }
    }
}

const SQRT_3: f32 = 1.732_050_8;

impl HexLayout {
    /// Converts axial coordinates to Cartesian pixel coordinates, with the
    /// pan offset added.
    ///
    /// Pointy-top: `x = size·√3·(q + r/2)`, `y = size·3/2·r`. Flat-top is
    /// the transposed form. Pure arithmetic, no failure.
    ///
    /// # Examples
    /// ```
    /// # use bevy::math::Vec2;
    /// # use hex_maker::grid::HexLayout;
    /// let layout = HexLayout { hex_size: 1.0, ..HexLayout::default() };
    /// assert_eq!(layout.axial_to_pixel(0, 0, Vec2::ZERO), Vec2::ZERO);
    /// assert_eq!(layout.axial_to_pixel(0, 2, Vec2::ZERO).y, 3.0);
    /// ```
    pub fn axial_to_pixel(&self, q: i32, r: i32, offset: Vec2) -> Vec2 {
        let (q, r) = (q as f32, r as f32);
        let local = match self.orientation {
            HexOrientation::PointyTop => Vec2::new(
                self.hex_size * SQRT_3 * (q + r / 2.0),
                self.hex_size * 1.5 * r,
            ),
            HexOrientation::FlatTop => Vec2::new(
                self.hex_size * 1.5 * q,
                self.hex_size * SQRT_3 * (r + q / 2.0),
            ),
        };
        local + offset
    }

    /// The six outline corners of a hexagon centred at `center`, in
    /// counter-clockwise order starting from the first corner at or after
    /// the positive-x axis.
    pub fn corners(&self, center: Vec2) -> [Vec2; 6] {
        let start = match self.orientation {
            // Pointy-top corners sit at 30° + 60°·i, flat-top at 60°·i.
            HexOrientation::PointyTop => std::f32::consts::FRAC_PI_6,
            HexOrientation::FlatTop => 0.0,
        };
        std::array::from_fn(|i| {
            let angle = start + std::f32::consts::FRAC_PI_3 * i as f32;
            center + self.hex_size * Vec2::new(angle.cos(), angle.sin())
        })
    }

    /// Exact point-in-hexagon containment test, boundary-inclusive.
    ///
    /// Walks the six edges and checks that `point` never falls strictly on
    /// the outside of any of them (convex-polygon half-plane test). This is
    /// deliberately not a center-distance check: a radius test undercounts
    /// clicks near corners, which lie at the full `hex_size` from center
    /// while edge midpoints are closer.
    pub fn contains(&self, center: Vec2, point: Vec2) -> bool {
        let corners = self.corners(center);
        for i in 0..6 {
            let a = corners[i];
            let b = corners[(i + 1) % 6];
            let edge = b - a;
            let to_point = point - a;
            // Corners are counter-clockwise, so inside points keep a
            // non-negative cross product against every edge.
            if edge.perp_dot(to_point) < 0.0 {
                return false;
            }
        }
        true
    }
}
