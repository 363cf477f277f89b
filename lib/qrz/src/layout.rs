//! # Layout: Hex ↔ Pixel Conversion
//!
//! Converts between axial hex coordinates (`Qrz`) and 2D pixel space (`Vec2`)
//! for either orientation. Pixel y grows downward, matching screen space.
//!
//! ## Example
//!
//! ```rust
//! use qrz::{Convert, Layout, Orientation, Qrz};
//! use glam::Vec2;
//!
//! let layout = Layout::new(Orientation::PointyTop, 20.);
//! let coord = Qrz::new(2, -1);
//!
//! let center: Vec2 = layout.convert(coord);
//! let recovered: Qrz = layout.convert(center);
//! assert_eq!(coord, recovered);
//! ```

use glam::Vec2;

use crate::{
    qrz::{self, Qrz},
    shape::Orientation,
};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Affine transformation matrices per orientation
/// Format: (forward matrix, inverse matrix, first vertex angle in sixths of a turn)
const POINTY: ([f64; 4], [f64; 4], f64) = (
    [SQRT_3, SQRT_3 / 2., 0., 3. / 2.],
    [SQRT_3 / 3., -1. / 3., 0., 2. / 3.],
    0.5,
);
const FLAT: ([f64; 4], [f64; 4], f64) = (
    [3. / 2., 0., SQRT_3 / 2., SQRT_3],
    [2. / 3., 0., -1. / 3., SQRT_3 / 3.],
    0.,
);

/// Trait for bidirectional coordinate conversion
pub trait Convert<T, U> {
    /// Convert from type T to type U
    fn convert(&self, it: T) -> U;
}

/// Placement of a hex lattice in pixel space
///
/// - `orientation`: pointy-top or flat-top vertices
/// - `radius`: center-to-vertex distance in pixels
/// - `origin`: pixel position of `Qrz { q: 0, r: 0 }`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub orientation: Orientation,
    pub radius: f32,
    pub origin: Vec2,
}

impl Layout {
    pub fn new(orientation: Orientation, radius: f32) -> Self {
        Self { orientation, radius, origin: Vec2::ZERO }
    }

    /// Center-to-edge distance
    pub fn inner_radius(&self) -> f32 {
        (self.radius as f64 * SQRT_3 / 2.) as f32
    }

    pub fn vertices(&self, qrz: Qrz) -> [Vec2; 6] {
        let center: Vec2 = self.convert(qrz);
        let start = self.matrices().2;
        std::array::from_fn(|i| {
            let angle = std::f64::consts::FRAC_PI_3 * (start + i as f64);
            center + Vec2::new(
                (self.radius as f64 * angle.cos()) as f32,
                (self.radius as f64 * angle.sin()) as f32,
            )
        })
    }

    fn matrices(&self) -> ([f64; 4], [f64; 4], f64) {
        match self.orientation {
            Orientation::PointyTop => POINTY,
            Orientation::FlatTop => FLAT,
        }
    }
}

impl Convert<Vec2, Qrz> for Layout {
    fn convert(&self, other: Vec2) -> Qrz {
        let m = self.matrices().1;
        let x = (other.x - self.origin.x) as f64 / self.radius as f64;
        let y = (other.y - self.origin.y) as f64 / self.radius as f64;
        qrz::round(m[0] * x + m[1] * y, m[2] * x + m[3] * y)
    }
}

impl Convert<Qrz, Vec2> for Layout {
    fn convert(&self, other: Qrz) -> Vec2 {
        let m = self.matrices().0;
        let x = (m[0] * other.q as f64 + m[1] * other.r as f64) * self.radius as f64;
        let y = (m[2] * other.q as f64 + m[3] * other.r as f64) * self.radius as f64;
        self.origin + Vec2::new(x as f32, y as f32)
    }
}
