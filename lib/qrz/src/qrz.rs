use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};
use tinyvec::ArrayVec;

/// Axial unit steps, clockwise starting west (pointy-top naming)
pub const DIRECTIONS: [Qrz; 6] = [
    Qrz { q: -1, r: 0 }, // west
    Qrz { q: 0, r: -1 }, // north-west
    Qrz { q: 1, r: -1 }, // north-east
    Qrz { q: 1, r: 0 },  // east
    Qrz { q: 0, r: 1 },  // south-east
    Qrz { q: -1, r: 1 }, // south-west
];

/// Axial hex coordinate; the third cube axis is derived as `z = -q - r`
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Qrz {
    pub q: i16,
    pub r: i16,
}

impl Qrz {
    pub const fn new(q: i16, r: i16) -> Self {
        Self { q, r }
    }

    pub fn z(&self) -> i16 {
        -self.q - self.r
    }

    /// Cube coordinates `[q, r, z]`, always summing to zero
    pub fn cube(&self) -> [i32; 3] {
        [self.q as i32, self.r as i32, self.z() as i32]
    }

    pub fn distance(&self, other: &Qrz) -> i16 {
        *[
            (self.q - other.q).abs(),
            (self.r - other.r).abs(),
            (self.z() - other.z()).abs(),
        ].iter().max().unwrap_or(&0)
    }

    pub fn neighbors(&self) -> ArrayVec<[Qrz; 6]> {
        DIRECTIONS.iter().map(|&dir| *self + dir).collect()
    }

    /// All coordinates within `range` steps, including `self`
    pub fn within(&self, range: i16) -> Vec<Qrz> {
        let mut cells = Vec::new();
        for dq in -range..=range {
            for dr in (-range).max(-dq - range)..=range.min(-dq + range) {
                cells.push(*self + Qrz { q: dq, r: dr });
            }
        }
        cells
    }

    /// Straight hex line from `self` to `other`, both endpoints included
    pub fn line(&self, other: &Qrz) -> Vec<Qrz> {
        let dist = self.distance(other);
        if dist == 0 { return vec![*self]; }

        // nudge off cell edges so ties round consistently
        let (q0, r0) = (self.q as f64 + 1e-6, self.r as f64 + 1e-6);
        let (q1, r1) = (other.q as f64 + 1e-6, other.r as f64 + 1e-6);
        (0..=dist).map(|i| {
            let t = i as f64 / dist as f64;
            round(q0 + (q1 - q0) * t, r0 + (r1 - r0) * t)
        }).collect()
    }
}

impl Mul<i16> for Qrz {
    type Output = Qrz;
    fn mul(self, rhs: i16) -> Self::Output {
        Qrz { q: self.q * rhs, r: self.r * rhs }
    }
}

impl Add<Qrz> for Qrz {
    type Output = Qrz;
    fn add(self, rhs: Qrz) -> Self::Output {
        Qrz { q: self.q + rhs.q, r: self.r + rhs.r }
    }
}

impl Sub<Qrz> for Qrz {
    type Output = Qrz;
    fn sub(self, rhs: Qrz) -> Self::Output {
        Qrz { q: self.q - rhs.q, r: self.r - rhs.r }
    }
}

/// Round fractional axial coordinates to the containing hex
pub fn round(q0: f64, r0: f64) -> Qrz {
    let z0 = -q0 - r0;
    let mut q = q0.round();
    let mut r = r0.round();
    let z = z0.round();

    let q_diff = (q - q0).abs();
    let r_diff = (r - r0).abs();
    let z_diff = (z - z0).abs();

    if q_diff > r_diff && q_diff > z_diff {
        q = -r - z;
    } else if r_diff > z_diff {
        r = -q - z;
    }

    Qrz { q: q as i16, r: r as i16 }
}
