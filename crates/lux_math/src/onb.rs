//! Orthonormal basis for local sampling frames.

use crate::Vec3;
use std::ops::Index;

/// An orthonormal basis `(u, v, w)` built around a pole vector `w`.
///
/// Directions sampled in a local frame where `+Z` is the pole are mapped to
/// world space with [`Onb::local`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Onb {
    axis: [Vec3; 3],
}

impl Onb {
    /// Build a basis whose `w` axis is the normalized `n`.
    pub fn from_w(n: Vec3) -> Self {
        let w = n.normalize();
        let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let v = w.cross(a).normalize();
        let u = v.cross(w);
        Self { axis: [u, v, w] }
    }

    #[inline]
    pub fn u(&self) -> Vec3 {
        self.axis[0]
    }

    #[inline]
    pub fn v(&self) -> Vec3 {
        self.axis[1]
    }

    #[inline]
    pub fn w(&self) -> Vec3 {
        self.axis[2]
    }

    /// Transform local coordinates `(a.x, a.y, a.z)` to world space.
    #[inline]
    pub fn local(&self, a: Vec3) -> Vec3 {
        a.x * self.u() + a.y * self.v() + a.z * self.w()
    }
}

impl Index<usize> for Onb {
    type Output = Vec3;

    /// Access a basis vector by index (0 = u, 1 = v, 2 = w).
    ///
    /// # Panics
    ///
    /// Panics if `i > 2`.
    fn index(&self, i: usize) -> &Vec3 {
        match i {
            0 | 1 | 2 => &self.axis[i],
            _ => panic!("Onb index out of range: {i} (expected 0, 1 or 2)"),
        }
    }
}
