use core::ops::{Index, IndexMut};

use bytemuck::{Pod, Zeroable};

use super::Vec3;

/// 4×4 `f32` matrix in GL column-major order.
///
/// `m[c]` is column `c` of the logical transform and `m[c][r]` its row `r`
/// entry, so the bytes can be handed to `uniformMatrix4fv` with
/// `transpose = false`. The translation of an affine transform lives in
/// `m[3][0..3]`.
///
/// Builders write their matrices row by row with [`Mat4::from_rows`], which
/// performs the row-major to column-major transpose.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub const ZERO: Mat4 = Mat4([[0.0; 4]; 4]);

    /// Builds a matrix from its logical rows.
    #[inline]
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Mat4(rows).transpose()
    }

    /// Like [`Mat4::from_rows`], rounding each `f64` entry to `f32`.
    #[inline]
    pub fn from_rows_f64(rows: [[f64; 4]; 4]) -> Self {
        Mat4::from_rows(rows.map(|row| row.map(|v| v as f32)))
    }

    #[inline]
    pub fn transpose(self) -> Self {
        let mut out = Mat4::ZERO;
        for (i, col) in self.0.iter().enumerate() {
            for (j, v) in col.iter().enumerate() {
                out.0[j][i] = *v;
            }
        }
        out
    }

    /// Elementwise (Hadamard) product. Not a matrix product.
    #[inline]
    pub fn hadamard(self, rhs: Mat4) -> Self {
        let mut out = self;
        for (col, rcol) in out.0.iter_mut().zip(rhs.0.iter()) {
            for (v, r) in col.iter_mut().zip(rcol.iter()) {
                *v *= r;
            }
        }
        out
    }

    /// Matrix × column vector.
    #[inline]
    pub fn mul_vec4(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        for (c, col) in self.0.iter().enumerate() {
            for (r, o) in out.iter_mut().enumerate() {
                *o += col[r] * v[c];
            }
        }
        out
    }

    /// Transforms a point (w = 1), dividing by the resulting w when it is
    /// neither 0 nor 1.
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let [x, y, z, w] = self.mul_vec4([p.x, p.y, p.z, 1.0]);
        if w == 0.0 || w == 1.0 {
            Vec3::new(x, y, z)
        } else {
            Vec3::new(x / w, y / w, z / w)
        }
    }

    #[inline]
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.0[3][0], self.0[3][1], self.0[3][2])
    }

    /// Flat column-major array, ready for upload.
    #[inline]
    pub fn to_cols_array(&self) -> [f32; 16] {
        bytemuck::cast(*self)
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::IDENTITY
    }
}

impl Index<usize> for Mat4 {
    type Output = [f32; 4];
    #[inline]
    fn index(&self, index: usize) -> &[f32; 4] {
        &self.0[index]
    }
}

impl IndexMut<usize> for Mat4 {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut [f32; 4] {
        &mut self.0[index]
    }
}
