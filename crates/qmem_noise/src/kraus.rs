//! Kraus operators for single-qubit channels
//!
//! Gantree: L2_Noise → KrausOperator
//!
//! A channel is the map `ρ → Σ_k K_k ρ K_k†`; each `K_k` is stored as a
//! row-major 2×2 complex matrix.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Single-qubit Kraus operator
/// Gantree: KrausOperator // 크라우스 연산자
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KrausOperator {
    /// Row-major entries `[m00, m01, m10, m11]`
    matrix: [Complex64; 4],
}

impl KrausOperator {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from row-major entries
    pub const fn new(matrix: [Complex64; 4]) -> Self {
        Self { matrix }
    }

    /// Create a real diagonal operator `diag(a, b)`
    pub fn diagonal(a: f64, b: f64) -> Self {
        Self::new([Complex64::new(a, 0.0), ZERO, ZERO, Complex64::new(b, 0.0)])
    }

    /// Scaled lowering operator `a·|0⟩⟨1|`
    pub fn lowering(a: f64) -> Self {
        Self::new([ZERO, Complex64::new(a, 0.0), ZERO, ZERO])
    }

    /// Identity
    pub const fn identity() -> Self {
        Self::new([ONE, ZERO, ZERO, ONE])
    }

    /// Pauli X
    pub const fn pauli_x() -> Self {
        Self::new([ZERO, ONE, ONE, ZERO])
    }

    /// Pauli Y
    pub fn pauli_y() -> Self {
        Self::new([ZERO, -I, I, ZERO])
    }

    /// Pauli Z
    pub fn pauli_z() -> Self {
        Self::new([ONE, ZERO, ZERO, -ONE])
    }

    /// Multiply every entry by a real factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.matrix.map(|z| z * factor))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Row-major entries
    pub fn matrix(&self) -> &[Complex64; 4] {
        &self.matrix
    }

    /// Entry at (row, col)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[row * 2 + col]
    }

    /// Conjugate transpose
    pub fn adjoint(&self) -> Self {
        let [a, b, c, d] = self.matrix;
        Self::new([a.conj(), c.conj(), b.conj(), d.conj()])
    }

    /// Apply to an amplitude pair `(α, β)` of the target qubit
    #[inline]
    pub fn apply(&self, a: Complex64, b: Complex64) -> (Complex64, Complex64) {
        let [m00, m01, m10, m11] = self.matrix;
        (m00 * a + m01 * b, m10 * a + m11 * b)
    }

    /// Check if every entry is within `tol` of zero
    pub fn is_zero(&self, tol: f64) -> bool {
        self.matrix.iter().all(|z| z.norm() <= tol)
    }

    /// Largest entry-wise distance to another operator
    pub fn max_distance(&self, other: &Self) -> f64 {
        self.matrix
            .iter()
            .zip(other.matrix.iter())
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max)
    }
}

impl Mul for KrausOperator {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let [a00, a01, a10, a11] = self.matrix;
        let [b00, b01, b10, b11] = rhs.matrix;
        Self::new([
            a00 * b00 + a01 * b10,
            a00 * b01 + a01 * b11,
            a10 * b00 + a11 * b10,
            a10 * b01 + a11 * b11,
        ])
    }
}

/// Sum of `K†K` over a Kraus set; equals the identity for a
/// trace-preserving channel
pub fn completeness(operators: &[KrausOperator]) -> KrausOperator {
    let mut sum = [ZERO; 4];
    for k in operators {
        let product = k.adjoint() * *k;
        for (acc, z) in sum.iter_mut().zip(product.matrix().iter()) {
            *acc += *z;
        }
    }
    KrausOperator::new(sum)
}

// ============================================================================
// Tests
// ============================================================================
