//! Density-matrix state for exact noisy evolution
//!
//! Gantree: L6_Backend → DensityMatrix
//!
//! `ρ` is stored row-major as a `2^n × 2^n` complex matrix with qubit `q`
//! on bit `q` of the basis index. Single-qubit maps act on the 2×2 blocks
//! `ρ[r0|r1, c0|c1]` that differ only in bit `q`.

use num_complex::Complex64;
use qmem_core::{QmemError, QmemResult, QubitId};
use qmem_noise::KrausOperator;

/// Mixed state of an `n`-qubit register
/// Gantree: DensityMatrix // 밀도 행렬
#[derive(Debug, Clone)]
pub struct DensityMatrix {
    num_qubits: usize,
    dim: usize,
    data: Vec<Complex64>,
}

impl DensityMatrix {
    /// Create `|0…0⟩⟨0…0|`
    pub fn new(num_qubits: usize) -> Self {
        let dim = 1usize << num_qubits;
        let mut data = vec![Complex64::new(0.0, 0.0); dim * dim];
        data[0] = Complex64::new(1.0, 0.0);
        Self {
            num_qubits,
            dim,
            data,
        }
    }

    /// Number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Entry `ρ[row, col]`
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.dim + col]
    }

    /// `Tr(ρ)`
    pub fn trace(&self) -> f64 {
        (0..self.dim).map(|i| self.get(i, i).re).sum()
    }

    /// `Tr(ρ²)`; 1 for pure states
    pub fn purity(&self) -> f64 {
        // ρ is Hermitian, so Tr(ρ²) = Σ |ρ_ij|²
        self.data.iter().map(Complex64::norm_sqr).sum()
    }

    /// Apply a unitary to one qubit: `ρ → UρU†`
    pub fn apply_unitary(&mut self, qubit: QubitId, unitary: &KrausOperator) -> QmemResult<()> {
        self.apply_kraus(qubit, std::slice::from_ref(unitary))
    }

    /// Apply a Kraus map to one qubit: `ρ → Σ_k K_k ρ K_k†`
    pub fn apply_kraus(&mut self, qubit: QubitId, operators: &[KrausOperator]) -> QmemResult<()> {
        if qubit >= self.num_qubits {
            return Err(QmemError::QubitOutOfRange {
                qubit,
                max: self.num_qubits.saturating_sub(1),
            });
        }

        let mask = 1usize << qubit;
        let zero = Complex64::new(0.0, 0.0);

        for r0 in (0..self.dim).filter(|r| r & mask == 0) {
            let r1 = r0 | mask;
            for c0 in (0..self.dim).filter(|c| c & mask == 0) {
                let c1 = c0 | mask;
                let block = KrausOperator::new([
                    self.get(r0, c0),
                    self.get(r0, c1),
                    self.get(r1, c0),
                    self.get(r1, c1),
                ]);

                let mut out = [zero; 4];
                for k in operators {
                    let term = *k * block * k.adjoint();
                    for (acc, z) in out.iter_mut().zip(term.matrix().iter()) {
                        *acc += *z;
                    }
                }

                self.data[r0 * self.dim + c0] = out[0];
                self.data[r0 * self.dim + c1] = out[1];
                self.data[r1 * self.dim + c0] = out[2];
                self.data[r1 * self.dim + c1] = out[3];
            }
        }

        Ok(())
    }

    /// Basis-state probabilities from the diagonal
    ///
    /// Round-off can leave tiny negative entries; they are clamped to zero.
    pub fn probabilities(&self) -> Vec<f64> {
        (0..self.dim).map(|i| self.get(i, i).re.max(0.0)).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use qmem_noise::{depolarizing_error, thermal_relaxation_error};

    fn hadamard() -> KrausOperator {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        KrausOperator::new([
            Complex64::new(s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(-s, 0.0),
        ])
    }

    #[test]
    fn test_initial_state() {
        let rho = DensityMatrix::new(2);
        assert_eq!(rho.num_qubits(), 2);
        assert_abs_diff_eq!(rho.trace(), 1.0);
        assert_abs_diff_eq!(rho.purity(), 1.0);
        assert_eq!(rho.probabilities(), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_hadamard_on_qubit_one() {
        let mut rho = DensityMatrix::new(2);
        rho.apply_unitary(1, &hadamard()).unwrap();

        let probs = rho.probabilities();
        assert_abs_diff_eq!(probs[0b00], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(probs[0b10], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(probs[0b01], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rho.purity(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_channel_preserves_trace_and_mixes() {
        let mut rho = DensityMatrix::new(1);
        rho.apply_unitary(0, &hadamard()).unwrap();

        let depol = depolarizing_error(0.5, 1).unwrap();
        rho.apply_kraus(0, depol.kraus_operators()).unwrap();
        let thermal = thermal_relaxation_error(10.0, 10.0, 1.0).unwrap();
        rho.apply_kraus(0, thermal.kraus_operators()).unwrap();

        assert_abs_diff_eq!(rho.trace(), 1.0, epsilon = 1e-12);
        assert!(rho.purity() < 1.0);
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut rho = DensityMatrix::new(1);
        assert_eq!(
            rho.apply_unitary(3, &hadamard()),
            Err(QmemError::QubitOutOfRange { qubit: 3, max: 0 })
        );
    }
}
