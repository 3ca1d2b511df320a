//! Statevector with quantum-trajectory noise
//!
//! Gantree: L6_Backend → Statevector
//!
//! Each error channel is unravelled per shot: one Kraus operator `K_k` is
//! chosen with probability `‖K_k ψ‖²` and the state is renormalised.

use num_complex::Complex64;
use qmem_core::{QmemError, QmemResult, QubitId};
use qmem_noise::KrausOperator;
use rand::Rng;

/// Pure state of an `n`-qubit register
/// Gantree: Statevector // 상태 벡터
#[derive(Debug, Clone)]
pub struct Statevector {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// Create `|0…0⟩`
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1usize << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            num_qubits,
            amplitudes,
        }
    }

    /// Number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// `⟨ψ|ψ⟩`
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    fn check_qubit(&self, qubit: QubitId) -> QmemResult<usize> {
        if qubit >= self.num_qubits {
            return Err(QmemError::QubitOutOfRange {
                qubit,
                max: self.num_qubits.saturating_sub(1),
            });
        }
        Ok(1usize << qubit)
    }

    /// Apply an operator to one qubit (no renormalisation)
    pub fn apply_operator(&mut self, qubit: QubitId, op: &KrausOperator) -> QmemResult<()> {
        let mask = self.check_qubit(qubit)?;
        for i in (0..self.amplitudes.len()).filter(|i| i & mask == 0) {
            let j = i | mask;
            let (a, b) = op.apply(self.amplitudes[i], self.amplitudes[j]);
            self.amplitudes[i] = a;
            self.amplitudes[j] = b;
        }
        Ok(())
    }

    /// `‖Kψ‖²` for an operator on one qubit, without modifying the state
    fn branch_weight(&self, mask: usize, op: &KrausOperator) -> f64 {
        (0..self.amplitudes.len())
            .filter(|i| i & mask == 0)
            .map(|i| {
                let (a, b) = op.apply(self.amplitudes[i], self.amplitudes[i | mask]);
                a.norm_sqr() + b.norm_sqr()
            })
            .sum()
    }

    /// Apply one sampled Kraus branch of a channel and renormalise
    ///
    /// Returns the index of the chosen operator.
    pub fn apply_kraus_trajectory<R: Rng + ?Sized>(
        &mut self,
        qubit: QubitId,
        operators: &[KrausOperator],
        rng: &mut R,
    ) -> QmemResult<usize> {
        let mask = self.check_qubit(qubit)?;
        if operators.is_empty() {
            return Err(QmemError::InternalError("empty Kraus set".to_string()));
        }

        let weights: Vec<f64> = operators
            .iter()
            .map(|k| self.branch_weight(mask, k))
            .collect();
        let total: f64 = weights.iter().sum();

        let mut r = rng.gen::<f64>() * total;
        let mut chosen = weights.len() - 1;
        for (i, &w) in weights.iter().enumerate() {
            if r < w {
                chosen = i;
                break;
            }
            r -= w;
        }

        // Skip branches that round-off made reachable with zero weight
        while weights[chosen] <= 0.0 && chosen > 0 {
            chosen -= 1;
        }
        let weight = weights[chosen];
        if weight <= 0.0 {
            return Err(QmemError::InternalError(
                "Kraus branches have zero total weight".to_string(),
            ));
        }

        self.apply_operator(qubit, &operators[chosen])?;
        let scale = 1.0 / weight.sqrt();
        self.amplitudes.iter_mut().for_each(|a| *a *= scale);

        Ok(chosen)
    }

    /// Basis-state probabilities `|ψ_i|²`
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
