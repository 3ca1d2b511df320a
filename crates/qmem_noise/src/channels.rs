//! Error channels for QMEM
//!
//! Gantree: L2_Noise → QuantumError
//!
//! Closed-form single-qubit error channels: depolarizing gate error and
//! thermal relaxation (T1/T2 decoherence over a gate duration).

use crate::kraus::{completeness, KrausOperator};
use qmem_core::noise::{depolarizing_max_param, CPTP_TOLERANCE};
use qmem_core::{QmemError, QmemResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Construction parameters of an error channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// `ρ → (1-λ)ρ + λ·I/2`
    Depolarizing {
        /// Depolarizing parameter λ
        param: f64,
    },

    /// Energy relaxation and dephasing over one gate duration
    ThermalRelaxation {
        /// T1 relaxation time
        t1: f64,
        /// T2 dephasing time
        t2: f64,
        /// Gate duration (same unit as T1/T2)
        time: f64,
    },
}

/// Single-qubit quantum error channel
/// Gantree: QuantumError // 양자 에러 채널
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumError {
    /// How the channel was constructed
    kind: ErrorKind,

    /// Kraus representation (zero operators removed)
    kraus: Vec<KrausOperator>,
}

impl QuantumError {
    /// Create from a Kraus set, dropping zero operators
    fn from_kraus(kind: ErrorKind, operators: Vec<KrausOperator>) -> Self {
        let kraus = operators
            .into_iter()
            .filter(|k| !k.is_zero(CPTP_TOLERANCE))
            .collect();
        Self { kind, kraus }
    }

    /// Construction parameters
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Kraus operators of the channel
    pub fn kraus_operators(&self) -> &[KrausOperator] {
        &self.kraus
    }

    /// Number of qubits the channel acts on
    pub fn num_qubits(&self) -> usize {
        1
    }

    /// Channel name
    pub fn name(&self) -> &'static str {
        match self.kind {
            ErrorKind::Depolarizing { .. } => "depolarizing_error",
            ErrorKind::ThermalRelaxation { .. } => "thermal_relaxation_error",
        }
    }

    /// Check if the channel leaves every state unchanged
    pub fn is_identity(&self) -> bool {
        match self.kraus.as_slice() {
            [k] => k.max_distance(&KrausOperator::identity()) < CPTP_TOLERANCE,
            _ => false,
        }
    }

    /// Check `Σ K†K = I` within `tol`
    pub fn is_cptp(&self, tol: f64) -> bool {
        completeness(&self.kraus).max_distance(&KrausOperator::identity()) <= tol
    }

    /// Probabilities of (I, X, Y, Z) for a depolarizing channel
    pub fn pauli_probabilities(&self) -> Option<[f64; 4]> {
        match self.kind {
            ErrorKind::Depolarizing { param } => {
                let p = param / 4.0;
                Some([1.0 - 3.0 * p, p, p, p])
            }
            ErrorKind::ThermalRelaxation { .. } => None,
        }
    }
}

impl fmt::Display for QuantumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::Depolarizing { param } => {
                write!(f, "depolarizing_error(param={}, kraus={})", param, self.kraus.len())
            }
            ErrorKind::ThermalRelaxation { t1, t2, time } => write!(
                f,
                "thermal_relaxation_error(t1={}, t2={}, time={}, kraus={})",
                t1,
                t2,
                time,
                self.kraus.len()
            ),
        }
    }
}

// ============================================================================
// Channel Constructors
// ============================================================================

/// Depolarizing error channel
///
/// `ρ → (1-λ)ρ + λ·I/2`, equivalently the Pauli channel
/// `(1 - 3λ/4)·I + λ/4·(X, Y, Z)`. Valid for `λ ∈ [0, 4/3]`.
///
/// # Example
/// ```
/// use qmem_noise::depolarizing_error;
///
/// let error = depolarizing_error(0.1, 1).unwrap();
/// assert!(error.is_cptp(1e-9));
/// assert!(depolarizing_error(1.5, 1).is_err());
/// ```
pub fn depolarizing_error(param: f64, num_qubits: usize) -> QmemResult<QuantumError> {
    if num_qubits != 1 {
        return Err(QmemError::UnsupportedErrorQubits(num_qubits));
    }

    let max = depolarizing_max_param(1);
    if !(0.0..=max).contains(&param) {
        return Err(QmemError::InvalidDepolarizingParameter { param, max });
    }

    let p = param / 4.0;
    // 1 - 3λ/4 can drop a hair below zero at λ = 4/3
    let identity_weight = (1.0 - 3.0 * p).max(0.0).sqrt();
    let pauli_weight = p.sqrt();

    Ok(QuantumError::from_kraus(
        ErrorKind::Depolarizing { param },
        vec![
            KrausOperator::identity().scaled(identity_weight),
            KrausOperator::pauli_x().scaled(pauli_weight),
            KrausOperator::pauli_y().scaled(pauli_weight),
            KrausOperator::pauli_z().scaled(pauli_weight),
        ],
    ))
}

/// Thermal relaxation error channel (ground-state equilibrium)
///
/// Over a gate of duration `time` the excited population decays with
/// `p_reset = 1 - exp(-time/T1)` and coherences shrink by `exp(-time/T2)`.
/// Kraus form:
///
/// ```text
/// K₀ = diag(1, e^{-t/T2})
/// K₁ = [[0, √p_reset], [0, 0]]
/// K₂ = diag(0, √(e^{-t/T1} - e^{-2t/T2}))
/// ```
///
/// Requires `T1 > 0`, `T2 > 0`, `T2 ≤ 2·T1` and `time ≥ 0`.
pub fn thermal_relaxation_error(t1: f64, t2: f64, time: f64) -> QmemResult<QuantumError> {
    // Negated comparisons also reject NaN
    if !(t1 > 0.0) {
        return Err(QmemError::InvalidRelaxationTime {
            which: "T1",
            value: t1,
        });
    }
    if !(t2 > 0.0) {
        return Err(QmemError::InvalidRelaxationTime {
            which: "T2",
            value: t2,
        });
    }
    if t2 - 2.0 * t1 > 0.0 {
        return Err(QmemError::InvalidT2 { t2, t1 });
    }
    if !(time >= 0.0) {
        return Err(QmemError::InvalidGateTime(time));
    }

    let kind = ErrorKind::ThermalRelaxation { t1, t2, time };

    if time == 0.0 {
        return Ok(QuantumError::from_kraus(kind, vec![KrausOperator::identity()]));
    }

    let survive = (-time / t1).exp();
    let coherence = (-time / t2).exp();
    let p_reset = 1.0 - survive;
    let dephase = (survive - coherence * coherence).max(0.0);

    Ok(QuantumError::from_kraus(
        kind,
        vec![
            KrausOperator::diagonal(1.0, coherence),
            KrausOperator::lowering(p_reset.sqrt()),
            KrausOperator::diagonal(0.0, dephase.sqrt()),
        ],
    ))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_depolarizing_valid_range() {
        assert!(depolarizing_error(0.0, 1).is_ok());
        assert!(depolarizing_error(1.0, 1).is_ok());
        assert!(depolarizing_error(4.0 / 3.0, 1).is_ok());
    }

    #[test]
    fn test_depolarizing_invalid() {
        assert!(matches!(
            depolarizing_error(-0.1, 1),
            Err(QmemError::InvalidDepolarizingParameter { .. })
        ));
        assert!(matches!(
            depolarizing_error(1.5, 1),
            Err(QmemError::InvalidDepolarizingParameter { .. })
        ));
        assert!(depolarizing_error(f64::NAN, 1).is_err());
        assert_eq!(
            depolarizing_error(0.1, 2),
            Err(QmemError::UnsupportedErrorQubits(2))
        );
    }

    #[test]
    fn test_depolarizing_is_cptp() {
        for p in [0.0, 0.01, 0.5, 1.0, 4.0 / 3.0] {
            let error = depolarizing_error(p, 1).unwrap();
            assert!(error.is_cptp(1e-9), "p = {} not CPTP", p);
        }
    }

    #[test]
    fn test_depolarizing_zero_is_identity() {
        let error = depolarizing_error(0.0, 1).unwrap();
        assert_eq!(error.kraus_operators().len(), 1);
        assert!(error.is_identity());

        assert!(!depolarizing_error(0.2, 1).unwrap().is_identity());
    }

    #[test]
    fn test_depolarizing_pauli_probabilities() {
        let error = depolarizing_error(0.4, 1).unwrap();
        let [pi, px, py, pz] = error.pauli_probabilities().unwrap();
        assert_abs_diff_eq!(pi, 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(px, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(py, 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(pz, 0.1, epsilon = 1e-12);
        assert_eq!(error.name(), "depolarizing_error");
    }

    #[test]
    fn test_thermal_relaxation_validation() {
        assert!(matches!(
            thermal_relaxation_error(0.0, 10.0, 1.0),
            Err(QmemError::InvalidRelaxationTime { which: "T1", .. })
        ));
        assert!(matches!(
            thermal_relaxation_error(10.0, -1.0, 1.0),
            Err(QmemError::InvalidRelaxationTime { which: "T2", .. })
        ));
        assert!(matches!(
            thermal_relaxation_error(10.0, 25.0, 1.0),
            Err(QmemError::InvalidT2 { .. })
        ));
        assert_eq!(
            thermal_relaxation_error(10.0, 10.0, -0.5),
            Err(QmemError::InvalidGateTime(-0.5))
        );
        assert!(thermal_relaxation_error(f64::NAN, 10.0, 1.0).is_err());
    }

    #[test]
    fn test_thermal_relaxation_is_cptp() {
        for (t1, t2, time) in [(50.0, 50.0, 0.1), (10.0, 10.0, 1.0), (10.0, 20.0, 5.0), (1.0, 0.5, 100.0)] {
            let error = thermal_relaxation_error(t1, t2, time).unwrap();
            assert!(error.is_cptp(1e-9), "({}, {}, {}) not CPTP", t1, t2, time);
        }
    }

    #[test]
    fn test_thermal_relaxation_zero_time_is_identity() {
        let error = thermal_relaxation_error(50.0, 50.0, 0.0).unwrap();
        assert!(error.is_identity());
    }

    #[test]
    fn test_thermal_relaxation_infinite_t1_is_identity() {
        let error = thermal_relaxation_error(f64::INFINITY, f64::INFINITY, 0.1).unwrap();
        assert!(error.is_identity());
    }

    #[test]
    fn test_thermal_relaxation_decay_entries() {
        let error = thermal_relaxation_error(10.0, 10.0, 1.0).unwrap();
        let ops = error.kraus_operators();

        // K₀ coherence factor e^{-0.1}, K₁ reset amplitude √(1 - e^{-0.1})
        assert_abs_diff_eq!(ops[0].get(1, 1).re, (-0.1_f64).exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(
            ops[1].get(0, 1).re,
            (1.0 - (-0.1_f64).exp()).sqrt(),
            epsilon = 1e-12
        );
        assert_eq!(error.name(), "thermal_relaxation_error");
        assert!(error.pauli_probabilities().is_none());
    }

    #[test]
    fn test_display() {
        let error = thermal_relaxation_error(50.0, 50.0, 0.1).unwrap();
        assert!(error.to_string().starts_with("thermal_relaxation_error(t1=50"));
    }
}
