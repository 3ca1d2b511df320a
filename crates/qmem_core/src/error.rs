//! Error types for QMEM
//!
//! Gantree: L0_Foundation → Errors
//!
//! One error enum shared by circuits, noise channels and simulators.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QMEM
/// Gantree: QmemError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QmemError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Qubit count that cannot describe a register
    #[error("Invalid qubit count {0}: must be a non-negative integer")]
    InvalidQubitCount(i64),

    /// Shot count that cannot be executed
    #[error("Invalid shot count {0}: must be a positive integer")]
    InvalidShots(i64),

    /// Qubit index out of range
    /// Gantree: QubitOutOfRange{{q,max}} // 큐비트 범위
    #[error("Qubit {qubit} out of range: max is {max}")]
    QubitOutOfRange { qubit: usize, max: usize },

    // ========================================================================
    // Noise Channel Errors
    // ========================================================================
    /// Depolarizing parameter outside the physical range
    #[error("Invalid depolarizing parameter {param}: must be in range [0, {max:.4}]")]
    InvalidDepolarizingParameter { param: f64, max: f64 },

    /// Relaxation time (T1 or T2) not strictly positive
    #[error("Invalid {which} relaxation time {value}: must be > 0")]
    InvalidRelaxationTime { which: &'static str, value: f64 },

    /// Invalid T2 value (must be <= 2*T1)
    /// Gantree: InvalidT2{{t2,t1}} // T2>2*T1
    #[error("Invalid T2 ({t2:.4}): must be <= 2*T1 ({t1:.4})")]
    InvalidT2 { t2: f64, t1: f64 },

    /// Negative or NaN gate duration
    #[error("Invalid gate time {0}: must be >= 0")]
    InvalidGateTime(f64),

    /// Channel width not supported by the single-qubit noise layer
    #[error("Unsupported {0}-qubit error channel: only single-qubit channels are supported")]
    UnsupportedErrorQubits(usize),

    /// Malformed noise model instruction
    #[error("Noise model error: {0}")]
    NoiseError(String),

    // ========================================================================
    // Circuit Errors
    // ========================================================================
    /// Circuit without qubits
    /// Gantree: EmptyCircuit // 빈 회로
    #[error("Circuit has no qubits")]
    EmptyCircuit,

    /// Gate on non-existent qubit
    #[error("Gate references qubit {qubit} but circuit has only {num_qubits} qubits")]
    GateQubitMismatch { qubit: usize, num_qubits: usize },

    // ========================================================================
    // Backend Errors
    // ========================================================================
    /// Backend execution error
    /// Gantree: BackendError(String) // 백엔드
    #[error("Backend error: {0}")]
    BackendError(String),

    /// Circuit too wide for the selected simulation method
    #[error("{method} simulation supports at most {max} qubits, circuit has {qubits}")]
    SimulationTooLarge {
        method: String,
        qubits: usize,
        max: usize,
    },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type alias for QMEM operations
/// Gantree: QmemResult<T> // type alias
pub type QmemResult<T> = Result<T, QmemError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QmemError {
    fn from(err: serde_json::Error) -> Self {
        QmemError::JsonError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QmemError {
    /// Check if error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            QmemError::InvalidQubitCount(_)
                | QmemError::InvalidShots(_)
                | QmemError::QubitOutOfRange { .. }
        )
    }

    /// Check if error was raised while constructing a noise channel or model
    pub fn is_noise_error(&self) -> bool {
        matches!(
            self,
            QmemError::InvalidDepolarizingParameter { .. }
                | QmemError::InvalidRelaxationTime { .. }
                | QmemError::InvalidT2 { .. }
                | QmemError::InvalidGateTime(_)
                | QmemError::UnsupportedErrorQubits(_)
                | QmemError::NoiseError(_)
        )
    }

    /// Check if error is a circuit error
    pub fn is_circuit_error(&self) -> bool {
        matches!(
            self,
            QmemError::EmptyCircuit | QmemError::GateQubitMismatch { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QmemError::InvalidDepolarizingParameter {
            param: 1.5,
            max: 4.0 / 3.0,
        };
        assert!(err.to_string().contains("1.5"));
        assert!(err.to_string().contains("1.3333"));
    }

    #[test]
    fn test_qubit_out_of_range() {
        let err = QmemError::QubitOutOfRange { qubit: 10, max: 7 };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains("7"));
    }

    #[test]
    fn test_t2_message() {
        let err = QmemError::InvalidT2 { t2: 30.0, t1: 10.0 };
        assert!(err.to_string().contains("T2"));
    }

    #[test]
    fn test_classification() {
        assert!(QmemError::InvalidShots(-1).is_validation_error());
        assert!(!QmemError::BackendError("test".into()).is_validation_error());

        assert!(QmemError::InvalidGateTime(-1.0).is_noise_error());
        assert!(QmemError::UnsupportedErrorQubits(2).is_noise_error());
        assert!(!QmemError::EmptyCircuit.is_noise_error());

        assert!(QmemError::EmptyCircuit.is_circuit_error());
    }
}
