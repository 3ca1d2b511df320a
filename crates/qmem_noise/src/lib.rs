//! # QMEM Noise
//!
//! Single-qubit error channels and the gate noise model that attaches them
//! to instructions.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qmem_noise // L2: Noise Model (완료)
//!     KrausOperator // 2x2 크라우스 연산자 (완료)
//!         identity(), pauli_x/y/z(), diagonal(), lowering()
//!         adjoint(), apply(), completeness()
//!     QuantumError // 에러 채널 (완료)
//!         depolarizing_error(param, n)
//!         thermal_relaxation_error(t1, t2, time)
//!         is_identity(), is_cptp(), pauli_probabilities()
//!     NoiseModel // 게이트 노이즈 모델 (완료)
//!         add_all_qubit_quantum_error(), errors_for()
//!         noise_instructions(), is_ideal()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qmem_noise::prelude::*;
//!
//! let mut model = NoiseModel::new();
//! model
//!     .add_all_qubit_quantum_error(depolarizing_error(0.1, 1).unwrap(), &["h", "x"])
//!     .unwrap();
//! model
//!     .add_all_qubit_quantum_error(thermal_relaxation_error(50.0, 50.0, 0.1).unwrap(), &["h", "x"])
//!     .unwrap();
//!
//! assert_eq!(model.errors_for("h").len(), 2);
//! println!("{}", model);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Kraus operators (Gantree: L2_Noise → KrausOperator)
pub mod kraus;

/// Error channels (Gantree: L2_Noise → QuantumError)
pub mod channels;

/// Gate noise model (Gantree: L2_Noise → NoiseModel)
pub mod noise_model;

// ============================================================================
// Re-exports
// ============================================================================

pub use channels::{depolarizing_error, thermal_relaxation_error, ErrorKind, QuantumError};
pub use kraus::{completeness, KrausOperator};
pub use noise_model::NoiseModel;

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qmem_noise::prelude::*;
    //! ```

    pub use crate::channels::{
        depolarizing_error, thermal_relaxation_error, ErrorKind, QuantumError,
    };
    pub use crate::kraus::KrausOperator;
    pub use crate::noise_model::NoiseModel;
}

// ============================================================================
// Integration Tests
// ============================================================================
