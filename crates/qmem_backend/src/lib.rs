//! # QMEM Backend
//!
//! Circuit execution behind the `Backend` trait, with a noisy simulator.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qmem_backend // L6: Backend (완료)
//!     BackendTrait // 백엔드 인터페이스 (완료)
//!         name(), max_qubits(), execute(), execute_batch()
//!     ExecutionResult // 실행 결과 (완료)
//!         total_counts(), probability(), most_frequent(), sorted_counts()
//!     SimulatorBackend // 시뮬레이터 구현 (완료)
//!         SimulatorConfig { method, seed }
//!         DensityMatrix // 정확한 밀도 행렬 진화 (완료)
//!         Statevector // 양자 궤적 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qmem_backend::prelude::*;
//! use qmem_core::CircuitBuilder;
//!
//! let backend = SimulatorBackend::ideal().with_seed(42);
//! let circuit = CircuitBuilder::new(1).superposition_memory().build();
//!
//! let result = backend.execute(&circuit, 1000).unwrap();
//! assert_eq!(result.total_counts(), 1000);
//! println!("P(0) = {:.3}", result.probability("0"));
//! ```
//!
//! ## Noisy Simulation
//!
//! ```rust
//! use qmem_backend::prelude::*;
//! use qmem_core::CircuitBuilder;
//! use qmem_noise::{thermal_relaxation_error, NoiseModel};
//!
//! let mut model = NoiseModel::new();
//! model
//!     .add_all_qubit_quantum_error(thermal_relaxation_error(10.0, 10.0, 1.0).unwrap(), &["h"])
//!     .unwrap();
//!
//! let backend = SimulatorBackend::new(model).with_seed(42);
//! let circuit = CircuitBuilder::new(2).superposition_memory().build();
//!
//! let result = backend.execute(&circuit, 1000).unwrap();
//! println!("{:?}", result.sorted_counts());
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Execution types and backend trait (Gantree: L6_Backend)
pub mod execution;

/// Density-matrix state (Gantree: L6_Backend → DensityMatrix)
pub mod density_matrix;

/// Statevector trajectories (Gantree: L6_Backend → Statevector)
pub mod statevector;

/// Simulator backend (Gantree: L6_Backend → SimulatorBackend)
pub mod simulator;

// ============================================================================
// Re-exports
// ============================================================================

pub use density_matrix::DensityMatrix;
pub use execution::{Backend, ExecutionMetadata, ExecutionResult};
pub use simulator::{SimulationMethod, SimulatorBackend, SimulatorConfig};
pub use statevector::Statevector;

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qmem_backend::prelude::*;
    //! ```

    pub use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
    pub use crate::simulator::{SimulationMethod, SimulatorBackend, SimulatorConfig};
}

// ============================================================================
// Integration Tests
// ============================================================================
