//! Constants for QMEM
//!
//! Gantree: L0_Foundation → Constants
//!
//! Simulator limits, noise channel bounds and gate-name sets.

// ============================================================================
// Simulator Limits
// Gantree: limits // 시뮬레이터 한계
// ============================================================================

pub mod limits {
    //! Size limits for the simulation methods

    /// Largest register simulated with a full density matrix
    /// (4^n complex entries, 16 MiB at n = 10)
    pub const DENSITY_MATRIX_MAX_QUBITS: usize = 10;

    /// Largest register simulated with statevector trajectories
    pub const STATEVECTOR_MAX_QUBITS: usize = 20;
}

// ============================================================================
// Noise Constants
// Gantree: noise // 노이즈 상수
// ============================================================================

pub mod noise {
    //! Bounds and tolerances for noise channels

    /// Largest physical single-qubit depolarizing parameter.
    ///
    /// `λ = 4/3` is the fully depolarizing Pauli channel
    /// (I, X, Y, Z each with probability 1/4).
    pub const DEPOLARIZING_MAX_PARAM_1Q: f64 = 4.0 / 3.0;

    /// Tolerance for the completeness check `Σ K†K = I`
    pub const CPTP_TOLERANCE: f64 = 1e-9;

    /// Maximum depolarizing parameter for an `n`-qubit channel: 4^n / (4^n - 1)
    pub fn depolarizing_max_param(num_qubits: u32) -> f64 {
        let dim_sq = 4f64.powi(num_qubits as i32);
        dim_sq / (dim_sq - 1.0)
    }
}

// ============================================================================
// Gate-Name Sets
// Gantree: gates // 게이트 이름
// ============================================================================

pub mod gates {
    //! Instruction names used to attach noise

    /// Single-qubit gates that carry memory noise: the superposition gate
    /// and the three Pauli gates
    pub const MEMORY_NOISE_GATES: [&str; 4] = ["h", "x", "y", "z"];
}

// ============================================================================
// Tests
// ============================================================================
