//! Simulator backend for QMEM
//!
//! Gantree: L6_Backend → SimulatorBackend
//!
//! Noise-aware simulator: each unitary gate is followed by the errors the
//! noise model attaches to its name, on the gate's qubit. Measurements must
//! be terminal.

use crate::density_matrix::DensityMatrix;
use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
use crate::statevector::Statevector;
use num_complex::Complex64;
use qmem_core::limits::{DENSITY_MATRIX_MAX_QUBITS, STATEVECTOR_MAX_QUBITS};
use qmem_core::{format_bitstring, Circuit, Counts, Gate, QmemError, QmemResult};
use qmem_noise::{KrausOperator, NoiseModel, QuantumError};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Instant;

// ============================================================================
// Configuration
// ============================================================================

/// Simulation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMethod {
    /// Density matrix for small registers, statevector trajectories otherwise
    #[default]
    Automatic,

    /// Exact density-matrix evolution
    DensityMatrix,

    /// Per-shot statevector trajectories
    Statevector,
}

impl SimulationMethod {
    /// Largest register for the method
    pub fn max_qubits(&self) -> usize {
        match self {
            SimulationMethod::DensityMatrix => DENSITY_MATRIX_MAX_QUBITS,
            SimulationMethod::Automatic | SimulationMethod::Statevector => STATEVECTOR_MAX_QUBITS,
        }
    }

    /// Resolve `Automatic` for a register size
    pub fn resolve(&self, num_qubits: usize) -> QmemResult<SimulationMethod> {
        let method = match self {
            SimulationMethod::Automatic if num_qubits <= DENSITY_MATRIX_MAX_QUBITS => {
                SimulationMethod::DensityMatrix
            }
            SimulationMethod::Automatic => SimulationMethod::Statevector,
            explicit => *explicit,
        };

        if num_qubits > method.max_qubits() {
            return Err(QmemError::SimulationTooLarge {
                method: method.to_string(),
                qubits: num_qubits,
                max: method.max_qubits(),
            });
        }
        Ok(method)
    }
}

impl fmt::Display for SimulationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SimulationMethod::Automatic => "automatic",
            SimulationMethod::DensityMatrix => "density_matrix",
            SimulationMethod::Statevector => "statevector",
        };
        write!(f, "{}", name)
    }
}

/// Simulator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Simulation method
    pub method: SimulationMethod,

    /// RNG seed; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl SimulatorConfig {
    /// Set simulation method
    pub fn with_method(mut self, method: SimulationMethod) -> Self {
        self.method = method;
        self
    }

    /// Set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

// ============================================================================
// Simulator Backend
// ============================================================================

/// Simulator backend with noise model
/// Gantree: SimulatorBackend // 시뮬레이터 구현
#[derive(Debug, Clone)]
pub struct SimulatorBackend {
    /// Backend name
    name: String,

    /// Noise model
    noise_model: NoiseModel,

    /// Method and seed
    config: SimulatorConfig,
}

impl SimulatorBackend {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create new simulator backend
    pub fn new(noise_model: NoiseModel) -> Self {
        Self {
            name: "qmem_simulator".to_string(),
            noise_model,
            config: SimulatorConfig::default(),
        }
    }

    /// Create ideal (noiseless) simulator
    pub fn ideal() -> Self {
        Self::new(NoiseModel::ideal())
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: SimulatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set simulation method
    pub fn with_method(mut self, method: SimulationMethod) -> Self {
        self.config.method = method;
        self
    }

    /// Set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Noise model
    pub fn noise_model(&self) -> &NoiseModel {
        &self.noise_model
    }

    /// Configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn validate(&self, circuit: &Circuit, shots: u64) -> QmemResult<SimulationMethod> {
        if circuit.num_qubits() == 0 {
            return Err(QmemError::EmptyCircuit);
        }
        if shots == 0 {
            return Err(QmemError::InvalidShots(0));
        }
        let method = self.config.method.resolve(circuit.num_qubits())?;
        if let Some(qubit) = circuit.first_mid_circuit_measurement() {
            return Err(QmemError::BackendError(format!(
                "qubit {} is operated on after measurement; only terminal measurements are supported",
                qubit
            )));
        }
        Ok(method)
    }

    /// Noise channels that follow a gate, with identity channels dropped
    fn noise_after<'a>(&'a self, gate: &Gate) -> impl Iterator<Item = &'a QuantumError> + 'a {
        self.noise_model
            .errors_for(gate.name())
            .iter()
            .filter(|e| !e.is_identity())
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Evolve `ρ` once through the circuit
    fn evolve_density_matrix(&self, circuit: &Circuit) -> QmemResult<DensityMatrix> {
        let mut rho = DensityMatrix::new(circuit.num_qubits());

        for gate in circuit.gates() {
            let Some(unitary) = gate_unitary(gate) else {
                continue;
            };
            for qubit in gate.qubits() {
                rho.apply_unitary(qubit, &unitary)?;
                for error in self.noise_after(gate) {
                    rho.apply_kraus(qubit, error.kraus_operators())?;
                }
            }
        }

        Ok(rho)
    }

    /// Sample all shots from one exact distribution
    fn simulate_density_matrix(
        &self,
        circuit: &Circuit,
        shots: u64,
        rng: &mut StdRng,
    ) -> QmemResult<Counts> {
        let rho = self.evolve_density_matrix(circuit)?;
        let marginal = marginalize(&rho.probabilities(), measured_mask(circuit));
        let dist = WeightedIndex::new(&marginal)
            .map_err(|e| QmemError::InternalError(format!("invalid distribution: {}", e)))?;

        let mut counts: Counts = HashMap::new();
        for _ in 0..shots {
            let outcome = dist.sample(rng);
            *counts
                .entry(format_bitstring(outcome, circuit.num_clbits()))
                .or_insert(0) += 1;
        }
        Ok(counts)
    }

    /// Run one trajectory per shot
    fn simulate_statevector(
        &self,
        circuit: &Circuit,
        shots: u64,
        rng: &mut StdRng,
    ) -> QmemResult<Counts> {
        let mask = measured_mask(circuit);
        let mut counts: Counts = HashMap::new();

        for _ in 0..shots {
            let mut psi = Statevector::new(circuit.num_qubits());
            for gate in circuit.gates() {
                let Some(unitary) = gate_unitary(gate) else {
                    continue;
                };
                for qubit in gate.qubits() {
                    psi.apply_operator(qubit, &unitary)?;
                    for error in self.noise_after(gate) {
                        psi.apply_kraus_trajectory(qubit, error.kraus_operators(), rng)?;
                    }
                }
            }

            let dist = WeightedIndex::new(psi.probabilities())
                .map_err(|e| QmemError::InternalError(format!("invalid distribution: {}", e)))?;
            let outcome = dist.sample(rng) & mask;
            *counts
                .entry(format_bitstring(outcome, circuit.num_clbits()))
                .or_insert(0) += 1;
        }
        Ok(counts)
    }
}

impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_qubits(&self) -> usize {
        self.config.method.max_qubits()
    }

    fn execute(&self, circuit: &Circuit, shots: u64) -> QmemResult<ExecutionResult> {
        let method = self.validate(circuit, shots)?;
        log::debug!(
            "simulating {} qubits, {} shots with {} method",
            circuit.num_qubits(),
            shots,
            method
        );

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let start = Instant::now();
        let counts = match method {
            SimulationMethod::Statevector => self.simulate_statevector(circuit, shots, &mut rng)?,
            _ => self.simulate_density_matrix(circuit, shots, &mut rng)?,
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;
        log::info!("simulation finished in {} ms", elapsed_ms);

        Ok(ExecutionResult {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: self.name.clone(),
                method: method.to_string(),
                execution_time_ms: Some(elapsed_ms),
                simulated: true,
                seed: self.config.seed,
                ..Default::default()
            },
        })
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Single-qubit unitary of a gate; `None` for measurements
fn gate_unitary(gate: &Gate) -> Option<KrausOperator> {
    match gate {
        Gate::H(_) => {
            let s = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
            Some(KrausOperator::new([s, s, s, -s]))
        }
        Gate::X(_) => Some(KrausOperator::pauli_x()),
        Gate::Y(_) => Some(KrausOperator::pauli_y()),
        Gate::Z(_) => Some(KrausOperator::pauli_z()),
        Gate::Measure(_) | Gate::MeasureAll => None,
    }
}

/// Bit mask of measured qubits; qubit `q` writes clbit `q`
fn measured_mask(circuit: &Circuit) -> usize {
    circuit
        .measured_qubits()
        .iter()
        .enumerate()
        .filter(|(_, measured)| **measured)
        .fold(0, |mask, (q, _)| mask | (1 << q))
}

/// Fold basis-state probabilities onto classical register values
fn marginalize(probabilities: &[f64], mask: usize) -> Vec<f64> {
    let mut marginal = vec![0.0; probabilities.len()];
    for (index, &p) in probabilities.iter().enumerate() {
        marginal[index & mask] += p;
    }
    marginal
}

// ============================================================================
// Tests
// ============================================================================
