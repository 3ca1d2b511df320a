//! Pipeline for staged memory simulation
//!
//! Gantree: L7_Integration → Pipeline
//!
//! Linear stages from collected parameters to a simulation result. Each
//! stage may only run once its predecessor has completed.

use crate::config::{AppConfig, SimulationParameters};
use qmem_backend::{Backend, ExecutionResult, SimulatorBackend};
use qmem_core::gates::MEMORY_NOISE_GATES;
use qmem_core::{Circuit, CircuitBuilder, QmemError, QmemResult};
use qmem_noise::{depolarizing_error, thermal_relaxation_error, NoiseModel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PipelineStage {
    /// Nothing done yet
    NotStarted,
    /// The five parameters are known
    ParametersCollected,
    /// Circuit and noise model constructed
    CircuitAndNoiseBuilt,
    /// Counts available
    Simulated,
    /// Counts printed and charted
    Presented,
    /// Guidance printed
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// Builders
// ============================================================================

/// Circuit with H on every qubit, in index order, then a full measurement
/// Gantree: build_memory_circuit(n) -> Circuit // 메모리 회로
pub fn build_memory_circuit(num_qubits: usize) -> Circuit {
    CircuitBuilder::with_name(num_qubits, "quantum_memory")
        .superposition_memory()
        .build()
}

/// Depolarizing and thermal-relaxation errors (T2 = T1) on h, x, y and z
///
/// Parameter ranges are checked by the channel constructors.
/// Gantree: build_noise_model(p, t1, tg) -> Result<NoiseModel> // 노이즈 모델
pub fn build_noise_model(
    depolarizing_probability: f64,
    relaxation_time_t1: f64,
    gate_time: f64,
) -> QmemResult<NoiseModel> {
    let depol = depolarizing_error(depolarizing_probability, 1)?;
    let relax = thermal_relaxation_error(relaxation_time_t1, relaxation_time_t1, gate_time)?;

    let mut model = NoiseModel::new();
    model.add_all_qubit_quantum_error(depol, &MEMORY_NOISE_GATES)?;
    model.add_all_qubit_quantum_error(relax, &MEMORY_NOISE_GATES)?;
    Ok(model)
}

// ============================================================================
// Pipeline
// ============================================================================

/// Staged memory simulation
/// Gantree: Pipeline // 단계별 실행
pub struct Pipeline {
    stage: PipelineStage,
    config: AppConfig,
    params: Option<SimulationParameters>,
    circuit: Option<Circuit>,
    noise_model: Option<NoiseModel>,
    result: Option<ExecutionResult>,
}

impl Pipeline {
    /// Create new pipeline with configuration
    pub fn new(config: AppConfig) -> Self {
        Self {
            stage: PipelineStage::NotStarted,
            config,
            params: None,
            circuit: None,
            noise_model: None,
            result: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get current stage
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Collected parameters
    pub fn params(&self) -> Option<&SimulationParameters> {
        self.params.as_ref()
    }

    /// Built circuit
    pub fn circuit(&self) -> Option<&Circuit> {
        self.circuit.as_ref()
    }

    /// Built noise model
    pub fn noise_model(&self) -> Option<&NoiseModel> {
        self.noise_model.as_ref()
    }

    /// Simulation result
    pub fn result(&self) -> Option<&ExecutionResult> {
        self.result.as_ref()
    }

    fn expect_stage(&self, expected: PipelineStage) -> QmemResult<()> {
        if self.stage != expected {
            return Err(QmemError::InternalError(format!(
                "pipeline is at {}, expected {}",
                self.stage, expected
            )));
        }
        Ok(())
    }

    fn advance(&mut self, next: PipelineStage) {
        log::info!("pipeline: {} -> {}", self.stage, next);
        self.stage = next;
    }

    // ========================================================================
    // Pipeline Stages
    // ========================================================================

    /// Stage 1: record the collected parameters
    pub fn set_parameters(&mut self, params: SimulationParameters) -> QmemResult<()> {
        self.expect_stage(PipelineStage::NotStarted)?;
        self.params = Some(params);
        self.advance(PipelineStage::ParametersCollected);
        Ok(())
    }

    /// Stage 2: build the circuit and the noise model
    pub fn build(&mut self) -> QmemResult<()> {
        self.expect_stage(PipelineStage::ParametersCollected)?;
        let params = self
            .params
            .ok_or_else(|| QmemError::InternalError("parameters missing".to_string()))?;

        let num_qubits = params.qubits()?;
        self.config.simulator.method.resolve(num_qubits)?;

        let circuit = build_memory_circuit(num_qubits);
        let noise_model = build_noise_model(
            params.depolarizing_probability,
            params.relaxation_time_t1,
            params.gate_time,
        )?;
        log::debug!("circuit:\n{}", circuit);
        log::debug!("{}", noise_model);

        self.circuit = Some(circuit);
        self.noise_model = Some(noise_model);
        self.advance(PipelineStage::CircuitAndNoiseBuilt);
        Ok(())
    }

    /// Stage 3: run the simulator
    pub fn simulate(&mut self) -> QmemResult<&ExecutionResult> {
        self.expect_stage(PipelineStage::CircuitAndNoiseBuilt)?;
        let (Some(params), Some(circuit), Some(noise_model)) =
            (self.params, self.circuit.as_ref(), self.noise_model.as_ref())
        else {
            return Err(QmemError::InternalError(
                "circuit or noise model missing".to_string(),
            ));
        };

        let shots = params.shots()?;
        let backend =
            SimulatorBackend::new(noise_model.clone()).with_config(self.config.simulator.clone());
        let result = backend.execute(circuit, shots)?;
        log::info!("{}", result);

        self.advance(PipelineStage::Simulated);
        Ok(self.result.insert(result))
    }

    /// Stage 4: counts have been printed and charted
    pub fn mark_presented(&mut self) -> QmemResult<()> {
        self.expect_stage(PipelineStage::Simulated)?;
        self.advance(PipelineStage::Presented);
        Ok(())
    }

    /// Stage 5: guidance printed, pipeline complete
    pub fn finish(&mut self) -> QmemResult<()> {
        self.expect_stage(PipelineStage::Presented)?;
        self.advance(PipelineStage::Done);
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qmem_core::Gate;

    #[test]
    fn test_memory_circuit() {
        let circuit = build_memory_circuit(3);
        assert_eq!(
            circuit.gates(),
            &[Gate::H(0), Gate::H(1), Gate::H(2), Gate::MeasureAll]
        );
        assert_eq!(circuit.num_clbits(), 3);
    }

    #[test]
    fn test_noise_model_shape() {
        let model = build_noise_model(0.01, 50.0, 0.1).unwrap();
        assert_eq!(model.num_errors(), 2);
        assert_eq!(model.noise_instructions(), MEMORY_NOISE_GATES.to_vec());
        for gate in MEMORY_NOISE_GATES {
            let names: Vec<_> = model.errors_for(gate).iter().map(|e| e.name()).collect();
            assert_eq!(names, vec!["depolarizing_error", "thermal_relaxation_error"]);
        }
    }

    #[test]
    fn test_noise_model_rejects_out_of_range() {
        assert!(matches!(
            build_noise_model(1.5, 50.0, 0.1),
            Err(QmemError::InvalidDepolarizingParameter { .. })
        ));
        assert!(matches!(
            build_noise_model(0.1, 0.0, 0.1),
            Err(QmemError::InvalidRelaxationTime { .. })
        ));
        assert!(matches!(
            build_noise_model(0.1, 50.0, -1.0),
            Err(QmemError::InvalidGateTime(_))
        ));
    }

    #[test]
    fn test_oversized_register_rejected_before_build() {
        let mut pipeline = Pipeline::new(AppConfig::default().with_seed(1));
        pipeline
            .set_parameters(SimulationParameters::new(10_000_000_000, 100, 0.0, 50.0, 0.1))
            .unwrap();

        assert!(matches!(
            pipeline.build(),
            Err(QmemError::SimulationTooLarge { max: 20, .. })
        ));
        assert!(pipeline.circuit().is_none());
        assert_eq!(pipeline.stage(), PipelineStage::ParametersCollected);
    }

    #[test]
    fn test_stages_in_order() {
        let mut pipeline = Pipeline::new(AppConfig::default().with_seed(1));
        assert_eq!(pipeline.stage(), PipelineStage::NotStarted);

        pipeline
            .set_parameters(SimulationParameters::new(1, 100, 0.0, 1e9, 0.1))
            .unwrap();
        pipeline.build().unwrap();
        assert!(pipeline.circuit().is_some());
        assert!(pipeline.noise_model().is_some());

        let total = pipeline.simulate().unwrap().total_counts();
        assert_eq!(total, 100);

        pipeline.mark_presented().unwrap();
        pipeline.finish().unwrap();
        assert_eq!(pipeline.stage(), PipelineStage::Done);
    }

    #[test]
    fn test_out_of_order_stage_rejected() {
        let mut pipeline = Pipeline::new(AppConfig::default());
        assert!(pipeline.build().is_err());
        assert!(pipeline.simulate().is_err());
        assert_eq!(pipeline.stage(), PipelineStage::NotStarted);
    }

    #[test]
    fn test_invalid_counts_propagate() {
        let mut pipeline = Pipeline::new(AppConfig::default());
        pipeline
            .set_parameters(SimulationParameters::new(-2, 100, 0.0, 10.0, 0.1))
            .unwrap();
        assert_eq!(pipeline.build(), Err(QmemError::InvalidQubitCount(-2)));

        let mut pipeline = Pipeline::new(AppConfig::default());
        pipeline
            .set_parameters(SimulationParameters::new(1, 0, 0.0, 10.0, 0.1))
            .unwrap();
        pipeline.build().unwrap();
        assert!(matches!(pipeline.simulate(), Err(QmemError::InvalidShots(0))));
    }

    #[test]
    fn test_zero_qubits_rejected_by_simulator() {
        let mut pipeline = Pipeline::new(AppConfig::default());
        pipeline
            .set_parameters(SimulationParameters::new(0, 10, 0.0, 10.0, 0.1))
            .unwrap();
        pipeline.build().unwrap();
        assert!(matches!(pipeline.simulate(), Err(QmemError::EmptyCircuit)));
    }
}
