//! Configuration for the quantum memory demo
//!
//! Gantree: L7_Integration → AppConfig
//!
//! The five user-supplied simulation parameters plus the in-code
//! configuration of the simulator and the result presenter.

use qmem_backend::SimulatorConfig;
use qmem_core::{QmemError, QmemResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Simulation Parameters
// ============================================================================

/// Parameters collected from the user, as parsed
///
/// Counts are signed; negative entries parse and are rejected by
/// [`qubits`](Self::qubits) and [`shots`](Self::shots).
/// Gantree: SimulationParameters // 사용자 입력
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Number of qubits
    pub qubit_count: i64,

    /// Number of simulation shots
    pub shot_count: i64,

    /// Depolarizing error probability
    pub depolarizing_probability: f64,

    /// T1 relaxation time (microseconds); T2 is taken equal to T1
    pub relaxation_time_t1: f64,

    /// Gate duration (microseconds)
    pub gate_time: f64,
}

impl SimulationParameters {
    /// Create parameters
    pub fn new(
        qubit_count: i64,
        shot_count: i64,
        depolarizing_probability: f64,
        relaxation_time_t1: f64,
        gate_time: f64,
    ) -> Self {
        Self {
            qubit_count,
            shot_count,
            depolarizing_probability,
            relaxation_time_t1,
            gate_time,
        }
    }

    /// Qubit count as a register size
    pub fn qubits(&self) -> QmemResult<usize> {
        usize::try_from(self.qubit_count).map_err(|_| QmemError::InvalidQubitCount(self.qubit_count))
    }

    /// Shot count as an execution count
    pub fn shots(&self) -> QmemResult<u64> {
        match u64::try_from(self.shot_count) {
            Ok(shots) if shots > 0 => Ok(shots),
            _ => Err(QmemError::InvalidShots(self.shot_count)),
        }
    }
}

impl fmt::Display for SimulationParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SimulationParameters(qubits={}, shots={}, p={}, T1={} us, Tg={} us)",
            self.qubit_count,
            self.shot_count,
            self.depolarizing_probability,
            self.relaxation_time_t1,
            self.gate_time
        )
    }
}

// ============================================================================
// Presenter Configuration
// ============================================================================

/// Bar chart and window behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresenterConfig {
    /// Height of the tallest bar in terminal rows
    pub chart_height: usize,

    /// Colour bars with ANSI escapes
    pub color: bool,

    /// Block until the chart window is dismissed
    pub wait_for_close: bool,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            chart_height: 15,
            color: true,
            wait_for_close: true,
        }
    }
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Complete demo configuration
/// Gantree: AppConfig // 통합 설정
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulator method and seed
    pub simulator: SimulatorConfig,

    /// Result presentation
    pub presenter: PresenterConfig,
}

impl AppConfig {
    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set simulator configuration
    pub fn with_simulator(mut self, simulator: SimulatorConfig) -> Self {
        self.simulator = simulator;
        self
    }

    /// Set simulator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.simulator.seed = Some(seed);
        self
    }

    /// Set presenter configuration
    pub fn with_presenter(mut self, presenter: PresenterConfig) -> Self {
        self.presenter = presenter;
        self
    }

    /// Enable or disable coloured bars
    pub fn with_color(mut self, color: bool) -> Self {
        self.presenter.color = color;
        self
    }

    /// Enable or disable blocking on the chart window
    pub fn with_wait_for_close(mut self, wait: bool) -> Self {
        self.presenter.wait_for_close = wait;
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.presenter.chart_height == 0 {
            return Err("chart_height must be > 0".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use qmem_backend::SimulationMethod;

    #[test]
    fn test_parameter_conversion() {
        let params = SimulationParameters::new(2, 1024, 0.01, 50.0, 0.1);
        assert_eq!(params.qubits(), Ok(2));
        assert_eq!(params.shots(), Ok(1024));
    }

    #[test]
    fn test_parameter_rejections() {
        let params = SimulationParameters::new(-1, 0, 0.0, 1.0, 0.1);
        assert_eq!(params.qubits(), Err(QmemError::InvalidQubitCount(-1)));
        assert_eq!(params.shots(), Err(QmemError::InvalidShots(0)));

        let params = SimulationParameters::new(0, -5, 0.0, 1.0, 0.1);
        assert_eq!(params.qubits(), Ok(0));
        assert_eq!(params.shots(), Err(QmemError::InvalidShots(-5)));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.simulator.method, SimulationMethod::Automatic);
        assert_eq!(config.simulator.seed, None);
        assert!(config.presenter.wait_for_close);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = AppConfig::default()
            .with_seed(42)
            .with_color(false)
            .with_wait_for_close(false);

        assert_eq!(config.simulator.seed, Some(42));
        assert!(!config.presenter.color);
        assert!(!config.presenter.wait_for_close);
    }

    #[test]
    fn test_simulator_section() {
        let simulator = SimulatorConfig::default()
            .with_method(SimulationMethod::Statevector)
            .with_seed(9);
        let config = AppConfig::default().with_simulator(simulator);

        assert_eq!(config.simulator.method, SimulationMethod::Statevector);
        assert_eq!(config.simulator.seed, Some(9));
    }

    #[test]
    fn test_validation() {
        let config = AppConfig::default().with_presenter(PresenterConfig {
            chart_height: 0,
            ..Default::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = AppConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
        assert!(json.contains("\"automatic\""));
    }
}
