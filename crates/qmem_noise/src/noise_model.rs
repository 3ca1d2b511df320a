//! Noise model for QMEM
//!
//! Gantree: L2_Noise → NoiseModel
//!
//! Maps instruction names to the error channels applied after every
//! occurrence of that instruction, on whichever qubit it acts.

use crate::channels::QuantumError;
use qmem_core::{QmemError, QmemResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Gate noise model
/// Gantree: NoiseModel // 게이트 노이즈 모델
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseModel {
    /// Instruction name -> errors, applied in insertion order
    /// Gantree: all_qubit_errors: BTreeMap<String, Vec<QuantumError>> // 전체 큐비트 에러
    all_qubit_errors: BTreeMap<String, Vec<QuantumError>>,

    /// Number of `add_all_qubit_quantum_error` calls
    num_errors: usize,
}

impl NoiseModel {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an empty noise model
    /// Gantree: new() -> Self // 생성자
    pub fn new() -> Self {
        Self::default()
    }

    /// Create ideal (noiseless) model
    /// Gantree: ideal() -> Self // 이상적
    pub fn ideal() -> Self {
        Self::default()
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Attach `error` to every qubit for each named instruction
    ///
    /// An instruction that already carries errors composes the new one
    /// after the existing ones.
    /// Gantree: add_all_qubit_quantum_error(&mut, e, names) -> Result // 에러 추가
    pub fn add_all_qubit_quantum_error(
        &mut self,
        error: QuantumError,
        instructions: &[&str],
    ) -> QmemResult<()> {
        if instructions.is_empty() {
            return Err(QmemError::NoiseError(format!(
                "no instructions given for {}",
                error.name()
            )));
        }
        if let Some(blank) = instructions.iter().find(|name| name.trim().is_empty()) {
            return Err(QmemError::NoiseError(format!(
                "invalid instruction name '{}'",
                blank
            )));
        }

        for name in instructions {
            let errors = self.all_qubit_errors.entry(name.to_string()).or_default();
            if !errors.is_empty() {
                log::debug!(
                    "all-qubit error already exists for instruction \"{}\", composing {}",
                    name,
                    error.name()
                );
            }
            errors.push(error.clone());
        }

        self.num_errors += 1;
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Errors applied after the named instruction, in application order
    pub fn errors_for(&self, instruction: &str) -> &[QuantumError] {
        self.all_qubit_errors
            .get(instruction)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Instruction names that carry noise, sorted
    pub fn noise_instructions(&self) -> Vec<&str> {
        self.all_qubit_errors.keys().map(String::as_str).collect()
    }

    /// Number of distinct errors added
    pub fn num_errors(&self) -> usize {
        self.num_errors
    }

    /// Check if model has no effect on any instruction
    pub fn is_ideal(&self) -> bool {
        self.all_qubit_errors
            .values()
            .flatten()
            .all(QuantumError::is_identity)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> QmemResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for NoiseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ideal() {
            return write!(f, "NoiseModel: Ideal");
        }

        let names: Vec<String> = self
            .noise_instructions()
            .iter()
            .map(|name| format!("'{}'", name))
            .collect();
        writeln!(f, "NoiseModel:")?;
        writeln!(f, "  Instructions with noise: [{}]", names.join(", "))?;
        write!(f, "  All-qubits errors: {}", self.num_errors)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channels::{depolarizing_error, thermal_relaxation_error};

    #[test]
    fn test_noise_model_ideal() {
        let model = NoiseModel::ideal();
        assert!(model.is_ideal());
        assert_eq!(model.num_errors(), 0);
        assert!(model.errors_for("h").is_empty());
        assert_eq!(model.to_string(), "NoiseModel: Ideal");
    }

    #[test]
    fn test_add_all_qubit_error() {
        let mut model = NoiseModel::new();
        let error = depolarizing_error(0.1, 1).unwrap();
        model.add_all_qubit_quantum_error(error, &["h", "x"]).unwrap();

        assert_eq!(model.num_errors(), 1);
        assert_eq!(model.noise_instructions(), vec!["h", "x"]);
        assert_eq!(model.errors_for("h").len(), 1);
        assert!(model.errors_for("y").is_empty());
        assert!(!model.is_ideal());
    }

    #[test]
    fn test_composition_order() {
        let mut model = NoiseModel::new();
        model
            .add_all_qubit_quantum_error(depolarizing_error(0.1, 1).unwrap(), &["h"])
            .unwrap();
        model
            .add_all_qubit_quantum_error(thermal_relaxation_error(50.0, 50.0, 0.1).unwrap(), &["h"])
            .unwrap();

        let names: Vec<_> = model.errors_for("h").iter().map(QuantumError::name).collect();
        assert_eq!(names, vec!["depolarizing_error", "thermal_relaxation_error"]);
        assert_eq!(model.num_errors(), 2);
    }

    #[test]
    fn test_instruction_names_are_exact() {
        let mut model = NoiseModel::new();
        model
            .add_all_qubit_quantum_error(depolarizing_error(0.1, 1).unwrap(), &["H"])
            .unwrap();

        assert_eq!(model.noise_instructions(), vec!["H"]);
        assert_eq!(model.errors_for("H").len(), 1);
        assert!(model.errors_for("h").is_empty());
    }

    #[test]
    fn test_empty_instruction_list_rejected() {
        let mut model = NoiseModel::new();
        let error = depolarizing_error(0.1, 1).unwrap();
        assert!(matches!(
            model.add_all_qubit_quantum_error(error.clone(), &[]),
            Err(QmemError::NoiseError(_))
        ));
        assert!(model.add_all_qubit_quantum_error(error, &[" "]).is_err());
        assert_eq!(model.num_errors(), 0);
    }

    #[test]
    fn test_identity_errors_keep_model_ideal() {
        let mut model = NoiseModel::new();
        model
            .add_all_qubit_quantum_error(depolarizing_error(0.0, 1).unwrap(), &["h"])
            .unwrap();
        assert!(model.is_ideal());
        assert_eq!(model.num_errors(), 1);
    }

    #[test]
    fn test_display_and_json() {
        let mut model = NoiseModel::new();
        model
            .add_all_qubit_quantum_error(depolarizing_error(0.1, 1).unwrap(), &["z", "h"])
            .unwrap();

        let text = model.to_string();
        assert!(text.contains("['h', 'z']"));

        let json = model.to_json().unwrap();
        let back: NoiseModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back.noise_instructions(), vec!["h", "z"]);
    }
}
