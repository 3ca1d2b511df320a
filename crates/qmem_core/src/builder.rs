//! Circuit builder for QMEM
//!
//! Gantree: L1_Circuit → CircuitBuilder
//!
//! Fluent builder for the memory circuits.

use crate::circuit::Circuit;
use crate::error::{QmemError, QmemResult};
use crate::gate::Gate;
use crate::types::QubitId;

/// Fluent circuit builder (consuming self pattern)
/// Gantree: CircuitBuilder // 빌더 패턴
pub struct CircuitBuilder {
    /// Internal circuit being built
    /// Gantree: circuit: Circuit // 내부 회로
    circuit: Circuit,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder
    /// Gantree: new(n) -> Self // 생성자
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
        }
    }

    /// Create with circuit name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::with_name(num_qubits, name),
        }
    }

    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================

    /// Add Hadamard gate
    /// Gantree: h(self, q) -> Self // H 추가
    pub fn h(mut self, qubit: QubitId) -> Self {
        let _ = self.circuit.add_gate(Gate::H(qubit));
        self
    }

    /// Add Pauli-X gate
    pub fn x(mut self, qubit: QubitId) -> Self {
        let _ = self.circuit.add_gate(Gate::X(qubit));
        self
    }

    /// Add Pauli-Y gate
    pub fn y(mut self, qubit: QubitId) -> Self {
        let _ = self.circuit.add_gate(Gate::Y(qubit));
        self
    }

    /// Add Pauli-Z gate
    pub fn z(mut self, qubit: QubitId) -> Self {
        let _ = self.circuit.add_gate(Gate::Z(qubit));
        self
    }

    // ========================================================================
    // Measurement
    // ========================================================================

    /// Add measurement on single qubit
    /// Gantree: measure(self, q) -> Self // 측정 추가
    pub fn measure(mut self, qubit: QubitId) -> Self {
        let _ = self.circuit.add_gate(Gate::Measure(qubit));
        self
    }

    /// Add measurement on all qubits
    /// Gantree: measure_all(self) -> Self // 전체 측정
    pub fn measure_all(mut self) -> Self {
        let _ = self.circuit.add_gate(Gate::MeasureAll);
        self
    }

    // ========================================================================
    // Layer Operations
    // ========================================================================

    /// Add Hadamard layer on all qubits, in index order
    pub fn h_layer(mut self) -> Self {
        for i in 0..self.circuit.num_qubits() {
            let _ = self.circuit.add_gate(Gate::H(i));
        }
        self
    }

    /// Equal superposition of every qubit followed by a full measurement
    ///
    /// Structure:
    /// 1. H on qubits 0..n-1
    /// 2. Measure all qubits into their classical bits
    pub fn superposition_memory(self) -> Self {
        self.h_layer().measure_all()
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build and return the circuit
    /// Gantree: build(self) -> Circuit // 빌드
    pub fn build(self) -> Circuit {
        self.circuit
    }

    /// Build, rejecting a circuit without qubits
    pub fn build_validated(self) -> QmemResult<Circuit> {
        if self.circuit.num_qubits() == 0 {
            return Err(QmemError::EmptyCircuit);
        }
        Ok(self.circuit)
    }

    /// Get reference to current circuit state
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let circuit = CircuitBuilder::new(2).h(0).x(1).measure_all().build();

        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.gate_count(), 3);
    }

    #[test]
    fn test_builder_ignores_out_of_range() {
        let circuit = CircuitBuilder::new(1).h(0).z(3).build();
        assert_eq!(circuit.gates(), &[Gate::H(0)]);
    }

    #[test]
    fn test_superposition_memory_shape() {
        for n in 1..=5 {
            let circuit = CircuitBuilder::new(n).superposition_memory().build();
            let gates = circuit.gates();

            assert_eq!(gates.len(), n + 1);
            for (i, gate) in gates[..n].iter().enumerate() {
                assert_eq!(gate, &Gate::H(i));
            }
            assert_eq!(gates[n], Gate::MeasureAll);
            assert_eq!(circuit.num_clbits(), n);
            assert!(circuit.measured_qubits().iter().all(|&m| m));
        }
    }

    #[test]
    fn test_build_validated_rejects_empty_register() {
        let result = CircuitBuilder::new(0).superposition_memory().build_validated();
        assert_eq!(result, Err(QmemError::EmptyCircuit));
    }

    #[test]
    fn test_builder_named() {
        let builder = CircuitBuilder::with_name(1, "memory").h(0);
        assert_eq!(builder.num_qubits(), 1);
        assert_eq!(builder.circuit().name(), Some("memory"));
    }
}
