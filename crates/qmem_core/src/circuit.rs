//! Quantum circuit structure for QMEM
//!
//! Gantree: L1_Circuit → Circuit
//!
//! Ordered gate list over a quantum register and a classical register
//! of the same width.

use crate::error::{QmemError, QmemResult};
use crate::gate::Gate;
use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum circuit
/// Gantree: Circuit // 회로 구조체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits
    /// Gantree: num_qubits: usize // 큐비트 수
    num_qubits: usize,

    /// Number of classical bits
    num_clbits: usize,

    /// Gate sequence
    /// Gantree: gates: Vec<Gate> // 게이트 목록
    gates: Vec<Gate>,

    /// Optional circuit name
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit with `num_qubits` qubits and as many
    /// classical bits
    /// Gantree: new(n) -> Self // 생성자
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            num_clbits: num_qubits,
            gates: Vec::new(),
            name: None,
        }
    }

    /// Create a circuit with a name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(num_qubits)
        }
    }

    /// Create from a vector of gates
    pub fn from_gates(num_qubits: usize, gates: Vec<Gate>) -> QmemResult<Self> {
        let mut circuit = Self::new(num_qubits);
        circuit.add_gates(gates)?;
        Ok(circuit)
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Add a gate to the circuit
    /// Gantree: add_gate(&mut, Gate) -> Result // 게이트 추가
    pub fn add_gate(&mut self, gate: Gate) -> QmemResult<()> {
        for &qubit in &gate.qubits() {
            if qubit >= self.num_qubits {
                return Err(QmemError::GateQubitMismatch {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }
        self.gates.push(gate);
        Ok(())
    }

    /// Add multiple gates
    pub fn add_gates(&mut self, gates: impl IntoIterator<Item = Gate>) -> QmemResult<()> {
        for gate in gates {
            self.add_gate(gate)?;
        }
        Ok(())
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get number of classical bits
    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    /// Get gates
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    // ========================================================================
    // Circuit Analysis
    // ========================================================================

    /// Calculate circuit depth (longest path)
    /// Gantree: depth(&self) -> usize // 깊이 계산
    pub fn depth(&self) -> usize {
        let mut qubit_depths = vec![0usize; self.num_qubits];

        for gate in &self.gates {
            let qubits = gate.qubits();
            if qubits.is_empty() {
                // MeasureAll spans the register
                let max_depth = qubit_depths.iter().copied().max().unwrap_or(0);
                qubit_depths.iter_mut().for_each(|d| *d = max_depth + 1);
            } else {
                for q in qubits {
                    qubit_depths[q] += 1;
                }
            }
        }

        qubit_depths.into_iter().max().unwrap_or(0)
    }

    /// Get total gate count
    /// Gantree: gate_count(&self) -> usize // 게이트 수
    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    /// Count single-qubit gates
    /// Gantree: count_1q(&self) -> usize // 1Q 수
    pub fn count_1q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_single_qubit()).count()
    }

    /// Count measurement operations
    pub fn count_measurements(&self) -> usize {
        self.gates.iter().filter(|g| g.is_measurement()).count()
    }

    /// Count occurrences of a named instruction
    pub fn count_named(&self, name: &str) -> usize {
        self.gates.iter().filter(|g| g.name() == name).count()
    }

    /// Per-qubit flag: is the qubit measured anywhere in the circuit
    pub fn measured_qubits(&self) -> Vec<bool> {
        let mut measured = vec![false; self.num_qubits];
        for gate in &self.gates {
            match gate {
                Gate::MeasureAll => measured.iter_mut().for_each(|m| *m = true),
                Gate::Measure(q) => measured[*q] = true,
                _ => {}
            }
        }
        measured
    }

    /// First qubit that is acted on by a unitary after being measured
    ///
    /// Returns `None` when every measurement is terminal.
    pub fn first_mid_circuit_measurement(&self) -> Option<QubitId> {
        let mut measured = vec![false; self.num_qubits];
        for gate in &self.gates {
            match gate {
                Gate::MeasureAll => measured.iter_mut().for_each(|m| *m = true),
                Gate::Measure(q) => measured[*q] = true,
                _ => {
                    if let Some(&q) = gate.qubits().iter().find(|&&q| measured[q]) {
                        return Some(q);
                    }
                }
            }
        }
        None
    }

    // ========================================================================
    // QASM Conversion
    // ========================================================================

    /// Convert to OpenQASM 2.0 string
    /// Gantree: to_qasm(&self) -> String // QASM2 출력
    pub fn to_qasm(&self) -> String {
        let mut lines = vec![
            "OPENQASM 2.0;".to_string(),
            "include \"qelib1.inc\";".to_string(),
            String::new(),
            format!("qreg q[{}];", self.num_qubits),
            format!("creg c[{}];", self.num_clbits),
            String::new(),
        ];

        lines.extend(self.gates.iter().map(Gate::to_qasm));

        lines.join("\n")
    }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({} qubits, {} clbits, {} gates)",
            self.num_qubits,
            self.num_clbits,
            self.gates.len()
        )?;
        writeln!(f, "  Depth: {}", self.depth())?;
        writeln!(f, "  1Q gates: {}", self.count_1q())?;
        writeln!(f, "  Measurements: {}", self.count_measurements())?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_new() {
        let circuit = Circuit::new(5);
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.num_clbits(), 5);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_add_gate() {
        let mut circuit = Circuit::new(3);
        assert!(circuit.add_gate(Gate::H(0)).is_ok());
        assert!(circuit.add_gate(Gate::X(2)).is_ok());
        assert_eq!(circuit.gate_count(), 2);
    }

    #[test]
    fn test_add_gate_out_of_range() {
        let mut circuit = Circuit::new(3);
        assert_eq!(
            circuit.add_gate(Gate::H(5)),
            Err(QmemError::GateQubitMismatch {
                qubit: 5,
                num_qubits: 3
            })
        );
    }

    #[test]
    fn test_circuit_depth() {
        let circuit =
            Circuit::from_gates(3, vec![Gate::H(0), Gate::H(1), Gate::X(1), Gate::MeasureAll])
                .unwrap();

        // H(0) | H(1), X(1) -> 2, then MeasureAll -> 3
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_gate_counts() {
        let circuit =
            Circuit::from_gates(2, vec![Gate::H(0), Gate::H(1), Gate::Z(0), Gate::MeasureAll])
                .unwrap();

        assert_eq!(circuit.count_1q(), 3);
        assert_eq!(circuit.count_measurements(), 1);
        assert_eq!(circuit.count_named("h"), 2);
    }

    #[test]
    fn test_measured_qubits() {
        let circuit = Circuit::from_gates(3, vec![Gate::H(0), Gate::Measure(2)]).unwrap();
        assert_eq!(circuit.measured_qubits(), vec![false, false, true]);

        let all = Circuit::from_gates(2, vec![Gate::MeasureAll]).unwrap();
        assert_eq!(all.measured_qubits(), vec![true, true]);
    }

    #[test]
    fn test_mid_circuit_measurement() {
        let terminal = Circuit::from_gates(2, vec![Gate::H(0), Gate::MeasureAll]).unwrap();
        assert_eq!(terminal.first_mid_circuit_measurement(), None);

        let mid = Circuit::from_gates(2, vec![Gate::Measure(1), Gate::H(0), Gate::X(1)]).unwrap();
        assert_eq!(mid.first_mid_circuit_measurement(), Some(1));
    }

    #[test]
    fn test_to_qasm() {
        let circuit = Circuit::from_gates(2, vec![Gate::H(0), Gate::MeasureAll]).unwrap();

        let qasm = circuit.to_qasm();
        assert!(qasm.contains("OPENQASM 2.0"));
        assert!(qasm.contains("qreg q[2]"));
        assert!(qasm.contains("creg c[2]"));
        assert!(qasm.contains("h q[0]"));
        assert!(qasm.contains("measure q -> c;"));
    }
}
