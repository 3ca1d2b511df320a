//! Interactive parameter collection
//!
//! Gantree: L7_Integration → InputCollector
//!
//! Prompts for the five simulation parameters in a fixed order and parses
//! each line as a number. The first value that does not parse stops
//! collection; no range checks happen here.

use crate::config::SimulationParameters;
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

/// Prompt for the qubit count
pub const PROMPT_QUBITS: &str = "Enter number of qubits (e.g., 1 or 2): ";
/// Prompt for the shot count
pub const PROMPT_SHOTS: &str = "Enter number of simulation shots (e.g., 1024): ";
/// Prompt for the depolarizing probability
pub const PROMPT_DEPOLARIZING: &str = "Enter depolarizing error probability (0.0 - 1.0): ";
/// Prompt for T1
pub const PROMPT_T1: &str = "Enter relaxation time (T1, in microseconds, e.g., 50): ";
/// Prompt for the gate time
pub const PROMPT_GATE_TIME: &str = "Enter gate time (in microseconds, e.g., 0.1): ";

/// Message shown for any value that fails to parse
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input! Please enter numeric values only.";

/// Input collection error
#[derive(Error, Debug)]
pub enum InputError {
    /// A line that is not a number of the expected kind
    #[error("invalid value {value:?} for {field}")]
    Invalid {
        /// Parameter being read
        field: &'static str,
        /// Offending text, trimmed
        value: String,
    },

    /// Input closed before every parameter was read
    #[error("input ended while reading {field}")]
    EndOfInput {
        /// Parameter being read
        field: &'static str,
    },

    /// Console I/O failure
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InputError {
    /// Check if this is the generic invalid-input case
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, InputError::Invalid { .. })
    }
}

/// Reads parameters from a console
/// Gantree: InputCollector<R, W> // 입력 수집기
pub struct InputCollector<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> InputCollector<R, W> {
    /// Create a collector over an input and an output handle
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prompt for and parse all five parameters, in order
    /// Gantree: collect(&mut) -> Result<SimulationParameters> // 5개 입력
    pub fn collect(&mut self) -> Result<SimulationParameters, InputError> {
        let qubit_count = self.read_value(PROMPT_QUBITS, "qubit count")?;
        let shot_count = self.read_value(PROMPT_SHOTS, "shot count")?;
        let depolarizing_probability =
            self.read_value(PROMPT_DEPOLARIZING, "depolarizing probability")?;
        let relaxation_time_t1 = self.read_value(PROMPT_T1, "relaxation time")?;
        let gate_time = self.read_value(PROMPT_GATE_TIME, "gate time")?;

        let params = SimulationParameters::new(
            qubit_count,
            shot_count,
            depolarizing_probability,
            relaxation_time_t1,
            gate_time,
        );
        log::debug!("collected {}", params);
        Ok(params)
    }

    /// Write a prompt and parse the next line
    pub fn read_value<T: FromStr>(
        &mut self,
        prompt: &str,
        field: &'static str,
    ) -> Result<T, InputError> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputError::EndOfInput { field });
        }

        let value = line.trim();
        value.parse().map_err(|_| InputError::Invalid {
            field,
            value: value.to_string(),
        })
    }

    /// Release the handles
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collect(text: &str) -> (Result<SimulationParameters, InputError>, String) {
        let mut collector = InputCollector::new(Cursor::new(text.as_bytes()), Vec::new());
        let result = collector.collect();
        let (_, output) = collector.into_inner();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_collect_all_parameters() {
        let (result, output) = collect("2\n500\n0.5\n10\n1\n");
        let params = result.unwrap();

        assert_eq!(params, SimulationParameters::new(2, 500, 0.5, 10.0, 1.0));
        let expected = [
            PROMPT_QUBITS,
            PROMPT_SHOTS,
            PROMPT_DEPOLARIZING,
            PROMPT_T1,
            PROMPT_GATE_TIME,
        ]
        .concat();
        assert_eq!(output, expected);
    }

    #[test]
    fn test_whitespace_and_exponents() {
        let (result, _) = collect("  1 \n1000\n0.0\n1e9\n0.1\n");
        let params = result.unwrap();
        assert_eq!(params.qubit_count, 1);
        assert_eq!(params.relaxation_time_t1, 1e9);
    }

    #[test]
    fn test_stops_at_first_invalid_value() {
        let (result, output) = collect("1\nabc\n0.1\n50\n0.1\n");

        match result {
            Err(InputError::Invalid { field, value }) => {
                assert_eq!(field, "shot count");
                assert_eq!(value, "abc");
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
        // No prompt after the failing one
        assert!(!output.contains(PROMPT_DEPOLARIZING));
    }

    #[test]
    fn test_integer_fields_reject_reals() {
        let (result, _) = collect("1.5\n");
        assert!(result.unwrap_err().is_invalid_value());
    }

    #[test]
    fn test_negative_values_parse() {
        let (result, _) = collect("-1\n-10\n-0.5\n-50\n-0.1\n");
        let params = result.unwrap();
        assert_eq!(params.qubit_count, -1);
        assert_eq!(params.gate_time, -0.1);
    }

    #[test]
    fn test_end_of_input() {
        let (result, _) = collect("1\n1000\n");
        assert!(matches!(
            result,
            Err(InputError::EndOfInput {
                field: "depolarizing probability"
            })
        ));
    }
}
