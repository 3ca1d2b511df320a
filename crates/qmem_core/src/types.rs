//! Core types for QMEM
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Type aliases and the outcome-to-bitstring convention shared by
//! circuits, simulators and presenters.

use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed)
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

/// Measurement counts: bitstring -> count
/// Gantree: Counts // pub type Counts = HashMap<String, u64>
pub type Counts = HashMap<String, u64>;

// ============================================================================
// Bitstring Formatting
// ============================================================================

/// Format a classical register value as a bitstring
///
/// Bit 0 is the rightmost character, matching the little-endian layout
/// of the simulator's basis-state index.
pub fn format_bitstring(value: usize, num_clbits: usize) -> String {
    if num_clbits == 0 {
        return String::new();
    }
    format!("{:0width$b}", value, width = num_clbits)
}

// ============================================================================
// Tests
// ============================================================================
