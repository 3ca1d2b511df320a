//! # QMEM CLI
//!
//! Interactive quantum memory demo: collect five parameters, build a
//! superposition circuit and a decoherence noise model, simulate, then
//! print and chart the counts.
//!
//! ## Gantree Architecture
//!
//! ```text
//! qmem_cli // L7: Integration (완료)
//!     AppConfig // 통합 설정 (완료)
//!         SimulationParameters, SimulatorConfig, PresenterConfig
//!     InputCollector // 입력 수집기 (완료)
//!         collect() - 5개 프롬프트, 첫 실패에서 중단
//!     Pipeline // 단계별 실행 (완료)
//!         set_parameters() → build() → simulate() → mark_presented() → finish()
//!     ResultPresenter // 결과 출력 (완료)
//!         print_counts(), show_chart(), print_observations()
//!     run() - 전체 실행
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qmem_cli::prelude::*;
//! use std::io::Cursor;
//!
//! let input = Cursor::new("1\n1000\n0.0\n1e9\n0.1\n");
//! let mut output = Vec::new();
//! let config = AppConfig::default().with_seed(42).with_wait_for_close(false);
//!
//! let outcome = run(input, &mut output, &config).unwrap();
//! assert!(outcome.is_completed());
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Configuration (Gantree: L7_Integration → AppConfig)
pub mod config;

/// Input collection (Gantree: L7_Integration → InputCollector)
pub mod input;

/// Pipeline (Gantree: L7_Integration → Pipeline)
pub mod pipeline;

/// Result presentation (Gantree: L7_Integration → ResultPresenter)
pub mod presenter;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{AppConfig, PresenterConfig, SimulationParameters};
pub use input::{InputCollector, InputError, INVALID_INPUT_MESSAGE};
pub use pipeline::{build_memory_circuit, build_noise_model, Pipeline, PipelineStage};
pub use presenter::{format_counts, BarChart, ChartWindow, ResultPresenter};

use anyhow::{anyhow, Context};
use qmem_backend::ExecutionResult;
use std::io::{BufRead, Write};

// ============================================================================
// Run
// ============================================================================

/// Outcome of one interactive run
#[derive(Debug)]
pub enum RunOutcome {
    /// Simulation ran and results were presented
    Completed(ExecutionResult),

    /// A parameter failed to parse; nothing was built
    InvalidInput,
}

impl RunOutcome {
    /// Check if the run went through every stage
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }
}

/// Run the demo against the given console handles
/// Gantree: run(input, output, config) -> Result<RunOutcome> // 전체 실행
pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    config: &AppConfig,
) -> anyhow::Result<RunOutcome> {
    config.validate().map_err(|e| anyhow!("invalid configuration: {}", e))?;
    let mut pipeline = Pipeline::new(config.clone());

    writeln!(output, "\n🧠 Quantum Memory Simulation 🧠")?;
    writeln!(output, "{}", "-".repeat(44))?;

    let collected = InputCollector::new(&mut input, &mut output).collect();
    let params = match collected {
        Ok(params) => params,
        Err(InputError::Invalid { field, value }) => {
            log::debug!("rejected {:?} for {}", value, field);
            writeln!(output, "{}", INVALID_INPUT_MESSAGE)?;
            return Ok(RunOutcome::InvalidInput);
        }
        Err(e) => return Err(e).context("failed to read simulation parameters"),
    };
    pipeline.set_parameters(params)?;

    writeln!(output, "\n🔧 Building the Quantum Circuit...")?;
    pipeline.build()?;

    writeln!(output, "\n🚀 Running Simulation... Please wait...")?;
    output.flush()?;
    let result = pipeline.simulate()?.clone();

    writeln!(output, "\n✅ Simulation Complete!")?;
    let presenter = ResultPresenter::new(&config.presenter);
    let counts = result.sorted_counts();
    presenter.print_counts(&mut output, &counts)?;
    presenter
        .show_chart(&mut input, &mut output, &counts)
        .context("failed to display chart")?;
    pipeline.mark_presented()?;

    presenter.print_observations(&mut output)?;
    writeln!(output, "\nSimulation finished successfully ✅")?;
    output.flush()?;
    pipeline.finish()?;

    Ok(RunOutcome::Completed(result))
}

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qmem_cli::prelude::*;
    //! ```

    pub use crate::config::{AppConfig, PresenterConfig, SimulationParameters};
    pub use crate::input::{InputCollector, InputError};
    pub use crate::pipeline::{Pipeline, PipelineStage};
    pub use crate::presenter::ResultPresenter;
    pub use crate::{run, RunOutcome};
}

// ============================================================================
// Integration Tests
// ============================================================================
