//! Result presentation
//!
//! Gantree: L7_Integration → ResultPresenter
//!
//! Prints the counts mapping and draws it as a vertical bar chart inside a
//! terminal "window" that stays open until the user dismisses it.

use crate::config::PresenterConfig;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

/// Chart title
pub const CHART_TITLE: &str = "Quantum Memory Simulation Result";
/// Horizontal axis label
pub const X_LABEL: &str = "Measured State";
/// Vertical axis label
pub const Y_LABEL: &str = "Counts";

/// Interpretive guidance printed after the chart
pub const OBSERVATIONS: [&str; 2] = [
    "- If the distribution is close to 50-50, memory is stable.",
    "- If it's highly skewed, noise and decoherence have affected the memory.",
];

const MAGENTA: &str = "\x1b[35m";
const RESET: &str = "\x1b[0m";
const BAR: char = '█';

// ============================================================================
// Counts Formatting
// ============================================================================

/// Format counts as a literal mapping: `{'0': 511, '1': 489}`
pub fn format_counts(counts: &BTreeMap<&str, u64>) -> String {
    let entries: Vec<String> = counts
        .iter()
        .map(|(bitstring, count)| format!("'{}': {}", bitstring, count))
        .collect();
    format!("{{{}}}", entries.join(", "))
}

// ============================================================================
// Bar Chart
// ============================================================================

/// Vertical bar chart of counts per bitstring
/// Gantree: BarChart // 막대 그래프
#[derive(Debug, Clone)]
pub struct BarChart<'a> {
    bars: Vec<(&'a str, u64)>,
    height: usize,
    color: bool,
}

impl<'a> BarChart<'a> {
    /// Create a chart with one bar per key, in key order
    pub fn new(counts: &BTreeMap<&'a str, u64>, config: &PresenterConfig) -> Self {
        Self {
            bars: counts.iter().map(|(k, v)| (*k, *v)).collect(),
            height: config.chart_height.max(1),
            color: config.color,
        }
    }

    /// Number of filled rows for a count
    fn bar_rows(&self, count: u64, max: u64) -> usize {
        if max == 0 {
            return 0;
        }
        let rows = (count as f64 / max as f64 * self.height as f64).round() as usize;
        // Any non-zero count stays visible
        if count > 0 {
            rows.max(1)
        } else {
            rows
        }
    }

    /// Render the chart as text lines
    pub fn render(&self) -> Vec<String> {
        let max = self.bars.iter().map(|(_, c)| *c).max().unwrap_or(0);
        let label_width = max.to_string().len().max(Y_LABEL.len());
        let column_width = self
            .bars
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(1)
            .max(3);
        let plot_width = self.bars.len() * (column_width + 2) + 1;

        let mut lines = vec![
            center(CHART_TITLE, label_width + 2 + plot_width)
                .trim_end()
                .to_string(),
            String::new(),
            format!("{:>width$}", Y_LABEL, width = label_width),
        ];

        let rows: Vec<usize> = self.bars.iter().map(|(_, c)| self.bar_rows(*c, max)).collect();
        for row in (1..=self.height).rev() {
            let tick = if row == self.height {
                max.to_string()
            } else if row == (self.height + 1) / 2 && self.height > 2 {
                (max / 2).to_string()
            } else {
                String::new()
            };

            let mut line = format!("{:>width$} |", tick, width = label_width);
            for &filled in &rows {
                line.push(' ');
                if filled >= row {
                    let bar: String = std::iter::repeat(BAR).take(column_width).collect();
                    if self.color {
                        line.push_str(MAGENTA);
                        line.push_str(&bar);
                        line.push_str(RESET);
                    } else {
                        line.push_str(&bar);
                    }
                } else {
                    line.push_str(&" ".repeat(column_width));
                }
                line.push(' ');
            }
            lines.push(line.trim_end().to_string());
        }

        lines.push(format!(
            "{:>width$} +{}",
            0,
            "-".repeat(plot_width),
            width = label_width
        ));

        let mut keys = format!("{:>width$}  ", "", width = label_width);
        for (key, _) in &self.bars {
            keys.push(' ');
            keys.push_str(&center(key, column_width));
            keys.push(' ');
        }
        lines.push(keys.trim_end().to_string());
        let x_label = format!(
            "{:>width$}  {}",
            "",
            center(X_LABEL, plot_width),
            width = label_width
        );
        lines.push(x_label.trim_end().to_string());

        lines
    }
}

/// Center text in a field, padding right when uneven
fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - len - left))
}

// ============================================================================
// Chart Window
// ============================================================================

/// A chart display that is open for as long as the guard lives
///
/// Opening draws the window header; dropping draws the footer.
/// Gantree: ChartWindow // 차트 창 (scoped)
pub struct ChartWindow<'w, W: Write> {
    output: &'w mut W,
    width: usize,
}

impl<'w, W: Write> ChartWindow<'w, W> {
    /// Open a window with a titled header
    pub fn open(output: &'w mut W, title: &str) -> io::Result<Self> {
        let width = title.chars().count() + 8;
        writeln!(output)?;
        writeln!(output, "┌─── {} ───┐", title)?;
        log::debug!("chart window opened");
        Ok(Self { output, width })
    }

    /// Draw a chart into the window
    pub fn show(&mut self, chart: &BarChart<'_>) -> io::Result<()> {
        for line in chart.render() {
            writeln!(self.output, "{}", line)?;
        }
        self.output.flush()
    }

    /// Block until the user dismisses the window (Enter or end of input)
    pub fn wait_for_close<R: BufRead>(&mut self, input: &mut R) -> io::Result<()> {
        write!(self.output, "(Press Enter to close the chart window)")?;
        self.output.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        writeln!(self.output)?;
        Ok(())
    }
}

impl<W: Write> Drop for ChartWindow<'_, W> {
    fn drop(&mut self) {
        // Drop cannot report write errors
        let _ = writeln!(self.output, "└{}┘", "─".repeat(self.width));
        let _ = self.output.flush();
        log::debug!("chart window closed");
    }
}

// ============================================================================
// Presenter
// ============================================================================

/// Prints counts, shows the chart and the guidance text
/// Gantree: ResultPresenter // 결과 출력
pub struct ResultPresenter<'c> {
    config: &'c PresenterConfig,
}

impl<'c> ResultPresenter<'c> {
    /// Create presenter
    pub fn new(config: &'c PresenterConfig) -> Self {
        Self { config }
    }

    /// Print the counts line
    pub fn print_counts<W: Write>(
        &self,
        output: &mut W,
        counts: &BTreeMap<&str, u64>,
    ) -> io::Result<()> {
        writeln!(output, "Measurement Counts: {}", format_counts(counts))
    }

    /// Show the chart and block until its window is dismissed
    pub fn show_chart<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
        counts: &BTreeMap<&str, u64>,
    ) -> io::Result<()> {
        let chart = BarChart::new(counts, self.config);
        let mut window = ChartWindow::open(output, CHART_TITLE)?;
        window.show(&chart)?;
        if self.config.wait_for_close {
            window.wait_for_close(input)?;
        }
        Ok(())
    }

    /// Print the observation block
    pub fn print_observations<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(output, "\n📊 Observation:")?;
        for line in OBSERVATIONS {
            writeln!(output, "{}", line)?;
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
    use std::io::Cursor;

    fn counts(entries: &[(&'static str, u64)]) -> BTreeMap<&'static str, u64> {
        entries.iter().copied().collect()
    }

    fn plain() -> PresenterConfig {
        PresenterConfig {
            chart_height: 4,
            color: false,
            wait_for_close: false,
        }
    }

    #[test]
    fn test_format_counts() {
        let c = counts(&[("1", 489), ("0", 511)]);
        assert_eq!(format_counts(&c), "{'0': 511, '1': 489}");
        assert_eq!(format_counts(&BTreeMap::new()), "{}");
    }

    #[test]
    fn test_chart_labels() {
        let c = counts(&[("00", 150), ("01", 100), ("10", 100), ("11", 150)]);
        let lines = BarChart::new(&c, &plain()).render();
        let text = lines.join("\n");

        assert!(lines[0].contains(CHART_TITLE));
        assert!(text.contains(Y_LABEL));
        assert!(text.contains(X_LABEL));
        assert!(text.contains("150"));
        for key in ["00", "01", "10", "11"] {
            assert!(text.contains(key));
        }
        assert!(!text.contains(MAGENTA));
    }

    #[test]
    fn test_bar_heights() {
        let c = counts(&[("0", 100), ("1", 50)]);
        let chart = BarChart::new(&c, &plain());
        assert_eq!(chart.bar_rows(100, 100), 4);
        assert_eq!(chart.bar_rows(50, 100), 2);
        assert_eq!(chart.bar_rows(1, 100), 1);
        assert_eq!(chart.bar_rows(0, 100), 0);

        // Top row holds only the tallest bar
        let lines = chart.render();
        let top = &lines[3];
        assert_eq!(top.matches(BAR).count(), 3);
    }

    #[test]
    fn test_colored_bars() {
        let c = counts(&[("0", 10)]);
        let config = PresenterConfig {
            color: true,
            ..plain()
        };
        let text = BarChart::new(&c, &config).render().join("\n");
        assert!(text.contains(MAGENTA));
        assert!(text.contains(RESET));
    }

    #[test]
    fn test_window_waits_and_closes() {
        let c = counts(&[("0", 3), ("1", 2)]);
        let config = PresenterConfig {
            wait_for_close: true,
            ..plain()
        };
        let mut input = Cursor::new(b"\nleftover\n".to_vec());
        let mut output = Vec::new();

        ResultPresenter::new(&config)
            .show_chart(&mut input, &mut output, &c)
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("┌─── Quantum Memory Simulation Result ───┐"));
        assert!(text.contains("Press Enter"));
        assert!(text.trim_end().ends_with('┘'));

        // Exactly one line consumed
        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "leftover\n");
    }

    #[test]
    fn test_observations() {
        let config = plain();
        let mut output = Vec::new();
        ResultPresenter::new(&config)
            .print_observations(&mut output)
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("\n📊 Observation:\n"));
        assert!(text.contains(OBSERVATIONS[0]));
        assert!(text.contains(OBSERVATIONS[1]));
    }
}
