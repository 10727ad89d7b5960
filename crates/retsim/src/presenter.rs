//! Renders simulation outcomes for the terminal

use std::io::Write;

use jiff::civil::Date;
use retsim_core::ensemble::EnsembleSummary;
use retsim_core::{Presenter, SimulationOutcome, ValidationError};
use serde::Serialize;

use crate::format::{format_percentage, format_value, month_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Writes each outcome in full to `out`, and validation errors to `err`
pub struct CliPresenter<W, E> {
    out: W,
    err: E,
    format: OutputFormat,
    show_table: bool,
    start: Option<Date>,
}

#[derive(Serialize)]
struct JsonOutcome<'a> {
    #[serde(flatten)]
    outcome: &'a SimulationOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    months: Option<Vec<String>>,
}

impl<W: Write, E: Write> CliPresenter<W, E> {
    pub fn new(out: W, err: E, format: OutputFormat) -> Self {
        Self {
            out,
            err,
            format,
            show_table: false,
            start: None,
        }
    }

    #[must_use]
    pub fn with_table(mut self, show_table: bool) -> Self {
        self.show_table = show_table;
        self
    }

    #[must_use]
    pub fn with_start(mut self, start: Option<Date>) -> Self {
        self.start = start;
        self
    }

    pub fn show_table(&self) -> bool {
        self.show_table
    }

    /// Show or hide the monthly table; returns the new state
    pub fn toggle_table(&mut self) -> bool {
        self.show_table = !self.show_table;
        self.show_table
    }

    pub fn into_writers(self) -> (W, E) {
        (self.out, self.err)
    }

    fn write_outcome(&mut self, outcome: &SimulationOutcome) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let months = self.start.map(|start| {
                    (0..outcome.cumulative().len())
                        .map(|i| month_label(Some(start), i))
                        .collect()
                });
                let json = JsonOutcome { outcome, months };
                serde_json::to_writer(&mut self.out, &json)?;
                writeln!(self.out)
            }
            OutputFormat::Text => self.write_text(outcome),
        }
    }

    fn write_text(&mut self, outcome: &SimulationOutcome) -> std::io::Result<()> {
        let params = outcome.params();
        let stats = outcome.stats();

        writeln!(
            self.out,
            "Epoch {} | drift {:.2}% | volatility {:.2}% | {} months",
            outcome.epoch(),
            params.drift,
            params.volatility,
            params.horizon_months
        )?;

        let rows = [
            ("Arithmetic mean (monthly)", stats.arith_mean_monthly),
            ("Geometric mean (monthly)", stats.geom_mean_monthly),
            ("Arithmetic mean (annualized)", stats.arith_mean_annual),
            ("Geometric mean (annualized)", stats.geom_mean_annual),
            ("Volatility (annualized)", stats.volatility_annual),
            ("Holding-period return", stats.holding_period_return),
        ];
        for (label, value) in rows {
            writeln!(self.out, "  {label:<30}{:>10}", format_percentage(value))?;
        }
        writeln!(
            self.out,
            "  {:<30}{:>10}",
            "Final value",
            format_value(outcome.path().final_value())
        )?;

        if self.show_table {
            writeln!(self.out)?;
            writeln!(self.out, "  {:<8}{:>10}{:>12}", "Month", "Return", "Value")?;
            writeln!(
                self.out,
                "  {:<8}{:>10}{:>12}",
                month_label(self.start, 0),
                "",
                format_value(outcome.cumulative()[0])
            )?;
            for (i, r) in outcome.returns().iter().enumerate() {
                writeln!(
                    self.out,
                    "  {:<8}{:>10}{:>12}",
                    month_label(self.start, i + 1),
                    format_percentage(*r),
                    format_value(outcome.cumulative()[i + 1])
                )?;
            }
        }
        writeln!(self.out)
    }

    /// Render an ensemble summary
    pub fn write_ensemble(&mut self, summary: &EnsembleSummary) -> std::io::Result<()> {
        if self.format == OutputFormat::Json {
            serde_json::to_writer(&mut self.out, summary)?;
            return writeln!(self.out);
        }

        let params = &summary.params;
        writeln!(
            self.out,
            "Ensemble of {} paths | drift {:.2}% | volatility {:.2}% | {} months",
            summary.paths, params.drift, params.volatility, params.horizon_months
        )?;
        let rows = [
            ("Mean holding-period return", format_percentage(summary.mean_holding_period_return)),
            ("Worst holding-period return", format_percentage(summary.worst_holding_period_return)),
            ("Best holding-period return", format_percentage(summary.best_holding_period_return)),
            ("Probability of loss", format_percentage(summary.probability_of_loss)),
            ("Mean final value", format_value(summary.mean_final_value)),
        ];
        for (label, value) in rows {
            writeln!(self.out, "  {label:<30}{value:>10}")?;
        }
        for band in &summary.bands {
            let final_value = band.values.last().copied().unwrap_or_default();
            writeln!(
                self.out,
                "  {:<30}{:>10}",
                format!("P{:.0} final value", band.percentile * 100.0),
                format_value(final_value)
            )?;
        }
        Ok(())
    }
}

impl<W: Write, E: Write> Presenter for CliPresenter<W, E> {
    fn present(&mut self, outcome: &SimulationOutcome) {
        if let Err(e) = self.write_outcome(outcome) {
            tracing::error!(error = %e, "Failed to write simulation output");
        }
    }

    fn present_errors(&mut self, errors: &[ValidationError]) {
        for error in errors {
            if let Err(e) = writeln!(self.err, "error: {error}") {
                tracing::error!(error = %e, "Failed to write validation error");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retsim_core::{SamplerMethod, SimulationParameters, SimulationSession};

    fn outcome() -> SimulationOutcome {
        SimulationSession::with_seed(1, SamplerMethod::BoxMuller)
            .run(&SimulationParameters::new(3.0, 17.0, 3))
            .unwrap()
    }

    fn render(presenter: CliPresenter<Vec<u8>, Vec<u8>>) -> (String, String) {
        let (out, err) = presenter.into_writers();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_text_summary_without_table() {
        let mut presenter = CliPresenter::new(Vec::new(), Vec::new(), OutputFormat::Text);
        presenter.present(&outcome());

        let (out, err) = render(presenter);
        assert!(out.starts_with("Epoch 0 | drift 3.00% | volatility 17.00% | 3 months"));
        assert!(out.contains("Holding-period return"));
        assert!(!out.contains("Month"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_text_table_with_dates() {
        let mut presenter = CliPresenter::new(Vec::new(), Vec::new(), OutputFormat::Text)
            .with_table(true)
            .with_start(Some(jiff::civil::date(2025, 11, 1)));
        presenter.present(&outcome());

        let (out, _) = render(presenter);
        assert!(out.contains("2025-11"));
        assert!(out.contains("2026-02"));
        assert!(out.contains("100.00"));
    }

    #[test]
    fn test_toggle_table() {
        let mut presenter = CliPresenter::new(Vec::new(), Vec::new(), OutputFormat::Text);
        assert!(presenter.toggle_table());
        assert!(presenter.show_table());
        assert!(!presenter.toggle_table());
    }

    #[test]
    fn test_json_output_is_one_line_per_outcome() {
        let mut presenter = CliPresenter::new(Vec::new(), Vec::new(), OutputFormat::Json);
        let outcome = outcome();
        presenter.present(&outcome);
        presenter.present(&outcome);

        let (out, _) = render(presenter);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["epoch"], 0);
        assert_eq!(value["path"]["cumulative"].as_array().unwrap().len(), 4);
        assert_eq!(value["params"]["horizon_months"], 3);
        assert!(value.get("months").is_none());
    }

    #[test]
    fn test_errors_go_to_error_writer() {
        let mut presenter = CliPresenter::new(Vec::new(), Vec::new(), OutputFormat::Text);
        presenter.present_errors(&[
            ValidationError::DriftOutOfRange { value: 51.0 },
            ValidationError::HorizonOutOfRange { value: 0 },
        ]);

        let (out, err) = render(presenter);
        assert!(out.is_empty());
        assert_eq!(err.lines().count(), 2);
        assert!(err.starts_with("error: drift must be between 0% and 50%"));
    }
}
