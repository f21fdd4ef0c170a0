//! # Salary Insights
//!
//! A library for turning a person's salary, savings and spending history into
//! a month-aligned, inflation-adjusted series plus a short list of insights.
//!
//! ## Core Concepts
//!
//! - **Records**: dated amounts parsed from CSV uploads (or generated samples)
//! - **Aligned Rows**: one row per salary month, with the first savings and
//!   spending record of that month and the salary deflated by inflation
//! - **Inflation Source**: an injected, read-only lookup of monthly rates per
//!   country with nearest-month matching and a default-country fallback
//! - **Insights**: salary growth, inflation impact, savings rate and spending
//!   trend, always in that order
//!
//! ## Example
//!
//! ```rust,ignore
//! use salary_insights::*;
//!
//! let data = UserFinancialData::from_csv(
//!     "date,amount\n2024-01-01,5000\n2024-02-01,5500\n",
//!     Some("date,amount\n2024-01-01,1000\n2024-02-01,1200\n"),
//!     None,
//!     "US",
//!     "USD",
//! )?;
//!
//! let analysis = analyze_financial_data(&data)?;
//! for insight in &analysis.insights {
//!     println!("{}: {}", insight.title, insight.description);
//! }
//! ```

pub mod countries;
pub mod engine;
pub mod error;
pub mod inflation;
pub mod ingestion;
pub mod insights;
pub mod sample;
pub mod schema;
pub mod summary;
pub mod utils;

pub use countries::{find_country, format_currency, Country, COUNTRIES};
pub use engine::{align_series, SeriesAligner};
pub use error::{InsightsError, Result};
pub use inflation::{inflation_adjusted, InflationSource, InflationTable};
pub use ingestion::{parse_records, parse_upload, ColumnLayout, DEFAULT_CATEGORY};
pub use insights::{generate_insights, InsightGenerator, InsightThresholds};
pub use sample::{generate_sample_series, sample_user_data};
pub use schema::*;
pub use summary::AnalysisSummary;

use log::{debug, info};

/// Runs the full upload → analyze pipeline against one inflation source.
pub struct AnalysisPipeline<S: InflationSource = InflationTable> {
    inflation: S,
    generator: InsightGenerator,
}

impl AnalysisPipeline<InflationTable> {
    /// Pipeline backed by the built-in sample inflation table.
    pub fn new() -> Self {
        Self::with_source(InflationTable::default())
    }
}

impl Default for AnalysisPipeline<InflationTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: InflationSource> AnalysisPipeline<S> {
    pub fn with_source(inflation: S) -> Self {
        Self {
            inflation,
            generator: InsightGenerator::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: InsightThresholds) -> Self {
        self.generator = InsightGenerator::new(thresholds);
        self
    }

    pub fn inflation(&self) -> &S {
        &self.inflation
    }

    pub fn align(&self, data: &UserFinancialData) -> Vec<AlignedRow> {
        SeriesAligner::new(&self.inflation).align(data)
    }

    /// Aligns the series and derives insights. Fails with
    /// [`InsightsError::EmptyData`] when there is no salary to drive alignment.
    pub fn analyze(&self, data: &UserFinancialData) -> Result<FinancialAnalysis> {
        if data.salary.is_empty() {
            return Err(InsightsError::EmptyData {
                kind: RecordKind::Salary,
            });
        }

        debug!(
            "Analyzing {} salary, {} savings and {} spending records",
            data.salary.len(),
            data.savings.len(),
            data.spending.len()
        );

        let rows = self.align(data);
        let insights = self.generator.generate(data, &rows);

        info!(
            "Analysis for country {} produced {} aligned rows and {} insights",
            data.country_code,
            rows.len(),
            insights.len()
        );

        Ok(FinancialAnalysis { rows, insights })
    }
}

/// Analyzes with the built-in inflation table and default thresholds.
pub fn analyze_financial_data(data: &UserFinancialData) -> Result<FinancialAnalysis> {
    AnalysisPipeline::new().analyze(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_end_to_end_processing() {
        let mut data = UserFinancialData::new("US", "USD");
        data.salary = (1..=12)
            .map(|m| AmountRecord::new(ymd(2023, m, 1), 1000.0 + 20.0 * m as f64))
            .collect();
        data.savings = (1..=12)
            .map(|m| AmountRecord::new(ymd(2023, m, 15), 250.0))
            .collect();

        let analysis = analyze_financial_data(&data).unwrap();

        assert_eq!(analysis.rows.len(), 12);
        assert_eq!(analysis.rows[0].label, "Jan 2023");
        assert_eq!(analysis.rows[11].label, "Dec 2023");
        assert!(analysis.rows.iter().all(|r| r.savings == 250.0));
        assert_eq!(analysis.insights[0].title, "Salary Growth");
        assert!(analysis
            .insights
            .iter()
            .any(|i| i.title == "Savings Rate"));
    }

    #[test]
    fn test_empty_salary_is_rejected() {
        let mut data = UserFinancialData::new("US", "USD");
        data.savings = vec![AmountRecord::new(ymd(2024, 1, 1), 10.0)];

        let err = analyze_financial_data(&data).unwrap_err();
        assert!(matches!(
            err,
            InsightsError::EmptyData {
                kind: RecordKind::Salary
            }
        ));
    }

    #[test]
    fn test_pipeline_with_custom_source() {
        struct NoInflation;
        impl InflationSource for NoInflation {
            fn rate_for(&self, _date: NaiveDate, _country_code: &str) -> f64 {
                0.0
            }
        }

        let mut data = UserFinancialData::new("JP", "JPY");
        data.salary = vec![
            AmountRecord::new(ymd(2024, 1, 1), 300_000.0),
            AmountRecord::new(ymd(2024, 2, 1), 330_000.0),
        ];

        let analysis = AnalysisPipeline::with_source(NoInflation)
            .with_thresholds(InsightThresholds {
                strong_salary_growth: 5.0,
                ..InsightThresholds::default()
            })
            .analyze(&data)
            .unwrap();

        assert!(analysis.rows.iter().all(|r| r.salary == r.adjusted_salary));
        assert_eq!(analysis.insights[0].category, InsightCategory::Positive);
        assert!(analysis
            .insights
            .iter()
            .all(|i| i.title != "Inflation Impact"));
    }
}
