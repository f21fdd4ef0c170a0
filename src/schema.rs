use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[schemars(description = "Gross salary received in a month")]
    Salary,

    #[schemars(description = "Amount put aside as savings in a month")]
    Savings,

    #[schemars(description = "Amount spent in a month, optionally tagged with a category")]
    Spending,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Salary => "salary",
            RecordKind::Savings => "savings",
            RecordKind::Spending => "spending",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dated observation in one of the three series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct AmountRecord {
    #[schemars(description = "Calendar date of the observation (YYYY-MM-DD)")]
    pub date: NaiveDate,

    #[schemars(description = "Amount in the user's currency")]
    pub amount: f64,

    /// Only ever set on spending records parsed from a file with a category column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl AmountRecord {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self {
            date,
            amount,
            category: None,
        }
    }

    pub fn with_category(date: NaiveDate, amount: f64, category: impl Into<String>) -> Self {
        Self {
            date,
            amount,
            category: Some(category.into()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserFinancialData {
    pub salary: Vec<AmountRecord>,
    #[serde(default)]
    pub savings: Vec<AmountRecord>,
    #[serde(default)]
    pub spending: Vec<AmountRecord>,
    #[schemars(description = "Country code used to select the inflation series (e.g. US, UK, IN)")]
    pub country_code: String,
    #[schemars(description = "ISO currency code the amounts are expressed in")]
    pub currency_code: String,
}

impl UserFinancialData {
    pub fn new(country_code: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            salary: Vec::new(),
            savings: Vec::new(),
            spending: Vec::new(),
            country_code: country_code.into(),
            currency_code: currency_code.into(),
        }
    }

    pub fn series(&self, kind: RecordKind) -> &[AmountRecord] {
        match kind {
            RecordKind::Salary => &self.salary,
            RecordKind::Savings => &self.savings,
            RecordKind::Spending => &self.spending,
        }
    }

    pub fn set_series(&mut self, kind: RecordKind, records: Vec<AmountRecord>) {
        match kind {
            RecordKind::Salary => self.salary = records,
            RecordKind::Savings => self.savings = records,
            RecordKind::Spending => self.spending = records,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InflationRatePoint {
    pub year: i32,
    #[schemars(description = "Calendar month, 1 = January")]
    pub month: u32,
    #[schemars(description = "Annual inflation rate in percent (3.1 means 3.1%)")]
    pub rate_percent: f64,
}

impl InflationRatePoint {
    pub const fn new(year: i32, month: u32, rate_percent: f64) -> Self {
        Self {
            year,
            month,
            rate_percent,
        }
    }
}

/// One calendar month of the salary series combined with the matching
/// savings and spending observations. This is what the charts consume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlignedRow {
    #[serde(rename = "name", alias = "label")]
    #[schemars(description = "Short month label, e.g. 'Jan 2024'")]
    pub label: String,
    pub salary: f64,
    #[schemars(description = "Salary deflated by the nearest inflation rate, rounded to cents")]
    pub adjusted_salary: f64,
    pub savings: f64,
    pub spending: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum InsightValue {
    Number(f64),
    Text(String),
}

impl InsightValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            InsightValue::Number(n) => Some(*n),
            InsightValue::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub category: InsightCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<InsightValue>,
}

/// Result of one upload → analyze run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct FinancialAnalysis {
    pub rows: Vec<AlignedRow>,
    pub insights: Vec<Insight>,
}
