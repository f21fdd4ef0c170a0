use crate::insights::NOT_AVAILABLE;
use crate::schema::{AlignedRow, UserFinancialData};
use crate::utils::growth_rate;
use serde::{Deserialize, Serialize};

/// Condensed view of an analysis run, shaped for an external AI reviewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub period_start: String,
    pub period_end: String,
    pub initial_salary: f64,
    pub current_salary: f64,
    pub salary_growth_percent: Option<f64>,
    pub average_savings: f64,
    pub average_spending: f64,
    pub country_code: String,
    pub currency_code: String,
}

impl AnalysisSummary {
    /// `None` when there are no aligned rows to summarise.
    pub fn from_rows(data: &UserFinancialData, rows: &[AlignedRow]) -> Option<Self> {
        let first = rows.first()?;
        let last = rows.last()?;
        let count = rows.len() as f64;

        Some(Self {
            period_start: first.label.clone(),
            period_end: last.label.clone(),
            initial_salary: first.salary,
            current_salary: last.salary,
            salary_growth_percent: growth_rate(first.salary, last.salary),
            average_savings: rows.iter().map(|r| r.savings).sum::<f64>() / count,
            average_spending: rows.iter().map(|r| r.spending).sum::<f64>() / count,
            country_code: data.country_code.clone(),
            currency_code: data.currency_code.clone(),
        })
    }

    pub fn to_prompt(&self) -> String {
        let growth = self
            .salary_growth_percent
            .map(|g| format!("{:.1}%", g))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        format!(
            "Financial data analysis for period {start} to {end}:\n\
             - Initial salary: {initial} {currency}\n\
             - Current salary: {current} {currency}\n\
             - Salary growth: {growth}\n\
             - Average monthly savings: {savings:.0} {currency}\n\
             - Average monthly spending: {spending:.0} {currency}\n\
             - Country: {country}\n\
             \n\
             Please analyze this financial data and provide insights on:\n\
             1. Salary growth performance relative to inflation\n\
             2. Savings patterns and recommendations\n\
             3. Spending habits and potential areas of improvement\n\
             4. Overall financial health assessment\n",
            start = self.period_start,
            end = self.period_end,
            initial = self.initial_salary,
            current = self.current_salary,
            currency = self.currency_code,
            growth = growth,
            savings = self.average_savings,
            spending = self.average_spending,
            country = self.country_code,
        )
    }
}
