use crate::countries::format_currency;
use crate::schema::{AlignedRow, Insight, InsightCategory, InsightValue, UserFinancialData};
use crate::utils::{growth_rate, percentage_of};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const NOT_AVAILABLE: &str = "N/A";

/// Cut-offs (in percent) that decide an insight's category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct InsightThresholds {
    /// Salary growth at or above this is positive, below it neutral.
    pub strong_salary_growth: f64,
    /// Inflation impact above this is negative, otherwise neutral.
    pub severe_inflation_impact: f64,
    /// Savings rate at or above this is positive.
    pub healthy_savings_rate: f64,
    /// Savings rate below this is negative.
    pub minimum_savings_rate: f64,
    /// Spending growth above this reports increasing expenses.
    pub spending_increase: f64,
    /// Spending growth below this (a negative number) reports reduced spending.
    pub spending_reduction: f64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            strong_salary_growth: 10.0,
            severe_inflation_impact: 5.0,
            healthy_savings_rate: 20.0,
            minimum_savings_rate: 10.0,
            spending_increase: 15.0,
            spending_reduction: -10.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InsightGenerator {
    thresholds: InsightThresholds,
}

impl InsightGenerator {
    pub fn new(thresholds: InsightThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &InsightThresholds {
        &self.thresholds
    }

    /// Derives insights in a fixed order: salary growth or decline, inflation
    /// impact, savings rate, spending trend. Growth compares the first and
    /// last rows; the savings rate uses totals over every row.
    pub fn generate(&self, data: &UserFinancialData, rows: &[AlignedRow]) -> Vec<Insight> {
        let (first, last) = match rows {
            [first, .., last] => (first, last),
            _ => return vec![more_data_needed()],
        };

        debug!(
            "Generating insights for {} rows ({} {})",
            rows.len(),
            data.country_code,
            data.currency_code
        );

        let mut insights = Vec::new();

        let salary_growth = growth_rate(first.salary, last.salary);
        match salary_growth {
            Some(rate) => insights.push(self.salary_trend(rate)),
            None => insights.push(salary_growth_unavailable()),
        }

        let adjusted_growth = growth_rate(first.adjusted_salary, last.adjusted_salary);
        if let (Some(nominal), Some(real)) = (salary_growth, adjusted_growth) {
            if let Some(insight) = self.inflation_impact(nominal - real) {
                insights.push(insight);
            }
        }

        let total_salary: f64 = rows.iter().map(|r| r.salary).sum();
        let total_savings: f64 = rows.iter().map(|r| r.savings).sum();
        insights.push(self.savings_rate(percentage_of(total_savings, total_salary)));

        if let Some(insight) = growth_rate(first.spending, last.spending)
            .and_then(|rate| self.spending_trend(rate))
        {
            insights.push(insight);
        }

        insights
    }

    fn salary_trend(&self, rate: f64) -> Insight {
        if rate >= 0.0 {
            let category = if rate >= self.thresholds.strong_salary_growth {
                InsightCategory::Positive
            } else {
                InsightCategory::Neutral
            };
            Insight {
                title: "Salary Growth".to_string(),
                description: format!("Your salary has grown by {:.1}% over the period.", rate),
                category,
                value: Some(InsightValue::Number(rate)),
            }
        } else {
            Insight {
                title: "Salary Decline".to_string(),
                description: format!(
                    "Your salary has decreased by {:.1}% over the period.",
                    rate.abs()
                ),
                category: InsightCategory::Negative,
                value: Some(InsightValue::Number(rate)),
            }
        }
    }

    fn inflation_impact(&self, impact: f64) -> Option<Insight> {
        if impact <= 0.0 {
            return None;
        }
        let category = if impact > self.thresholds.severe_inflation_impact {
            InsightCategory::Negative
        } else {
            InsightCategory::Neutral
        };
        Some(Insight {
            title: "Inflation Impact".to_string(),
            description: format!(
                "Inflation has reduced your real salary growth by {:.1}%.",
                impact
            ),
            category,
            value: Some(InsightValue::Number(impact)),
        })
    }

    fn savings_rate(&self, rate: Option<f64>) -> Insight {
        let Some(rate) = rate else {
            return Insight {
                title: "Savings Rate".to_string(),
                description: "Your total income is zero, so a savings rate cannot be calculated."
                    .to_string(),
                category: InsightCategory::Neutral,
                value: Some(InsightValue::Text(NOT_AVAILABLE.to_string())),
            };
        };

        let category = if rate >= self.thresholds.healthy_savings_rate {
            InsightCategory::Positive
        } else if rate >= self.thresholds.minimum_savings_rate {
            InsightCategory::Neutral
        } else {
            InsightCategory::Negative
        };
        Insight {
            title: "Savings Rate".to_string(),
            description: format!("Your average savings rate is {:.1}% of income.", rate),
            category,
            value: Some(InsightValue::Number(rate)),
        }
    }

    fn spending_trend(&self, rate: f64) -> Option<Insight> {
        if rate > self.thresholds.spending_increase {
            Some(Insight {
                title: "Increasing Expenses".to_string(),
                description: format!(
                    "Your spending has increased by {:.1}% over the period.",
                    rate
                ),
                category: InsightCategory::Negative,
                value: Some(InsightValue::Number(rate)),
            })
        } else if rate < self.thresholds.spending_reduction {
            Some(Insight {
                title: "Reduced Spending".to_string(),
                description: format!(
                    "You've reduced your spending by {:.1}% over the period.",
                    rate.abs()
                ),
                category: InsightCategory::Positive,
                value: Some(InsightValue::Number(rate)),
            })
        } else {
            None
        }
    }
}

/// Generates insights with the default thresholds.
pub fn generate_insights(data: &UserFinancialData, rows: &[AlignedRow]) -> Vec<Insight> {
    InsightGenerator::default().generate(data, rows)
}

fn more_data_needed() -> Insight {
    Insight {
        title: "More Data Needed".to_string(),
        description: "Please upload data for at least two months to get insights.".to_string(),
        category: InsightCategory::Neutral,
        value: None,
    }
}

fn salary_growth_unavailable() -> Insight {
    Insight {
        title: "Salary Growth Unavailable".to_string(),
        description: "Your first salary entry is zero, so growth over the period cannot be measured."
            .to_string(),
        category: InsightCategory::Neutral,
        value: Some(InsightValue::Text(NOT_AVAILABLE.to_string())),
    }
}

impl Insight {
    /// Renders `value` for display: percentages for rate-like titles or small
    /// magnitudes, currency amounts otherwise.
    pub fn display_value(&self, currency_code: &str) -> Option<String> {
        match self.value.as_ref()? {
            InsightValue::Text(text) => Some(text.clone()),
            InsightValue::Number(n) => {
                let title = self.title.to_lowercase();
                let is_percentage = ["rate", "growth", "impact"]
                    .iter()
                    .any(|word| title.contains(word))
                    || n.abs() < 100.0;
                if is_percentage {
                    Some(format!("{:.1}%", n.abs()))
                } else {
                    Some(format_currency(*n, currency_code))
                }
            }
        }
    }
}
