use crate::error::{InsightsError, Result};
use crate::schema::InflationRatePoint;
use crate::utils::{months_between, MonthKey};
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeMap;

pub const DEFAULT_FALLBACK_COUNTRY: &str = "US";

/// Read-only source of inflation rates, handed to the aligner explicitly so a
/// real data provider can replace the built-in sample table.
pub trait InflationSource {
    /// Annual inflation rate in percent for the month containing `date`.
    /// Must always return a value, falling back to a default country.
    fn rate_for(&self, date: NaiveDate, country_code: &str) -> f64;
}

/// Deflates a nominal amount by `rate_percent`.
///
/// This is relative to the sample period implied by the table, not a true
/// CPI-indexed present value.
pub fn inflation_adjusted(amount: f64, rate_percent: f64) -> f64 {
    amount / (1.0 + rate_percent / 100.0)
}

/// Sparse per-country monthly inflation samples with nearest-month lookup.
#[derive(Debug, Clone)]
pub struct InflationTable {
    rates: BTreeMap<String, Vec<InflationRatePoint>>,
    fallback_country: String,
}

impl InflationTable {
    /// Validates that every month is in 1..=12, that every rate is finite and
    /// above -100%, and that the fallback country has at least one point,
    /// which keeps `rate_for` total.
    pub fn new(
        rates: BTreeMap<String, Vec<InflationRatePoint>>,
        fallback_country: impl Into<String>,
    ) -> Result<Self> {
        let fallback_country = normalize_code(&fallback_country.into());

        let mut normalized: BTreeMap<String, Vec<InflationRatePoint>> = BTreeMap::new();
        for (code, points) in rates {
            if let Some(bad) = points.iter().find(|p| !(1..=12).contains(&p.month)) {
                return Err(InsightsError::InvalidInflationTable(format!(
                    "{} has month {} in {}; months must be 1-12",
                    code, bad.month, bad.year
                )));
            }
            if let Some(bad) = points
                .iter()
                .find(|p| !p.rate_percent.is_finite() || p.rate_percent <= -100.0)
            {
                return Err(InsightsError::InvalidInflationTable(format!(
                    "{} has rate {} in {}-{:02}; rates must be finite and above -100%",
                    code, bad.rate_percent, bad.year, bad.month
                )));
            }
            normalized
                .entry(normalize_code(&code))
                .or_default()
                .extend(points);
        }

        if normalized
            .get(&fallback_country)
            .map_or(true, |points| points.is_empty())
        {
            return Err(InsightsError::InvalidInflationTable(format!(
                "fallback country {} has no inflation data",
                fallback_country
            )));
        }

        Ok(Self {
            rates: normalized,
            fallback_country,
        })
    }

    /// Loads `{"US": [{"year": 2024, "month": 1, "ratePercent": 3.1}], ...}`
    /// with `US` as the fallback country.
    pub fn from_json(json: &str) -> Result<Self> {
        let rates: BTreeMap<String, Vec<InflationRatePoint>> = serde_json::from_str(json)?;
        Self::new(rates, DEFAULT_FALLBACK_COUNTRY)
    }

    pub fn fallback_country(&self) -> &str {
        &self.fallback_country
    }

    pub fn countries(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    pub fn has_country(&self, country_code: &str) -> bool {
        self.rates
            .get(&normalize_code(country_code))
            .is_some_and(|points| !points.is_empty())
    }

    /// Points used for `country_code`, after fallback.
    pub fn points_for(&self, country_code: &str) -> &[InflationRatePoint] {
        match self.rates.get(&normalize_code(country_code)) {
            Some(points) if !points.is_empty() => points,
            _ => {
                debug!(
                    "No inflation data for country '{}', using {}",
                    country_code, self.fallback_country
                );
                self.rates
                    .get(&self.fallback_country)
                    .map(Vec::as_slice)
                    .unwrap_or_default()
            }
        }
    }
}

impl Default for InflationTable {
    fn default() -> Self {
        let rates = BTreeMap::from([
            (
                "US".to_string(),
                vec![
                    InflationRatePoint::new(2023, 1, 6.4),
                    InflationRatePoint::new(2023, 6, 3.0),
                    InflationRatePoint::new(2023, 12, 3.4),
                    InflationRatePoint::new(2024, 1, 3.1),
                    InflationRatePoint::new(2024, 2, 3.2),
                ],
            ),
            (
                "UK".to_string(),
                vec![
                    InflationRatePoint::new(2023, 1, 10.1),
                    InflationRatePoint::new(2023, 6, 7.9),
                    InflationRatePoint::new(2023, 12, 4.0),
                    InflationRatePoint::new(2024, 1, 4.0),
                    InflationRatePoint::new(2024, 2, 3.4),
                ],
            ),
            (
                "IN".to_string(),
                vec![
                    InflationRatePoint::new(2023, 1, 6.5),
                    InflationRatePoint::new(2023, 6, 4.8),
                    InflationRatePoint::new(2023, 12, 5.7),
                    InflationRatePoint::new(2024, 1, 5.1),
                    InflationRatePoint::new(2024, 2, 5.1),
                ],
            ),
        ]);

        Self {
            rates,
            fallback_country: DEFAULT_FALLBACK_COUNTRY.to_string(),
        }
    }
}

impl InflationSource for InflationTable {
    fn rate_for(&self, date: NaiveDate, country_code: &str) -> f64 {
        let target = MonthKey::of(date);

        // Strict comparison keeps the first point on equal distances
        let mut closest: Option<(&InflationRatePoint, i64)> = None;
        for point in self.points_for(country_code) {
            let distance = months_between(MonthKey::new(point.year, point.month), target).abs();
            match closest {
                Some((_, best)) if distance >= best => {}
                _ => closest = Some((point, distance)),
            }
        }

        closest.map(|(point, _)| point.rate_percent).unwrap_or_default()
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
