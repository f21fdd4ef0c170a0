use crate::schema::{AmountRecord, RecordKind, UserFinancialData};
use chrono::{Months, NaiveDate};
use rand::Rng;

pub const SAMPLE_MONTHS: u32 = 12;
pub const SAMPLE_SPENDING_CATEGORY: &str = "General";

/// Synthetic monthly series ending at `end_date`, newest first.
///
/// Salary drifts upward going back in time by up to 50% of its random part,
/// savings and spending are flat with uniform noise.
pub fn generate_sample_series<R: Rng>(
    kind: RecordKind,
    months: u32,
    end_date: NaiveDate,
    rng: &mut R,
) -> Vec<AmountRecord> {
    (0..months)
        .filter_map(|i| {
            let date = end_date.checked_sub_months(Months::new(i))?;
            let record = match kind {
                RecordKind::Salary => {
                    let noise = rng.gen_range(0..500) as f64;
                    AmountRecord::new(date, 5000.0 + noise * (1.0 + i as f64 / 24.0))
                }
                RecordKind::Savings => {
                    AmountRecord::new(date, 1000.0 + rng.gen_range(0..300) as f64)
                }
                RecordKind::Spending => AmountRecord::with_category(
                    date,
                    2500.0 + rng.gen_range(0..500) as f64,
                    SAMPLE_SPENDING_CATEGORY,
                ),
            };
            Some(record)
        })
        .collect()
}

/// Twelve months of all three series, ending at `end_date`.
pub fn sample_user_data<R: Rng>(
    country_code: &str,
    currency_code: &str,
    end_date: NaiveDate,
    rng: &mut R,
) -> UserFinancialData {
    let mut data = UserFinancialData::new(country_code, currency_code);
    for kind in [RecordKind::Salary, RecordKind::Savings, RecordKind::Spending] {
        let series = generate_sample_series(kind, SAMPLE_MONTHS, end_date, rng);
        data.set_series(kind, series);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
    }

    #[test]
    fn test_sample_series_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let salary = generate_sample_series(RecordKind::Salary, 12, end(), &mut rng);

        assert_eq!(salary.len(), 12);
        assert_eq!(salary[0].date, end());
        // Month-end clamps to the shorter month
        assert_eq!(salary[1].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(salary[11].date.month(), 4);
        assert_eq!(salary[11].date.year(), 2023);

        for (i, record) in salary.iter().enumerate() {
            let ceiling = 5000.0 + 499.0 * (1.0 + i as f64 / 24.0);
            assert!(record.amount >= 5000.0 && record.amount <= ceiling);
            assert!(record.category.is_none());
        }
    }

    #[test]
    fn test_sample_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let savings = generate_sample_series(RecordKind::Savings, 12, end(), &mut rng);
        assert!(savings.iter().all(|r| (1000.0..1300.0).contains(&r.amount)));

        let spending = generate_sample_series(RecordKind::Spending, 12, end(), &mut rng);
        assert!(spending.iter().all(|r| (2500.0..3000.0).contains(&r.amount)));
        assert!(spending
            .iter()
            .all(|r| r.category.as_deref() == Some(SAMPLE_SPENDING_CATEGORY)));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = sample_user_data("US", "USD", end(), &mut StdRng::seed_from_u64(1));
        let b = sample_user_data("US", "USD", end(), &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
        assert_eq!(a.salary.len(), SAMPLE_MONTHS as usize);
        assert_eq!(a.savings.len(), SAMPLE_MONTHS as usize);
        assert_eq!(a.spending.len(), SAMPLE_MONTHS as usize);
    }
}
