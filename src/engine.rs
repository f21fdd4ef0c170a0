use crate::inflation::{inflation_adjusted, InflationSource};
use crate::schema::{AlignedRow, AmountRecord, UserFinancialData};
use crate::utils::{month_label, round_to_cents, MonthKey};
use log::{debug, warn};

/// Joins savings and spending onto the salary series month by month and
/// deflates each salary with the injected inflation source.
pub struct SeriesAligner<'a, S: InflationSource + ?Sized> {
    inflation: &'a S,
}

impl<'a, S: InflationSource + ?Sized> SeriesAligner<'a, S> {
    pub fn new(inflation: &'a S) -> Self {
        Self { inflation }
    }

    /// One row per salary record, in ascending date order.
    ///
    /// When several savings or spending records fall in the same month the
    /// first one (after sorting) is used; amounts are not summed. Months with
    /// no match contribute `0`. Savings or spending months without a salary
    /// record are left out.
    pub fn align(&self, data: &UserFinancialData) -> Vec<AlignedRow> {
        let salary = sorted_by_date(&data.salary);
        let savings = sorted_by_date(&data.savings);
        let spending = sorted_by_date(&data.spending);

        let mut rows = Vec::with_capacity(salary.len());
        for record in &salary {
            let key = MonthKey::of(record.date);

            let savings_amount = first_in_month(&savings, key, "savings");
            let spending_amount = first_in_month(&spending, key, "spending");

            let rate = self.inflation.rate_for(record.date, &data.country_code);
            let adjusted_salary = round_to_cents(inflation_adjusted(record.amount, rate));

            rows.push(AlignedRow {
                label: month_label(record.date),
                salary: record.amount,
                adjusted_salary,
                savings: savings_amount,
                spending: spending_amount,
            });
        }

        let unmatched = unmatched_months(&salary, &savings) + unmatched_months(&salary, &spending);
        if unmatched > 0 {
            debug!(
                "{} savings/spending records have no salary month and were not aligned",
                unmatched
            );
        }

        rows
    }
}

/// Aligns with the given inflation source; see [`SeriesAligner::align`].
pub fn align_series<S: InflationSource + ?Sized>(
    data: &UserFinancialData,
    inflation: &S,
) -> Vec<AlignedRow> {
    SeriesAligner::new(inflation).align(data)
}

fn sorted_by_date(records: &[AmountRecord]) -> Vec<&AmountRecord> {
    let mut sorted: Vec<&AmountRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.date);
    sorted
}

fn first_in_month(records: &[&AmountRecord], key: MonthKey, series: &str) -> f64 {
    let mut matches = records.iter().filter(|r| MonthKey::of(r.date) == key);
    let Some(first) = matches.next() else {
        return 0.0;
    };

    let extra = matches.count();
    if extra > 0 {
        warn!(
            "{} {} records share {}-{:02}; using the first ({})",
            extra + 1,
            series,
            key.year,
            key.month,
            first.amount
        );
    }
    first.amount
}

fn unmatched_months(salary: &[&AmountRecord], other: &[&AmountRecord]) -> usize {
    other
        .iter()
        .filter(|r| {
            let key = MonthKey::of(r.date);
            !salary.iter().any(|s| MonthKey::of(s.date) == key)
        })
        .count()
}
