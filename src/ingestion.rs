use crate::error::{InsightsError, Result};
use crate::schema::{AmountRecord, RecordKind, UserFinancialData};
use crate::utils::parse_flexible_date;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub date: usize,
    pub amount: usize,
    pub category: Option<usize>,
}

impl ColumnLayout {
    /// Case-insensitive substring match; the first matching header wins.
    /// The category column is only looked up for spending uploads.
    pub fn resolve(headers: &StringRecord, kind: RecordKind) -> Result<Self> {
        let find = |needle: &str| {
            headers
                .iter()
                .position(|h| h.to_lowercase().contains(needle))
        };

        let (Some(date), Some(amount)) = (find("date"), find("amount")) else {
            return Err(InsightsError::MissingColumn {
                headers: headers.iter().map(str::to_string).collect(),
            });
        };

        let category = match kind {
            RecordKind::Spending => find("category"),
            _ => None,
        };

        Ok(Self {
            date,
            amount,
            category,
        })
    }
}

/// Parses comma-delimited text with a header row into records of `kind`.
///
/// Every line is a plain comma split: quotes are ordinary characters and
/// there is no escaping of embedded delimiters. Blank lines are skipped and
/// input order is preserved; ordering by date happens in the aligner. Returns an empty vector when there are no data lines.
pub fn parse_records(raw: &str, kind: RecordKind) -> Result<Vec<AmountRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .quoting(false)
        .from_reader(raw.as_bytes());

    let headers = rdr.headers()?.clone();
    let layout = ColumnLayout::resolve(&headers, kind)?;
    debug!(
        "Parsing {} CSV: date column {}, amount column {}, category column {:?}",
        kind, layout.date, layout.amount, layout.category
    );

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        // Whitespace-only line; a line of bare delimiters still has to parse
        if row.len() == 1 && row[0].is_empty() {
            continue;
        }

        let line = row.position().map(|p| p.line()).unwrap_or_default();
        records.push(parse_row(&row, &layout, line)?);
    }

    debug!("Parsed {} {} records", records.len(), kind);
    Ok(records)
}

/// Like [`parse_records`], but an upload with no data lines is an error.
pub fn parse_upload(raw: &str, kind: RecordKind) -> Result<Vec<AmountRecord>> {
    let records = parse_records(raw, kind)?;
    if records.is_empty() {
        return Err(InsightsError::EmptyData { kind });
    }
    Ok(records)
}

fn parse_row(row: &StringRecord, layout: &ColumnLayout, line: u64) -> Result<AmountRecord> {
    let cell = |idx: usize, column: &str| {
        row.get(idx).ok_or_else(|| InsightsError::MalformedRow {
            line,
            details: format!("expected a {} value in column {}", column, idx + 1),
        })
    };

    let raw_date = cell(layout.date, "date")?;
    let date = parse_flexible_date(raw_date).ok_or_else(|| InsightsError::InvalidDate {
        line,
        value: raw_date.to_string(),
    })?;

    let raw_amount = cell(layout.amount, "amount")?;
    let amount = raw_amount
        .parse::<f64>()
        .ok()
        .filter(|a| a.is_finite())
        .ok_or_else(|| InsightsError::InvalidAmount {
            line,
            value: raw_amount.to_string(),
        })?;

    let category = layout.category.map(|idx| match row.get(idx) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    });

    Ok(AmountRecord {
        date,
        amount,
        category,
    })
}

impl UserFinancialData {
    /// Builds user data from raw uploads. Salary must contain at least one
    /// row; savings and spending may be absent or empty.
    pub fn from_csv(
        salary: &str,
        savings: Option<&str>,
        spending: Option<&str>,
        country_code: impl Into<String>,
        currency_code: impl Into<String>,
    ) -> Result<Self> {
        let mut data = UserFinancialData::new(country_code, currency_code);
        data.salary = parse_upload(salary, RecordKind::Salary)?;
        if let Some(raw) = savings {
            data.savings = parse_records(raw, RecordKind::Savings)?;
        }
        if let Some(raw) = spending {
            data.spending = parse_records(raw, RecordKind::Spending)?;
        }
        Ok(data)
    }
}
