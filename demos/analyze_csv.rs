use chrono::NaiveDate;
use salary_insights::*;
use std::env;
use std::fs;

const DEMO_SALARY: &str = "\
date,amount
2023-01-31,5200
2023-06-30,5400
2023-12-31,5600
2024-01-31,5600
2024-02-29,5900
";

const DEMO_SAVINGS: &str = "\
date,amount
2023-01-31,900
2023-06-30,1100
2024-02-29,1300
";

const DEMO_SPENDING: &str = "\
date,amount,category
2023-01-15,3100,Rent
2023-06-15,2900,Rent
2024-02-15,2600,
";

fn main() -> anyhow::Result<()> {
    // Usage: analyze_csv [salary.csv] [savings.csv] [spending.csv] [country] [currency]
    let args: Vec<String> = env::args().skip(1).collect();
    let read = |idx: usize, fallback: &str| -> anyhow::Result<String> {
        match args.get(idx) {
            Some(path) => Ok(fs::read_to_string(path)?),
            None => Ok(fallback.to_string()),
        }
    };

    let salary = read(0, DEMO_SALARY)?;
    let savings = read(1, DEMO_SAVINGS)?;
    let spending = read(2, DEMO_SPENDING)?;
    let country = args.get(3).map(String::as_str).unwrap_or("US");
    let currency = find_country(country)
        .map(|c| c.currency_code)
        .unwrap_or("USD");
    let currency = args.get(4).map(String::as_str).unwrap_or(currency);

    let data = UserFinancialData::from_csv(&salary, Some(&savings), Some(&spending), country, currency)?;
    let analysis = analyze_financial_data(&data)?;

    println!("{:<10} {:>12} {:>12} {:>10} {:>10}", "Month", "Salary", "Real", "Savings", "Spending");
    for row in &analysis.rows {
        println!(
            "{:<10} {:>12} {:>12} {:>10} {:>10}",
            row.label,
            format_currency(row.salary, currency),
            format_currency(row.adjusted_salary, currency),
            format_currency(row.savings, currency),
            format_currency(row.spending, currency),
        );
    }

    println!("\nInsights:");
    for insight in &analysis.insights {
        let value = insight.display_value(currency).unwrap_or_default();
        println!("  [{:?}] {} {} - {}", insight.category, insight.title, value, insight.description);
    }

    if let Some(summary) = AnalysisSummary::from_rows(&data, &analysis.rows) {
        println!("\nPrompt for external review:\n{}", summary.to_prompt());
    }

    let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap_or_default();
    let sample = sample_user_data(country, currency, today, &mut rand::thread_rng());
    let sample_analysis = analyze_financial_data(&sample)?;
    println!(
        "Sample data: {} months, {} insights",
        sample_analysis.rows.len(),
        sample_analysis.insights.len()
    );

    Ok(())
}
