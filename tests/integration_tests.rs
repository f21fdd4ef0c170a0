use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use salary_insights::*;
use std::collections::BTreeMap;

const SALARY_CSV: &str = "\
Date,Amount
2024-02-01,5500
2024-01-01,5000
";

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn month_series(year: i32, amounts: &[f64]) -> Vec<AmountRecord> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, &amount)| AmountRecord::new(ymd(year, i as u32 + 1, 1), amount))
        .collect()
}

#[test]
fn test_csv_to_insights_two_months() -> anyhow::Result<()> {
    let data = UserFinancialData::from_csv(SALARY_CSV, None, None, "US", "USD")?;
    let analysis = analyze_financial_data(&data)?;

    assert_eq!(analysis.rows.len(), 2);
    let feb = &analysis.rows[1];
    assert_eq!(feb.label, "Feb 2024");
    assert_eq!(feb.salary, 5500.0);
    assert_eq!(feb.savings, 0.0);
    assert_eq!(feb.spending, 0.0);
    assert!((feb.adjusted_salary - 5329.46).abs() < 0.005);

    let titles: Vec<&str> = analysis.insights.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Salary Growth", "Inflation Impact", "Savings Rate"]);

    let growth = &analysis.insights[0];
    assert_eq!(growth.category, InsightCategory::Positive);
    assert_eq!(growth.display_value("USD").as_deref(), Some("10.0%"));

    // No savings uploaded at all
    let savings = &analysis.insights[2];
    assert_eq!(savings.category, InsightCategory::Negative);
    assert_eq!(savings.value, Some(InsightValue::Number(0.0)));
    Ok(())
}

#[test]
fn test_full_year_with_all_series() -> anyhow::Result<()> {
    let spending_csv = "\
date,amount,category
2023-01-03,2000,Rent
2023-01-20,450,
2023-12-03,2600,Rent
";
    let savings_csv = "date,amount\n2023-01-28,1000\n2023-06-28,1000\n2023-12-28,1000\n";

    let mut salary_csv = String::from("date,amount\n");
    for month in 1..=12 {
        salary_csv.push_str(&format!("2023-{:02}-25,4000\n", month));
    }

    let data = UserFinancialData::from_csv(
        &salary_csv,
        Some(savings_csv),
        Some(spending_csv),
        "UK",
        "GBP",
    )?;
    assert_eq!(data.spending[1].category.as_deref(), Some(DEFAULT_CATEGORY));

    let analysis = analyze_financial_data(&data)?;
    assert_eq!(analysis.rows.len(), 12);

    // First record of January is used, not the sum of both
    assert_eq!(analysis.rows[0].spending, 2000.0);
    assert_eq!(analysis.rows[1].spending, 0.0);
    assert_eq!(analysis.rows[5].savings, 1000.0);

    let titles: Vec<&str> = analysis.insights.iter().map(|i| i.title.as_str()).collect();
    // Flat nominal salary, inflation falls from 10.1% to 4.0% so real pay rises
    assert_eq!(titles, vec!["Salary Growth", "Savings Rate", "Increasing Expenses"]);

    let savings_rate = analysis.insights[1].value.as_ref().and_then(InsightValue::as_number);
    assert!((savings_rate.unwrap() - 6.25).abs() < 1e-9);
    assert_eq!(analysis.insights[1].category, InsightCategory::Negative);
    Ok(())
}

#[test]
fn test_savings_rate_scenario() -> anyhow::Result<()> {
    let mut data = UserFinancialData::new("US", "USD");
    data.salary = month_series(2024, &[3000.0, 3000.0, 3000.0, 3000.0]);
    data.savings = month_series(2024, &[750.0, 750.0, 750.0, 750.0]);

    let analysis = analyze_financial_data(&data)?;
    let rate = analysis
        .insights
        .iter()
        .find(|i| i.title == "Savings Rate")
        .unwrap();

    assert_eq!(rate.value, Some(InsightValue::Number(25.0)));
    assert_eq!(rate.category, InsightCategory::Positive);
    Ok(())
}

#[test]
fn test_single_month_needs_more_data() -> anyhow::Result<()> {
    let data = UserFinancialData::from_csv("date,amount\n2024-01-01,5000\n", None, None, "IN", "INR")?;
    let analysis = analyze_financial_data(&data)?;

    assert_eq!(analysis.rows.len(), 1);
    assert_eq!(analysis.insights.len(), 1);
    assert_eq!(analysis.insights[0].title, "More Data Needed");
    assert_eq!(analysis.insights[0].category, InsightCategory::Neutral);
    Ok(())
}

#[test]
fn test_upload_failures() {
    let err = UserFinancialData::from_csv("month,value\n1,2\n", None, None, "US", "USD").unwrap_err();
    assert!(matches!(err, InsightsError::MissingColumn { .. }));
    assert!(err.to_string().contains("month, value"));

    let err = UserFinancialData::from_csv("date,amount\n\n  \n", None, None, "US", "USD").unwrap_err();
    assert!(matches!(err, InsightsError::EmptyData { kind: RecordKind::Salary }));

    let parsed = UserFinancialData::from_csv(
        SALARY_CSV,
        Some("date,amount\n2024-01-01,1,000\n"),
        None,
        "US",
        "USD",
    );
    // The stray comma shifts "000" into a third column, so "1" still parses
    assert_eq!(parsed.unwrap().savings[0].amount, 1.0);

    // Quotes do not protect the comma: the amount cell is `"1`
    let err = UserFinancialData::from_csv(
        SALARY_CSV,
        Some("date,amount\n2024-01-01,\"1,000\"\n"),
        None,
        "US",
        "USD",
    )
    .unwrap_err();
    match err {
        InsightsError::InvalidAmount { line, value } => {
            assert_eq!(line, 2);
            assert_eq!(value, "\"1");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_stray_quote_does_not_swallow_later_rows() -> anyhow::Result<()> {
    let spending_csv = "\
date,amount,category
2024-01-05,120,\"Food
2024-02-05,200,Rent
2024-03-05,300,Rent
";
    let salary_csv = "date,amount\n2024-01-01,5000\n2024-02-01,5000\n2024-03-01,5000\n";

    let data = UserFinancialData::from_csv(salary_csv, None, Some(spending_csv), "US", "USD")?;
    assert_eq!(data.spending.len(), 3);

    let rows = analyze_financial_data(&data)?.rows;
    let spending: Vec<f64> = rows.iter().map(|r| r.spending).collect();
    assert_eq!(spending, vec![120.0, 200.0, 300.0]);
    Ok(())
}

#[test]
fn test_unknown_country_uses_fallback_rates() -> anyhow::Result<()> {
    let mut us = UserFinancialData::from_csv(SALARY_CSV, None, None, "US", "USD")?;
    let us_rows = AnalysisPipeline::new().align(&us);

    us.country_code = "ZZ".to_string();
    let unknown_rows = AnalysisPipeline::new().align(&us);

    assert_eq!(us_rows, unknown_rows);
    Ok(())
}

#[test]
fn test_json_inflation_table_is_injected() -> anyhow::Result<()> {
    let json = r#"{
        "US": [{"year": 2024, "month": 1, "ratePercent": 0.0}],
        "SG": [{"year": 2024, "month": 1, "ratePercent": 100.0}]
    }"#;
    let table = InflationTable::from_json(json)?;
    let pipeline = AnalysisPipeline::with_source(table);

    let data = UserFinancialData::from_csv(SALARY_CSV, None, None, "SG", "SGD")?;
    let rows = pipeline.align(&data);
    assert_eq!(rows[0].adjusted_salary, 2500.0);
    assert_eq!(rows[1].adjusted_salary, 2750.0);

    let rates = BTreeMap::from([("UK".to_string(), vec![InflationRatePoint::new(2024, 1, 1.0)])]);
    assert!(InflationTable::new(rates, "US").is_err());
    Ok(())
}

#[test]
fn test_analysis_is_repeatable_and_serializable() -> anyhow::Result<()> {
    let data = sample_user_data("US", "USD", ymd(2024, 2, 15), &mut StdRng::seed_from_u64(9));
    let pipeline = AnalysisPipeline::new();

    let first = pipeline.analyze(&data)?;
    let second = pipeline.analyze(&data)?;
    assert_eq!(first, second);
    assert_eq!(first.rows.len(), 12);
    assert_eq!(first.rows[0].label, "Mar 2023");
    assert_eq!(first.rows[11].label, "Feb 2024");
    assert!(first.rows.iter().all(|r| r.savings > 0.0 && r.spending > 0.0));

    let json = serde_json::to_value(&first)?;
    let row = &json["rows"][0];
    for field in ["name", "salary", "adjustedSalary", "savings", "spending"] {
        assert!(row.get(field).is_some(), "missing chart field {}", field);
    }

    let round_trip: FinancialAnalysis = serde_json::from_value(json)?;
    assert_eq!(round_trip.rows.len(), first.rows.len());
    assert_eq!(round_trip.insights.len(), first.insights.len());
    Ok(())
}

#[test]
fn test_summary_for_external_review() -> anyhow::Result<()> {
    let data = UserFinancialData::from_csv(SALARY_CSV, None, None, "US", "USD")?;
    let analysis = analyze_financial_data(&data)?;

    let summary = AnalysisSummary::from_rows(&data, &analysis.rows).unwrap();
    let prompt = summary.to_prompt();
    assert!(prompt.contains("period Jan 2024 to Feb 2024"));
    assert!(prompt.contains("- Salary growth: 10.0%"));
    assert!(prompt.contains("- Country: US"));
    Ok(())
}
