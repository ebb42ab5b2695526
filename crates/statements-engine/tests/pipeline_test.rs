//! End-to-end tests of the normalization pipeline

use approx::assert_relative_eq;
use chrono::{Datelike, NaiveDate};
use statements_core::{FiscalPeriod, FormType, LineItem, OutputType, RawFact};
use statements_engine::{StatementConfig, build_income_statement};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A USD duration fact as it would appear in a filing for `fy`/`fp`.
fn usd(tag: &str, value: f64, start: NaiveDate, end: NaiveDate, fy: i32, fp: FiscalPeriod) -> RawFact {
    let (form, filed) = match fp {
        FiscalPeriod::FY => (FormType::AnnualReport, end + chrono::Days::new(40)),
        _ => (FormType::QuarterlyReport, end + chrono::Days::new(35)),
    };
    RawFact::new(tag, value, "USD", Some(start), end).with_filing(form, fy, fp, filed)
}

/// Calendar quarter `q` of 2023 as a standalone span.
fn quarter_2023(q: u32) -> (NaiveDate, NaiveDate) {
    let start = date(2023, q * 3 - 2, 1);
    let end = match q {
        1 => date(2023, 3, 31),
        2 => date(2023, 6, 30),
        3 => date(2023, 9, 30),
        _ => date(2023, 12, 31),
    };
    (start, end)
}

fn fiscal_period(q: u32) -> FiscalPeriod {
    match q {
        1 => FiscalPeriod::Q1,
        2 => FiscalPeriod::Q2,
        3 => FiscalPeriod::Q3,
        _ => FiscalPeriod::Q4,
    }
}

#[test]
fn test_quarters_reconstructed_from_year_to_date() {
    let year_start = date(2023, 1, 1);
    let facts = vec![
        usd("Revenues", 400.0, year_start, date(2023, 12, 31), 2023, FiscalPeriod::FY),
        usd("Revenues", 90.0, year_start, date(2023, 3, 31), 2023, FiscalPeriod::Q1),
        usd("Revenues", 180.0, year_start, date(2023, 6, 30), 2023, FiscalPeriod::Q2),
        usd("Revenues", 280.0, year_start, date(2023, 9, 30), 2023, FiscalPeriod::Q3),
    ];
    let config = StatementConfig::new().with_fields(vec![LineItem::TotalRevenues]);
    let statement = build_income_statement("Acme Corp", &facts, &config);

    assert_eq!(statement.periods, vec!["2023Q1", "2023Q2", "2023Q3", "2023Q4"]);
    assert_eq!(
        statement.values(LineItem::TotalRevenues),
        Some(vec![Some(90.0), Some(90.0), Some(100.0), Some(120.0)])
    );

    let annual = build_income_statement(
        "Acme Corp",
        &facts,
        &config.clone().with_output_type(OutputType::Annual),
    );
    assert_eq!(annual.periods, vec!["2023"]);
    assert_eq!(annual.values(LineItem::TotalRevenues), Some(vec![Some(400.0)]));
}

#[test]
fn test_gross_profit_derived_for_a_quarter() {
    let (start, end) = quarter_2023(1);
    let facts = vec![
        usd("Revenues", 1000.0, start, end, 2023, FiscalPeriod::Q1),
        usd("CostOfRevenue", 600.0, start, end, 2023, FiscalPeriod::Q1),
    ];
    let config = StatementConfig::new().with_fields(vec![
        LineItem::TotalRevenues,
        LineItem::CostOfRevenues,
        LineItem::GrossProfit,
    ]);
    let statement = build_income_statement("Acme Corp", &facts, &config);

    assert_eq!(statement.values(LineItem::GrossProfit), Some(vec![Some(400.0)]));
    let cell = &statement.series(LineItem::GrossProfit).unwrap().cells[0];
    assert_eq!(cell.formatted.as_deref(), Some("$400.00"));
}

#[test]
fn test_ttm_net_income() {
    let values = [10.0, 12.0, 11.0, 13.0];
    let facts: Vec<RawFact> = (1..=4)
        .map(|q| {
            let (start, end) = quarter_2023(q);
            usd("NetIncomeLoss", values[q as usize - 1], start, end, 2023, fiscal_period(q))
        })
        .collect();
    let config = StatementConfig::new()
        .with_fields(vec![LineItem::NetIncome])
        .with_output_type(OutputType::Ttm);

    let statement = build_income_statement("Acme Corp", &facts, &config);
    assert_eq!(statement.periods, vec!["2023Q1", "2023Q2", "2023Q3", "2023Q4"]);
    assert_eq!(
        statement.values(LineItem::NetIncome),
        Some(vec![None, None, None, Some(46.0)])
    );

    let without_q2: Vec<RawFact> = facts
        .into_iter()
        .filter(|fact| fact.fiscal_period != Some(FiscalPeriod::Q2))
        .collect();
    let statement = build_income_statement("Acme Corp", &without_q2, &config);
    assert_eq!(statement.periods, vec!["2023Q1", "2023Q3", "2023Q4"]);
    assert_eq!(statement.values(LineItem::NetIncome), Some(vec![None, None, None]));
}

#[test]
fn test_start_date_on_quarter_end_is_included() {
    let facts: Vec<RawFact> = (1..=4)
        .map(|q| {
            let (start, end) = quarter_2023(q);
            usd("Revenues", 100.0 * f64::from(q), start, end, 2023, fiscal_period(q))
        })
        .collect();

    let included = StatementConfig::new()
        .with_fields(vec![LineItem::TotalRevenues])
        .with_start_date(date(2023, 6, 30));
    let statement = build_income_statement("Acme Corp", &facts, &included);
    assert_eq!(statement.periods, vec!["2023Q2", "2023Q3", "2023Q4"]);

    let excluded = StatementConfig::new()
        .with_fields(vec![LineItem::TotalRevenues])
        .with_start_date(date(2023, 7, 1));
    let statement = build_income_statement("Acme Corp", &facts, &excluded);
    assert_eq!(statement.periods, vec!["2023Q3", "2023Q4"]);
}

/// Two years of a filer that reports only year-to-date figures in its 10-Qs,
/// with prior-year comparatives and a restated first quarter.
fn filer_history() -> Vec<RawFact> {
    let mut facts = Vec::new();
    for (fy, revenue, cost, tax) in [(2022, [100.0, 210.0, 330.0, 460.0], 0.6, 0.2), (2023, [120.0, 250.0, 390.0, 540.0], 0.55, 0.21)] {
        let year_start = date(fy, 1, 1);
        let ends = [date(fy, 3, 31), date(fy, 6, 30), date(fy, 9, 30), date(fy, 12, 31)];
        let periods = [FiscalPeriod::Q1, FiscalPeriod::Q2, FiscalPeriod::Q3, FiscalPeriod::FY];
        for ((end, fp), ytd) in ends.into_iter().zip(periods).zip(revenue) {
            facts.push(usd("RevenueFromContractWithCustomerExcludingAssessedTax", ytd, year_start, end, fy, fp));
            facts.push(usd("CostOfGoodsAndServicesSold", ytd * cost, year_start, end, fy, fp));
            facts.push(usd("us-gaap:IncomeTaxExpenseBenefit", ytd * tax * 0.1, year_start, end, fy, fp));
            // prior-year comparative carried in the same filing
            let prior_end = date(fy - 1, end.month0() + 1, end.day());
            facts.push(usd("RevenueFromContractWithCustomerExcludingAssessedTax", ytd * 0.5, date(fy - 1, 1, 1), prior_end, fy, fp));
        }
    }
    // restated 2023 Q1 revenue, filed later
    let (start, end) = (date(2023, 1, 1), date(2023, 3, 31));
    facts.push(
        RawFact::new("Revenues", 125.0, "USD", Some(start), end)
            .with_filing(FormType::from_form("10-Q/A"), 2023, FiscalPeriod::Q1, date(2023, 9, 1)),
    );
    facts
}

#[test]
fn test_restated_quarter_and_comparatives() {
    let config = StatementConfig::new().with_fields(vec![
        LineItem::TotalRevenues,
        LineItem::CostOfRevenues,
        LineItem::GrossProfit,
    ]);
    let statement = build_income_statement("Acme Corp", &filer_history(), &config);

    let revenue = statement.values(LineItem::TotalRevenues).unwrap();
    let index = statement.periods.iter().position(|p| p == "2023Q1").unwrap();
    // restatement is under a different tag but the same line item
    assert_eq!(revenue[index], Some(125.0));
    // Q2 subtracts the restated Q1 from the half-year cumulative
    assert_eq!(revenue[index + 1], Some(125.0));

    let q4_2022 = statement.periods.iter().position(|p| p == "2022Q4").unwrap();
    assert_relative_eq!(revenue[q4_2022].unwrap(), 130.0, max_relative = 1e-9);

    let gross = statement.values(LineItem::GrossProfit).unwrap();
    let cost = statement.values(LineItem::CostOfRevenues).unwrap();
    assert_relative_eq!(gross[q4_2022].unwrap(), 130.0 - cost[q4_2022].unwrap(), max_relative = 1e-9);
}

#[test]
fn test_pipeline_is_idempotent() {
    let facts = filer_history();
    let config = StatementConfig::new().with_output_type(OutputType::Ttm);
    let first = serde_json::to_string(&build_income_statement("Acme Corp", &facts, &config)).unwrap();
    let second = serde_json::to_string(&build_income_statement("Acme Corp", &facts, &config)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_every_series_is_aligned_with_periods() {
    let facts = filer_history();
    for output_type in [OutputType::Quarterly, OutputType::Annual, OutputType::Ttm] {
        let config = StatementConfig::new().with_output_type(output_type);
        let statement = build_income_statement("Acme Corp", &facts, &config);
        assert_eq!(statement.series.len(), LineItem::ALL.len());
        for series in &statement.series {
            assert_eq!(series.cells.len(), statement.periods.len());
        }
    }
}

#[test]
fn test_empty_input_yields_empty_statement() {
    let statement = build_income_statement("Acme Corp", &[], &StatementConfig::new());
    assert!(statement.is_empty());
    assert!(statement.series.iter().all(|s| s.cells.is_empty()));
}
