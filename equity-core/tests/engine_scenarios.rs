//! End-to-end scenarios exercised through the engine facade.

use chrono::NaiveDate;
use equity_core::{
    AmtHeadroom, Client, DispositionKind, EquityTaxEngine, FilingStatusCode, Grant, GrantKind,
    PlannedExercise, VestingVariant,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn california_client() -> Client {
    Client {
        id: 1,
        name: "Avery Chen".to_string(),
        filing_status: FilingStatusCode::MarriedFilingJointly,
        federal_bracket: dec!(37),
        state: "CA".to_string(),
        annual_income: Some(dec!(200000)),
        state_rate_override: None,
        ltcg_rate_override: None,
        grants: Vec::new(),
        planned_exercises: Vec::new(),
    }
}

fn rsu_grant() -> Grant {
    Grant {
        id: 1,
        kind: GrantKind::Rsu,
        ticker: "ACME".to_string(),
        current_price: dec!(50),
        strike_price: None,
        grant_date: date(2024, 1, 15),
        total_shares: dec!(800),
        vesting_variant: VestingVariant::CliffThenQuarterly,
        withholding_rate: None,
    }
}

fn iso_grant() -> Grant {
    Grant {
        id: 2,
        kind: GrantKind::Iso,
        ticker: "ACME".to_string(),
        current_price: dec!(50),
        strike_price: Some(dec!(10)),
        grant_date: date(2023, 6, 1),
        total_shares: dec!(1600),
        vesting_variant: VestingVariant::Quarterly,
        withholding_rate: None,
    }
}

#[test]
fn qualified_iso_sale_worked_example() {
    let engine = EquityTaxEngine::projected();

    let scenario = engine
        .iso_scenario(
            dec!(1000),
            dec!(10),
            dec!(50),
            dec!(100),
            &california_client(),
            DispositionKind::Qualified,
        )
        .unwrap();

    assert_eq!(scenario.exercise_cost, dec!(10000.00));
    assert_eq!(scenario.sale_proceeds, dec!(100000.00));
    assert_eq!(scenario.capital_gain, dec!(90000.00));
    assert_eq!(scenario.taxes.total, dec!(34380.00));
    assert_eq!(scenario.net_profit, dec!(55620.00));
}

#[test]
fn disqualified_iso_sale_worked_example() {
    let engine = EquityTaxEngine::projected();

    let scenario = engine
        .iso_scenario(
            dec!(1000),
            dec!(10),
            dec!(50),
            dec!(50),
            &california_client(),
            DispositionKind::Disqualified,
        )
        .unwrap();

    assert_eq!(scenario.ordinary_income, dec!(40000.00));
    assert_eq!(scenario.capital_gain, dec!(0));
    assert_eq!(scenario.taxes.total, dec!(20560.00));
    assert_eq!(scenario.net_profit, dec!(19440.00));
}

#[test]
fn comparison_pairs_both_dispositions() {
    let engine = EquityTaxEngine::projected();

    let comparison = engine
        .compare_iso_dispositions(dec!(1000), dec!(10), dec!(50), dec!(100), &california_client())
        .unwrap();

    assert_eq!(comparison.qualified.net_profit, dec!(55620.00));
    assert!(comparison.qualified.net_profit > comparison.disqualified.net_profit);
}

#[test]
fn rsu_schedule_covers_all_shares_in_order() {
    let engine = EquityTaxEngine::projected();
    let client = california_client();

    let schedule = engine
        .generate_vesting_schedule(&rsu_grant(), &client, date(2025, 6, 1), false)
        .unwrap();

    assert_eq!(schedule.len(), 13);
    let total: Decimal = schedule.iter().map(|event| event.shares).sum();
    assert_eq!(total, dec!(800));
    for pair in schedule.windows(2) {
        assert!(pair[0].date < pair[1].date);
    }

    // The January 2025 cliff: $10,000 gross at the default 22%
    // withholding against a 37% + 14.4% liability.
    let cliff = &schedule[0];
    assert_eq!(cliff.gross_value, dec!(10000.00));
    assert_eq!(cliff.withholding, dec!(2200.00));
    assert_eq!(cliff.tax_gap, dec!(2940.00));
    assert!(cliff.is_past);
}

#[test]
fn grant_status_reflects_planned_exercises() {
    let engine = EquityTaxEngine::projected();
    let grant = iso_grant();
    let exercise = PlannedExercise::plan(&grant, dec!(300), date(2025, 6, 1), true).unwrap();

    let status = engine
        .grant_status(&grant, std::slice::from_ref(&exercise), date(2025, 6, 15))
        .unwrap();

    // Eight quarterly tranches of 100 shares vested strictly before
    // mid-June 2025 (2023-09-01 through 2025-06-01).
    assert_eq!(status.vested, dec!(800));
    assert_eq!(status.exercised, dec!(300));
    assert_eq!(status.available, dec!(500));
    assert_eq!(status.unvested, dec!(800));
}

#[test]
fn amt_room_report_for_a_client_with_rsu_income() {
    init_tracing();
    let engine = EquityTaxEngine::projected();
    let mut client = california_client();
    client.grants.push(rsu_grant());

    let report = engine.amt_room(&client, date(2025, 6, 1)).unwrap();

    assert_eq!(report.projected_rsu_income, dec!(17500.00));
    assert_eq!(report.base_income, dec!(200000));
    assert!(matches!(report.headroom, AmtHeadroom::Room(_)));
}

#[test]
fn effective_rates_resolve_overrides_first() {
    let engine = EquityTaxEngine::projected();
    let mut client = california_client();
    client.state_rate_override = Some(dec!(0.10));

    let rates = engine.effective_rates(&client).unwrap();

    assert_eq!(rates.state_rate, dec!(0.10));
    assert_eq!(rates.fed_ltcg_rate, dec!(0.20));
}
