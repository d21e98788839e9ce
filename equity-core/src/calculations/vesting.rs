//! Vesting schedule generation with withholding and tax-gap analysis.
//!
//! Expands a grant's vesting variant into a chronological sequence of
//! [`VestingEvent`]s. The supported variants:
//!
//! | Variant             | Events | Shape                                              |
//! |---------------------|--------|----------------------------------------------------|
//! | CliffThenQuarterly  | 13     | 25% at month 12, then 6.25% quarterly × 12         |
//! | Quarterly           | 16     | 6.25% quarterly × 16, first at month 3             |
//!
//! Per-event tax treatment depends on the grant kind:
//!
//! - **RSU**: vesting is a taxable event. Withholding is gross × the
//!   elected rate (default 22%); the federal + state liability uses the
//!   client's marginal bracket and effective state rate; the tax gap is
//!   whatever liability withholding does not cover.
//! - **ISO**: vesting is never a taxable event. The gross value is the
//!   informational bargain spread only, and withholding, tax gap, and
//!   AMT exposure are all zero (AMT arises from an actual exercise,
//!   which is modeled separately).
//!
//! The returned schedule is always sorted ascending by date, and the sum
//! of event shares equals the grant's total shares exactly; the tranche
//! fractions (25%, 6.25%) are exact in decimal arithmetic.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::calculations::common::{non_negative, round_half_up};
use crate::calculations::rates::RateResolver;
use crate::error::EngineError;
use crate::models::{
    Client, Grant, GrantKind, TaxBreakdown, TaxYearConfig, VestingEvent, VestingVariant,
};

/// Fraction of total shares released at the twelve-month cliff.
const CLIFF_FRACTION: Decimal = Decimal::from_parts(25, 0, 0, false, 2);
/// Fraction of total shares released by each quarterly tranche (6.25%).
const QUARTERLY_FRACTION: Decimal = Decimal::from_parts(625, 0, 0, false, 4);

/// Expands a grant into raw vesting tranches: date and share count,
/// before tax annotation.
///
/// Share counts are independent of the client's tax profile, so grant
/// status derivation consumes tranches directly.
pub(crate) fn tranches(grant: &Grant) -> Result<Vec<(NaiveDate, Decimal)>, EngineError> {
    let vest_date = |months: u32| {
        grant
            .grant_date
            .checked_add_months(Months::new(months))
            .ok_or(EngineError::VestingDateOverflow)
    };

    let mut tranches = Vec::new();
    match grant.vesting_variant {
        VestingVariant::CliffThenQuarterly => {
            tranches.push((vest_date(12)?, grant.total_shares * CLIFF_FRACTION));
            for quarter in 1..=12u32 {
                tranches.push((
                    vest_date(12 + 3 * quarter)?,
                    grant.total_shares * QUARTERLY_FRACTION,
                ));
            }
        }
        VestingVariant::Quarterly => {
            for quarter in 1..=16u32 {
                tranches.push((
                    vest_date(3 * quarter)?,
                    grant.total_shares * QUARTERLY_FRACTION,
                ));
            }
        }
    }
    Ok(tranches)
}

/// Expands grants into annotated vesting schedules.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use equity_core::calculations::VestingScheduleGenerator;
/// use equity_core::{
///     Client, FilingStatusCode, Grant, GrantKind, TaxYearConfig, VestingVariant,
/// };
///
/// let config = TaxYearConfig::projected();
/// let generator = VestingScheduleGenerator::new(&config);
/// let grant = Grant {
///     id: 1,
///     kind: GrantKind::Rsu,
///     ticker: "ACME".to_string(),
///     current_price: dec!(40),
///     strike_price: None,
///     grant_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
///     total_shares: dec!(1600),
///     vesting_variant: VestingVariant::Quarterly,
///     withholding_rate: None,
/// };
/// let client = Client {
///     id: 1,
///     name: "Example".to_string(),
///     filing_status: FilingStatusCode::Single,
///     federal_bracket: dec!(35),
///     state: "WA".to_string(),
///     annual_income: None,
///     state_rate_override: None,
///     ltcg_rate_override: None,
///     grants: Vec::new(),
///     planned_exercises: Vec::new(),
/// };
///
/// let as_of = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let schedule = generator.generate(&grant, &client, as_of, false).unwrap();
///
/// assert_eq!(schedule.len(), 16);
/// assert_eq!(schedule[0].shares, dec!(100.0000));
/// assert!(schedule[0].is_past); // 2024-04-15 is before the evaluation date
/// ```
#[derive(Debug, Clone)]
pub struct VestingScheduleGenerator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> VestingScheduleGenerator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Generates the full vesting schedule for a grant, sorted ascending
    /// by date.
    ///
    /// `as_of` is the evaluation instant: events strictly before it are
    /// flagged `is_past`. With `simulate_sell_all` set, every RSU tranche
    /// is modeled as fully liquidated at vest (net shares zero, net value
    /// in cash); otherwise only enough shares to fund withholding are
    /// notionally sold.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the grant or client fails validation,
    /// or on calendar overflow.
    pub fn generate(
        &self,
        grant: &Grant,
        client: &Client,
        as_of: NaiveDate,
        simulate_sell_all: bool,
    ) -> Result<Vec<VestingEvent>, EngineError> {
        grant.validate()?;
        client.validate()?;

        let rates = RateResolver::new(self.config).resolve(client);

        let mut events = Vec::new();
        for (date, shares) in tranches(grant)? {
            let event = match grant.kind {
                GrantKind::Rsu => {
                    self.rsu_event(grant, client, rates.state_rate, date, shares, simulate_sell_all)
                }
                GrantKind::Iso => self.iso_event(grant, date, shares)?,
            };
            events.push(event);
        }

        // Ascending date order is part of the contract, not a side effect
        // of generation order.
        events.sort_by_key(|event| event.date);
        for event in &mut events {
            event.is_past = event.date < as_of;
        }
        Ok(events)
    }

    /// An RSU tranche: taxable at vest, withheld at the elected rate.
    fn rsu_event(
        &self,
        grant: &Grant,
        client: &Client,
        state_rate: Decimal,
        date: NaiveDate,
        shares: Decimal,
        simulate_sell_all: bool,
    ) -> VestingEvent {
        let price = grant.current_price;
        let withholding_rate = grant
            .withholding_rate
            .unwrap_or(self.config.default_withholding_rate);

        let gross_value = round_half_up(shares * price);
        let withholding = round_half_up(gross_value * withholding_rate);

        let federal_rate = client.federal_bracket / Decimal::ONE_HUNDRED;
        let federal_amount = round_half_up(gross_value * federal_rate);
        let state_amount = round_half_up(gross_value * state_rate);
        let taxes = TaxBreakdown {
            federal_rate,
            federal_amount,
            // Wage income at vest; NIIT applies to investment income only.
            niit_rate: Decimal::ZERO,
            niit_amount: Decimal::ZERO,
            state_rate,
            state_amount,
            total: federal_amount + state_amount,
        };
        let tax_gap = non_negative(taxes.total - withholding);

        let (shares_sold_to_cover, net_shares, net_value) = if simulate_sell_all {
            (Some(shares), Decimal::ZERO, gross_value - withholding)
        } else if price > Decimal::ZERO {
            let sold = withholding / price;
            let net_shares = shares - sold;
            (Some(sold), net_shares, round_half_up(net_shares * price))
        } else {
            // Zero price: cover-share math is undefined, not infinite.
            (None, shares, Decimal::ZERO)
        };

        VestingEvent {
            date,
            shares,
            gross_value,
            withholding,
            withholding_rate,
            net_shares,
            net_value,
            shares_sold_to_cover,
            tax_gap,
            amt_exposure: Decimal::ZERO,
            taxes,
            is_past: false,
        }
    }

    /// An ISO tranche: never taxable at vest. The gross value is the
    /// informational bargain spread, floored at zero for underwater
    /// options.
    fn iso_event(
        &self,
        grant: &Grant,
        date: NaiveDate,
        shares: Decimal,
    ) -> Result<VestingEvent, EngineError> {
        let strike = grant.strike()?;
        let spread = non_negative(grant.current_price - strike);
        let gross_value = round_half_up(spread * shares);

        Ok(VestingEvent {
            date,
            shares,
            gross_value,
            withholding: Decimal::ZERO,
            withholding_rate: Decimal::ZERO,
            net_shares: shares,
            net_value: gross_value,
            shares_sold_to_cover: None,
            tax_gap: Decimal::ZERO,
            amt_exposure: Decimal::ZERO,
            taxes: TaxBreakdown::ZERO,
            is_past: false,
        })
    }
}
