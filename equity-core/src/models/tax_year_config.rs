//! Versioned tax-rule configuration.
//!
//! Every rate table and threshold the engine consults lives in
//! [`TaxYearConfig`], an immutable value injected at engine construction.
//! Supporting a future tax year means constructing a different config
//! value, not editing calculator code. [`TaxYearConfig::projected`]
//! returns the single projected rule set the planner currently ships;
//! it is a planning approximation and is not validated against enacted
//! law for any particular year.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::filing_status::FilingStatusCode;

/// One marginal bracket of the federal ordinary income schedule.
///
/// Brackets are ordered ascending; the last bracket is open-ended
/// (`upper_limit = None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdinaryBracket {
    pub upper_limit: Option<Decimal>,
    pub rate: Decimal,
}

/// Parameters of the Alternative Minimum Tax model.
///
/// The AMT exemption phases out linearly above a status-specific
/// threshold, and the Tentative Minimum Tax is two-tier: `low_rate`
/// below `rate_threshold`, `high_rate` above it. The solver searches
/// ISO spread in `search_step` increments up to `search_cap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmtParameters {
    pub exemption_single: Decimal,
    pub exemption_married_joint: Decimal,
    pub phaseout_threshold_single: Decimal,
    pub phaseout_threshold_married_joint: Decimal,
    /// Exemption reduction per dollar of AMTI above the phase-out
    /// threshold (25 cents on the dollar).
    pub exemption_phaseout_rate: Decimal,
    pub low_rate: Decimal,
    pub high_rate: Decimal,
    /// AMT base above which `high_rate` applies instead of `low_rate`.
    pub rate_threshold: Decimal,
    pub search_step: Decimal,
    pub search_cap: Decimal,
}

impl AmtParameters {
    pub fn exemption(&self, status: FilingStatusCode) -> Decimal {
        match status {
            FilingStatusCode::Single => self.exemption_single,
            FilingStatusCode::MarriedFilingJointly => self.exemption_married_joint,
        }
    }

    pub fn phaseout_threshold(&self, status: FilingStatusCode) -> Decimal {
        match status {
            FilingStatusCode::Single => self.phaseout_threshold_single,
            FilingStatusCode::MarriedFilingJointly => self.phaseout_threshold_married_joint,
        }
    }
}

/// Effective state income tax rates by two-letter state code.
///
/// Codes not present in the table resolve to `fallback_rate`, never an
/// error; the fallback is the catch-all category for states the planner
/// does not model individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRateTable {
    rates: BTreeMap<String, Decimal>,
    pub fallback_rate: Decimal,
}

impl StateRateTable {
    pub fn new(rates: BTreeMap<String, Decimal>, fallback_rate: Decimal) -> Self {
        Self {
            rates,
            fallback_rate,
        }
    }

    /// Resolves the effective rate for a state code.
    ///
    /// Lookup is case-insensitive and ignores surrounding whitespace.
    pub fn rate_for(&self, code: &str) -> Decimal {
        let normalized = code.trim().to_ascii_uppercase();
        self.rates
            .get(&normalized)
            .copied()
            .unwrap_or(self.fallback_rate)
    }
}

/// The complete rule set for one projected tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,

    /// Federal ordinary brackets, ascending, last bracket open-ended.
    pub single_brackets: Vec<OrdinaryBracket>,
    pub married_joint_brackets: Vec<OrdinaryBracket>,

    pub standard_deduction_single: Decimal,
    pub standard_deduction_married_joint: Decimal,

    /// Per-person exemption used by the AMT room worksheet's regular-tax
    /// side (part of the projected rule set, kept even though current law
    /// suspends it).
    pub personal_exemption: Decimal,

    pub amt: AmtParameters,
    pub state_rates: StateRateTable,

    /// Net Investment Income Tax rate applied to capital gains.
    pub niit_rate: Decimal,

    /// Supplemental withholding rate used when an RSU grant carries no
    /// elected rate.
    pub default_withholding_rate: Decimal,

    /// Ordinary-bracket percentage above which the simplified LTCG model
    /// uses `ltcg_high_rate` instead of `ltcg_low_rate`.
    pub ltcg_bracket_threshold: Decimal,
    pub ltcg_low_rate: Decimal,
    pub ltcg_high_rate: Decimal,

    /// Assumed annual income when a client has no estimate on file.
    pub default_annual_income: Decimal,
}

impl TaxYearConfig {
    pub fn ordinary_brackets(&self, status: FilingStatusCode) -> &[OrdinaryBracket] {
        match status {
            FilingStatusCode::Single => &self.single_brackets,
            FilingStatusCode::MarriedFilingJointly => &self.married_joint_brackets,
        }
    }

    pub fn standard_deduction(&self, status: FilingStatusCode) -> Decimal {
        match status {
            FilingStatusCode::Single => self.standard_deduction_single,
            FilingStatusCode::MarriedFilingJointly => self.standard_deduction_married_joint,
        }
    }

    /// The projected rule set the planner ships with.
    ///
    /// Ordinary brackets and standard deductions follow the 2025 federal
    /// schedules; the AMT and exemption figures are the planner's
    /// projected approximation. State rates are effective combined
    /// figures, not statutory marginal rates.
    pub fn projected() -> Self {
        fn bracket(upper_limit: Option<i64>, rate_pct: i64) -> OrdinaryBracket {
            OrdinaryBracket {
                upper_limit: upper_limit.map(Decimal::from),
                rate: Decimal::new(rate_pct, 2),
            }
        }

        let single_brackets = vec![
            bracket(Some(11_925), 10),
            bracket(Some(48_475), 12),
            bracket(Some(103_350), 22),
            bracket(Some(197_300), 24),
            bracket(Some(250_525), 32),
            bracket(Some(626_350), 35),
            bracket(None, 37),
        ];
        let married_joint_brackets = vec![
            bracket(Some(23_850), 10),
            bracket(Some(96_950), 12),
            bracket(Some(206_700), 22),
            bracket(Some(394_600), 24),
            bracket(Some(501_050), 32),
            bracket(Some(751_600), 35),
            bracket(None, 37),
        ];

        let state_rates = StateRateTable::new(
            [
                ("CA", Decimal::new(144, 3)),
                ("NY", Decimal::new(109, 3)),
                ("NJ", Decimal::new(1075, 4)),
                ("HI", Decimal::new(11, 2)),
                ("OR", Decimal::new(99, 3)),
                ("MN", Decimal::new(985, 4)),
                ("MA", Decimal::new(9, 2)),
                ("WI", Decimal::new(765, 4)),
                ("CT", Decimal::new(699, 4)),
                ("MD", Decimal::new(575, 4)),
                ("VA", Decimal::new(575, 4)),
                ("GA", Decimal::new(549, 4)),
                ("IL", Decimal::new(495, 4)),
                ("UT", Decimal::new(465, 4)),
                ("NC", Decimal::new(45, 3)),
                ("CO", Decimal::new(44, 3)),
                ("MI", Decimal::new(425, 4)),
                ("OH", Decimal::new(399, 4)),
                ("PA", Decimal::new(307, 4)),
                ("AZ", Decimal::new(25, 3)),
                ("AK", Decimal::ZERO),
                ("FL", Decimal::ZERO),
                ("NH", Decimal::ZERO),
                ("NV", Decimal::ZERO),
                ("SD", Decimal::ZERO),
                ("TN", Decimal::ZERO),
                ("TX", Decimal::ZERO),
                ("WA", Decimal::ZERO),
                ("WY", Decimal::ZERO),
            ]
            .into_iter()
            .map(|(code, rate)| (code.to_string(), rate))
            .collect(),
            Decimal::new(5, 2),
        );

        Self {
            tax_year: 2025,
            single_brackets,
            married_joint_brackets,
            standard_deduction_single: Decimal::from(15_000),
            standard_deduction_married_joint: Decimal::from(30_000),
            personal_exemption: Decimal::from(4_050),
            amt: AmtParameters {
                exemption_single: Decimal::from(70_300),
                exemption_married_joint: Decimal::from(109_400),
                phaseout_threshold_single: Decimal::from(500_000),
                phaseout_threshold_married_joint: Decimal::from(1_000_000),
                exemption_phaseout_rate: Decimal::new(25, 2),
                low_rate: Decimal::new(26, 2),
                high_rate: Decimal::new(28, 2),
                rate_threshold: Decimal::from(191_500),
                search_step: Decimal::from(1_000),
                search_cap: Decimal::from(10_000_000),
            },
            state_rates,
            niit_rate: Decimal::new(38, 3),
            default_withholding_rate: Decimal::new(22, 2),
            ltcg_bracket_threshold: Decimal::from(33),
            ltcg_low_rate: Decimal::new(15, 2),
            ltcg_high_rate: Decimal::new(20, 2),
            default_annual_income: Decimal::from(250_000),
        }
    }
}
