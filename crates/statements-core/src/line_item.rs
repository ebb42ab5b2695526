//! Canonical income-statement line items.
//!
//! Every economic concept has exactly one [`LineItem`], regardless of how many
//! taxonomy tags or friendly names denote it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::StatementError;

/// What a line item's numbers measure. Fixes the accepted unit of a fact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// A currency amount (`USD`).
    Monetary,
    /// A currency amount per share (`USD/shares`).
    PerShare,
    /// A number of shares (`shares`).
    Shares,
}

impl ValueKind {
    /// The XBRL unit a fact must be reported in for this kind.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Monetary => "USD",
            Self::PerShare => "USD/shares",
            Self::Shares => "shares",
        }
    }
}

/// Canonical income-statement line item.
///
/// The declaration order is the presentation order of an income statement and
/// is also the iteration order used everywhere results must be deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineItem {
    /// Total revenues.
    TotalRevenues,
    /// Cost of revenues.
    CostOfRevenues,
    /// Gross profit.
    GrossProfit,
    /// Research and development expenses.
    ResearchAndDevelopment,
    /// Selling, general and administrative expenses.
    SellingGeneralAdmin,
    /// Other operating expenses, total.
    OtherOperatingExpenses,
    /// Operating expenses.
    OperatingExpenses,
    /// Operating income.
    OperatingIncome,
    /// Earnings before interest and taxes.
    Ebit,
    /// Earnings before interest, taxes, depreciation and amortization.
    Ebitda,
    /// Interest expense, total.
    InterestExpense,
    /// Interest and investment income.
    InterestIncome,
    /// Net interest expenses.
    NetInterestExpense,
    /// Other non-operating expenses, total.
    OtherNonOperating,
    /// Earnings before taxes, excluding unusual items.
    EbtExclUnusual,
    /// Gain (loss) on sale of assets.
    GainLossOnSaleOfAssets,
    /// Other unusual items, total.
    OtherUnusualItems,
    /// Earnings before taxes, including unusual items.
    EbtInclUnusual,
    /// Income tax expense.
    IncomeTaxExpense,
    /// Net income including the non-controlling share.
    NetIncomeToCompany,
    /// Minority (non-controlling) interest.
    MinorityInterest,
    /// Net income attributable to the parent.
    NetIncome,
    /// Preferred dividends and other adjustments.
    PreferredDividends,
    /// Net income to common shareholders, excluding extra items.
    NetIncomeToCommon,
    /// Basic earnings per share, continuing operations.
    BasicEps,
    /// Diluted earnings per share, continuing operations.
    DilutedEps,
    /// Basic weighted average shares outstanding.
    BasicWeightedShares,
    /// Diluted weighted average shares outstanding.
    DilutedWeightedShares,
    /// Dividend per share.
    DividendPerShare,
}

impl LineItem {
    /// Every line item, in presentation order.
    pub const ALL: [Self; 29] = [
        Self::TotalRevenues,
        Self::CostOfRevenues,
        Self::GrossProfit,
        Self::ResearchAndDevelopment,
        Self::SellingGeneralAdmin,
        Self::OtherOperatingExpenses,
        Self::OperatingExpenses,
        Self::OperatingIncome,
        Self::Ebit,
        Self::Ebitda,
        Self::InterestExpense,
        Self::InterestIncome,
        Self::NetInterestExpense,
        Self::OtherNonOperating,
        Self::EbtExclUnusual,
        Self::GainLossOnSaleOfAssets,
        Self::OtherUnusualItems,
        Self::EbtInclUnusual,
        Self::IncomeTaxExpense,
        Self::NetIncomeToCompany,
        Self::MinorityInterest,
        Self::NetIncome,
        Self::PreferredDividends,
        Self::NetIncomeToCommon,
        Self::BasicEps,
        Self::DilutedEps,
        Self::BasicWeightedShares,
        Self::DilutedWeightedShares,
        Self::DividendPerShare,
    ];

    /// The display name used in requests and responses.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TotalRevenues => "Total Revenues",
            Self::CostOfRevenues => "Cost Of Revenues",
            Self::GrossProfit => "Gross Profit",
            Self::ResearchAndDevelopment => "R&D Expenses",
            Self::SellingGeneralAdmin => "Selling General & Admin Expenses",
            Self::OtherOperatingExpenses => "Other Operating Expenses, Total",
            Self::OperatingExpenses => "Operating Expenses",
            Self::OperatingIncome => "Operating Income",
            Self::Ebit => "EBIT",
            Self::Ebitda => "EBITDA",
            Self::InterestExpense => "Interest Expense, Total",
            Self::InterestIncome => "Interest And Investment Income",
            Self::NetInterestExpense => "Net Interest Expenses",
            Self::OtherNonOperating => "Other Non Operating Expenses, Total",
            Self::EbtExclUnusual => "EBT, Excl. Unusual Items",
            Self::GainLossOnSaleOfAssets => "Gain (Loss) On Sale Of Assets",
            Self::OtherUnusualItems => "Other Unusual Items, Total",
            Self::EbtInclUnusual => "EBT, Incl. Unusual Items",
            Self::IncomeTaxExpense => "Income Tax Expense",
            Self::NetIncomeToCompany => "Net Income to Company",
            Self::MinorityInterest => "Minority Interest",
            Self::NetIncome => "Net Income",
            Self::PreferredDividends => "Preferred Dividend and Other Adjustments",
            Self::NetIncomeToCommon => "Net Income to Common Excl. Extra Items",
            Self::BasicEps => "Basic EPS - Continuing Operations",
            Self::DilutedEps => "Diluted EPS - Continuing Operations",
            Self::BasicWeightedShares => "Basic Weighted Average Shares Outstanding",
            Self::DilutedWeightedShares => "Diluted Weighted Average Shares Outstanding",
            Self::DividendPerShare => "Dividend Per Share",
        }
    }

    /// Alternative friendly names accepted in requests.
    #[must_use]
    pub const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::CostOfRevenues => &["Cost of Revenue"],
            Self::ResearchAndDevelopment => &["R&D"],
            Self::SellingGeneralAdmin => &["SG&A"],
            Self::OtherOperatingExpenses => &["Other Operating Expenses"],
            Self::IncomeTaxExpense => &["Income Tax"],
            Self::BasicEps => &["Basic EPS"],
            Self::DilutedEps => &["Diluted EPS"],
            _ => &[],
        }
    }

    /// Looks up a line item by display name or alias, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|item| {
            item.name().eq_ignore_ascii_case(name)
                || item.aliases().iter().any(|a| a.eq_ignore_ascii_case(name))
        })
    }

    /// What this line item's numbers measure.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::BasicEps | Self::DilutedEps | Self::DividendPerShare => ValueKind::PerShare,
            Self::BasicWeightedShares | Self::DilutedWeightedShares => ValueKind::Shares,
            _ => ValueKind::Monetary,
        }
    }

    /// Per-share and share-count items are taken as reported for the exact
    /// period and never reconstructed from cumulative figures.
    #[must_use]
    pub const fn is_point_in_time(&self) -> bool {
        !matches!(self.kind(), ValueKind::Monetary)
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineItem {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| StatementError::UnknownLineItem(s.to_string()))
    }
}

impl Serialize for LineItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for LineItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
