//! Taxonomy concept to line item mapping.

use statements_core::LineItem;

/// Namespace prefix accepted in front of a concept tag.
const US_GAAP_PREFIX: &str = "us-gaap:";

/// Maps XBRL concept tags to canonical line items.
///
/// The synonym table is static. Each tag belongs to at most one line item,
/// while a line item may be reported under several tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConceptMapper;

impl ConceptMapper {
    /// Returns the line item a concept tag denotes, or `None` for tags outside
    /// the income statement.
    ///
    /// Accepts bare tags (`Revenues`) and `us-gaap:` prefixed tags.
    #[must_use]
    pub fn map(concept_tag: &str) -> Option<LineItem> {
        let tag = concept_tag.trim();
        let tag = tag.strip_prefix(US_GAAP_PREFIX).unwrap_or(tag);
        LineItem::ALL
            .into_iter()
            .find(|item| Self::tags(*item).contains(&tag))
    }

    /// Returns the us-gaap tags a line item is reported under.
    ///
    /// EBIT has no tag of its own and is always derived.
    #[must_use]
    pub const fn tags(item: LineItem) -> &'static [&'static str] {
        match item {
            LineItem::TotalRevenues => &[
                "Revenues",
                "SalesRevenueNet",
                "RevenueFromContractWithCustomerExcludingAssessedTax",
                "RevenueFromContractWithCustomerIncludingAssessedTax",
            ],
            LineItem::CostOfRevenues => &[
                "CostOfRevenue",
                "CostOfGoodsAndServicesSold",
                "CostOfGoodsSold",
            ],
            LineItem::GrossProfit => &["GrossProfit"],
            LineItem::ResearchAndDevelopment => &["ResearchAndDevelopmentExpense"],
            LineItem::SellingGeneralAdmin => &[
                "SellingGeneralAndAdministrativeExpense",
                "SellingAndMarketingExpense",
            ],
            LineItem::OtherOperatingExpenses => &[
                "OtherOperatingIncomeExpenseNet",
                "OtherCostAndExpenseOperating",
            ],
            LineItem::OperatingExpenses => &["OperatingExpenses"],
            LineItem::OperatingIncome => &["OperatingIncomeLoss"],
            LineItem::Ebit => &[],
            LineItem::Ebitda => &["EarningsBeforeInterestTaxesDepreciationAndAmortization"],
            LineItem::InterestExpense => &["InterestExpense", "InterestExpenseDebt"],
            LineItem::InterestIncome => &[
                "InvestmentIncomeInterest",
                "InterestAndDividendIncomeOperating",
                "InterestIncomeExpenseNonoperatingNet",
            ],
            LineItem::NetInterestExpense => &["InterestIncomeExpenseNet"],
            LineItem::OtherNonOperating => &[
                "NonoperatingIncomeExpense",
                "OtherNonoperatingIncomeExpense",
            ],
            LineItem::EbtExclUnusual => &[
                "IncomeLossFromContinuingOperationsBeforeIncomeTaxesExtraordinaryItemsNoncontrollingInterest",
            ],
            LineItem::GainLossOnSaleOfAssets => &[
                "GainLossOnSaleOfPropertyPlantEquipment",
                "GainLossOnDispositionOfAssets",
            ],
            LineItem::OtherUnusualItems => &[
                "UnusualOrInfrequentItemNetOfInsuranceProceeds",
                "GainLossRelatedToLitigationSettlement",
            ],
            LineItem::EbtInclUnusual => &[
                "IncomeLossFromContinuingOperationsBeforeIncomeTaxesMinorityInterestAndIncomeLossFromEquityMethodInvestments",
            ],
            LineItem::IncomeTaxExpense => &["IncomeTaxExpenseBenefit"],
            LineItem::NetIncomeToCompany => &["ProfitLoss"],
            LineItem::MinorityInterest => &[
                "MinorityInterest",
                "NetIncomeLossAttributableToNoncontrollingInterest",
            ],
            LineItem::NetIncome => &["NetIncomeLoss"],
            LineItem::PreferredDividends => &[
                "PreferredStockDividendsAndOtherAdjustments",
                "DividendsPreferredStock",
            ],
            LineItem::NetIncomeToCommon => &["NetIncomeLossAvailableToCommonStockholdersBasic"],
            LineItem::BasicEps => &[
                "EarningsPerShareBasic",
                "IncomeLossFromContinuingOperationsPerBasicShare",
            ],
            LineItem::DilutedEps => &[
                "EarningsPerShareDiluted",
                "IncomeLossFromContinuingOperationsPerDilutedShare",
            ],
            LineItem::BasicWeightedShares => &["WeightedAverageNumberOfSharesOutstandingBasic"],
            LineItem::DilutedWeightedShares => {
                &["WeightedAverageNumberOfDilutedSharesOutstanding"]
            }
            LineItem::DividendPerShare => &[
                "CommonStockDividendsPerShareDeclared",
                "CommonStockDividendsPerShareCashPaid",
            ],
        }
    }
}
