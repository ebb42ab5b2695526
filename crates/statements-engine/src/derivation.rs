//! Gap filling from accounting identities.
//!
//! Each [`DerivationRule`] states `target = Σ coefficient × term`. When exactly
//! one participant of a rule is unknown, and that participant is the target
//! or one of the rule's reversible inputs, it is solved from the others.

use std::collections::BTreeSet;
use tracing::debug;

use statements_core::{LineItem, PeriodRecord};

use crate::resolver::PeriodTable;

/// Number of passes over the rule table per period.
pub const DEFAULT_PASSES: usize = 3;

/// One signed term of an identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    /// The line item.
    pub item: LineItem,
    /// `1.0` or `-1.0`.
    pub coefficient: f64,
}

impl Term {
    const fn plus(item: LineItem) -> Self {
        Self {
            item,
            coefficient: 1.0,
        }
    }

    const fn minus(item: LineItem) -> Self {
        Self {
            item,
            coefficient: -1.0,
        }
    }
}

/// A signed linear accounting identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivationRule {
    /// Line item the identity defines.
    pub target: LineItem,
    /// Right-hand side of the identity.
    pub terms: &'static [Term],
    /// Inputs that may be solved for when the target is known.
    pub reversible: &'static [LineItem],
}

impl DerivationRule {
    /// Returns the single unknown participant and its value, if the rule can
    /// fire on `record`.
    #[must_use]
    pub fn solve(&self, record: &PeriodRecord) -> Option<(LineItem, f64)> {
        let participants = std::iter::once(self.target).chain(self.terms.iter().map(|t| t.item));
        let mut missing = None;
        for item in participants {
            if !record.contains(item) {
                if missing.is_some() {
                    return None;
                }
                missing = Some(item);
            }
        }
        let missing = missing?;

        let known: f64 = self
            .terms
            .iter()
            .filter(|term| term.item != missing)
            .map(|term| term.coefficient * record.get(term.item).unwrap_or_default())
            .sum();

        if missing == self.target {
            return Some((missing, known));
        }
        if !self.reversible.contains(&missing) {
            return None;
        }
        let coefficient = self
            .terms
            .iter()
            .find(|term| term.item == missing)
            .map(|term| term.coefficient)?;
        let target = record.get(self.target)?;
        Some((missing, (target - known) / coefficient))
    }
}

use LineItem as L;

/// The identity table, in evaluation order.
pub static RULES: &[DerivationRule] = &[
    DerivationRule {
        target: L::GrossProfit,
        terms: &[Term::plus(L::TotalRevenues), Term::minus(L::CostOfRevenues)],
        reversible: &[L::TotalRevenues, L::CostOfRevenues],
    },
    DerivationRule {
        target: L::OperatingExpenses,
        terms: &[
            Term::plus(L::ResearchAndDevelopment),
            Term::plus(L::SellingGeneralAdmin),
            Term::plus(L::OtherOperatingExpenses),
        ],
        reversible: &[L::OtherOperatingExpenses],
    },
    DerivationRule {
        target: L::OperatingIncome,
        terms: &[Term::plus(L::GrossProfit), Term::minus(L::OperatingExpenses)],
        reversible: &[L::GrossProfit, L::OperatingExpenses],
    },
    DerivationRule {
        target: L::Ebit,
        terms: &[Term::plus(L::OperatingIncome)],
        reversible: &[L::OperatingIncome],
    },
    DerivationRule {
        target: L::NetInterestExpense,
        terms: &[Term::plus(L::InterestExpense), Term::minus(L::InterestIncome)],
        reversible: &[L::InterestExpense, L::InterestIncome],
    },
    DerivationRule {
        target: L::EbtExclUnusual,
        terms: &[
            Term::plus(L::OperatingIncome),
            Term::minus(L::NetInterestExpense),
            Term::plus(L::OtherNonOperating),
        ],
        reversible: &[L::OtherNonOperating],
    },
    DerivationRule {
        target: L::EbtInclUnusual,
        terms: &[
            Term::plus(L::EbtExclUnusual),
            Term::plus(L::GainLossOnSaleOfAssets),
            Term::plus(L::OtherUnusualItems),
        ],
        reversible: &[L::EbtExclUnusual],
    },
    DerivationRule {
        target: L::NetIncome,
        terms: &[
            Term::plus(L::EbtInclUnusual),
            Term::minus(L::IncomeTaxExpense),
            Term::minus(L::MinorityInterest),
        ],
        reversible: &[L::IncomeTaxExpense, L::EbtInclUnusual],
    },
    DerivationRule {
        target: L::NetIncomeToCompany,
        terms: &[Term::plus(L::NetIncome), Term::plus(L::MinorityInterest)],
        reversible: &[L::NetIncome, L::MinorityInterest],
    },
    DerivationRule {
        target: L::NetIncomeToCommon,
        terms: &[Term::plus(L::NetIncome), Term::minus(L::PreferredDividends)],
        reversible: &[L::PreferredDividends],
    },
];

/// Applies [`RULES`] to period records in a bounded number of passes.
///
/// A rule fires at most once per period and never overwrites a known value.
/// Whatever is still unknown after the last pass stays unknown.
#[derive(Debug, Clone, Copy)]
pub struct DerivationEngine {
    passes: usize,
}

impl Default for DerivationEngine {
    fn default() -> Self {
        Self {
            passes: DEFAULT_PASSES,
        }
    }
}

impl DerivationEngine {
    /// Creates an engine with the default number of passes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of passes over the rule table.
    #[must_use]
    pub const fn with_passes(mut self, passes: usize) -> Self {
        self.passes = passes;
        self
    }

    /// Fills gaps in one record. Returns the number of values derived.
    pub fn derive(&self, record: &mut PeriodRecord) -> usize {
        let mut fired = BTreeSet::new();
        for _ in 0..self.passes {
            let before = fired.len();
            for (index, rule) in RULES.iter().enumerate() {
                if fired.contains(&index) {
                    continue;
                }
                if let Some((item, value)) = rule.solve(record) {
                    record.set(item, value);
                    fired.insert(index);
                }
            }
            if fired.len() == before {
                break;
            }
        }
        fired.len()
    }

    /// Fills gaps in every record of the table.
    pub fn derive_all(&self, table: &mut PeriodTable) {
        let derived: usize = table.values_mut().map(|record| self.derive(record)).sum();
        debug!(periods = table.len(), derived, "Derived missing values");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(values: &[(LineItem, f64)]) -> PeriodRecord {
        let mut record = PeriodRecord::new();
        for &(item, value) in values {
            record.set(item, value);
        }
        record
    }

    #[test]
    fn test_gross_profit_forward() {
        let mut r = record(&[(L::TotalRevenues, 1000.0), (L::CostOfRevenues, 600.0)]);
        DerivationEngine::new().derive(&mut r);
        assert_eq!(r.get(L::GrossProfit), Some(400.0));
    }

    #[test]
    fn test_cost_of_revenues_reverse() {
        let mut r = record(&[(L::TotalRevenues, 1000.0), (L::GrossProfit, 350.0)]);
        DerivationEngine::new().derive(&mut r);
        assert_eq!(r.get(L::CostOfRevenues), Some(650.0));
    }

    #[test]
    fn test_reported_values_are_never_overwritten() {
        let mut r = record(&[
            (L::TotalRevenues, 1000.0),
            (L::CostOfRevenues, 600.0),
            (L::GrossProfit, 390.0),
        ]);
        assert_eq!(DerivationEngine::new().derive(&mut r), 0);
        assert_eq!(r.get(L::GrossProfit), Some(390.0));
    }

    #[test]
    fn test_chained_derivation_across_passes() {
        let mut r = record(&[
            (L::TotalRevenues, 1000.0),
            (L::CostOfRevenues, 600.0),
            (L::ResearchAndDevelopment, 100.0),
            (L::SellingGeneralAdmin, 80.0),
            (L::OtherOperatingExpenses, 20.0),
        ]);
        DerivationEngine::new().derive(&mut r);
        assert_eq!(r.get(L::OperatingExpenses), Some(200.0));
        assert_eq!(r.get(L::OperatingIncome), Some(200.0));
        assert_eq!(r.get(L::Ebit), Some(200.0));
    }

    #[test]
    fn test_income_tax_solved_from_net_income() {
        let mut r = record(&[
            (L::EbtInclUnusual, 500.0),
            (L::NetIncome, 380.0),
            (L::MinorityInterest, 20.0),
        ]);
        DerivationEngine::new().derive(&mut r);
        assert_relative_eq!(r.get(L::IncomeTaxExpense).unwrap(), 100.0);
        assert_eq!(r.get(L::NetIncomeToCompany), Some(400.0));
    }

    #[test]
    fn test_minority_interest_unlocks_tax_on_later_pass() {
        // Net income to company yields minority interest, which the net
        // income identity then needs to solve for tax.
        let mut r = record(&[
            (L::EbtInclUnusual, 500.0),
            (L::NetIncome, 380.0),
            (L::NetIncomeToCompany, 400.0),
        ]);
        DerivationEngine::new().derive(&mut r);
        assert_eq!(r.get(L::MinorityInterest), Some(20.0));
        assert_eq!(r.get(L::IncomeTaxExpense), Some(100.0));
    }

    #[test]
    fn test_single_pass_stops_early() {
        let mut r = record(&[
            (L::EbtInclUnusual, 500.0),
            (L::NetIncome, 380.0),
            (L::NetIncomeToCompany, 400.0),
        ]);
        DerivationEngine::new().with_passes(1).derive(&mut r);
        assert_eq!(r.get(L::MinorityInterest), Some(20.0));
        assert_eq!(r.get(L::IncomeTaxExpense), None);
    }

    #[test]
    fn test_non_reversible_input_is_not_solved() {
        // R&D is not a reversible input of the operating expense identity
        let mut r = record(&[
            (L::OperatingExpenses, 200.0),
            (L::SellingGeneralAdmin, 80.0),
            (L::OtherOperatingExpenses, 20.0),
        ]);
        DerivationEngine::new().derive(&mut r);
        assert_eq!(r.get(L::ResearchAndDevelopment), None);
    }

    #[test]
    fn test_two_unknowns_leave_gaps() {
        let mut r = record(&[(L::TotalRevenues, 1000.0)]);
        assert_eq!(DerivationEngine::new().derive(&mut r), 0);
        assert_eq!(r.get(L::GrossProfit), None);
        assert_eq!(r.get(L::CostOfRevenues), None);
    }

    #[test]
    fn test_every_rule_lists_reversible_inputs_among_terms() {
        for rule in RULES {
            for input in rule.reversible {
                assert!(rule.terms.iter().any(|t| t.item == *input));
            }
        }
    }
}
