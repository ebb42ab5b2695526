//! Period resolution.
//!
//! Buckets mapped facts into fiscal periods, keeps one fact per slot and
//! rebuilds standalone quarters from year-to-date cumulative figures.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

use statements_core::{
    DurationClass, FiscalPeriod, LineItem, PeriodKey, PeriodRecord, RawFact,
};

use crate::mapper::ConceptMapper;

/// Resolved records for every fiscal period with at least one value.
pub type PeriodTable = BTreeMap<PeriodKey, PeriodRecord>;

type Slot = (PeriodKey, LineItem, DurationClass);

/// A fact selected for a slot, with what is needed to rank duplicates.
#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    fact: &'a RawFact,
    authoritative: bool,
}

impl Candidate<'_> {
    /// Latest filing wins, then the authoritative form for the duration, then
    /// the latest period end. Full ties keep the earlier fact.
    fn supersedes(&self, other: &Self) -> bool {
        (self.fact.filed_date, self.authoritative, self.fact.period_end)
            > (other.fact.filed_date, other.authoritative, other.fact.period_end)
    }

    fn span(&self) -> Span {
        Span {
            value: self.fact.value,
            start: self.fact.period_start,
            end: self.fact.period_end,
        }
    }
}

/// A value together with the dates it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    value: f64,
    start: Option<NaiveDate>,
    end: NaiveDate,
}

impl Span {
    /// The part of `self` that follows the cumulative `prior`.
    fn after(self, prior: Self) -> Self {
        Self {
            value: self.value - prior.value,
            start: prior.end.succ_opt(),
            end: self.end,
        }
    }

    /// Cumulative span of `self` followed by `next`.
    fn then(self, next: Self) -> Self {
        Self {
            value: self.value + next.value,
            start: self.start,
            end: next.end,
        }
    }
}

/// Turns an unordered bag of facts into one [`PeriodRecord`] per fiscal
/// quarter and fiscal year.
#[derive(Debug, Default)]
pub struct PeriodResolver<'a> {
    slots: BTreeMap<Slot, Candidate<'a>>,
    dropped: usize,
}

impl<'a> PeriodResolver<'a> {
    /// Maps, classifies and deduplicates `facts`.
    ///
    /// Facts are dropped when the concept is unmapped, the value is not
    /// finite, the unit differs from the line item's unit, the duration fits
    /// no reporting period, the fiscal year is missing, or the filer's fiscal
    /// period contradicts the duration.
    #[must_use]
    pub fn new(facts: &'a [RawFact]) -> Self {
        let mut resolver = Self::default();
        for fact in facts {
            match Self::slot_for(fact) {
                Some(slot) => resolver.offer(slot, fact),
                None => resolver.dropped += 1,
            }
        }
        debug!(
            facts = facts.len(),
            slots = resolver.slots.len(),
            dropped = resolver.dropped,
            "Selected facts"
        );
        resolver
    }

    /// Number of facts that did not qualify for any slot.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    fn offer(&mut self, slot: Slot, fact: &'a RawFact) {
        let candidate = Candidate {
            fact,
            authoritative: fact.form_type.is_authoritative_for(slot.2),
        };
        match self.slots.get(&slot) {
            Some(existing) if !candidate.supersedes(existing) => {}
            _ => {
                self.slots.insert(slot, candidate);
            }
        }
    }

    fn slot_for(fact: &RawFact) -> Option<Slot> {
        let Some(item) = ConceptMapper::map(&fact.concept_tag) else {
            trace!(tag = %fact.concept_tag, "Dropping unmapped concept");
            return None;
        };
        if !fact.value.is_finite() || fact.unit != item.kind().unit() {
            trace!(tag = %fact.concept_tag, unit = %fact.unit, "Dropping unusable value");
            return None;
        }
        let Some(class) = fact.duration_class() else {
            trace!(tag = %fact.concept_tag, days = ?fact.duration_days(), "Dropping off-cycle duration");
            return None;
        };
        let fiscal_year = fact.fiscal_year?;
        let Some(key) = Self::key_for(fiscal_year, fact.fiscal_period, class) else {
            trace!(
                tag = %fact.concept_tag,
                fp = ?fact.fiscal_period,
                ?class,
                "Dropping fact whose fiscal period contradicts its duration"
            );
            return None;
        };
        Some((key, item, class))
    }

    /// Candidate key from the filer's fiscal period, validated against the
    /// duration of the fact.
    fn key_for(
        fiscal_year: i32,
        period: Option<FiscalPeriod>,
        class: DurationClass,
    ) -> Option<PeriodKey> {
        use DurationClass as D;
        use FiscalPeriod as P;

        match (period, class) {
            (Some(P::FY) | None, D::Annual) | (Some(P::FY), D::Instant) => {
                Some(PeriodKey::annual(fiscal_year))
            }
            (Some(p), D::Quarter | D::Instant) => {
                p.quarter().map(|q| PeriodKey::quarter(fiscal_year, q))
            }
            (Some(P::Q2) | None, D::HalfYear) => Some(PeriodKey::quarter(fiscal_year, 2)),
            (Some(P::Q3) | None, D::NineMonths) => Some(PeriodKey::quarter(fiscal_year, 3)),
            _ => None,
        }
    }

    fn observed(&self, key: PeriodKey, item: LineItem, class: DurationClass) -> Option<Span> {
        self.slots.get(&(key, item, class)).map(Candidate::span)
    }

    /// Builds the period table.
    #[must_use]
    pub fn resolve(&self) -> PeriodTable {
        let years: BTreeSet<i32> = self.slots.keys().map(|(key, _, _)| key.fiscal_year).collect();
        let mut table = PeriodTable::new();

        for &year in &years {
            for item in LineItem::ALL {
                if item.is_point_in_time() {
                    self.resolve_point(&mut table, year, item);
                } else {
                    self.resolve_flow(&mut table, year, item);
                }
            }
        }

        debug!(
            years = years.len(),
            periods = table.len(),
            "Resolved periods"
        );
        table
    }

    fn resolve_flow(&self, table: &mut PeriodTable, year: i32, item: LineItem) {
        let quarter = |q| PeriodKey::quarter(year, q);
        let standalone = |q| self.observed(quarter(q), item, DurationClass::Quarter);

        let annual = self.observed(PeriodKey::annual(year), item, DurationClass::Annual);
        let q1 = standalone(1);

        let ytd2 = self.observed(quarter(2), item, DurationClass::HalfYear);
        let q2 = standalone(2).or_else(|| Some(ytd2?.after(q1?)));

        let cumulative2 = ytd2.or_else(|| Some(q1?.then(q2?)));
        let q3 = standalone(3).or_else(|| {
            let ytd3 = self.observed(quarter(3), item, DurationClass::NineMonths)?;
            Some(ytd3.after(cumulative2?))
        });

        let q4 = standalone(4).or_else(|| {
            let through_q3 = q1?.then(q2?).then(q3?);
            Some(annual?.after(through_q3))
        });

        let resolved = [
            (quarter(1), q1),
            (quarter(2), q2),
            (quarter(3), q3),
            (quarter(4), q4),
            (PeriodKey::annual(year), annual),
        ];
        for (key, span) in resolved {
            if let Some(span) = span {
                insert(table, key, item, span);
            }
        }
    }

    /// Point-in-time items take only the fact reported for exactly this
    /// period, with no arithmetic.
    fn resolve_point(&self, table: &mut PeriodTable, year: i32, item: LineItem) {
        let keys = (1..=4)
            .map(|q| (PeriodKey::quarter(year, q), DurationClass::Quarter))
            .chain(std::iter::once((PeriodKey::annual(year), DurationClass::Annual)));

        for (key, exact) in keys {
            let span = self
                .observed(key, item, exact)
                .or_else(|| self.observed(key, item, DurationClass::Instant));
            if let Some(span) = span {
                insert(table, key, item, span);
            }
        }
    }
}

fn insert(table: &mut PeriodTable, key: PeriodKey, item: LineItem, span: Span) {
    let record = table.entry(key).or_default();
    record.set(item, span.value);
    record.set_dates(span.start, span.end);
}

/// Resolves `facts` into one record per fiscal period.
#[must_use]
pub fn resolve_periods(facts: &[RawFact]) -> PeriodTable {
    PeriodResolver::new(facts).resolve()
}
