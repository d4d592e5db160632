//! Per-day, per-cohort exposure aggregation and odds.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::{Cohort, CohortAssignments, ExposureRow};

/// Aggregate exposure and odds for one `(day_offset, cohort)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortOddsPoint {
    pub day_offset: i64,
    pub cohort: Cohort,
    pub agg_yes: Decimal,
    pub agg_no: Decimal,
    pub odds: Decimal,
}

/// Aggregate individual exposures into the cohort odds table.
///
/// The All cohort is computed first and unconditionally for every day with
/// any position row: `agg_yes` sums `yes_exposure` over users whose
/// `yes_position` is nonzero that day (carried positions count), `agg_no`
/// symmetrically. When an assignment table exists, the identical summation
/// is repeated per declared cohort over its members; unassigned users stay
/// in All only. A cohort materializes a row on each day at least one member
/// has a position row, even when both sums are zero.
///
/// Output is sorted by `(day_offset, cohort)`.
pub fn aggregate_by_day_and_cohort(
    exposures: &[ExposureRow],
    assignments: &CohortAssignments,
) -> Vec<CohortOddsPoint> {
    let mut by_day: BTreeMap<i64, Vec<&ExposureRow>> = BTreeMap::new();
    for row in exposures {
        by_day.entry(row.day_offset).or_default().push(row);
    }

    let mut points = Vec::new();
    for (&day_offset, rows) in &by_day {
        points.push(sum_cohort(day_offset, Cohort::All, rows.iter().copied()));

        if assignments.is_empty() {
            continue;
        }
        for cohort in Cohort::DECLARED {
            let members: Vec<&ExposureRow> = rows
                .iter()
                .copied()
                .filter(|r| assignments.assign(&r.user) == Some(cohort))
                .collect();
            if members.is_empty() {
                continue;
            }
            points.push(sum_cohort(day_offset, cohort, members.into_iter()));
        }
    }
    points
}

fn sum_cohort<'a>(
    day_offset: i64,
    cohort: Cohort,
    rows: impl Iterator<Item = &'a ExposureRow>,
) -> CohortOddsPoint {
    let mut agg_yes = Decimal::ZERO;
    let mut agg_no = Decimal::ZERO;
    for row in rows {
        if !row.yes_position.is_zero() {
            agg_yes += row.yes_exposure;
        }
        if !row.no_position.is_zero() {
            agg_no += row.no_exposure;
        }
    }
    CohortOddsPoint {
        day_offset,
        cohort,
        odds: odds(agg_yes, agg_no),
        agg_yes,
        agg_no,
    }
}

/// Share of aggregate exposure on the YES side.
///
/// A zero denominator yields exactly `0.0` by convention, never an error or
/// a missing value.
pub fn odds(agg_yes: Decimal, agg_no: Decimal) -> Decimal {
    let total = agg_yes + agg_no;
    if total > Decimal::ZERO {
        agg_yes / total
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::UserId;

    fn exposure(user: &str, day: i64, hy: Decimal, hn: Decimal) -> ExposureRow {
        let (yes_exposure, no_exposure) = crate::domain::resolve_exposure(hy, hn);
        ExposureRow {
            user: UserId::new(user),
            day_offset: day,
            yes_exposure,
            no_exposure,
            yes_position: hy,
            no_position: hn,
        }
    }

    #[test]
    fn sole_yes_buyer_gives_odds_of_one() {
        let points = aggregate_by_day_and_cohort(
            &[exposure("alice", -2, dec!(100), dec!(0))],
            &CohortAssignments::new(),
        );

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].cohort, Cohort::All);
        assert_eq!(points[0].agg_yes, dec!(100));
        assert_eq!(points[0].agg_no, dec!(0));
        assert_eq!(points[0].odds, dec!(1));
    }

    #[test]
    fn zero_exposure_day_yields_zero_odds_row() {
        let points = aggregate_by_day_and_cohort(
            &[exposure("alice", -1, dec!(0), dec!(0))],
            &CohortAssignments::new(),
        );

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].agg_yes, Decimal::ZERO);
        assert_eq!(points[0].agg_no, Decimal::ZERO);
        assert_eq!(points[0].odds, Decimal::ZERO);
    }

    #[test]
    fn only_nonzero_positions_count_toward_sums() {
        // bob holds a zero YES position; his (zero) yes exposure must not be
        // summed, and his NO side counts on its own.
        let points = aggregate_by_day_and_cohort(
            &[
                exposure("alice", 0, dec!(60), dec!(0)),
                exposure("bob", 0, dec!(0), dec!(40)),
            ],
            &CohortAssignments::new(),
        );

        assert_eq!(points[0].agg_yes, dec!(60));
        assert_eq!(points[0].agg_no, dec!(40));
        assert_eq!(points[0].odds, dec!(0.6));
    }

    #[test]
    fn declared_cohorts_partition_assigned_users() {
        let mut assignments = CohortAssignments::new();
        assignments.insert("alice", Cohort::Large);
        assignments.insert("bob", Cohort::Small);

        let exposures = vec![
            exposure("alice", 0, dec!(70), dec!(0)),
            exposure("bob", 0, dec!(30), dec!(0)),
            // carol is unassigned: present in All only.
            exposure("carol", 0, dec!(0), dec!(50)),
        ];
        let points = aggregate_by_day_and_cohort(&exposures, &assignments);

        let all = points.iter().find(|p| p.cohort == Cohort::All).unwrap();
        let large = points.iter().find(|p| p.cohort == Cohort::Large).unwrap();
        let small = points.iter().find(|p| p.cohort == Cohort::Small).unwrap();

        assert_eq!(all.agg_yes, dec!(100));
        assert_eq!(all.agg_no, dec!(50));
        assert_eq!(large.agg_yes, dec!(70));
        assert_eq!(small.agg_yes, dec!(30));
        assert!(points.iter().all(|p| p.cohort != Cohort::Medium));
    }

    #[test]
    fn empty_assignments_produce_all_cohort_only() {
        let points = aggregate_by_day_and_cohort(
            &[exposure("alice", -1, dec!(10), dec!(0))],
            &CohortAssignments::new(),
        );
        assert!(points.iter().all(|p| p.cohort == Cohort::All));
    }

    #[test]
    fn output_is_sorted_by_day_then_cohort() {
        let mut assignments = CohortAssignments::new();
        assignments.insert("alice", Cohort::Small);
        assignments.insert("bob", Cohort::Large);

        let exposures = vec![
            exposure("alice", 0, dec!(1), dec!(0)),
            exposure("bob", 0, dec!(1), dec!(0)),
            exposure("alice", -1, dec!(1), dec!(0)),
        ];
        let points = aggregate_by_day_and_cohort(&exposures, &assignments);

        let keys: Vec<_> = points.iter().map(|p| (p.day_offset, p.cohort)).collect();
        assert_eq!(
            keys,
            vec![
                (-1, Cohort::All),
                (-1, Cohort::Small),
                (0, Cohort::All),
                (0, Cohort::Large),
                (0, Cohort::Small),
            ]
        );
    }

    #[test]
    fn odds_division_is_exact_for_simple_ratios() {
        assert_eq!(odds(dec!(100), dec!(100)), dec!(0.5));
        assert_eq!(odds(dec!(0), dec!(80)), Decimal::ZERO);
        assert_eq!(odds(dec!(25), dec!(75)), dec!(0.25));
    }
}
