//! Resolution of signed positions into directional exposure.

use rust_decimal::Decimal;

use super::{PositionRow, UserId};

/// Non-negative economic exposure of one user on one day, alongside the
/// signed positions it was derived from (the aggregator needs both).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposureRow {
    pub user: UserId,
    pub day_offset: i64,
    pub yes_exposure: Decimal,
    pub no_exposure: Decimal,
    pub yes_position: Decimal,
    pub no_position: Decimal,
}

/// Map a signed `(yes, no)` position pair to non-negative exposures.
///
/// A short position in one token is economically a long bet on the
/// complementary outcome, so it crosses over:
///
/// ```text
/// yes_exposure = max(Hy, 0) + max(-Hn, 0)
/// no_exposure  = max(Hn, 0) + max(-Hy, 0)
/// ```
pub fn resolve_exposure(yes_position: Decimal, no_position: Decimal) -> (Decimal, Decimal) {
    let yes_exposure = yes_position.max(Decimal::ZERO) + (-no_position).max(Decimal::ZERO);
    let no_exposure = no_position.max(Decimal::ZERO) + (-yes_position).max(Decimal::ZERO);
    (yes_exposure, no_exposure)
}

/// Apply [`resolve_exposure`] to every position row.
pub fn resolve_exposures(positions: &[PositionRow]) -> Vec<ExposureRow> {
    positions
        .iter()
        .map(|p| {
            let (yes_exposure, no_exposure) = resolve_exposure(p.yes_position, p.no_position);
            ExposureRow {
                user: p.user.clone(),
                day_offset: p.day_offset,
                yes_exposure,
                no_exposure,
                yes_position: p.yes_position,
                no_position: p.no_position,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn long_yes_only() {
        assert_eq!(resolve_exposure(dec!(10), dec!(0)), (dec!(10), dec!(0)));
    }

    #[test]
    fn long_no_only() {
        assert_eq!(resolve_exposure(dec!(0), dec!(8)), (dec!(0), dec!(8)));
    }

    #[test]
    fn short_yes_counts_as_no_exposure() {
        assert_eq!(resolve_exposure(dec!(-10), dec!(0)), (dec!(0), dec!(10)));
    }

    #[test]
    fn short_no_counts_as_yes_exposure() {
        assert_eq!(resolve_exposure(dec!(0), dec!(-4)), (dec!(4), dec!(0)));
    }

    #[test]
    fn long_yes_short_no_stack_on_yes() {
        assert_eq!(resolve_exposure(dec!(10), dec!(-4)), (dec!(14), dec!(0)));
    }

    #[test]
    fn long_both_sides_keeps_both() {
        assert_eq!(resolve_exposure(dec!(10), dec!(4)), (dec!(10), dec!(4)));
    }

    #[test]
    fn short_both_sides_crosses_both() {
        assert_eq!(resolve_exposure(dec!(-10), dec!(-4)), (dec!(4), dec!(10)));
    }

    #[test]
    fn outputs_are_never_negative() {
        for (hy, hn) in [
            (dec!(-3), dec!(7)),
            (dec!(3), dec!(-7)),
            (dec!(-3), dec!(-7)),
            (dec!(0), dec!(0)),
        ] {
            let (yes, no) = resolve_exposure(hy, hn);
            assert!(yes >= Decimal::ZERO);
            assert!(no >= Decimal::ZERO);
        }
    }

    #[test]
    fn batch_application_preserves_positions() {
        let rows = vec![crate::domain::PositionRow {
            user: UserId::new("alice"),
            day_offset: -1,
            yes_position: dec!(-5),
            no_position: dec!(2),
        }];

        let exposures = resolve_exposures(&rows);
        assert_eq!(exposures[0].yes_exposure, dec!(0));
        assert_eq!(exposures[0].no_exposure, dec!(7));
        assert_eq!(exposures[0].yes_position, dec!(-5));
        assert_eq!(exposures[0].no_position, dec!(2));
    }
}
