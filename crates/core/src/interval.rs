//! Interval math
//!
//! Pure functions over [`TimeInterval`]. Nothing here knows about pixels or
//! participants; callers pass the collision set they care about.

use chrono::{Duration, NaiveDateTime, Timelike};
use whenly_domain::{BlockId, BlockSpan, TimeInterval};

/// Half-open overlap. Touching endpoints do not overlap.
pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.start < b.end && a.end > b.start
}

/// Round `t` to the nearest `step_minutes` boundary counted from midnight.
/// Exact halves round up. Sub-minute precision is dropped.
pub fn snap_to_grid(t: NaiveDateTime, step_minutes: u32) -> NaiveDateTime {
    if step_minutes == 0 {
        return t;
    }
    let midnight = t.date().and_time(chrono::NaiveTime::MIN);
    let step = i64::from(step_minutes) * 60;
    let seconds = i64::from(t.num_seconds_from_midnight());
    let snapped = (seconds + step / 2) / step * step;
    midnight + Duration::seconds(snapped)
}

/// Shift `interval` into `[grid_start, grid_end]` without changing its
/// duration. The lower bound is applied first, so an interval longer than the
/// grid ends up aligned to `grid_end`.
pub fn clamp_interval(
    interval: TimeInterval,
    grid_start: NaiveDateTime,
    grid_end: NaiveDateTime,
) -> TimeInterval {
    let mut clamped = interval;
    if clamped.start < grid_start {
        clamped = clamped.shifted_to(grid_start);
    }
    if clamped.end > grid_end {
        clamped = clamped.shifted_to(grid_end - clamped.duration());
    }
    clamped
}

/// True if `candidate` overlaps any span in `existing` other than `exclude`.
pub fn has_collision(
    candidate: &TimeInterval,
    existing: &[BlockSpan],
    exclude: Option<&BlockId>,
) -> bool {
    existing
        .iter()
        .filter(|span| exclude != Some(&span.id))
        .any(|span| overlaps(candidate, &span.interval))
}

/// True if `interval` lasts at least `min_minutes`.
pub fn meets_minimum(interval: &TimeInterval, min_minutes: u32) -> bool {
    interval.duration() >= Duration::minutes(i64::from(min_minutes))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn iv(sh: u32, sm: u32, eh: u32, em: u32) -> TimeInterval {
        TimeInterval::new(at(sh, sm), at(eh, em)).unwrap()
    }

    /// Validates `overlaps` behavior for the symmetric and reflexive scenario.
    ///
    /// Assertions:
    /// - overlap is symmetric
    /// - an interval overlaps itself
    /// - touching endpoints do not overlap
    #[test]
    fn test_overlaps_properties() {
        let cases = [
            (iv(9, 0, 10, 0), iv(9, 30, 11, 0)),
            (iv(9, 0, 10, 0), iv(10, 0, 11, 0)),
            (iv(8, 0, 12, 0), iv(9, 0, 9, 15)),
            (iv(8, 0, 9, 0), iv(13, 0, 14, 0)),
        ];
        for (a, b) in cases {
            assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
            assert!(overlaps(&a, &a));
        }
        assert!(!overlaps(&iv(9, 0, 10, 0), &iv(10, 0, 11, 0)));
        assert!(overlaps(&iv(8, 0, 12, 0), &iv(9, 0, 9, 15)));
    }

    #[test]
    fn test_snap_to_nearest_quarter() {
        assert_eq!(snap_to_grid(at(9, 7), 15), at(9, 0));
        assert_eq!(snap_to_grid(at(9, 8), 15), at(9, 15));
        assert_eq!(snap_to_grid(at(9, 47), 15), at(9, 45));
        assert_eq!(snap_to_grid(at(9, 53), 15), at(10, 0));
        assert_eq!(snap_to_grid(at(9, 0), 15), at(9, 0));
        assert_eq!(snap_to_grid(at(9, 7), 0), at(9, 7));
    }

    #[test]
    fn test_snap_exact_half_rounds_up() {
        let t = at(9, 7) + Duration::seconds(30);
        assert_eq!(snap_to_grid(t, 15), at(9, 15));
    }

    #[test]
    fn test_snap_can_roll_into_next_day() {
        let late = at(23, 55);
        let next = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(snap_to_grid(late, 15), next);
    }

    /// Validates `clamp_interval` behavior for the grid edge scenario.
    ///
    /// Assertions:
    /// - intervals above the grid shift down, keeping duration
    /// - intervals below the grid shift up, keeping duration
    /// - intervals inside are untouched
    #[test]
    fn test_clamp_preserves_duration() {
        let (open, close) = (at(8, 0), at(22, 0));
        assert_eq!(clamp_interval(iv(7, 30, 8, 30), open, close), iv(8, 0, 9, 0));
        assert_eq!(clamp_interval(iv(21, 30, 23, 0), open, close), iv(20, 30, 22, 0));
        assert_eq!(clamp_interval(iv(9, 0, 10, 0), open, close), iv(9, 0, 10, 0));
    }

    #[test]
    fn test_has_collision_with_exclusion() {
        let existing = vec![
            BlockSpan::new("a", iv(9, 0, 10, 0)),
            BlockSpan::new("b", iv(12, 0, 13, 0)),
        ];
        assert!(has_collision(&iv(9, 30, 11, 0), &existing, None));
        assert!(!has_collision(&iv(10, 0, 12, 0), &existing, None));
        assert!(!has_collision(&iv(9, 30, 11, 0), &existing, Some(&BlockId::from("a"))));
        assert!(has_collision(&iv(9, 30, 12, 30), &existing, Some(&BlockId::from("a"))));
        assert!(!has_collision(&iv(9, 0, 10, 0), &[], None));
    }

    #[test]
    fn test_meets_minimum() {
        assert!(meets_minimum(&iv(9, 0, 9, 15), 15));
        assert!(!meets_minimum(&iv(9, 0, 9, 10), 15));
    }
}
