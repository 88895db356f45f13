//! Whole-number percentages.

/// Percentage of `part` in `total`, truncated toward zero.
///
/// A zero `total` yields `0` rather than failing. `part` larger than
/// `total` saturates at `100`.
///
/// ```
/// use fieldstats_core::percent::percent;
/// assert_eq!(percent(1, 3), 33);
/// assert_eq!(percent(5, 0), 0);
/// ```
pub fn percent(part: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let scaled = u128::from(part) * 100 / u128::from(total);
    scaled.min(100) as u8
}
