//! Streak lengths over a boolean condition.

/// Length of the run of `true` values ending at each position.
///
/// The counter grows by one on every row where the condition holds and is
/// 0 on every row where it does not, so a new run always starts at 1.
///
/// ```
/// use fd_drawdown::streak_lengths;
///
/// let flags = [true, true, false, true];
/// assert_eq!(streak_lengths(flags), vec![1, 2, 0, 1]);
/// ```
pub fn streak_lengths<I>(conditions: I) -> Vec<usize>
where
    I: IntoIterator<Item = bool>,
{
    conditions
        .into_iter()
        .scan(0usize, |run, holds| {
            *run = if holds { *run + 1 } else { 0 };
            Some(*run)
        })
        .collect()
}

/// Longest run in a streak-length series, 0 when empty.
pub fn max_streak(lengths: &[usize]) -> usize {
    lengths.iter().copied().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], &[])]
    #[case(&[false], &[0])]
    #[case(&[true], &[1])]
    #[case(&[false, true, true, true, true], &[0, 1, 2, 3, 4])]
    #[case(&[true, false, false, true, true, false, true], &[1, 0, 0, 1, 2, 0, 1])]
    fn test_streak_lengths(#[case] flags: &[bool], #[case] expected: &[usize]) {
        assert_eq!(streak_lengths(flags.iter().copied()), expected);
    }

    #[test]
    fn test_reset_law() {
        let flags = [true, true, false, true, false, false, true, true, true];
        let lengths = streak_lengths(flags);

        for (i, &holds) in flags.iter().enumerate() {
            if !holds {
                assert_eq!(lengths[i], 0);
            } else if i == 0 || !flags[i - 1] {
                assert_eq!(lengths[i], 1);
            } else {
                assert_eq!(lengths[i], lengths[i - 1] + 1);
            }
        }
    }

    #[test]
    fn test_max_streak() {
        assert_eq!(max_streak(&[]), 0);
        assert_eq!(max_streak(&[0, 1, 2, 0, 1]), 2);
    }
}
