//! Edit-distance helpers used as the last-resort product match signal.

/// Levenshtein distance: single-character insertions, deletions and
/// substitutions needed to turn `a` into `b`.
pub fn distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Accepted edit budget against a target of `target_len` characters.
/// Short targets get a tighter budget; `ceiling` is never exceeded.
pub fn tolerance_for(target_len: usize, ceiling: usize) -> usize {
    ceiling.min((target_len / 2).max(1))
}

/// True when `candidate` is within the length-scaled tolerance of `target`.
pub fn within_tolerance(target: &str, candidate: &str, ceiling: usize) -> bool {
    distance(candidate, target) <= tolerance_for(target.chars().count(), ceiling)
}

/// Naive singular: strips one trailing `s`.
pub fn singular(word: &str) -> &str {
    word.strip_suffix('s').unwrap_or(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_basics() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("milk", ""), 4);
        assert_eq!(distance("", "milk"), 4);
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("bananna", "bananas"), 2);
    }

    #[test]
    fn test_tolerance_scales_with_length() {
        assert_eq!(tolerance_for(2, 4), 1);
        assert_eq!(tolerance_for(6, 4), 3);
        assert_eq!(tolerance_for(20, 4), 4);
        assert!(within_tolerance("bananas", "bananna", 4));
        assert!(!within_tolerance("pasta", "potato", 4));
    }

    #[test]
    fn test_singular() {
        assert_eq!(singular("apples"), "apple");
        assert_eq!(singular("rice"), "rice");
    }
}
