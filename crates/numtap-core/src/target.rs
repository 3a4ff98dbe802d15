//! Random target selection

use rand::Rng;

/// Smallest numeral shown
pub const TARGET_MIN: u32 = 1;
/// Largest numeral shown
pub const TARGET_MAX: u32 = 5;

/// Draw the next numeral to match, uniform over `TARGET_MIN..=TARGET_MAX`.
///
/// When `previous` is given the draw is repeated until it differs, so a round
/// never shows the same numeral twice in a row.
pub fn next_target<R: Rng + ?Sized>(rng: &mut R, previous: Option<u32>) -> u32 {
    loop {
        let candidate = rng.random_range(TARGET_MIN..=TARGET_MAX);
        if Some(candidate) != previous {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_draw_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let target = next_target(&mut rng, None);
            assert!((TARGET_MIN..=TARGET_MAX).contains(&target));
        }
    }

    #[test]
    fn test_excludes_previous() {
        let mut rng = StdRng::seed_from_u64(42);
        for previous in TARGET_MIN..=TARGET_MAX {
            for _ in 0..200 {
                assert_ne!(next_target(&mut rng, Some(previous)), previous);
            }
        }
    }

    #[test]
    fn test_out_of_range_previous_is_harmless() {
        let mut rng = StdRng::seed_from_u64(1);
        let target = next_target(&mut rng, Some(99));
        assert!((TARGET_MIN..=TARGET_MAX).contains(&target));
    }
}
