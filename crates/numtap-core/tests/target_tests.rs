use numtap_core::{next_target, TARGET_MAX, TARGET_MIN};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    #[test]
    fn prop_never_repeats_previous(seed in any::<u64>(), previous in TARGET_MIN..=TARGET_MAX) {
        let mut rng = StdRng::seed_from_u64(seed);
        let next = next_target(&mut rng, Some(previous));
        prop_assert_ne!(next, previous);
        prop_assert!((TARGET_MIN..=TARGET_MAX).contains(&next));
    }

    #[test]
    fn prop_chain_has_no_adjacent_repeats(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut previous = next_target(&mut rng, None);
        for _ in 0..50 {
            let next = next_target(&mut rng, Some(previous));
            prop_assert_ne!(next, previous);
            previous = next;
        }
    }
}

#[test]
fn test_excluded_draw_is_uniform_over_the_rest() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut counts = [0usize; 6];
    for _ in 0..4000 {
        counts[next_target(&mut rng, Some(3)) as usize] += 1;
    }

    assert_eq!(counts[3], 0);
    for value in [1, 2, 4, 5] {
        // Expected 1000 each
        assert!(
            (800..=1200).contains(&counts[value]),
            "value {} drawn {} times",
            value,
            counts[value]
        );
    }
}

#[test]
fn test_first_draw_is_uniform() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut counts = [0usize; 6];
    for _ in 0..1000 {
        counts[next_target(&mut rng, None) as usize] += 1;
    }

    assert_eq!(counts[0], 0);
    for value in 1..=5 {
        // Expected 200 each
        assert!(
            (140..=260).contains(&counts[value]),
            "value {} drawn {} times",
            value,
            counts[value]
        );
    }
}

#[test]
fn test_first_draw_covers_full_range() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut seen = [false; 6];
    for _ in 0..500 {
        seen[next_target(&mut rng, None) as usize] = true;
    }
    assert!(seen[1..=5].iter().all(|s| *s));
}
