use numtap_core::effects::{CONFETTI_COUNT, CONFETTI_STAGGER};
use numtap_core::{
    generate_balloons, generate_confetti, generate_sparkles, Celebration, BALLOON_PALETTE,
    CONFETTI_PALETTE, FLOATING_STARS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_confetti_delays_follow_index() {
    let mut rng = StdRng::seed_from_u64(1);
    let confetti = generate_confetti(&mut rng);
    assert_eq!(confetti.len(), CONFETTI_COUNT);

    for (idx, piece) in confetti.iter().enumerate() {
        let expected = idx as f32 * CONFETTI_STAGGER;
        assert!((piece.delay - expected).abs() < 1e-4);
    }
    assert!((confetti[119].delay - 2.38).abs() < 1e-4);
}

#[test]
fn test_confetti_colors_cycle() {
    let mut rng = StdRng::seed_from_u64(2);
    let confetti = generate_confetti(&mut rng);

    for (idx, piece) in confetti.iter().enumerate() {
        assert_eq!(piece.color, CONFETTI_PALETTE[idx % 6]);
    }
    // 120 pieces over 6 colors
    for color in CONFETTI_PALETTE {
        assert_eq!(confetti.iter().filter(|p| p.color == color).count(), 20);
    }
}

#[test]
fn test_confetti_ranges() {
    let mut rng = StdRng::seed_from_u64(3);
    for piece in generate_confetti(&mut rng) {
        assert!((0.0..=100.0).contains(&piece.left));
        assert!((-60.0..=60.0).contains(&piece.drift));
        assert!((2.0..=3.5).contains(&piece.duration));
    }
}

#[test]
fn test_balloon_ranges() {
    let mut rng = StdRng::seed_from_u64(4);
    let balloons = generate_balloons(&mut rng);
    assert_eq!(balloons.len(), 20);

    for balloon in &balloons {
        assert!((10.0..=90.0).contains(&balloon.left));
        assert!((0.0..=1.2).contains(&balloon.delay));
        assert!((0.7..=1.2).contains(&balloon.scale));
        assert!(BALLOON_PALETTE.contains(&balloon.color));
    }
}

#[test]
fn test_sparkle_ranges() {
    let mut rng = StdRng::seed_from_u64(5);
    let sparkles = generate_sparkles(&mut rng);
    assert_eq!(sparkles.len(), 30);

    for sparkle in &sparkles {
        assert!((0.0..=100.0).contains(&sparkle.top));
        assert!((0.0..=100.0).contains(&sparkle.left));
        assert!((0.0..=2.0).contains(&sparkle.delay));
        assert!((8.0..=20.0).contains(&sparkle.size));
        assert!(CONFETTI_PALETTE.contains(&sparkle.color));
    }
}

#[test]
fn test_star_table_is_fixed() {
    assert_eq!(FLOATING_STARS.len(), 16);
    assert_eq!(FLOATING_STARS[0].top, 8.0);
    assert_eq!(FLOATING_STARS[15].delay, 1.3);

    let mut rng = StdRng::seed_from_u64(6);
    let celebration = Celebration::generate(&mut rng);
    assert_eq!(celebration.stars(), &FLOATING_STARS[..]);
}

#[test]
fn test_celebrations_differ() {
    let mut rng = StdRng::seed_from_u64(7);
    let first = Celebration::generate(&mut rng);
    let second = Celebration::generate(&mut rng);
    assert_ne!(first, second);
}
