//! Procedural celebration effects
//!
//! Pure generators for the descriptors the presentation layer animates when a
//! round is completed. Every call produces a fresh set; nothing is cached.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

/// Confetti palette, also used for sparkles
pub const CONFETTI_PALETTE: [&str; 6] = [
    "#f97316", "#facc15", "#22d3ee", "#a855f7", "#34d399", "#fb7185",
];

/// Balloon palette
pub const BALLOON_PALETTE: [&str; 5] = ["#f472b6", "#60a5fa", "#fbbf24", "#34d399", "#c084fc"];

/// Number of confetti pieces per burst
pub const CONFETTI_COUNT: usize = 120;
/// Number of balloons per celebration
pub const BALLOON_COUNT: usize = 20;
/// Number of sparkles per celebration
pub const SPARKLE_COUNT: usize = 30;

/// Stagger between consecutive confetti pieces, in seconds
pub const CONFETTI_STAGGER: f32 = 0.02;

/// A single falling confetti piece
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfettiPiece {
    /// Horizontal position in percent (0 - 100)
    pub left: f32,
    /// Horizontal drift while falling, in pixels (-60 - 60)
    pub drift: f32,
    /// Fall duration in seconds (2.0 - 3.5)
    pub duration: f32,
    /// Start delay in seconds (index * 0.02)
    pub delay: f32,
    /// CSS color
    pub color: &'static str,
}

/// A rising balloon
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Balloon {
    /// Horizontal position in percent (10 - 90)
    pub left: f32,
    /// Rise delay in seconds (0 - 1.2)
    pub delay: f32,
    /// CSS color
    pub color: &'static str,
    /// Size multiplier (0.7 - 1.2)
    pub scale: f32,
}

/// A twinkling sparkle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sparkle {
    /// Vertical position in percent (0 - 100)
    pub top: f32,
    /// Horizontal position in percent (0 - 100)
    pub left: f32,
    /// Start delay in seconds (0 - 2)
    pub delay: f32,
    /// Edge length in pixels (8 - 20)
    pub size: f32,
    /// CSS color
    pub color: &'static str,
}

/// A fixed floating star of the success starfield
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloatingStar {
    /// Vertical position in percent
    pub top: f32,
    /// Horizontal position in percent
    pub left: f32,
    /// Animation delay in seconds
    pub delay: f32,
}

const fn star(top: f32, left: f32, delay: f32) -> FloatingStar {
    FloatingStar { top, left, delay }
}

/// Hand-placed starfield covering the screen evenly
pub const FLOATING_STARS: [FloatingStar; 16] = [
    star(8.0, 18.0, 0.0),
    star(12.0, 72.0, 0.1),
    star(32.0, 5.0, 0.2),
    star(45.0, 86.0, 0.3),
    star(65.0, 12.0, 0.35),
    star(70.0, 80.0, 0.4),
    star(85.0, 30.0, 0.45),
    star(88.0, 65.0, 0.5),
    star(15.0, 45.0, 0.6),
    star(25.0, 25.0, 0.7),
    star(40.0, 60.0, 0.8),
    star(55.0, 35.0, 0.9),
    star(75.0, 50.0, 1.0),
    star(20.0, 80.0, 1.1),
    star(50.0, 15.0, 1.2),
    star(60.0, 70.0, 1.3),
];

/// Generate a confetti burst.
///
/// Colors cycle through the palette by index so every color is equally present.
pub fn generate_confetti<R: Rng + ?Sized>(rng: &mut R) -> Vec<ConfettiPiece> {
    (0..CONFETTI_COUNT)
        .map(|idx| ConfettiPiece {
            left: rng.random_range(0.0..=100.0),
            drift: rng.random_range(-60.0..=60.0),
            duration: rng.random_range(2.0..=3.5),
            delay: idx as f32 * CONFETTI_STAGGER,
            color: CONFETTI_PALETTE[idx % CONFETTI_PALETTE.len()],
        })
        .collect()
}

/// Generate the balloon flight
pub fn generate_balloons<R: Rng + ?Sized>(rng: &mut R) -> Vec<Balloon> {
    (0..BALLOON_COUNT)
        .map(|_| Balloon {
            left: rng.random_range(10.0..=90.0),
            delay: rng.random_range(0.0..=1.2),
            color: pick(rng, &BALLOON_PALETTE),
            scale: rng.random_range(0.7..=1.2),
        })
        .collect()
}

/// Generate the sparkle layer
pub fn generate_sparkles<R: Rng + ?Sized>(rng: &mut R) -> Vec<Sparkle> {
    (0..SPARKLE_COUNT)
        .map(|_| Sparkle {
            top: rng.random_range(0.0..=100.0),
            left: rng.random_range(0.0..=100.0),
            delay: rng.random_range(0.0..=2.0),
            size: rng.random_range(8.0..=20.0),
            color: pick(rng, &CONFETTI_PALETTE),
        })
        .collect()
}

fn pick<R: Rng + ?Sized>(rng: &mut R, palette: &[&'static str]) -> &'static str {
    // Palettes are non-empty constants
    palette.choose(rng).copied().unwrap_or(palette[0])
}

/// All descriptors of one celebration, generated together on entering Success
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Celebration {
    /// Confetti burst
    pub confetti: Vec<ConfettiPiece>,
    /// Balloon flight
    pub balloons: Vec<Balloon>,
    /// Sparkle layer
    pub sparkles: Vec<Sparkle>,
}

impl Celebration {
    /// Generate a fresh celebration
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            confetti: generate_confetti(rng),
            balloons: generate_balloons(rng),
            sparkles: generate_sparkles(rng),
        }
    }

    /// The fixed starfield shown alongside the generated effects
    pub fn stars(&self) -> &'static [FloatingStar] {
        &FLOATING_STARS
    }
}
