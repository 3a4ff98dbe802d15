//! Plain-text rendering of a round snapshot

use numtap_core::{RoundSnapshot, RoundStatus};

const TITLE: &str = "Alex's Number Game";
const INSTRUCTIONS: &str = "Look at the number. Tap the big button the same number of times!";
const GROWN_UPS: &str = "For grown-ups: This game helps children to get a sense of the size \
of the displayed numeral by matching the taps to the number.";
const SUCCESS: &str = "Spectacular! You matched the number perfectly!";
const TOO_MANY: &str = "Oops, that was too many taps. Let's try a new number!";

const APPLE_RED: &str = "🍎";
const APPLE_GREEN: &str = "🍏";
const STAR: &str = "✨";

/// One dot per unit of the target, the first `filled_dots` red
pub fn apple_dots(snapshot: &RoundSnapshot) -> String {
    (0..snapshot.target)
        .map(|i| {
            if i < snapshot.filled_dots {
                APPLE_RED
            } else {
                APPLE_GREEN
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Feedback line under the tap button
pub fn feedback(status: RoundStatus) -> String {
    match status {
        RoundStatus::Playing => GROWN_UPS.to_string(),
        RoundStatus::Success => format!("{} {}", STAR.repeat(3), SUCCESS),
        RoundStatus::TooMany => TOO_MANY.to_string(),
    }
}

/// Full screen for one snapshot
pub fn render(snapshot: &RoundSnapshot) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    out.push_str(INSTRUCTIONS);
    out.push_str("\n\n");
    out.push_str(&format!("    [ {} ]\n", snapshot.target));
    out.push_str(&format!("    {}\n\n", apple_dots(snapshot)));
    if let Some(celebration) = &snapshot.celebration {
        out.push_str(&format!(
            "    {} confetti, {} balloons, {} sparkles\n",
            celebration.confetti.len(),
            celebration.balloons.len(),
            celebration.sparkles.len()
        ));
    }
    out.push_str(&feedback(snapshot.status));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(target: u32, tap_count: u32, status: RoundStatus) -> RoundSnapshot {
        RoundSnapshot {
            generation: 0,
            target,
            tap_count,
            status,
            filled_dots: tap_count.min(target),
            celebration: None,
        }
    }

    #[test]
    fn test_dots_fill_left_to_right() {
        let view = apple_dots(&snapshot(4, 1, RoundStatus::Playing));
        assert_eq!(view, "🍎 🍏 🍏 🍏");
    }

    #[test]
    fn test_dots_cap_at_target() {
        let view = apple_dots(&snapshot(2, 3, RoundStatus::TooMany));
        assert_eq!(view, "🍎 🍎");
    }

    #[test]
    fn test_feedback_per_status() {
        assert!(feedback(RoundStatus::Playing).starts_with("For grown-ups"));
        assert!(feedback(RoundStatus::Success).contains("Spectacular"));
        assert!(feedback(RoundStatus::TooMany).starts_with("Oops"));
    }

    #[test]
    fn test_render_shows_numeral() {
        let screen = render(&snapshot(5, 0, RoundStatus::Playing));
        assert!(screen.contains("[ 5 ]"));
        assert!(!screen.contains(APPLE_RED));
    }
}
