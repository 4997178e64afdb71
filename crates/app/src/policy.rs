//! Announcement policy: when a classification result is worth speaking.
//!
//! Two fixed constants keep the audio output usable despite per-frame
//! jitter: a strict confidence threshold and a strict cooldown between
//! announcements. A label is also never re-announced until a different
//! label has won in between.

use notevox_classifier::{top_prediction, Prediction};
use std::time::{Duration, Instant};

/// Minimum winning confidence, exclusive: exactly 0.70 does not announce.
pub const CONFIDENCE_THRESHOLD: f32 = 0.70;

/// Minimum gap between announcements, exclusive.
pub const ANNOUNCE_COOLDOWN: Duration = Duration::from_millis(2000);

#[derive(Debug, Default)]
pub struct AnnouncePolicy {
    last_announced: String,
    last_announced_at: Option<Instant>,
}

impl AnnouncePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate one tick's predictions. Returns the label to announce, and
    /// records it, when all three conditions hold: confidence strictly above
    /// the threshold, a different label than last announced, and the
    /// cooldown strictly elapsed.
    pub fn evaluate(&mut self, predictions: &[Prediction], now: Instant) -> Option<String> {
        let top = top_prediction(predictions)?;
        if top.confidence <= CONFIDENCE_THRESHOLD {
            return None;
        }
        if top.label == self.last_announced {
            return None;
        }
        if let Some(at) = self.last_announced_at {
            if now.duration_since(at) <= ANNOUNCE_COOLDOWN {
                return None;
            }
        }
        self.last_announced = top.label.clone();
        self.last_announced_at = Some(now);
        Some(top.label.clone())
    }

    pub fn reset(&mut self) {
        self.last_announced.clear();
        self.last_announced_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preds(pairs: &[(&str, f32)]) -> Vec<Prediction> {
        pairs
            .iter()
            .map(|(l, c)| Prediction::rounded(*l, *c))
            .collect()
    }

    #[test]
    fn threshold_is_strict() {
        let mut policy = AnnouncePolicy::new();
        let now = Instant::now();
        assert_eq!(policy.evaluate(&preds(&[("A", 0.70)]), now), None);
        assert_eq!(
            policy.evaluate(&preds(&[("A", 0.71)]), now),
            Some("A".to_string())
        );
    }

    #[test]
    fn cooldown_is_strict() {
        let mut policy = AnnouncePolicy::new();
        let t0 = Instant::now();
        assert!(policy.evaluate(&preds(&[("A", 0.9)]), t0).is_some());

        // Different label inside the cooldown window: suppressed.
        let t1 = t0 + Duration::from_millis(1999);
        assert_eq!(policy.evaluate(&preds(&[("B", 0.9)]), t1), None);
        // Exactly at the boundary: still suppressed (strictly greater only).
        let t2 = t0 + Duration::from_millis(2000);
        assert_eq!(policy.evaluate(&preds(&[("B", 0.9)]), t2), None);
        // Past the boundary: announced.
        let t3 = t0 + Duration::from_millis(2001);
        assert_eq!(policy.evaluate(&preds(&[("B", 0.9)]), t3), Some("B".to_string()));
    }

    #[test]
    fn same_label_never_reannounces_without_interleaving_winner() {
        let mut policy = AnnouncePolicy::new();
        let t0 = Instant::now();
        assert!(policy.evaluate(&preds(&[("A", 0.9)]), t0).is_some());

        // Cooldown long expired, same label: still suppressed.
        let t1 = t0 + Duration::from_secs(60);
        assert_eq!(policy.evaluate(&preds(&[("A", 0.95)]), t1), None);

        // A different winner resets the latch; A may announce again later.
        let t2 = t1 + Duration::from_secs(3);
        assert_eq!(policy.evaluate(&preds(&[("B", 0.9)]), t2), Some("B".to_string()));
        let t3 = t2 + Duration::from_secs(3);
        assert_eq!(policy.evaluate(&preds(&[("A", 0.9)]), t3), Some("A".to_string()));
    }

    #[test]
    fn tie_goes_to_first_seen_class() {
        let mut policy = AnnouncePolicy::new();
        let now = Instant::now();
        assert_eq!(
            policy.evaluate(&preds(&[("A", 0.9), ("B", 0.9)]), now),
            Some("A".to_string())
        );
    }

    #[test]
    fn empty_predictions_do_nothing() {
        let mut policy = AnnouncePolicy::new();
        assert_eq!(policy.evaluate(&[], Instant::now()), None);
    }

    #[test]
    fn cooldown_tracks_an_injected_clock() {
        use notevox_foundation::{Clock, TestClock};

        let clock = TestClock::new();
        let mut policy = AnnouncePolicy::new();
        assert!(policy.evaluate(&preds(&[("A", 0.9)]), clock.now()).is_some());

        clock.advance(Duration::from_millis(2000));
        assert_eq!(policy.evaluate(&preds(&[("B", 0.9)]), clock.now()), None);

        clock.advance(Duration::from_millis(1));
        assert_eq!(
            policy.evaluate(&preds(&[("B", 0.9)]), clock.now()),
            Some("B".to_string())
        );
    }

    #[test]
    fn reset_clears_the_latch() {
        let mut policy = AnnouncePolicy::new();
        let t0 = Instant::now();
        assert!(policy.evaluate(&preds(&[("A", 0.9)]), t0).is_some());
        policy.reset();
        // Fresh session: A announces immediately again.
        assert!(policy
            .evaluate(&preds(&[("A", 0.9)]), t0 + Duration::from_millis(1))
            .is_some());
    }
}
