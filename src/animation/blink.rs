//! Autonomous blinking and manually triggered winks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const EYE_BLINK_LEFT: &str = "eyeBlinkLeft";
pub const EYE_BLINK_RIGHT: &str = "eyeBlinkRight";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BlinkConfig {
    /// Shortest open-eye interval between blinks
    pub min_interval_ms: u64,

    /// Longest open-eye interval between blinks
    pub max_interval_ms: u64,

    /// How long a blink holds the eyes closed
    pub blink_duration_ms: u64,

    /// How long a wink holds one eye closed
    pub wink_duration_ms: u64,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: 1000,
            max_interval_ms: 5000,
            blink_duration_ms: 200,
            wink_duration_ms: 300,
        }
    }
}

impl BlinkConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.min_interval_ms > self.max_interval_ms {
            return Err("blink min_interval_ms exceeds max_interval_ms".to_string());
        }
        Ok(())
    }
}

/// Which eyes the overlay wants closed this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EyeClosure {
    pub left: bool,
    pub right: bool,
}

/// Time-driven blink/wink state. All timestamps are caller-supplied
/// milliseconds so frames can be replayed deterministically.
#[derive(Debug, Clone)]
pub struct BlinkScheduler {
    config: BlinkConfig,
    rng: StdRng,
    next_blink_at: Option<u64>,
    blink_until: Option<u64>,
    wink_left_until: Option<u64>,
    wink_right_until: Option<u64>,
}

impl BlinkScheduler {
    pub fn new(config: BlinkConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: BlinkConfig, rng: StdRng) -> Self {
        Self {
            config,
            rng,
            next_blink_at: None,
            blink_until: None,
            wink_left_until: None,
            wink_right_until: None,
        }
    }

    fn random_interval(&mut self) -> u64 {
        let (lo, hi) = (self.config.min_interval_ms, self.config.max_interval_ms);
        if lo >= hi {
            lo
        } else {
            self.rng.gen_range(lo..=hi)
        }
    }

    /// Drop any running blink and schedule the next one from `now_ms`
    pub fn reschedule(&mut self, now_ms: u64) {
        self.blink_until = None;
        let interval = self.random_interval();
        self.next_blink_at = Some(now_ms + interval);
    }

    pub fn next_blink_at(&self) -> Option<u64> {
        self.next_blink_at
    }

    pub fn wink_left(&mut self, now_ms: u64) {
        self.wink_left_until = Some(now_ms + self.config.wink_duration_ms);
    }

    pub fn wink_right(&mut self, now_ms: u64) {
        self.wink_right_until = Some(now_ms + self.config.wink_duration_ms);
    }

    /// Advance to `now_ms` and report which eyes are closed
    pub fn update(&mut self, now_ms: u64) -> EyeClosure {
        match (self.blink_until, self.next_blink_at) {
            (Some(until), _) if now_ms >= until => self.reschedule(now_ms),
            (None, None) => self.reschedule(now_ms),
            (None, Some(at)) if now_ms >= at => {
                self.next_blink_at = None;
                self.blink_until = Some(now_ms + self.config.blink_duration_ms);
            }
            _ => {}
        }

        let blinking = self.blink_until.is_some();
        let wink_left = expire(&mut self.wink_left_until, now_ms);
        let wink_right = expire(&mut self.wink_right_until, now_ms);

        EyeClosure {
            left: blinking || wink_left,
            right: blinking || wink_right,
        }
    }
}

/// True while the deadline is in the future; clears it once passed
fn expire(deadline: &mut Option<u64>, now_ms: u64) -> bool {
    match *deadline {
        Some(until) if now_ms < until => true,
        Some(_) => {
            *deadline = None;
            false
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler(seed: u64) -> BlinkScheduler {
        BlinkScheduler::with_rng(BlinkConfig::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_first_blink_within_interval() {
        for seed in 0..20 {
            let mut blink = scheduler(seed);
            assert_eq!(blink.update(0), EyeClosure::default());
            let at = blink.next_blink_at().unwrap();
            assert!((1000..=5000).contains(&at), "seed {seed}: {at}");
        }
    }

    #[test]
    fn test_blink_holds_for_200ms_then_reschedules() {
        let mut blink = scheduler(5);
        blink.update(0);
        let at = blink.next_blink_at().unwrap();

        assert!(!blink.update(at - 1).left);
        let closed = blink.update(at);
        assert!(closed.left && closed.right);
        assert!(blink.update(at + 199).left);

        let open = blink.update(at + 200);
        assert!(!open.left && !open.right);
        let next = blink.next_blink_at().unwrap();
        assert!(next >= at + 200 + 1000 && next <= at + 200 + 5000);
    }

    #[test]
    fn test_wink_is_one_sided_and_lasts_300ms() {
        let mut blink = scheduler(9);
        blink.update(0);
        blink.wink_left(10);
        let frame = blink.update(100);
        assert!(frame.left && !frame.right);
        assert!(blink.update(309).left);
        assert!(!blink.update(310).left);

        blink.wink_right(400);
        let frame = blink.update(500);
        assert!(frame.right && !frame.left);
    }

    #[test]
    fn test_degenerate_interval() {
        let config = BlinkConfig {
            min_interval_ms: 800,
            max_interval_ms: 800,
            ..Default::default()
        };
        let mut blink = BlinkScheduler::with_rng(config, StdRng::seed_from_u64(1));
        blink.update(100);
        assert_eq!(blink.next_blink_at(), Some(900));
    }
}
