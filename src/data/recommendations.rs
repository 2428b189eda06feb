//! Rotating recommendation text.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// Default time each recommendation stays on screen.
pub const DEFAULT_ROTATION: Duration = Duration::from_secs(10);

/// A fixed list of insight strings shown one at a time.
///
/// Rotation is driven by [`Recommendations::tick`] with the current time
/// rather than an internal timer.
#[derive(Debug, Clone)]
pub struct Recommendations {
    items: Vec<String>,
    index: usize,
    interval: Duration,
    last_rotated: Option<DateTime<Utc>>,
}

impl Recommendations {
    pub fn new(items: Vec<String>, interval: Duration) -> Self {
        Self {
            items,
            index: 0,
            interval,
            last_rotated: None,
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.items.get(self.index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the list, keeping the position when the list is unchanged.
    pub fn replace(&mut self, items: Vec<String>) {
        if items != self.items {
            self.items = items;
            self.index = 0;
            self.last_rotated = None;
        }
    }

    /// Advance by one step per elapsed interval. Returns true if the text changed.
    pub fn tick(&mut self, now: DateTime<Utc>) -> bool {
        let Some(last) = self.last_rotated else {
            self.last_rotated = Some(now);
            return false;
        };

        if self.items.len() < 2 || self.interval.is_zero() {
            return false;
        }

        // Negative elapsed time (clock went backwards) never rotates.
        let Ok(elapsed) = (now - last).to_std() else {
            return false;
        };

        let steps = (elapsed.as_nanos() / self.interval.as_nanos()) as usize;
        if steps == 0 {
            return false;
        }

        self.index = (self.index + steps) % self.items.len();
        let advanced = self.interval * steps as u32;
        self.last_rotated =
            chrono::Duration::from_std(advanced).ok().map(|d| last + d).or(Some(now));
        true
    }
}
