//! Burst bookkeeping: group ids, expiry and delayed (scheduled) bursts.
//!
//! Burst particles carry their group's id. Expired groups are removed by id,
//! so overlapping bursts and population edits in between never remove the
//! wrong particles.

use glam::Vec2;

use crate::api::color::Color;
use crate::api::config::Range;

/// How long a burst group lives, in field milliseconds.
pub const BURST_LIFETIME_MS: f64 = 2000.0;
/// Speed magnitude range for burst particles.
pub const BURST_SPEED: Range = Range::new(2.0, 5.0);
/// Particles released by a click.
pub const CLICK_BURST_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BurstId(pub u32);

/// A burst waiting for its start time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingBurst {
    pub due_ms: f64,
    pub origin: Vec2,
    pub count: usize,
    /// Single color for the whole burst; `None` samples the palette.
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default)]
pub struct BurstTracker {
    next_id: u32,
    live: Vec<(BurstId, f64)>,
    pending: Vec<PendingBurst>,
}

impl BurstTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id for a burst fired at `now_ms`.
    pub fn register(&mut self, now_ms: f64) -> BurstId {
        let id = BurstId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.live.push((id, now_ms + BURST_LIFETIME_MS));
        id
    }

    pub fn schedule(&mut self, burst: PendingBurst) {
        self.pending.push(burst);
    }

    /// Remove and return scheduled bursts due at or before `now_ms`, oldest first.
    pub fn take_due(&mut self, now_ms: f64) -> Vec<PendingBurst> {
        let mut due = Vec::new();
        self.pending.retain(|b| {
            if b.due_ms <= now_ms {
                due.push(*b);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms));
        due
    }

    /// Remove and return groups whose lifetime has ended.
    pub fn take_expired(&mut self, now_ms: f64) -> Vec<BurstId> {
        let mut expired = Vec::new();
        self.live.retain(|(id, expires_ms)| {
            if *expires_ms <= now_ms {
                expired.push(*id);
                false
            } else {
                true
            }
        });
        expired
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.live.clear();
        self.pending.clear();
    }
}

/// Velocity of the `i`-th of `count` burst particles: evenly spaced
/// directions around the circle, starting along +x.
pub fn radial_velocity(i: usize, count: usize, speed: f32) -> Vec2 {
    let angle = std::f32::consts::TAU * i as f32 / count.max(1) as f32;
    Vec2::new(angle.cos(), angle.sin()) * speed
}
