//! Fixed-rate tick clock
//!
//! Decides when the next tick is due. When the driver falls behind, missed deadlines
//! are skipped rather than replayed, so a stall never produces a burst of catch-up
//! ticks. The clock is owned by a single driver task; a tick can never start while
//! another is still running.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// What the driver should do at `now`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    /// Next tick is not due yet
    Wait(Duration),
    /// Run one tick. `skipped` counts deadlines dropped since the previous one.
    Run { tick: u64, skipped: u64 },
}

pub struct TickClock {
    period: Duration,
    next_deadline: Instant,
    ticks_run: u64,
    skipped_total: u64,
    /// Rolling window of measured tick costs
    costs: VecDeque<Duration>,
    max_samples: usize,
}

impl TickClock {
    /// Clock whose first tick is due at `start`
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            period: period.max(Duration::from_nanos(1)),
            next_deadline: start,
            ticks_run: 0,
            skipped_total: 0,
            costs: VecDeque::with_capacity(120),
            max_samples: 120,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    pub fn ticks_run(&self) -> u64 {
        self.ticks_run
    }

    pub fn skipped_total(&self) -> u64 {
        self.skipped_total
    }

    pub fn poll(&mut self, now: Instant) -> TickDecision {
        if now < self.next_deadline {
            return TickDecision::Wait(self.next_deadline - now);
        }

        let late = now.duration_since(self.next_deadline).as_nanos();
        let period = self.period.as_nanos();
        let skipped = (late / period) as u64;
        let phase = Duration::from_nanos((late % period) as u64);

        // Stay on the original deadline grid
        self.next_deadline = now + self.period - phase;
        self.ticks_run += 1;
        self.skipped_total += skipped;

        TickDecision::Run {
            tick: self.ticks_run,
            skipped,
        }
    }

    /// Record how long the last tick took to simulate
    pub fn record_tick_cost(&mut self, cost: Duration) {
        self.costs.push_back(cost);
        while self.costs.len() > self.max_samples {
            self.costs.pop_front();
        }
    }

    pub fn average_tick_cost(&self) -> Duration {
        if self.costs.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.costs.iter().sum();
        total / self.costs.len() as u32
    }

    /// Average tick cost as a percentage of the tick period
    pub fn budget_usage_percent(&self) -> f32 {
        self.average_tick_cost().as_secs_f32() / self.period.as_secs_f32() * 100.0
    }
}
