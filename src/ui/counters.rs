// Animated stat counters
//
// Each counter tweens from zero to its target in a fixed number of steps on
// a short interval. Displayed values are floored mid-animation; the final
// value is the exact target. The board starts every counter on the first
// viewport entry and records stats_animated once.

use crate::session::{self, SharedSession};
use crate::timer::IntervalTask;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct CounterState {
    current: f64,
    done: bool,
}

pub struct StatCounter {
    state: Arc<Mutex<CounterState>>,
    task: IntervalTask,
    target: u64,
}

impl StatCounter {
    pub fn new(target: u64) -> Self {
        Self {
            state: Arc::new(Mutex::new(CounterState {
                current: 0.0,
                done: false,
            })),
            task: IntervalTask::new(),
            target,
        }
    }

    /// Tween toward the target: target/steps per tick, stopping on arrival
    pub fn start(&mut self, tick: Duration, steps: u32) {
        let increment = self.target as f64 / steps.max(1) as f64;
        let target = self.target as f64;
        let state = self.state.clone();
        self.task.start(tick, move || {
            let mut state = state.lock().unwrap();
            state.current += increment;
            if state.current >= target {
                state.done = true;
                return false;
            }
            true
        });
    }

    /// Displayed value: floored while animating, exact target once done
    #[allow(dead_code)] // Reserved for page rendering
    pub fn value(&self) -> u64 {
        let state = self.state.lock().unwrap();
        if state.done {
            self.target
        } else {
            state.current.floor() as u64
        }
    }

    #[allow(dead_code)]
    pub fn is_done(&self) -> bool {
        self.state.lock().unwrap().done
    }

    #[allow(dead_code)]
    pub fn cancel(&mut self) {
        self.task.cancel();
    }
}

pub struct StatsBoard {
    counters: Vec<StatCounter>,
    session: SharedSession,
    animated: bool,
}

impl StatsBoard {
    pub fn new(targets: &[u64], session: SharedSession) -> Self {
        Self {
            counters: targets.iter().map(|t| StatCounter::new(*t)).collect(),
            session,
            animated: false,
        }
    }

    /// First viewport entry starts the animation and records it; later
    /// entries are ignored
    pub fn enter_viewport(&mut self, tick: Duration, steps: u32) {
        if self.animated {
            return;
        }
        self.animated = true;
        for counter in &mut self.counters {
            counter.start(tick, steps);
        }
        session::record(&self.session, "stats_animated");
    }

    #[allow(dead_code)] // Reserved for page rendering
    pub fn values(&self) -> Vec<u64> {
        self.counters.iter().map(|c| c.value()).collect()
    }

    #[allow(dead_code)]
    pub fn is_complete(&self) -> bool {
        self.counters.iter().all(|c| c.is_done())
    }
}
