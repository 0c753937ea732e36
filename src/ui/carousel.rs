// Testimonials carousel
//
// Autoplay advances the slide once per period. A manual jump cancels the
// running interval before showing the target slide, then restarts autoplay,
// so the next automatic advance is a full period away. Out-of-range jump
// targets wrap around. Every shown slide is recorded.

use crate::session::{self, SharedSession};
use crate::timer::IntervalTask;
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

struct CarouselState {
    current: usize,
    count: usize,
}

pub struct Carousel {
    state: Arc<Mutex<CarouselState>>,
    autoplay: IntervalTask,
    session: SharedSession,
    period: Duration,
}

impl Carousel {
    pub fn new(count: usize, period: Duration, session: SharedSession) -> Self {
        Self {
            state: Arc::new(Mutex::new(CarouselState { current: 0, count })),
            autoplay: IntervalTask::new(),
            session,
            period,
        }
    }

    /// Show the first slide and start autoplay. Inert with zero slides.
    pub fn activate(&mut self) {
        if self.state.lock().unwrap().count == 0 {
            return;
        }
        record_shown(&self.session, 0);
        self.start_autoplay();
    }

    /// Manual jump: cancel autoplay, show the (wrapped) target, restart
    pub fn go_to(&mut self, index: isize) {
        let slide = {
            let mut state = self.state.lock().unwrap();
            if state.count == 0 {
                return;
            }
            state.current = wrap_index(index, state.count);
            state.current
        };
        self.autoplay.cancel();
        record_shown(&self.session, slide);
        self.start_autoplay();
    }

    pub fn start_autoplay(&mut self) {
        if self.state.lock().unwrap().count == 0 {
            return;
        }
        let state = self.state.clone();
        let session = self.session.clone();
        self.autoplay.start(self.period, move || {
            let slide = {
                let mut state = state.lock().unwrap();
                state.current = (state.current + 1) % state.count;
                state.current
            };
            record_shown(&session, slide);
            true
        });
    }

    pub fn stop_autoplay(&mut self) {
        self.autoplay.cancel();
    }

    #[allow(dead_code)]
    pub fn autoplay_running(&self) -> bool {
        self.autoplay.is_running()
    }

    #[allow(dead_code)] // Reserved for page rendering
    pub fn current(&self) -> usize {
        self.state.lock().unwrap().current
    }
}

/// Out-of-range targets wrap: past the end lands on the first slide,
/// before the start lands on the last
fn wrap_index(index: isize, count: usize) -> usize {
    if index >= count as isize {
        0
    } else if index < 0 {
        count - 1
    } else {
        index as usize
    }
}

fn record_shown(session: &SharedSession, slide: usize) {
    session::record_with(session, "carousel_slide_shown", json!({ "slide": slide }));
}
