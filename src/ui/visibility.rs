// Page visibility tracking

use crate::session::{self, SharedSession};

pub struct PageVisibility {
    hidden: bool,
    session: SharedSession,
}

impl PageVisibility {
    pub fn new(session: SharedSession) -> Self {
        Self {
            hidden: false,
            session,
        }
    }

    /// One visibility-change signal from the environment
    pub fn on_visibility_change(&mut self, hidden: bool) {
        self.hidden = hidden;
        let name = if hidden { "page_hidden" } else { "page_visible" };
        session::record(&self.session, name);
    }

    #[allow(dead_code)]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}
