// Navigation - smooth-scroll links and the back-to-top control

use crate::session::{self, SharedSession};
use crate::ui::menu::MobileMenu;
use serde_json::json;

/// Scroll offset past which the back-to-top control becomes visible
pub const BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;

pub struct BackToTop {
    visible: bool,
    session: SharedSession,
}

impl BackToTop {
    pub fn new(session: SharedSession) -> Self {
        Self {
            visible: false,
            session,
        }
    }

    /// Visibility follows the scroll position; no event either way
    pub fn on_scroll(&mut self, scroll_y: f64) {
        self.visible = scroll_y > BACK_TO_TOP_THRESHOLD_PX;
    }

    pub fn click(&self) {
        session::record(&self.session, "back_to_top_clicked");
    }

    #[allow(dead_code)] // Reserved for page rendering
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// In-page anchor navigation
pub struct Navigator {
    session: SharedSession,
}

impl Navigator {
    pub fn new(session: SharedSession) -> Self {
        Self { session }
    }

    /// Follow an anchor link. Records the target (without the leading '#')
    /// and closes the mobile menu. A bare "#" is a no-op.
    pub fn navigate_to(&self, href: &str, menu: &mut MobileMenu) -> bool {
        let target = href.trim_start_matches('#');
        if target.is_empty() {
            return false;
        }
        session::record_with(&self.session, "smooth_scroll", json!({ "target": target }));
        menu.close();
        true
    }
}
