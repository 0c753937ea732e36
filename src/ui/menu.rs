// Mobile menu
//
// The hamburger toggle records on every press regardless of direction;
// closing through a navigation link is silent, matching how the page
// behaves.

use crate::session::{self, SharedSession};

pub struct MobileMenu {
    open: bool,
    session: SharedSession,
}

impl MobileMenu {
    pub fn new(session: SharedSession) -> Self {
        Self {
            open: false,
            session,
        }
    }

    /// Hamburger press: flip and record
    pub fn toggle(&mut self) {
        self.open = !self.open;
        session::record(&self.session, "mobile_menu_toggled");
    }

    /// Close without recording (link navigation path)
    pub fn close(&mut self) {
        self.open = false;
    }

    #[allow(dead_code)] // Reserved for page rendering
    pub fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::StaticProbe;
    use crate::session::Session;
    use crate::sink::MemorySink;

    fn menu() -> (MobileMenu, SharedSession) {
        let session = Session::shared(
            "https://example.com/",
            MemorySink::new(),
            StaticProbe::new(1280, 800, "TestAgent/1.0", "en-US", "Linux x86_64"),
        );
        (MobileMenu::new(session.clone()), session)
    }

    #[test]
    fn test_toggle_flips_and_records_every_press() {
        let (mut menu, session) = menu();
        menu.toggle();
        assert!(menu.is_open());
        menu.toggle();
        assert!(!menu.is_open());

        let guard = session.lock().unwrap();
        assert_eq!(guard.events().len(), 2);
        assert!(guard.events().iter().all(|e| e.name == "mobile_menu_toggled"));
    }

    #[test]
    fn test_close_is_silent() {
        let (mut menu, session) = menu();
        menu.toggle();
        menu.close();
        assert!(!menu.is_open());
        assert_eq!(session.lock().unwrap().events().len(), 1);
    }
}
