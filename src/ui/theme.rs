// Theme toggle
//
// The mode persists through the preference store under the "theme" key and
// is restored on construction. Unknown stored values fall back to light,
// the page default.

use crate::prefs::PreferenceStore;
use crate::session::{self, SharedSession};
use serde_json::json;

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "dark" => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    fn flipped(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

pub struct ThemeToggle {
    mode: ThemeMode,
    prefs: Box<dyn PreferenceStore>,
    session: SharedSession,
}

impl ThemeToggle {
    pub fn new(session: SharedSession, prefs: impl PreferenceStore + 'static) -> Self {
        let mode = prefs
            .get(THEME_KEY)
            .map(|name| ThemeMode::from_name(&name))
            .unwrap_or(ThemeMode::Light);
        Self {
            mode,
            prefs: Box::new(prefs),
            session,
        }
    }

    pub fn toggle(&mut self) {
        let from = self.mode;
        let to = from.flipped();
        self.mode = to;
        self.prefs.set(THEME_KEY, to.as_str());
        session::record_with(
            &self.session,
            "theme_changed",
            json!({ "from": from.as_str(), "to": to.as_str() }),
        );
    }

    #[allow(dead_code)]
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// The control shows the mode you would switch to
    #[allow(dead_code)] // Reserved for page rendering
    pub fn icon(&self) -> &'static str {
        match self.mode {
            ThemeMode::Light => "🌙",
            ThemeMode::Dark => "☀️",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::StaticProbe;
    use crate::prefs::MemoryPrefs;
    use crate::session::Session;
    use crate::sink::MemorySink;

    fn shared() -> SharedSession {
        Session::shared(
            "https://example.com/",
            MemorySink::new(),
            StaticProbe::new(1280, 800, "TestAgent/1.0", "en-US", "Linux x86_64"),
        )
    }

    #[test]
    fn test_defaults_to_light() {
        let toggle = ThemeToggle::new(shared(), MemoryPrefs::new());
        assert_eq!(toggle.mode(), ThemeMode::Light);
        assert_eq!(toggle.icon(), "🌙");
    }

    #[test]
    fn test_restores_stored_mode() {
        let mut prefs = MemoryPrefs::new();
        prefs.set("theme", "dark");
        let toggle = ThemeToggle::new(shared(), prefs);
        assert_eq!(toggle.mode(), ThemeMode::Dark);
        assert_eq!(toggle.icon(), "☀️");
    }

    #[test]
    fn test_unknown_stored_value_falls_back_to_light() {
        let mut prefs = MemoryPrefs::new();
        prefs.set("theme", "sepia");
        let toggle = ThemeToggle::new(shared(), prefs);
        assert_eq!(toggle.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_toggle_records_and_persists() {
        let session = shared();
        let mut toggle = ThemeToggle::new(session.clone(), MemoryPrefs::new());
        toggle.toggle();
        assert_eq!(toggle.mode(), ThemeMode::Dark);
        toggle.toggle();
        assert_eq!(toggle.mode(), ThemeMode::Light);

        let guard = session.lock().unwrap();
        assert_eq!(guard.events().len(), 2);
        assert_eq!(guard.events()[0].data["from"], json!("light"));
        assert_eq!(guard.events()[0].data["to"], json!("dark"));
        assert_eq!(guard.events()[1].data["from"], json!("dark"));
        assert_eq!(guard.events()[1].data["to"], json!("light"));
    }
}
