// Preference storage - the stand-in for the page's local storage
//
// Only the theme mode lives here today, but the seam keeps producers
// ignorant of where preferences actually land.

use std::collections::HashMap;

pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    #[allow(dead_code)] // Reserved for preference resets
    fn remove(&mut self, key: &str);
}

/// Session-local store; preferences do not survive the process
#[derive(Debug, Default)]
pub struct MemoryPrefs {
    values: HashMap<String, String>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_prefs_round_trip() {
        let mut prefs = MemoryPrefs::new();
        assert_eq!(prefs.get("theme"), None);
        prefs.set("theme", "dark");
        assert_eq!(prefs.get("theme"), Some("dark".to_string()));
        prefs.remove("theme");
        assert_eq!(prefs.get("theme"), None);
    }
}
