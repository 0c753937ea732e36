// Scroll depth math
//
// Converts raw page metrics into the integer scroll percentage the session
// ratchets on. The milestone set is fixed; milestone events fire only when
// the updated maximum lands exactly on one of these values after rounding.

/// Scroll depths that trigger a dedicated `scroll_depth_<N>` event
pub const MILESTONES: [u8; 4] = [25, 50, 75, 100];

/// Raw page metrics captured at one scroll signal
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollMetrics {
    /// Vertical scroll offset in pixels
    pub scroll_y: f64,
    /// Total document height in pixels
    pub document_height: f64,
    /// Visible viewport height in pixels
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_y: f64, document_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            document_height,
            viewport_height,
        }
    }

    /// Current scroll depth as an integer percentage in 0-100.
    ///
    /// A page that does not scroll (document no taller than the viewport)
    /// reports 0. Overscroll positions saturate at the domain bounds
    /// instead of escaping them.
    pub fn depth_percent(&self) -> u8 {
        let scrollable = self.document_height - self.viewport_height;
        if scrollable > 0.0 {
            ((self.scroll_y / scrollable) * 100.0).clamp(0.0, 100.0).round() as u8
        } else {
            0
        }
    }
}

/// True when `depth` is one of the fixed milestone percentages
pub fn is_milestone(depth: u8) -> bool {
    MILESTONES.contains(&depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics_at(scroll_y: f64) -> ScrollMetrics {
        // 3000px document in an 800px viewport: 2200px of scrollable height
        ScrollMetrics::new(scroll_y, 3000.0, 800.0)
    }

    #[test]
    fn test_depth_percent_basic() {
        assert_eq!(metrics_at(0.0).depth_percent(), 0);
        assert_eq!(metrics_at(1100.0).depth_percent(), 50);
        assert_eq!(metrics_at(2200.0).depth_percent(), 100);
    }

    #[test]
    fn test_depth_percent_rounds_to_nearest() {
        // 551/2200 = 25.045% -> 25, 561/2200 = 25.5% -> 26
        assert_eq!(metrics_at(551.0).depth_percent(), 25);
        assert_eq!(metrics_at(561.0).depth_percent(), 26);
    }

    #[test]
    fn test_unscrollable_page_reports_zero() {
        let flat = ScrollMetrics::new(500.0, 800.0, 800.0);
        assert_eq!(flat.depth_percent(), 0);
        let inverted = ScrollMetrics::new(500.0, 600.0, 800.0);
        assert_eq!(inverted.depth_percent(), 0);
    }

    #[test]
    fn test_overscroll_saturates() {
        assert_eq!(metrics_at(2500.0).depth_percent(), 100);
        assert_eq!(metrics_at(-50.0).depth_percent(), 0);
    }

    #[test]
    fn test_milestone_membership() {
        assert!(is_milestone(25));
        assert!(is_milestone(100));
        assert!(!is_milestone(24));
        assert!(!is_milestone(60));
        assert!(!is_milestone(0));
    }
}
