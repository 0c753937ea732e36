// Scripted visit: drive a simulated visitor through every page component
//
// The script replays a plausible landing-page visit end to end: menu presses,
// smooth scroll, stat counters, FAQ accordion, carousel jumps, both forms
// (one rejected and one accepted each), a theme flip, a tab switch, and back
// to top. Every step lands in the session event log exactly as a live page
// would record it.
//
// This is the default mode: run with cargo run --release

use crate::config::TimingConfig;
use crate::device::StaticProbe;
use crate::prefs::MemoryPrefs;
use crate::scroll::ScrollMetrics;
use crate::session::SharedSession;
use crate::ui::accordion::Accordion;
use crate::ui::carousel::Carousel;
use crate::ui::counters::StatsBoard;
use crate::ui::forms::{ContactForm, ContactFormHandler, NewsletterSignup};
use crate::ui::menu::MobileMenu;
use crate::ui::nav::{BackToTop, Navigator};
use crate::ui::theme::ThemeToggle;
use crate::ui::toast::ToastRack;
use crate::ui::visibility::PageVisibility;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::sleep;

/// Page geometry for the simulated viewport. 3600px of document in a 900px
/// window leaves 2700px of scrollable range, so scroll positions below map
/// onto depth percentages at 27px per percent.
const DOCUMENT_HEIGHT: f64 = 3_600.0;
const VIEWPORT_HEIGHT: f64 = 900.0;

/// Landing page fixtures the script interacts with
const STAT_TARGETS: [u64; 4] = [250, 45, 12, 340];
const SLIDE_COUNT: usize = 3;
const FAQ_QUESTIONS: [&str; 3] = [
    "How long does a typical engagement take?",
    "Do you work with early-stage startups?",
    "What does your pricing look like?",
];

/// Device facts for the simulated visitor. The viewport height matches the
/// scroll geometry above.
pub fn visitor_probe() -> StaticProbe {
    StaticProbe::new(
        1440,
        900,
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
        "en-US",
        "MacIntel",
    )
}

/// One visitor action from the script
enum VisitStep {
    /// Scroll to an absolute Y position (feeds the depth ratchet and the
    /// back-to-top button)
    Scroll(f64),
    MenuToggle,
    Navigate(&'static str),
    EnterStats,
    AccordionToggle(usize),
    CarouselGoTo(isize),
    FocusField(&'static str),
    SubmitContact(ContactForm),
    SubmitNewsletter(&'static str),
    ThemeToggle,
    VisibilityChange(bool),
    BackToTopClick,
    PruneToasts,
    StopAutoplay,
}

/// All interactive components of the page, sharing one session handle
struct Page {
    session: SharedSession,
    menu: MobileMenu,
    nav: Navigator,
    back_to_top: BackToTop,
    stats: StatsBoard,
    contact: ContactFormHandler,
    newsletter: NewsletterSignup,
    carousel: Carousel,
    accordion: Accordion,
    toasts: ToastRack,
    theme: ThemeToggle,
    visibility: PageVisibility,
    counter_tick: Duration,
    counter_steps: u32,
}

impl Page {
    fn new(session: SharedSession, timing: &TimingConfig) -> Result<Self> {
        Ok(Self {
            menu: MobileMenu::new(session.clone()),
            nav: Navigator::new(session.clone()),
            back_to_top: BackToTop::new(session.clone()),
            stats: StatsBoard::new(&STAT_TARGETS, session.clone()),
            contact: ContactFormHandler::new(session.clone())?,
            newsletter: NewsletterSignup::new(session.clone())?,
            carousel: Carousel::new(SLIDE_COUNT, timing.carousel_interval(), session.clone()),
            accordion: Accordion::new(&FAQ_QUESTIONS, session.clone()),
            toasts: ToastRack::new(session.clone(), timing.toast_duration()),
            theme: ThemeToggle::new(session.clone(), MemoryPrefs::new()),
            visibility: PageVisibility::new(session.clone()),
            counter_tick: timing.counter_tick(),
            counter_steps: timing.counter_steps,
            session,
        })
    }

    fn apply(&mut self, step: VisitStep) {
        match step {
            VisitStep::Scroll(scroll_y) => {
                let metrics = ScrollMetrics::new(scroll_y, DOCUMENT_HEIGHT, VIEWPORT_HEIGHT);
                self.session.lock().unwrap().on_scroll(metrics);
                self.back_to_top.on_scroll(scroll_y);
            }
            VisitStep::MenuToggle => self.menu.toggle(),
            VisitStep::Navigate(href) => {
                self.nav.navigate_to(href, &mut self.menu);
            }
            VisitStep::EnterStats => {
                self.stats.enter_viewport(self.counter_tick, self.counter_steps)
            }
            VisitStep::AccordionToggle(index) => self.accordion.toggle(index),
            VisitStep::CarouselGoTo(index) => self.carousel.go_to(index),
            VisitStep::FocusField(field) => self.session.lock().unwrap().on_field_focus(field),
            VisitStep::SubmitContact(form) => {
                self.contact.submit(&form, &mut self.toasts);
            }
            VisitStep::SubmitNewsletter(email) => {
                self.newsletter.submit(email, &mut self.toasts);
            }
            VisitStep::ThemeToggle => self.theme.toggle(),
            VisitStep::VisibilityChange(hidden) => self.visibility.on_visibility_change(hidden),
            VisitStep::BackToTopClick => self.back_to_top.click(),
            VisitStep::PruneToasts => self.toasts.prune(),
            VisitStep::StopAutoplay => self.carousel.stop_autoplay(),
        }
    }
}

/// Build the page and record what a page load records: the load event, then
/// the carousel showing its first slide
fn open_page(session: SharedSession, timing: &TimingConfig) -> Result<Page> {
    let mut page = Page::new(session, timing)?;
    page.session.lock().unwrap().record_page_load();
    page.carousel.activate();
    Ok(page)
}

/// Run the scripted visit against the shared session
pub async fn run(
    session: SharedSession,
    timing: TimingConfig,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> Result<()> {
    // Give startup logging a beat before the visit begins
    sleep(Duration::from_millis(250)).await;

    tracing::info!("scripted visit starting");
    let mut page = open_page(session, &timing)?;

    for (step, delay_ms) in visit_script() {
        // Check for shutdown signal before acting
        if shutdown_rx.try_recv().is_ok() {
            tracing::info!("scripted visit interrupted by shutdown");
            return Ok(());
        }
        page.apply(step);
        sleep(Duration::from_millis(delay_ms)).await;
    }

    tracing::info!("scripted visit complete");
    Ok(())
}

fn visit_script() -> Vec<(VisitStep, u64)> {
    let incomplete_form = ContactForm {
        name: "Ada Lovelace".to_string(),
        message: "We need a relaunch of our marketing site.".to_string(),
        ..Default::default()
    };
    let complete_form = ContactForm {
        email: "ada@lovelace.dev".to_string(),
        budget: "10k-50k".to_string(),
        ..incomplete_form.clone()
    };

    vec![
        // === Arrival: poke the menu, jump to the features section ===
        (VisitStep::MenuToggle, 600),
        (VisitStep::MenuToggle, 400),
        (VisitStep::Navigate("#features"), 800),
        // === Read down the page. 25% lands on a milestone, the jump from
        // 25% to 60% skips right over the 50% mark ===
        (VisitStep::Scroll(270.0), 300),
        (VisitStep::Scroll(675.0), 400),
        (VisitStep::Scroll(1_620.0), 400),
        (VisitStep::EnterStats, 1_600),
        // === FAQ: open two questions, close the second ===
        (VisitStep::AccordionToggle(0), 700),
        (VisitStep::AccordionToggle(1), 700),
        (VisitStep::AccordionToggle(1), 500),
        // === Testimonials: manual jumps, the second wraps to the start ===
        (VisitStep::CarouselGoTo(2), 800),
        (VisitStep::CarouselGoTo(3), 600),
        (VisitStep::Scroll(2_025.0), 400),
        // === Contact form: first attempt is missing the email ===
        (VisitStep::FocusField("name"), 350),
        (VisitStep::FocusField("email"), 350),
        (VisitStep::FocusField("budget"), 300),
        (VisitStep::FocusField("message"), 400),
        (VisitStep::SubmitContact(incomplete_form), 700),
        (VisitStep::FocusField("email"), 300),
        (VisitStep::SubmitContact(complete_form), 800),
        // === Newsletter: typo first, then the real address ===
        (VisitStep::FocusField("newsEmail"), 300),
        (VisitStep::SubmitNewsletter("riseandgrind"), 600),
        (VisitStep::SubmitNewsletter("ada@lovelace.dev"), 800),
        // === Wind down: dark mode, bottom of the page, back to top ===
        (VisitStep::ThemeToggle, 500),
        (VisitStep::Scroll(2_700.0), 500),
        (VisitStep::BackToTopClick, 400),
        (VisitStep::Scroll(0.0), 400),
        (VisitStep::PruneToasts, 200),
        // === Tab away and back, then the visit is over ===
        (VisitStep::VisibilityChange(true), 900),
        (VisitStep::VisibilityChange(false), 600),
        (VisitStep::StopAutoplay, 0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use crate::sink::MemorySink;

    /// Timing with autoplay pushed out far enough that no timer fires while
    /// the script is replayed synchronously
    fn inert_timing() -> TimingConfig {
        TimingConfig {
            carousel_interval_ms: 60_000,
            toast_duration_ms: 4_000,
            counter_tick_ms: 1,
            counter_steps: 1,
        }
    }

    #[tokio::test]
    async fn test_full_script_produces_the_expected_log() {
        let session = Session::shared("https://example.com/", MemorySink::new(), visitor_probe());
        let timing = inert_timing();
        let mut page = open_page(session.clone(), &timing).unwrap();

        for (step, _delay) in visit_script() {
            page.apply(step);
        }

        let guard = session.lock().unwrap();
        let names: Vec<&str> = guard.events().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "page_loaded",
                "carousel_slide_shown",
                "mobile_menu_toggled",
                "mobile_menu_toggled",
                "smooth_scroll",
                "scroll_depth_25",
                "stats_animated",
                "faq_opened",
                "faq_opened",
                "faq_closed",
                "carousel_slide_shown",
                "carousel_slide_shown",
                "scroll_depth_75",
                "form_field_focused",
                "form_field_focused",
                "form_field_focused",
                "form_field_focused",
                "contact_form_submitted",
                "toast_displayed",
                "contact_form_validation_failed",
                "form_field_focused",
                "contact_form_submitted",
                "contact_form_valid_submission",
                "toast_displayed",
                "form_field_focused",
                "toast_displayed",
                "newsletter_invalid_email",
                "newsletter_signup",
                "toast_displayed",
                "theme_changed",
                "scroll_depth_100",
                "back_to_top_clicked",
                "page_hidden",
                "page_visible",
            ]
        );

        // The jump over 50% never fired a milestone, the ratchet topped out
        assert_eq!(guard.max_scroll_depth(), 100);
        // Six focuses across both forms
        assert_eq!(guard.form_interactions(), 6);
    }

    #[test]
    fn test_scroll_geometry_maps_positions_to_percentages() {
        for (scroll_y, depth) in [(270.0, 10), (675.0, 25), (2_025.0, 75), (2_700.0, 100)] {
            let metrics = ScrollMetrics::new(scroll_y, DOCUMENT_HEIGHT, VIEWPORT_HEIGHT);
            assert_eq!(metrics.depth_percent(), depth);
        }
    }
}
