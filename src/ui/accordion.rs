// FAQ accordion
//
// At most one item open at a time. Toggling the open item closes it and
// records faq_closed; toggling any other item opens it and records
// faq_opened. The implicit close of the previously open item is silent,
// matching the page behavior.

use crate::session::{self, SharedSession};
use serde_json::json;

pub struct Accordion {
    questions: Vec<String>,
    open: Option<usize>,
    session: SharedSession,
}

impl Accordion {
    pub fn new(questions: &[&str], session: SharedSession) -> Self {
        Self {
            questions: questions.iter().map(|q| q.to_string()).collect(),
            open: None,
            session,
        }
    }

    pub fn toggle(&mut self, index: usize) {
        let Some(question) = self.questions.get(index) else {
            return;
        };
        if self.open == Some(index) {
            self.open = None;
            session::record_with(&self.session, "faq_closed", json!({ "question": question }));
        } else {
            self.open = Some(index);
            session::record_with(&self.session, "faq_opened", json!({ "question": question }));
        }
    }

    #[allow(dead_code)] // Reserved for page rendering
    pub fn open_index(&self) -> Option<usize> {
        self.open
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
