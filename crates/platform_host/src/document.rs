//! Document-level host hooks.

use std::{cell::RefCell, rc::Rc};

/// Host service for document chrome outside the rendered desktop.
pub trait DocumentService {
    /// Replaces the document (tab) title.
    fn set_title(&self, title: &str);
}

#[derive(Debug, Clone, Copy, Default)]
/// Document service for hosts without a document.
pub struct NoopDocumentService;

impl DocumentService for NoopDocumentService {
    fn set_title(&self, _title: &str) {}
}

#[derive(Debug, Clone, Default)]
/// In-memory document service that remembers every title set.
pub struct MemoryDocumentService {
    titles: Rc<RefCell<Vec<String>>>,
}

impl MemoryDocumentService {
    /// Returns the most recent title, if any.
    pub fn title(&self) -> Option<String> {
        self.titles.borrow().last().cloned()
    }

    /// Returns every title set so far, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.titles.borrow().clone()
    }
}

impl DocumentService for MemoryDocumentService {
    fn set_title(&self, title: &str) {
        self.titles.borrow_mut().push(title.to_string());
    }
}
