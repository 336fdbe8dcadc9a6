//! Which marker, if any, is currently emphasized

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct SelectionInner {
    selected: Option<String>,
    revision: u64,
}

/// Selected marker id, owned by the top-level view.
///
/// Clones share the same state so a click callback can write what the view reads.
/// Every effective change bumps the revision.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    inner: Rc<RefCell<SelectionInner>>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<String> {
        self.inner.borrow().selected.clone()
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.inner.borrow().selected.as_deref() == Some(id)
    }

    /// Select `id`, returning whether the selection changed
    pub fn select(&self, id: &str) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.selected.as_deref() == Some(id) {
            return false;
        }
        inner.selected = Some(id.to_string());
        inner.revision += 1;
        true
    }

    pub fn clear(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.selected.take().is_none() {
            return false;
        }
        inner.revision += 1;
        true
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }
}
