use std::cell::Cell;
use std::rc::Rc;

// Re-click notifications are recorded while the carousel is borrowed and
// delivered only after the borrows are dropped. Page handlers for
// `panel-reselected` run synchronously and may click a panel again.

#[derive(Clone, Default)]
pub struct PendingReselect {
    slot: Rc<Cell<Option<usize>>>,
}

impl PendingReselect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listener to register with `on_selected_panel_clicked`.
    pub fn recorder(&self) -> impl FnMut(usize) + 'static {
        let slot = self.slot.clone();
        move |index| slot.set(Some(index))
    }

    /// Latest recorded re-click, if any. Clears the slot.
    pub fn take(&self) -> Option<usize> {
        self.slot.take()
    }
}
