//! Two-input visibility gate
//!
//! An engine may only advance while its element intersects the viewport
//! (at or above its start threshold) and the page itself is visible. The
//! gate is kept apart from the typing state machine: it only reports when
//! the combined condition flips.

/// Result of feeding one input into the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateChange {
    Opened,
    Closed,
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityGate {
    in_viewport: bool,
    page_visible: bool,
    /// Set once the element has left the viewport after being in it
    left_viewport: bool,
}

impl VisibilityGate {
    /// Starts outside the viewport; the intersection observer reports the
    /// initial state on its first callback.
    pub fn new(page_visible: bool) -> Self {
        Self {
            in_viewport: false,
            page_visible,
            left_viewport: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.in_viewport && self.page_visible
    }

    pub fn in_viewport(&self) -> bool {
        self.in_viewport
    }

    pub fn page_visible(&self) -> bool {
        self.page_visible
    }

    /// True when the element is back in view after having left it
    pub fn reentered(&self) -> bool {
        self.in_viewport && self.left_viewport
    }

    pub fn set_in_viewport(&mut self, in_viewport: bool) -> GateChange {
        if self.in_viewport && !in_viewport {
            self.left_viewport = true;
        }
        self.apply(|gate| gate.in_viewport = in_viewport)
    }

    pub fn set_page_visible(&mut self, visible: bool) -> GateChange {
        self.apply(|gate| gate.page_visible = visible)
    }

    fn apply(&mut self, update: impl FnOnce(&mut Self)) -> GateChange {
        let before = self.is_open();
        update(self);
        match (before, self.is_open()) {
            (false, true) => GateChange::Opened,
            (true, false) => GateChange::Closed,
            _ => GateChange::Unchanged,
        }
    }
}
