//! Modal session gating for the tour viewer.
//!
//! Owns the open/close boolean the rest of the subsystem is gated behind,
//! plus the escape-key listener and background scroll locking. The prior
//! scroll style is captured on open and restored exactly once on close,
//! so nested modals round-trip arbitrary values instead of resetting to a
//! hardcoded default.

use tracing::debug;

/// Value forced onto the background scroll style while the modal is open.
pub const LOCKED_SCROLL_STYLE: &str = "hidden";

/// Last-resort unlocked value applied on host teardown.
pub const UNLOCKED_SCROLL_STYLE: &str = "";

/// Document-side effects, injected so the controller is testable.
pub trait ModalHost {
    /// Current background scroll style value (e.g. body overflow).
    fn scroll_style(&self) -> String;
    fn set_scroll_style(&mut self, value: &str);
    /// Attach the escape-key listener that will call
    /// [`ModalController::on_escape_key`].
    fn attach_escape_listener(&mut self);
    /// Remove exactly what `attach_escape_listener` attached.
    fn remove_escape_listener(&mut self);
}

#[derive(Debug, Default)]
pub struct ModalController {
    open: bool,
    prior_scroll: Option<String>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the modal: capture the prior scroll style, lock scrolling and
    /// attach the escape listener. Returns false when already open.
    pub fn open(&mut self, host: &mut dyn ModalHost) -> bool {
        if self.open {
            return false;
        }
        self.prior_scroll = Some(host.scroll_style());
        host.set_scroll_style(LOCKED_SCROLL_STYLE);
        host.attach_escape_listener();
        self.open = true;
        debug!("modal opened; background scroll locked");
        true
    }

    /// Close the modal: remove the escape listener and restore the exact
    /// prior scroll style. Idempotent; repeat calls restore nothing twice.
    pub fn close(&mut self, host: &mut dyn ModalHost) -> bool {
        if !self.open {
            return false;
        }
        host.remove_escape_listener();
        if let Some(prior) = self.prior_scroll.take() {
            host.set_scroll_style(&prior);
        }
        self.open = false;
        debug!("modal closed; background scroll restored");
        true
    }

    /// Escape-key entry point; closes when open.
    pub fn on_escape_key(&mut self, host: &mut dyn ModalHost) -> bool {
        self.close(host)
    }

    /// Host teardown. Runs the normal close path if still open, then
    /// unconditionally forces scroll unlocked in case intermediate
    /// cleanup was skipped.
    pub fn teardown(&mut self, host: &mut dyn ModalHost) {
        if self.open {
            self.close(host);
        }
        self.prior_scroll = None;
        host.set_scroll_style(UNLOCKED_SCROLL_STYLE);
    }
}
