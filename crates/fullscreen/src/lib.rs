//! Merges two independent fullscreen signal sources into one boolean.
//!
//! The primary path is the native browser API on the viewer's container
//! element; the fallback path is a compatibility library that may or may
//! not be enabled. Both are injected behind traits so the merge logic is
//! testable with substitutable fakes. Exactly one source is observed at a
//! time per observation session; the merged flag is the logical OR of
//! both sources, refreshed from whichever source last reported a change.

use tracing::warn;

/// Either fullscreen API rejected a request or raised an error event.
/// Non-fatal: the reconciler fails safe to windowed mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullscreenTransitionError {
    pub message: String,
}

impl FullscreenTransitionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FullscreenTransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fullscreen transition failed: {}", self.message)
    }
}

impl std::error::Error for FullscreenTransitionError {}

/// Native fullscreen API scoped to the viewer's container element.
pub trait NativeFullscreen {
    fn is_supported(&self) -> bool;
    /// True when the container is the document's current fullscreen element.
    fn is_active(&self) -> bool;
    fn request(&mut self) -> Result<(), FullscreenTransitionError>;
    fn exit(&mut self) -> Result<(), FullscreenTransitionError>;
    /// Attach the `fullscreenchange`/`fullscreenerror` listeners.
    fn observe(&mut self);
    /// Remove exactly what `observe` attached.
    fn unobserve(&mut self);
}

/// Fallback fullscreen-compatibility library.
pub trait FallbackFullscreen {
    fn is_enabled(&self) -> bool;
    fn is_fullscreen(&self) -> bool;
    fn request(&mut self) -> Result<(), FullscreenTransitionError>;
    fn exit(&mut self) -> Result<(), FullscreenTransitionError>;
    /// Attach the library's `change`/`error` listeners.
    fn observe(&mut self);
    /// Remove exactly what `observe` attached.
    fn unobserve(&mut self);
}

/// Which source the current observation session is subscribed to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ObservedSource {
    Native,
    Fallback,
}

#[derive(Debug)]
pub struct Reconciler<N: NativeFullscreen, F: FallbackFullscreen> {
    native: N,
    fallback: F,
    is_fullscreen: bool,
    observed: Option<ObservedSource>,
}

impl<N: NativeFullscreen, F: FallbackFullscreen> Reconciler<N, F> {
    pub fn new(native: N, fallback: F) -> Self {
        let mut r = Self {
            native,
            fallback,
            is_fullscreen: false,
            observed: None,
        };
        r.refresh();
        r
    }

    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    pub fn observed_source(&self) -> Option<ObservedSource> {
        self.observed
    }

    /// Begin an observation session. The fallback library's events are
    /// preferred when it is enabled; otherwise the native events are used.
    /// Never both, to avoid duplicate state updates.
    pub fn attach(&mut self) {
        if self.observed.is_some() {
            return;
        }
        let source = if self.fallback.is_enabled() {
            self.fallback.observe();
            ObservedSource::Fallback
        } else {
            self.native.observe();
            ObservedSource::Native
        };
        self.observed = Some(source);
        self.refresh();
    }

    /// End the observation session, removing whichever listener was
    /// actually attached.
    pub fn detach(&mut self) {
        match self.observed.take() {
            Some(ObservedSource::Native) => self.native.unobserve(),
            Some(ObservedSource::Fallback) => self.fallback.unobserve(),
            None => {}
        }
    }

    /// Click-driven toggle. Drives the native transition first, then the
    /// fallback library symmetrically if it reports itself enabled. Both
    /// paths may legitimately fire for a single user action.
    pub fn toggle(&mut self) {
        let mut errored = false;

        let native_result = if self.native.is_active() {
            self.native.exit()
        } else if self.native.is_supported() {
            self.native.request()
        } else {
            Ok(())
        };
        if let Err(err) = native_result {
            warn!(%err, "native fullscreen toggle failed");
            errored = true;
        }

        if self.fallback.is_enabled() {
            let fallback_result = if self.fallback.is_fullscreen() {
                self.fallback.exit()
            } else {
                self.fallback.request()
            };
            if let Err(err) = fallback_result {
                warn!(%err, "fallback fullscreen toggle failed");
                errored = true;
            }
        }

        if errored {
            // Fail safe to windowed mode.
            self.is_fullscreen = false;
        } else {
            self.refresh();
        }
    }

    /// Change event from the observed source.
    pub fn on_change(&mut self) {
        self.refresh();
    }

    /// Error event from the observed source. Forces windowed state.
    pub fn on_error(&mut self) {
        warn!("fullscreen error event; forcing windowed state");
        self.is_fullscreen = false;
    }

    fn refresh(&mut self) {
        self.is_fullscreen = self.native.is_active() || self.fallback.is_fullscreen();
    }
}
