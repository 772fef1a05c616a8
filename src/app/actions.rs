//! Side effects requested by the event handler.
//!
//! The handler never touches the location itself. It returns actions and the
//! host (a router, the CLI, a test) carries them out.

/// Commands to be executed by the host after an event is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the current location.
    ///
    /// The host is expected to feed the new location back as
    /// [`Event::Load`](super::Event::Load) once navigation completes; doing so
    /// leaves the controller state unchanged.
    Navigate {
        /// Listing route plus the mirrored query parameters.
        location: String,
    },
}
