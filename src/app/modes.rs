//! Phase of the browse controller.
//!
//! ```text
//!            edit                 apply / submit search
//!   Idle ──────────▶ Editing ─────────────────────────▶ Applied
//!    ▲                  │  ▲                               │
//!    │                  │  └──────────── edit ─────────────┘
//!    └──── reset ───────┴──────────── reset ───────────────┘
//! ```
//!
//! Sort changes are a side transition and leave the phase untouched. Loading a
//! location that carries a `search` or `brand` parameter, and the brand shortcut,
//! jump straight to [`Phase::Applied`].

/// Where the controller is in its edit/apply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing applied; results come from the default query.
    #[default]
    Idle,

    /// The working filters or search input differ from what produced the results.
    Editing,

    /// The visible results come from an explicit apply, search or shortcut.
    Applied,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Editing => "editing",
            Self::Applied => "applied",
        }
    }
}
