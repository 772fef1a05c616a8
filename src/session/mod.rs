//! Session identity, passed explicitly to whatever needs it.
//!
//! The core never looks up "the current user" globally. The host reads the
//! identity from a [`SessionSlot`] at startup, wraps it in a [`SessionContext`]
//! and hands that context to the operations that need it. Login, registration
//! and logout are the only writers of the slot.

pub mod slot;

pub use slot::{FileSessionSlot, MemorySessionSlot, SessionSlot};

use crate::domain::{MarketplaceError, Result, SessionIdentity};
use crate::storage::Storage;

/// Who, if anyone, is signed in for this browsing session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    identity: Option<SessionIdentity>,
}

impl SessionContext {
    /// A context with nobody signed in.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { identity: None }
    }

    #[must_use]
    pub const fn signed_in(identity: SessionIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    /// Restores the context from the slot written by an earlier login.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot exists but cannot be read.
    pub fn restore(slot: &dyn SessionSlot) -> Result<Self> {
        Ok(Self {
            identity: slot.load()?,
        })
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    /// The signed-in identity, or [`MarketplaceError::Unauthenticated`].
    ///
    /// # Errors
    ///
    /// Fails when nobody is signed in.
    pub fn require(&self) -> Result<&SessionIdentity> {
        self.identity.as_ref().ok_or(MarketplaceError::Unauthenticated)
    }
}

/// Checks credentials and, on success, records the identity in `slot`.
///
/// Returns an anonymous context when the credentials do not match.
///
/// # Errors
///
/// Returns storage or slot write failures.
pub fn login(
    store: &dyn Storage,
    slot: &mut dyn SessionSlot,
    email: &str,
    password: &str,
) -> Result<SessionContext> {
    let _span = tracing::debug_span!("login", email = %email).entered();

    let Some(account) = store.authenticate(email, password)? else {
        tracing::debug!("credentials rejected");
        return Ok(SessionContext::anonymous());
    };

    let identity = SessionIdentity::from(&account);
    slot.store(&identity)?;
    tracing::debug!(user_id = %identity.id, "signed in");
    Ok(SessionContext::signed_in(identity))
}

/// Registers an account and signs it in.
///
/// # Errors
///
/// Returns `Conflict` for a taken email, `Validation` for blank input, or a
/// storage/slot failure.
pub fn register(
    store: &mut dyn Storage,
    slot: &mut dyn SessionSlot,
    name: &str,
    email: &str,
    password: &str,
) -> Result<SessionContext> {
    let _span = tracing::debug_span!("register", email = %email).entered();

    let account = store.register(name, email, password)?;
    let identity = SessionIdentity::from(&account);
    slot.store(&identity)?;
    Ok(SessionContext::signed_in(identity))
}

/// Clears the slot and returns an anonymous context.
///
/// # Errors
///
/// Returns slot failures.
pub fn logout(slot: &mut dyn SessionSlot) -> Result<SessionContext> {
    slot.clear()?;
    tracing::debug!("signed out");
    Ok(SessionContext::anonymous())
}
