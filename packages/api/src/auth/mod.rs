//! # Identity provider seam
//!
//! The provider never talks to Google directly. It asks an [`IdentityProvider`]
//! to run the interactive pop-up flow and to end the session; the concrete SDK
//! integration lives outside this workspace.
//!
//! [`MemoryIdentity`] is a scripted provider used by tests and by offline builds
//! that have no identity backend.

mod memory;

pub use memory::MemoryIdentity;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use store::UserRecord;

use crate::error::Result;

/// User identity returned by a successful pop-up sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

impl From<Identity> for UserRecord {
    fn from(identity: Identity) -> Self {
        UserRecord {
            id: identity.uid,
            name: identity.display_name,
            email: identity.email,
            avatar: identity.photo_url,
            onboarding: None,
        }
    }
}

/// Third-party authentication used by [`crate::DataStore`].
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Run the interactive pop-up flow.
    ///
    /// `Ok(None)` when the flow produced no result or a result without a user.
    async fn sign_in_with_popup(&self) -> Result<Option<Identity>>;

    /// End the provider-side session.
    async fn sign_out(&self) -> Result<()>;
}
