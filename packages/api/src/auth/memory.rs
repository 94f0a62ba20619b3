use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use super::{Identity, IdentityProvider};
use crate::error::{ApiError, Result};

/// Scripted IdentityProvider for tests and offline fallback.
///
/// Every pop-up sign-in yields the configured identity (or nothing), and every
/// sign-out is counted.
#[derive(Debug, Default)]
pub struct MemoryIdentity {
    identity: RefCell<Option<Identity>>,
    fail_with: RefCell<Option<String>>,
    sign_outs: Cell<usize>,
}

impl MemoryIdentity {
    /// A provider whose pop-up yields `identity`.
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            identity: RefCell::new(identity),
            ..Default::default()
        }
    }

    /// Replace the identity returned by the next pop-ups.
    pub fn set_identity(&self, identity: Option<Identity>) {
        *self.identity.borrow_mut() = identity;
    }

    /// Make every call fail with `message` until cleared with `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        *self.fail_with.borrow_mut() = message.map(str::to_string);
    }

    /// How many times `sign_out` succeeded.
    pub fn sign_outs(&self) -> usize {
        self.sign_outs.get()
    }

    fn check(&self) -> Result<()> {
        match self.fail_with.borrow().as_ref() {
            Some(message) => Err(ApiError::Identity(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for MemoryIdentity {
    async fn sign_in_with_popup(&self) -> Result<Option<Identity>> {
        self.check()?;
        Ok(self.identity.borrow().clone())
    }

    async fn sign_out(&self) -> Result<()> {
        self.check()?;
        self.sign_outs.set(self.sign_outs.get() + 1);
        Ok(())
    }
}
