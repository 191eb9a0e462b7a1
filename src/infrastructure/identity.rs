use crate::domain::identity::IdentityToken;
use crate::domain::ports::IdentityOracle;
use crate::error::Result;

/// An oracle that always reports one configured identity.
///
/// Stands in for the host's transaction-level identity binding when the engine
/// runs outside a ledger, e.g. from the command line.
#[derive(Debug, Clone)]
pub struct StaticIdentityOracle {
    identity: IdentityToken,
}

impl StaticIdentityOracle {
    pub fn new(identity: IdentityToken) -> Self {
        Self { identity }
    }
}

impl IdentityOracle for StaticIdentityOracle {
    fn current_caller_identity(&self) -> Result<IdentityToken> {
        Ok(self.identity.clone())
    }
}
