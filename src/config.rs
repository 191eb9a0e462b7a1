use crate::domain::identity::IdentityToken;
use crate::domain::ports::IdentityOracle;
use crate::error::{LedgerError, Result};

/// Settings fixed when the engine is constructed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    /// Identity of the deploying supplier. Recorded for callers that need it;
    /// no transition consults it.
    pub supplier_role: Option<IdentityToken>,
    /// Require identity proof on every payment request read, even when the
    /// caller names the stored payer id.
    pub strict_payment_reads: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the supplier role to the identity of whoever bootstraps the engine.
    pub fn from_oracle(oracle: &dyn IdentityOracle) -> Result<Self> {
        let identity = oracle.current_caller_identity()?;
        if identity.is_empty() {
            return Err(LedgerError::validation("Invalid supplier role. Empty."));
        }
        Ok(Self::new().with_supplier_role(identity))
    }

    pub fn with_supplier_role(mut self, role: IdentityToken) -> Self {
        self.supplier_role = Some(role);
        self
    }

    pub fn with_strict_payment_reads(mut self, strict: bool) -> Self {
        self.strict_payment_reads = strict;
        self
    }
}
