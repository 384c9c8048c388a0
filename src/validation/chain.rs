//! Validator chain
//!
//! Runs every validator against the same payload and concatenates the
//! messages, in validator order. No de-duplication, no short-circuit.

use super::codes::CodeTables;
use super::rules::{
    CopayNonNegativeValidator, CopayValidator, DiagnosisCodeValidator, FeeValidator,
    ProcedureCodeValidator, ServiceDateValidator,
};
use super::ClaimValidator;
use crate::core::clock::{Clock, SystemClock};
use crate::domain::SessionPayload;
use std::fmt;
use std::sync::Arc;

/// Ordered collection of claim validators
///
/// # Examples
///
/// ```
/// use clara::validation::{ValidatorChain, PayerIdValidator, PayerPolicy, CodeTables};
/// use std::sync::Arc;
///
/// let mut chain = ValidatorChain::default();
/// assert_eq!(chain.len(), 6);
///
/// // Payer-specific extension without touching the base set
/// chain.add_validator(PayerIdValidator::new(Arc::new(CodeTables::default()), PayerPolicy::Block));
/// assert_eq!(chain.names().last(), Some(&"payer_id"));
/// ```
pub struct ValidatorChain {
    validators: Vec<Box<dyn ClaimValidator>>,
}

impl ValidatorChain {
    /// Chain made of exactly the given validators, in order
    pub fn from_validators(validators: Vec<Box<dyn ClaimValidator>>) -> Self {
        Self { validators }
    }

    /// The standard six-rule chain
    pub fn with_defaults(tables: Arc<CodeTables>, clock: Arc<dyn Clock>) -> Self {
        Self::from_validators(Self::default_validators(tables, clock))
    }

    /// Fee, copay non-negative, copay vs fee, procedure code, diagnosis code, service date
    pub fn default_validators(
        tables: Arc<CodeTables>,
        clock: Arc<dyn Clock>,
    ) -> Vec<Box<dyn ClaimValidator>> {
        vec![
            Box::new(FeeValidator),
            Box::new(CopayNonNegativeValidator),
            Box::new(CopayValidator),
            Box::new(ProcedureCodeValidator::new(tables)),
            Box::new(DiagnosisCodeValidator),
            Box::new(ServiceDateValidator::new(clock)),
        ]
    }

    /// Runs all validators and returns the aggregated messages.
    ///
    /// An empty result means every rule passed.
    pub fn validate(&self, payload: &SessionPayload) -> Vec<String> {
        let mut all_errors = Vec::new();
        for validator in &self.validators {
            let errors = validator.validate(payload);
            if !errors.is_empty() {
                tracing::trace!(
                    validator = validator.name(),
                    errors = errors.len(),
                    "Rule violated"
                );
            }
            all_errors.extend(errors);
        }
        all_errors
    }

    /// Appends a validator after the existing ones
    pub fn add_validator(&mut self, validator: impl ClaimValidator + 'static) -> &mut Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Names of the validators, in execution order
    pub fn names(&self) -> Vec<&'static str> {
        self.validators.iter().map(|v| v.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Default for ValidatorChain {
    fn default() -> Self {
        Self::with_defaults(Arc::new(CodeTables::default()), Arc::new(SystemClock))
    }
}

impl fmt::Debug for ValidatorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorChain")
            .field("validators", &self.names())
            .finish()
    }
}
