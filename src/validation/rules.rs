//! Business-rule validators
//!
//! One validator per rule. Each reads the payload and returns its violations
//! as messages; none of them fails, panics or looks at another validator's
//! output.

use super::codes::CodeTables;
use super::ClaimValidator;
use crate::core::clock::Clock;
use crate::domain::SessionPayload;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Fee must be strictly positive
#[derive(Debug, Clone, Copy, Default)]
pub struct FeeValidator;

impl ClaimValidator for FeeValidator {
    fn name(&self) -> &'static str {
        "fee"
    }

    fn validate(&self, payload: &SessionPayload) -> Vec<String> {
        let mut errors = Vec::new();
        if payload.fee() <= Decimal::ZERO {
            errors.push("Fee must be greater than $0.00.".to_string());
        }
        errors
    }
}

/// Copay may be zero but not negative
#[derive(Debug, Clone, Copy, Default)]
pub struct CopayNonNegativeValidator;

impl ClaimValidator for CopayNonNegativeValidator {
    fn name(&self) -> &'static str {
        "copay_non_negative"
    }

    fn validate(&self, payload: &SessionPayload) -> Vec<String> {
        let mut errors = Vec::new();
        if payload.copay_collected() < Decimal::ZERO {
            errors.push("Copay cannot be negative.".to_string());
        }
        errors
    }
}

/// Copay may not exceed the total fee
#[derive(Debug, Clone, Copy, Default)]
pub struct CopayValidator;

impl ClaimValidator for CopayValidator {
    fn name(&self) -> &'static str {
        "copay_vs_fee"
    }

    fn validate(&self, payload: &SessionPayload) -> Vec<String> {
        let mut errors = Vec::new();
        if payload.copay_collected() > payload.fee() {
            errors.push(format!(
                "Copay (${}) cannot exceed total fee (${}).",
                payload.copay_collected(),
                payload.fee()
            ));
        }
        errors
    }
}

/// CPT code must be in the allow-list
#[derive(Debug, Clone)]
pub struct ProcedureCodeValidator {
    tables: Arc<CodeTables>,
}

impl ProcedureCodeValidator {
    pub fn new(tables: Arc<CodeTables>) -> Self {
        Self { tables }
    }
}

impl Default for ProcedureCodeValidator {
    fn default() -> Self {
        Self::new(Arc::new(CodeTables::default()))
    }
}

impl ClaimValidator for ProcedureCodeValidator {
    fn name(&self) -> &'static str {
        "procedure_code"
    }

    fn validate(&self, payload: &SessionPayload) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.tables.is_allowed_procedure(payload.cpt_code()) {
            errors.push(format!(
                "CPT code '{}' is not in the allowed list. Allowed codes: {}",
                payload.cpt_code(),
                self.tables.allowed_procedure_codes().join(", ")
            ));
        }
        errors
    }
}

/// Structural ICD-10 check: a letter followed by two digits, with an
/// optional decimal point. Only the first failing condition is reported.
///
/// This does not check the code exists in the ICD-10 catalogue.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosisCodeValidator;

impl DiagnosisCodeValidator {
    fn check(code: &str) -> Option<String> {
        let chars: Vec<char> = code.chars().collect();

        if chars.is_empty() {
            return Some("ICD-10 code is required.".to_string());
        }
        if chars.len() < 3 {
            return Some(format!(
                "ICD-10 code '{code}' is too short (minimum 3 characters)."
            ));
        }
        if !chars[0].is_alphabetic() {
            return Some(format!("ICD-10 code '{code}' must start with a letter."));
        }

        let category: Vec<char> = chars[1..3].iter().copied().filter(|c| *c != '.').collect();
        if category.is_empty() || !category.iter().all(char::is_ascii_digit) {
            return Some(format!("ICD-10 code '{code}' has invalid format."));
        }

        None
    }
}

impl ClaimValidator for DiagnosisCodeValidator {
    fn name(&self) -> &'static str {
        "diagnosis_code"
    }

    fn validate(&self, payload: &SessionPayload) -> Vec<String> {
        Self::check(payload.icd10_code()).into_iter().collect()
    }
}

/// Session date may be today or any day before, never after
#[derive(Clone)]
pub struct ServiceDateValidator {
    clock: Arc<dyn Clock>,
}

impl ServiceDateValidator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl std::fmt::Debug for ServiceDateValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceDateValidator")
            .field("today", &self.clock.today())
            .finish()
    }
}

impl ClaimValidator for ServiceDateValidator {
    fn name(&self) -> &'static str {
        "service_date"
    }

    fn validate(&self, payload: &SessionPayload) -> Vec<String> {
        let mut errors = Vec::new();
        if payload.session_date() > self.clock.today() {
            errors.push(format!(
                "Session date ({}) cannot be in the future.",
                payload.session_date().format("%Y-%m-%d")
            ));
        }
        errors
    }
}

/// What to do with a payer that is not in the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayerPolicy {
    /// Accept the payer; the caller may log it
    #[default]
    Warn,
    /// Report a validation error
    Block,
}

/// Payer id must be in the directory (only enforced under [`PayerPolicy::Block`])
///
/// Not part of the default chain. Append it with
/// [`super::ValidatorChain::add_validator`] to enforce a closed payer list.
#[derive(Debug, Clone)]
pub struct PayerIdValidator {
    tables: Arc<CodeTables>,
    policy: PayerPolicy,
}

impl PayerIdValidator {
    pub fn new(tables: Arc<CodeTables>, policy: PayerPolicy) -> Self {
        Self { tables, policy }
    }

    pub fn policy(&self) -> PayerPolicy {
        self.policy
    }
}

impl ClaimValidator for PayerIdValidator {
    fn name(&self) -> &'static str {
        "payer_id"
    }

    fn validate(&self, payload: &SessionPayload) -> Vec<String> {
        let mut errors = Vec::new();
        if self.policy == PayerPolicy::Block && !self.tables.is_known_payer(payload.payer_id()) {
            errors.push(format!(
                "Payer ID '{}' is not a recognized payer.",
                payload.payer_id()
            ));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use chrono::{Duration, NaiveDate};
    use rust_decimal_macros::dec;
    use test_case::test_case;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn payload() -> SessionPayload {
        SessionPayload::builder()
            .practice_id("practice_123")
            .therapist_id("therapist_456")
            .patient_id("patient_789")
            .session_date(today())
            .cpt_code("90837")
            .icd10_code("F33.1")
            .fee(dec!(175.00))
            .copay_collected(dec!(25.00))
            .payer_id("BCBSMA")
            .build()
            .unwrap()
    }

    fn with_fee_and_copay(fee: Decimal, copay: Decimal) -> SessionPayload {
        payload()
            .to_builder()
            .fee(fee)
            .copay_collected(copay)
            .build()
            .unwrap()
    }

    fn with_icd10(code: &str) -> SessionPayload {
        payload().to_builder().icd10_code(code).build().unwrap()
    }

    #[test_case(dec!(175.00), 0 ; "positive fee passes")]
    #[test_case(dec!(0.01), 0 ; "one cent passes")]
    #[test_case(dec!(0.00), 1 ; "zero fee fails")]
    #[test_case(dec!(-10.00), 1 ; "negative fee fails")]
    fn test_fee_validator(fee: Decimal, expected: usize) {
        let errors = FeeValidator.validate(&with_fee_and_copay(fee, dec!(0.00)));
        assert_eq!(errors.len(), expected);
    }

    #[test]
    fn test_fee_message_states_floor() {
        let errors = FeeValidator.validate(&with_fee_and_copay(dec!(0.00), dec!(0.00)));
        assert_eq!(errors, vec!["Fee must be greater than $0.00."]);
    }

    #[test]
    fn test_copay_non_negative() {
        assert!(CopayNonNegativeValidator.validate(&payload()).is_empty());
        assert!(CopayNonNegativeValidator
            .validate(&with_fee_and_copay(dec!(175.00), dec!(0.00)))
            .is_empty());

        let errors =
            CopayNonNegativeValidator.validate(&with_fee_and_copay(dec!(175.00), dec!(-1.00)));
        assert_eq!(errors, vec!["Copay cannot be negative."]);
    }

    #[test]
    fn test_copay_exceeds_fee_reports_both_amounts() {
        let errors = CopayValidator.validate(&with_fee_and_copay(dec!(175.00), dec!(200.00)));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("cannot exceed"));
        assert!(errors[0].contains("175"));
        assert!(errors[0].contains("200"));
        assert_eq!(
            errors[0],
            "Copay ($200.00) cannot exceed total fee ($175.00)."
        );
    }

    #[test]
    fn test_copay_equal_to_fee_passes() {
        let errors = CopayValidator.validate(&with_fee_and_copay(dec!(175.00), dec!(175.00)));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_procedure_code_allowed() {
        let validator = ProcedureCodeValidator::default();
        assert!(validator.validate(&payload()).is_empty());
    }

    #[test]
    fn test_procedure_code_rejected_lists_allowed_codes() {
        let validator = ProcedureCodeValidator::default();
        let bad = payload().to_builder().cpt_code("99999").build().unwrap();
        let errors = validator.validate(&bad);

        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("99999"));
        assert!(errors[0].contains("allowed"));
        assert!(errors[0].ends_with(
            "Allowed codes: 90785, 90791, 90792, 90832, 90834, 90837, 90839, 90840, 90846, 90847, 90853"
        ));
    }

    #[test]
    fn test_procedure_code_uses_injected_table() {
        let tables = Arc::new(CodeTables::empty().with_procedure_codes([("99999", "Test code")]));
        let validator = ProcedureCodeValidator::new(tables);

        let custom = payload().to_builder().cpt_code("99999").build().unwrap();
        assert!(validator.validate(&custom).is_empty());
        assert_eq!(validator.validate(&payload()).len(), 1);
    }

    #[test_case("F33.1" ; "with decimal point")]
    #[test_case("F331" ; "without decimal point")]
    #[test_case("Z63.0" ; "z code")]
    #[test_case("F32" ; "category only")]
    #[test_case("F3.1" ; "decimal in category")]
    fn test_diagnosis_code_valid(code: &str) {
        assert!(DiagnosisCodeValidator.validate(&with_icd10(code)).is_empty());
    }

    #[test_case("", "ICD-10 code is required." ; "empty")]
    #[test_case("F3", "ICD-10 code 'F3' is too short (minimum 3 characters)." ; "too short")]
    #[test_case("123", "ICD-10 code '123' must start with a letter." ; "starts with digit")]
    #[test_case("12", "ICD-10 code '12' is too short (minimum 3 characters)." ; "length wins over letter")]
    #[test_case("FAB", "ICD-10 code 'FAB' has invalid format." ; "letters in category")]
    #[test_case("F..1", "ICD-10 code 'F..1' has invalid format." ; "only decimal points")]
    fn test_diagnosis_code_invalid(code: &str, expected: &str) {
        let errors = DiagnosisCodeValidator.validate(&with_icd10(code));
        assert_eq!(errors, vec![expected.to_string()]);
    }

    #[test]
    fn test_service_date_boundaries() {
        let validator = ServiceDateValidator::new(Arc::new(FixedClock(today())));
        let on = |date: NaiveDate| payload().to_builder().session_date(date).build().unwrap();

        assert!(validator.validate(&on(today())).is_empty());
        assert!(validator.validate(&on(today() - Duration::days(1))).is_empty());
        assert!(validator
            .validate(&on(today() - Duration::days(3650)))
            .is_empty());

        let errors = validator.validate(&on(today() + Duration::days(1)));
        assert_eq!(
            errors,
            vec!["Session date (2025-03-15) cannot be in the future."]
        );
    }

    #[test]
    fn test_payer_validator_warn_policy_accepts_unknown() {
        let validator = PayerIdValidator::new(Arc::new(CodeTables::default()), PayerPolicy::Warn);
        let unknown = payload().to_builder().payer_id("ACME").build().unwrap();
        assert!(validator.validate(&unknown).is_empty());
    }

    #[test]
    fn test_payer_validator_block_policy() {
        let validator = PayerIdValidator::new(Arc::new(CodeTables::default()), PayerPolicy::Block);
        assert!(validator.validate(&payload()).is_empty());

        let unknown = payload().to_builder().payer_id("acme").build().unwrap();
        assert_eq!(
            validator.validate(&unknown),
            vec!["Payer ID 'ACME' is not a recognized payer."]
        );
    }
}
