//! Claim preparation
//!
//! Turns a [`SessionPayload`] into a [`PreparedClaim`]: run the validator
//! chain, assign a claim ID, enrich and assemble. Business-rule violations
//! end up in the claim, not in the `Result`.

use super::claim_id::{ClaimIdGenerator, UuidClaimIdGenerator};
use super::clock::{Clock, SystemClock};
use super::enrichment::{ClaimEnricher, MockEnricher, NoEnrichment};
use crate::config::{ClaraConfig, EnrichmentMode};
use crate::domain::{ClaimEnrichment, ClaimFields, PreparedClaim, Result, SessionPayload};
use crate::validation::{CodeTables, PayerIdValidator, PayerPolicy, ValidatorChain};
use std::fmt;
use std::sync::Arc;

/// What to do when the enricher fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrichmentPolicy {
    /// Log a warning and leave the enrichment fields empty
    #[default]
    BestEffort,
    /// Fail preparation with [`crate::domain::ClaraError::Enrichment`]
    Required,
}

/// Stateless claim preparation service
///
/// Holds only read-only collaborators, so one instance can be shared across
/// threads and reused for any number of payloads.
///
/// # Examples
///
/// ```
/// use clara::core::preparation::ClaimPreparationService;
/// use clara::domain::{ClaimStatus, SessionPayload};
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let service = ClaimPreparationService::default();
/// let payload = SessionPayload::builder()
///     .practice_id("practice_123")
///     .therapist_id("therapist_456")
///     .patient_id("patient_789")
///     .session_date(NaiveDate::from_ymd_opt(2025, 3, 14).unwrap())
///     .cpt_code("90837")
///     .icd10_code("F33.1")
///     .fee(dec!(175.00))
///     .copay_collected(dec!(25.00))
///     .payer_id("BCBSMA")
///     .build()
///     .unwrap();
///
/// let claim = service.prepare_claim(&payload).unwrap();
/// assert_eq!(claim.status(), ClaimStatus::ReadyForSubmission);
/// assert!(claim.claim_id().as_str().starts_with("CLM-"));
/// ```
pub struct ClaimPreparationService {
    chain: ValidatorChain,
    id_generator: Arc<dyn ClaimIdGenerator>,
    enricher: Arc<dyn ClaimEnricher>,
    enrichment_policy: EnrichmentPolicy,
    tables: Arc<CodeTables>,
    payer_policy: PayerPolicy,
}

impl ClaimPreparationService {
    /// Service with the given chain, random claim IDs and mock enrichment
    pub fn new(chain: ValidatorChain) -> Self {
        Self {
            chain,
            id_generator: Arc::new(UuidClaimIdGenerator),
            enricher: Arc::new(MockEnricher::default()),
            enrichment_policy: EnrichmentPolicy::default(),
            tables: Arc::new(CodeTables::default()),
            payer_policy: PayerPolicy::default(),
        }
    }

    /// Builds the service described by a configuration
    pub fn from_config(config: &ClaraConfig, clock: Arc<dyn Clock>) -> Self {
        let tables = Arc::new(config.code_tables());
        let mut chain = ValidatorChain::with_defaults(tables.clone(), clock);

        let payer_policy = if config.validation.enforce_known_payers {
            chain.add_validator(PayerIdValidator::new(tables.clone(), PayerPolicy::Block));
            PayerPolicy::Block
        } else {
            PayerPolicy::Warn
        };

        let enricher: Arc<dyn ClaimEnricher> = match config.enrichment.mode {
            EnrichmentMode::Mock => Arc::new(MockEnricher::new(
                config.enrichment.provider_npi.clone(),
                config.enrichment.practice_npi.clone(),
                config.enrichment.practice_tax_id.clone(),
            )),
            EnrichmentMode::None => Arc::new(NoEnrichment),
        };

        let enrichment_policy = if config.enrichment.strict {
            EnrichmentPolicy::Required
        } else {
            EnrichmentPolicy::BestEffort
        };

        Self {
            chain,
            id_generator: Arc::new(UuidClaimIdGenerator),
            enricher,
            enrichment_policy,
            tables,
            payer_policy,
        }
    }

    pub fn with_id_generator(mut self, generator: Arc<dyn ClaimIdGenerator>) -> Self {
        self.id_generator = generator;
        self
    }

    pub fn with_enricher(mut self, enricher: Arc<dyn ClaimEnricher>) -> Self {
        self.enricher = enricher;
        self
    }

    pub fn with_enrichment_policy(mut self, policy: EnrichmentPolicy) -> Self {
        self.enrichment_policy = policy;
        self
    }

    /// Payer directory used for unknown-payer warnings.
    ///
    /// Only affects logging. To reject unknown payers add a
    /// [`PayerIdValidator`] with [`PayerPolicy::Block`] to the chain.
    pub fn with_payer_directory(mut self, tables: Arc<CodeTables>, policy: PayerPolicy) -> Self {
        self.tables = tables;
        self.payer_policy = policy;
        self
    }

    pub fn chain(&self) -> &ValidatorChain {
        &self.chain
    }

    /// Validates, identifies, enriches and assembles a claim
    ///
    /// Always returns a claim for a well-formed payload, valid or not.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ClaraError::Enrichment`] only when the
    /// enrichment policy is [`EnrichmentPolicy::Required`] and the
    /// enricher fails.
    pub fn prepare_claim(&self, payload: &SessionPayload) -> Result<PreparedClaim> {
        tracing::debug!(
            practice_id = %payload.practice_id(),
            patient_id = %payload.patient_id(),
            cpt_code = payload.cpt_code(),
            "Preparing claim"
        );

        let validation_errors = self.chain.validate(payload);
        let claim_id = self.id_generator.generate();

        if self.payer_policy == PayerPolicy::Warn && !self.tables.is_known_payer(payload.payer_id())
        {
            tracing::warn!(
                claim_id = %claim_id,
                payer_id = payload.payer_id(),
                "Unrecognized payer"
            );
        }

        let enrichment = match self.enricher.enrich(payload) {
            Ok(enrichment) => enrichment,
            Err(e) if self.enrichment_policy == EnrichmentPolicy::BestEffort => {
                tracing::warn!(
                    claim_id = %claim_id,
                    error = %e,
                    "Enrichment failed, continuing without it"
                );
                ClaimEnrichment::default()
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Required enrichment failed");
                return Err(e.into());
            }
        };

        let fields = ClaimFields {
            claim_id,
            patient_id: payload.patient_id().to_string(),
            provider_id: payload.therapist_id().to_string(),
            practice_id: payload.practice_id().to_string(),
            payer_id: payload.payer_id().to_string(),
            service_date: payload.session_date().format("%Y-%m-%d").to_string(),
            cpt_code: payload.cpt_code().to_string(),
            icd10_code: payload.icd10_code().to_string(),
            charge_amount: payload.fee(),
            copay_amount: payload.copay_collected(),
        };

        let claim = PreparedClaim::assemble(fields, validation_errors, enrichment);
        crate::log_claim_prepared!(&claim);
        Ok(claim)
    }
}

impl Default for ClaimPreparationService {
    fn default() -> Self {
        Self::from_config(&ClaraConfig::default(), Arc::new(SystemClock))
    }
}

impl fmt::Debug for ClaimPreparationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimPreparationService")
            .field("chain", &self.chain)
            .field("enrichment_policy", &self.enrichment_policy)
            .field("payer_policy", &self.payer_policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::claim_id::SequentialClaimIdGenerator;
    use crate::core::clock::FixedClock;
    use crate::domain::{ClaimStatus, ClaraError, EnrichmentError};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    /// Collects formatted log lines written by a scoped subscriber
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn warnings_while_preparing(
        service: &ClaimPreparationService,
        payload: &SessionPayload,
    ) -> (PreparedClaim, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let claim = tracing::subscriber::with_default(subscriber, || {
            service.prepare_claim(payload).unwrap()
        });
        (claim, logs.contents())
    }

    struct FailingEnricher;

    impl ClaimEnricher for FailingEnricher {
        fn enrich(
            &self,
            payload: &SessionPayload,
        ) -> std::result::Result<ClaimEnrichment, EnrichmentError> {
            Err(EnrichmentError::not_found(
                "Patient",
                payload.patient_id().as_str(),
            ))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn service() -> ClaimPreparationService {
        ClaimPreparationService::from_config(
            &ClaraConfig::default(),
            Arc::new(FixedClock(today())),
        )
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

    #[test]
    fn test_valid_payload_is_ready() {
        let claim = service().prepare_claim(&payload()).unwrap();

        assert_eq!(claim.status(), ClaimStatus::ReadyForSubmission);
        assert!(claim.validation_errors().is_empty());
        assert_eq!(claim.patient_id(), "patient_789");
        assert_eq!(claim.provider_id(), "therapist_456");
        assert_eq!(claim.practice_id(), "practice_123");
        assert_eq!(claim.payer_id(), "BCBSMA");
        assert_eq!(claim.service_date(), "2025-03-14");
        assert_eq!(claim.cpt_code(), "90837");
        assert_eq!(claim.icd10_code(), "F33.1");
        assert_eq!(claim.charge_amount(), dec!(175.00));
        assert_eq!(claim.copay_amount(), dec!(25.00));
        assert_eq!(
            claim.enrichment().patient_name.as_deref(),
            Some("Patient patient_789")
        );
    }

    #[test]
    fn test_unknown_cpt_code_is_invalid() {
        let bad = payload().to_builder().cpt_code("99999").build().unwrap();
        let claim = service().prepare_claim(&bad).unwrap();

        assert_eq!(claim.status(), ClaimStatus::Invalid);
        assert_eq!(claim.validation_errors().len(), 1);
        assert!(claim.validation_errors()[0].contains("99999"));
        assert!(claim.validation_errors()[0].contains("Allowed codes: 90785"));
    }

    #[test]
    fn test_status_follows_errors() {
        let service = service();
        let cases = [
            payload(),
            payload().to_builder().fee(dec!(0.00)).build().unwrap(),
            payload().to_builder().icd10_code("33.1").build().unwrap(),
            payload().to_builder().copay_collected(dec!(-5)).build().unwrap(),
        ];

        for case in &cases {
            let claim = service.prepare_claim(case).unwrap();
            assert_eq!(
                claim.status() == ClaimStatus::ReadyForSubmission,
                claim.validation_errors().is_empty()
            );
            assert!(matches!(
                claim.status(),
                ClaimStatus::ReadyForSubmission | ClaimStatus::Invalid
            ));
        }
    }

    #[test]
    fn test_repeated_calls_differ_only_in_claim_id() {
        let service = service();
        let first = service.prepare_claim(&payload()).unwrap();
        let second = service.prepare_claim(&payload()).unwrap();

        assert_ne!(first.claim_id(), second.claim_id());
        assert_eq!(first.status(), second.status());
        assert_eq!(first.validation_errors(), second.validation_errors());
        assert_eq!(first.charge_amount(), second.charge_amount());
        assert_eq!(first.enrichment(), second.enrichment());
    }

    #[test]
    fn test_injected_id_generator() {
        let service =
            service().with_id_generator(Arc::new(SequentialClaimIdGenerator::default()));
        let claim = service.prepare_claim(&payload()).unwrap();
        assert_eq!(claim.claim_id().as_str(), "CLM-00000001");
    }

    #[test]
    fn test_best_effort_enrichment_failure_leaves_fields_empty() {
        let service = service().with_enricher(Arc::new(FailingEnricher));
        let claim = service.prepare_claim(&payload()).unwrap();

        assert_eq!(claim.status(), ClaimStatus::ReadyForSubmission);
        assert_eq!(claim.enrichment(), &ClaimEnrichment::default());
    }

    #[test]
    fn test_required_enrichment_failure_is_an_error() {
        let service = service()
            .with_enricher(Arc::new(FailingEnricher))
            .with_enrichment_policy(EnrichmentPolicy::Required);
        let err = service.prepare_claim(&payload()).unwrap_err();

        assert!(matches!(err, ClaraError::Enrichment(_)));
        assert!(err.to_string().contains("Patient not found: patient_789"));
    }

    #[test]
    fn test_enrichment_does_not_affect_validation() {
        let bad = payload().to_builder().fee(dec!(0.00)).build().unwrap();
        let with_mock = service().prepare_claim(&bad).unwrap();
        let without = service()
            .with_enricher(Arc::new(NoEnrichment))
            .prepare_claim(&bad)
            .unwrap();

        assert_eq!(with_mock.status(), without.status());
        assert_eq!(with_mock.validation_errors(), without.validation_errors());
    }

    #[test]
    fn test_unknown_payer_only_warns_by_default() {
        let unknown = payload().to_builder().payer_id("ACME").build().unwrap();
        let (claim, logs) = warnings_while_preparing(&service(), &unknown);

        assert_eq!(claim.status(), ClaimStatus::ReadyForSubmission);
        assert!(logs.contains("Unrecognized payer"), "logs: {logs}");
        assert!(logs.contains("ACME"));
        assert!(logs.contains(claim.claim_id().as_str()));
    }

    #[test]
    fn test_known_payer_is_not_warned_about() {
        let (_, logs) = warnings_while_preparing(&service(), &payload());
        assert!(!logs.contains("Unrecognized payer"), "logs: {logs}");
    }

    #[test]
    fn test_blocked_payer_is_an_error_not_a_warning() {
        let mut config = ClaraConfig::default();
        config.validation.enforce_known_payers = true;
        let service = ClaimPreparationService::from_config(&config, Arc::new(FixedClock(today())));

        let unknown = payload().to_builder().payer_id("ACME").build().unwrap();
        let (claim, logs) = warnings_while_preparing(&service, &unknown);

        assert_eq!(claim.status(), ClaimStatus::Invalid);
        assert!(!logs.contains("Unrecognized payer"), "logs: {logs}");
    }

    #[test]
    fn test_enforced_payers_reject_unknown() {
        let mut config = ClaraConfig::default();
        config.validation.enforce_known_payers = true;
        let service = ClaimPreparationService::from_config(&config, Arc::new(FixedClock(today())));

        let unknown = payload().to_builder().payer_id("ACME").build().unwrap();
        let claim = service.prepare_claim(&unknown).unwrap();
        assert_eq!(claim.status(), ClaimStatus::Invalid);
        assert_eq!(
            claim.validation_errors(),
            ["Payer ID 'ACME' is not a recognized payer.".to_string()]
        );
        assert_eq!(service.chain().names().last(), Some(&"payer_id"));
    }

    #[test]
    fn test_enrichment_mode_none() {
        let mut config = ClaraConfig::default();
        config.enrichment.mode = EnrichmentMode::None;
        let service = ClaimPreparationService::from_config(&config, Arc::new(FixedClock(today())));

        let claim = service.prepare_claim(&payload()).unwrap();
        assert_eq!(claim.enrichment(), &ClaimEnrichment::default());
    }

    #[test]
    fn test_service_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClaimPreparationService>();

        let service = Arc::new(service());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = Arc::clone(&service);
                std::thread::spawn(move || service.prepare_claim(&payload()).unwrap())
            })
            .collect();

        for handle in handles {
            let claim = handle.join().unwrap();
            assert_eq!(claim.status(), ClaimStatus::ReadyForSubmission);
        }
    }
}
