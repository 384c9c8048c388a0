//! Claim enrichment
//!
//! Enrichment attaches display and billing identity (patient name, NPIs,
//! tax id) to a prepared claim. It runs after validation and never changes
//! the claim's status or validation errors.

use crate::domain::{ClaimEnrichment, EnrichmentError, SessionPayload};
use std::collections::HashMap;

/// Looks up identity details for the entities a payload references
pub trait ClaimEnricher: Send + Sync {
    fn enrich(&self, payload: &SessionPayload) -> Result<ClaimEnrichment, EnrichmentError>;
}

/// Leaves every enrichment field empty
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl ClaimEnricher for NoEnrichment {
    fn enrich(&self, _payload: &SessionPayload) -> Result<ClaimEnrichment, EnrichmentError> {
        Ok(ClaimEnrichment::default())
    }
}

/// Placeholder identity values for development and demos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockEnricher {
    pub provider_npi: String,
    pub practice_npi: String,
    pub practice_tax_id: String,
}

impl MockEnricher {
    pub fn new(
        provider_npi: impl Into<String>,
        practice_npi: impl Into<String>,
        practice_tax_id: impl Into<String>,
    ) -> Self {
        Self {
            provider_npi: provider_npi.into(),
            practice_npi: practice_npi.into(),
            practice_tax_id: practice_tax_id.into(),
        }
    }
}

impl Default for MockEnricher {
    fn default() -> Self {
        Self::new("1234567890", "0987654321", "XX-XXXXXXX")
    }
}

impl ClaimEnricher for MockEnricher {
    fn enrich(&self, payload: &SessionPayload) -> Result<ClaimEnrichment, EnrichmentError> {
        Ok(ClaimEnrichment {
            patient_name: Some(format!("Patient {}", payload.patient_id())),
            provider_npi: Some(self.provider_npi.clone()),
            practice_npi: Some(self.practice_npi.clone()),
            practice_tax_id: Some(self.practice_tax_id.clone()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeRecord {
    pub name: String,
    pub npi: String,
    pub tax_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TherapistRecord {
    pub practice_id: String,
    pub first_name: String,
    pub last_name: String,
    pub npi: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    pub practice_id: String,
    pub first_name: String,
    pub last_name: String,
}

/// In-memory directory of practices, therapists and patients
///
/// Therapists and patients are tenant-scoped: a record registered under a
/// different practice is treated as missing.
#[derive(Debug, Clone, Default)]
pub struct DirectoryEnricher {
    practices: HashMap<String, PracticeRecord>,
    therapists: HashMap<String, TherapistRecord>,
    patients: HashMap<String, PatientRecord>,
}

impl DirectoryEnricher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_practice(mut self, id: impl Into<String>, record: PracticeRecord) -> Self {
        self.practices.insert(id.into(), record);
        self
    }

    pub fn with_therapist(mut self, id: impl Into<String>, record: TherapistRecord) -> Self {
        self.therapists.insert(id.into(), record);
        self
    }

    pub fn with_patient(mut self, id: impl Into<String>, record: PatientRecord) -> Self {
        self.patients.insert(id.into(), record);
        self
    }
}

impl ClaimEnricher for DirectoryEnricher {
    fn enrich(&self, payload: &SessionPayload) -> Result<ClaimEnrichment, EnrichmentError> {
        let practice_id = payload.practice_id().as_str();

        let practice = self
            .practices
            .get(practice_id)
            .ok_or_else(|| EnrichmentError::not_found("Practice", practice_id))?;

        let therapist_id = payload.therapist_id().as_str();
        let therapist = self
            .therapists
            .get(therapist_id)
            .filter(|t| t.practice_id == practice_id)
            .ok_or_else(|| EnrichmentError::not_found("Therapist", therapist_id))?;

        let patient_id = payload.patient_id().as_str();
        let patient = self
            .patients
            .get(patient_id)
            .filter(|p| p.practice_id == practice_id)
            .ok_or_else(|| EnrichmentError::not_found("Patient", patient_id))?;

        Ok(ClaimEnrichment {
            patient_name: Some(format!("{} {}", patient.first_name, patient.last_name)),
            provider_npi: Some(therapist.npi.clone()),
            practice_npi: Some(practice.npi.clone()),
            practice_tax_id: Some(practice.tax_id.clone()),
        })
    }
}
