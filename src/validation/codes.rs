//! Reference code tables
//!
//! The procedure-code allow-list and the payer directory are process-wide,
//! read-only data. They are built once at startup (built-ins merged with any
//! configured additions) and shared as `Arc<CodeTables>` with the validators
//! that need them.

use std::collections::BTreeMap;

/// Recognised psychotherapy CPT codes and their descriptions
pub const BUILTIN_PROCEDURE_CODES: &[(&str, &str)] = &[
    // Psychotherapy
    ("90832", "Psychotherapy, 30 min"),
    ("90834", "Psychotherapy, 45 min"),
    ("90837", "Psychotherapy, 60 min"),
    ("90839", "Psychotherapy for crisis, first 60 min"),
    ("90840", "Psychotherapy for crisis, each additional 30 min"),
    // Evaluation
    ("90791", "Psychiatric diagnostic evaluation"),
    ("90792", "Psychiatric diagnostic evaluation with medical services"),
    // Group
    ("90853", "Group psychotherapy"),
    // Family
    ("90846", "Family psychotherapy without patient"),
    ("90847", "Family psychotherapy with patient"),
    // Add-on
    ("90785", "Interactive complexity add-on"),
];

/// Payer directory (subset of clearinghouse payer ids)
pub const BUILTIN_PAYERS: &[(&str, &str)] = &[
    ("BCBSMA", "Blue Cross Blue Shield Massachusetts"),
    ("BCBSCA", "Blue Cross Blue Shield California"),
    ("AETNA", "Aetna"),
    ("CIGNA", "Cigna"),
    ("UHC", "United Healthcare"),
    ("HUMANA", "Humana"),
    ("ANTHEM", "Anthem"),
    ("KAISER", "Kaiser Permanente"),
    ("MEDICAID", "Medicaid"),
    ("MEDICARE", "Medicare"),
];

/// Procedure-code allow-list and payer directory
///
/// # Examples
///
/// ```
/// use clara::validation::CodeTables;
///
/// let tables = CodeTables::default();
/// assert!(tables.is_allowed_procedure("90837"));
/// assert_eq!(tables.payer_name("UHC"), Some("United Healthcare"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTables {
    procedure_codes: BTreeMap<String, String>,
    payers: BTreeMap<String, String>,
}

impl Default for CodeTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CodeTables {
    /// Tables containing only the built-in entries
    pub fn builtin() -> Self {
        Self {
            procedure_codes: to_table(BUILTIN_PROCEDURE_CODES.iter().copied()),
            payers: to_table(BUILTIN_PAYERS.iter().copied()),
        }
    }

    /// Empty tables. Every procedure code is rejected and every payer is unknown.
    pub fn empty() -> Self {
        Self {
            procedure_codes: BTreeMap::new(),
            payers: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) procedure codes. Keys are normalised to uppercase.
    pub fn with_procedure_codes<I, K, V>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (code, description) in codes {
            self.procedure_codes
                .insert(code.as_ref().trim().to_uppercase(), description.into());
        }
        self
    }

    /// Adds (or replaces) payers. Keys are normalised to uppercase.
    pub fn with_payers<I, K, V>(mut self, payers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (payer_id, name) in payers {
            self.payers
                .insert(payer_id.as_ref().trim().to_uppercase(), name.into());
        }
        self
    }

    pub fn is_allowed_procedure(&self, code: &str) -> bool {
        self.procedure_codes.contains_key(code)
    }

    pub fn procedure_description(&self, code: &str) -> Option<&str> {
        self.procedure_codes.get(code).map(String::as_str)
    }

    /// Allowed procedure codes in ascending order
    pub fn allowed_procedure_codes(&self) -> Vec<&str> {
        self.procedure_codes.keys().map(String::as_str).collect()
    }

    pub fn procedure_codes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.procedure_codes
            .iter()
            .map(|(code, description)| (code.as_str(), description.as_str()))
    }

    pub fn is_known_payer(&self, payer_id: &str) -> bool {
        self.payers.contains_key(&payer_id.to_uppercase())
    }

    pub fn payer_name(&self, payer_id: &str) -> Option<&str> {
        self.payers.get(&payer_id.to_uppercase()).map(String::as_str)
    }

    pub fn payers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.payers
            .iter()
            .map(|(payer_id, name)| (payer_id.as_str(), name.as_str()))
    }
}

fn to_table<'a>(entries: impl Iterator<Item = (&'a str, &'a str)>) -> BTreeMap<String, String> {
    entries
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
