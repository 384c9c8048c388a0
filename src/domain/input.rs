//! Request input parsing
//!
//! The pipeline assumes well-typed input. This module is the layer in front
//! of it: it takes the raw request body, checks presence, lengths and
//! decimal precision of every field, and either yields a normalised
//! [`SessionPayload`] or the full list of field errors. Field errors map to
//! an HTTP 400, before any business rule runs.

use super::claim::ClaimStatus;
use super::payload::{normalize_code, SessionPayload};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Maximum length of practice, therapist and patient identifiers
pub const MAX_ID_LENGTH: usize = 100;
/// Maximum length of procedure and diagnosis codes
pub const MAX_CODE_LENGTH: usize = 10;
/// Maximum length of the payer identifier
pub const MAX_PAYER_LENGTH: usize = 20;
/// Maximum number of digits in a monetary amount
pub const MAX_AMOUNT_DIGITS: u32 = 10;
/// Number of fractional digits in a monetary amount
pub const AMOUNT_DECIMAL_PLACES: u32 = 2;

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";
const NOT_A_STRING: &str = "Not a valid string.";
const BAD_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

/// One rejected input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field errors found in one request body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputErrors {
    errors: Vec<FieldError>,
}

impl InputErrors {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Single error not tied to one field (e.g. the body is not JSON)
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push("non_field_errors", message);
        errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Flattened `"<field>: <message>"` strings
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Response body for a rejected request
    pub fn to_response(&self) -> InvalidInputResponse {
        InvalidInputResponse {
            status: ClaimStatus::Invalid,
            validation_errors: self.messages(),
        }
    }

    pub fn http_status(&self) -> u16 {
        400
    }
}

impl fmt::Display for InputErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for InputErrors {}

/// Body returned alongside a 400
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidInputResponse {
    pub status: ClaimStatus,
    pub validation_errors: Vec<String>,
}

/// Raw request body for claim preparation
///
/// Every field is an untyped JSON value here so that missing or mistyped
/// values are reported as field errors instead of failing deserialization as
/// a whole. Text fields accept strings or numbers; amounts accept JSON
/// strings or numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionInput {
    #[serde(default)]
    pub practice_id: Option<Value>,
    #[serde(default)]
    pub therapist_id: Option<Value>,
    #[serde(default)]
    pub patient_id: Option<Value>,
    #[serde(default)]
    pub session_date: Option<Value>,
    #[serde(default)]
    pub cpt_code: Option<Value>,
    #[serde(default)]
    pub icd10_code: Option<Value>,
    #[serde(default)]
    pub fee: Option<Value>,
    #[serde(default)]
    pub copay_collected: Option<Value>,
    #[serde(default)]
    pub payer_id: Option<Value>,
}

impl SessionInput {
    /// Parses a JSON request body
    pub fn from_json(body: &str) -> Result<Self, InputErrors> {
        serde_json::from_str(body)
            .map_err(|e| InputErrors::non_field(format!("Invalid JSON body: {e}")))
    }

    /// Validates every field and converts the input into a [`SessionPayload`]
    ///
    /// # Errors
    ///
    /// Returns every field error found, in field declaration order.
    pub fn into_payload(self) -> Result<SessionPayload, InputErrors> {
        let mut errors = InputErrors::default();

        let practice_id = text_field(&mut errors, "practice_id", self.practice_id, MAX_ID_LENGTH);
        let therapist_id =
            text_field(&mut errors, "therapist_id", self.therapist_id, MAX_ID_LENGTH);
        let patient_id = text_field(&mut errors, "patient_id", self.patient_id, MAX_ID_LENGTH);
        let session_date = date_field(&mut errors, "session_date", self.session_date);
        let cpt_code = text_field(&mut errors, "cpt_code", self.cpt_code, MAX_CODE_LENGTH);
        let icd10_code = text_field(&mut errors, "icd10_code", self.icd10_code, MAX_CODE_LENGTH);
        let fee = match self.fee {
            None | Some(Value::Null) => {
                errors.push("fee", REQUIRED);
                None
            }
            Some(raw) => amount_field(&mut errors, "fee", &raw),
        };
        let copay_collected = match self.copay_collected {
            None | Some(Value::Null) => Some(Decimal::new(0, AMOUNT_DECIMAL_PLACES)),
            Some(raw) => amount_field(&mut errors, "copay_collected", &raw),
        };
        let payer_id = text_field(&mut errors, "payer_id", self.payer_id, MAX_PAYER_LENGTH);

        if !errors.is_empty() {
            return Err(errors);
        }

        match (
            practice_id,
            therapist_id,
            patient_id,
            session_date,
            cpt_code,
            icd10_code,
            fee,
            copay_collected,
            payer_id,
        ) {
            (
                Some(practice_id),
                Some(therapist_id),
                Some(patient_id),
                Some(session_date),
                Some(cpt_code),
                Some(icd10_code),
                Some(fee),
                Some(copay_collected),
                Some(payer_id),
            ) => SessionPayload::builder()
                .practice_id(practice_id)
                .therapist_id(therapist_id)
                .patient_id(patient_id)
                .session_date(session_date)
                .cpt_code(normalize_code(&cpt_code))
                .icd10_code(normalize_code(&icd10_code))
                .fee(fee)
                .copay_collected(copay_collected)
                .payer_id(normalize_code(&payer_id))
                .build()
                .map_err(InputErrors::non_field),
            _ => Err(InputErrors::non_field("Incomplete session input")),
        }
    }
}

fn text_field(
    errors: &mut InputErrors,
    field: &str,
    value: Option<Value>,
    max_length: usize,
) -> Option<String> {
    let text = match value {
        None | Some(Value::Null) => {
            errors.push(field, REQUIRED);
            return None;
        }
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            errors.push(field, NOT_A_STRING);
            return None;
        }
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        errors.push(field, BLANK);
        return None;
    }
    if trimmed.chars().count() > max_length {
        errors.push(
            field,
            format!("Ensure this field has no more than {max_length} characters."),
        );
        return None;
    }

    Some(trimmed.to_string())
}

fn date_field(errors: &mut InputErrors, field: &str, value: Option<Value>) -> Option<NaiveDate> {
    let text = match value {
        None | Some(Value::Null) => {
            errors.push(field, REQUIRED);
            return None;
        }
        Some(Value::String(s)) => s,
        Some(_) => {
            errors.push(field, BAD_DATE);
            return None;
        }
    };

    match NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, BAD_DATE);
            None
        }
    }
}

fn amount_field(errors: &mut InputErrors, field: &str, raw: &Value) -> Option<Decimal> {
    let parsed = match raw {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        // Re-parses serde_json's shortest round-trip text of the number
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        _ => None,
    };

    let Some(amount) = parsed else {
        errors.push(field, "A valid number is required.");
        return None;
    };

    if amount.scale() > AMOUNT_DECIMAL_PLACES {
        errors.push(
            field,
            format!("Ensure that there are no more than {AMOUNT_DECIMAL_PLACES} decimal places."),
        );
        return None;
    }

    let whole_digits = count_digits(amount.trunc().abs());
    if whole_digits + AMOUNT_DECIMAL_PLACES > MAX_AMOUNT_DIGITS {
        errors.push(
            field,
            format!("Ensure that there are no more than {MAX_AMOUNT_DIGITS} digits in total."),
        );
        return None;
    }

    let mut amount = amount;
    amount.rescale(AMOUNT_DECIMAL_PLACES);
    Some(amount)
}

fn count_digits(whole: Decimal) -> u32 {
    let digits = whole.normalize().to_string();
    if digits == "0" {
        0
    } else {
        digits.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "practice_id": "practice_123",
            "therapist_id": "therapist_456",
            "patient_id": "patient_789",
            "session_date": "2025-03-14",
            "cpt_code": "90837",
            "icd10_code": "f33.1",
            "fee": "175.00",
            "copay_collected": "25.00",
            "payer_id": " bcbsma "
        })
    }

    fn parse(body: Value) -> Result<SessionPayload, InputErrors> {
        SessionInput::from_json(&body.to_string())?.into_payload()
    }

    #[test]
    fn test_valid_input_becomes_normalized_payload() {
        let payload = parse(valid_body()).unwrap();
        assert_eq!(payload.icd10_code(), "F33.1");
        assert_eq!(payload.payer_id(), "BCBSMA");
        assert_eq!(payload.fee(), dec!(175.00));
        assert_eq!(
            payload.session_date(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
    }

    #[test]
    fn test_numeric_amounts_are_rescaled() {
        let mut body = valid_body();
        body["fee"] = json!(175);
        body["copay_collected"] = json!(12.5);
        let payload = parse(body).unwrap();
        assert_eq!(payload.fee().to_string(), "175.00");
        assert_eq!(payload.copay_collected().to_string(), "12.50");
    }

    #[test]
    fn test_copay_defaults_to_zero() {
        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("copay_collected");
        let payload = parse(body).unwrap();
        assert_eq!(payload.copay_collected().to_string(), "0.00");
    }

    #[test]
    fn test_missing_fields_are_all_reported_in_order() {
        let errors = parse(json!({"practice_id": "practice_123"})).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                "therapist_id: This field is required.",
                "patient_id: This field is required.",
                "session_date: This field is required.",
                "cpt_code: This field is required.",
                "icd10_code: This field is required.",
                "fee: This field is required.",
                "payer_id: This field is required.",
            ]
        );
        assert_eq!(errors.http_status(), 400);
    }

    #[test]
    fn test_bad_date_and_precision() {
        let mut body = valid_body();
        body["session_date"] = json!("03/14/2025");
        body["fee"] = json!("175.005");
        body["copay_collected"] = json!("abc");
        let errors = parse(body).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.messages()[0].starts_with("session_date: Date has wrong format"));
        assert_eq!(
            errors.messages()[1],
            "fee: Ensure that there are no more than 2 decimal places."
        );
        assert_eq!(
            errors.messages()[2],
            "copay_collected: A valid number is required."
        );
    }

    #[test]
    fn test_too_many_digits() {
        let mut body = valid_body();
        body["fee"] = json!("123456789.00");
        let errors = parse(body).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec!["fee: Ensure that there are no more than 10 digits in total."]
        );
    }

    #[test]
    fn test_blank_and_overlong_codes() {
        let mut body = valid_body();
        body["cpt_code"] = json!("   ");
        body["payer_id"] = json!("X".repeat(21));
        let errors = parse(body).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                "cpt_code: This field may not be blank.",
                "payer_id: Ensure this field has no more than 20 characters.",
            ]
        );
    }

    #[test]
    fn test_numeric_text_fields_are_coerced() {
        let mut body = valid_body();
        body["practice_id"] = json!(123);
        body["cpt_code"] = json!(90837);
        let payload = parse(body).unwrap();
        assert_eq!(payload.practice_id().as_str(), "123");
        assert_eq!(payload.cpt_code(), "90837");
    }

    #[test]
    fn test_mistyped_fields_are_reported_per_field() {
        let mut body = valid_body();
        body["practice_id"] = json!(123);
        body["therapist_id"] = json!(true);
        body["session_date"] = json!(20250314);
        body["icd10_code"] = json!(["F33.1"]);
        let errors = parse(body).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                "therapist_id: Not a valid string.",
                "session_date: Date has wrong format. Use one of these formats instead: YYYY-MM-DD.",
                "icd10_code: Not a valid string.",
            ]
        );
    }

    #[test]
    fn test_null_text_field_is_required() {
        let mut body = valid_body();
        body["patient_id"] = Value::Null;
        let errors = parse(body).unwrap_err();
        assert_eq!(errors.messages(), vec!["patient_id: This field is required."]);
    }

    #[test]
    fn test_invalid_json_body() {
        let errors = SessionInput::from_json("{ not json").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.messages()[0].starts_with("non_field_errors: Invalid JSON body"));
    }

    #[test]
    fn test_error_response_shape() {
        let errors = parse(json!({})).unwrap_err();
        let response = serde_json::to_value(errors.to_response()).unwrap();
        assert_eq!(response["status"], json!("INVALID"));
        assert_eq!(
            response["validation_errors"].as_array().unwrap().len(),
            errors.len()
        );
    }
}
