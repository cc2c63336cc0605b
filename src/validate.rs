use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::StudentMetricsInput;

/// Keys a prediction request must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 9] = [
    "studentName",
    "rollNumber",
    "attendance",
    "midSem1",
    "midSem2",
    "assignments",
    "quizzes",
    "labWork",
    "extracurricular",
];

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("could not convert {field} to float: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("request body must be a JSON object")]
    NotAnObject,
}

impl ValidationError {
    /// Missing keys are the caller's fault; everything else is reported as a failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ValidationError::MissingField(_))
    }
}

pub fn validate_payload(payload: &Value) -> Result<StudentMetricsInput, ValidationError> {
    let object = match payload {
        Value::Object(object) => object,
        // Key lookup on a list never matches, so the first key is reported missing.
        Value::Array(_) => return Err(ValidationError::MissingField(REQUIRED_FIELDS[0])),
        _ => return Err(ValidationError::NotAnObject),
    };

    if let Some(missing) = first_missing_field(object) {
        return Err(ValidationError::MissingField(missing));
    }

    Ok(StudentMetricsInput {
        student_name: text_field(object, "studentName"),
        roll_number: text_field(object, "rollNumber"),
        attendance: number_field(object, "attendance")?,
        mid_sem1: number_field(object, "midSem1")?,
        mid_sem2: number_field(object, "midSem2")?,
        assignments: number_field(object, "assignments")?,
        quizzes: number_field(object, "quizzes")?,
        lab_work: number_field(object, "labWork")?,
        extracurricular: number_field(object, "extracurricular")?,
    })
}

pub fn first_missing_field(object: &Map<String, Value>) -> Option<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .find(|field| !object.contains_key(*field))
}

fn text_field(object: &Map<String, Value>, field: &str) -> String {
    match object.get(field) {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn number_field(object: &Map<String, Value>, field: &'static str) -> Result<f64, ValidationError> {
    match object.get(field) {
        None => Ok(0.0),
        Some(value) => coerce_number(value).ok_or_else(|| ValidationError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
    }
}

/// Accepts numbers, booleans and numeric strings (including `nan`/`inf`).
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete_payload() -> Value {
        json!({
            "studentName": "Jules Moreno",
            "rollNumber": "HIT-042",
            "attendance": 90,
            "midSem1": 80,
            "midSem2": 70.5,
            "assignments": "85",
            "quizzes": 90,
            "labWork": 88,
            "extracurricular": 60
        })
    }

    #[test]
    fn accepts_complete_payload_and_coerces_numeric_strings() {
        let input = validate_payload(&complete_payload()).expect("valid payload");
        assert_eq!(input.student_name, "Jules Moreno");
        assert_eq!(input.roll_number, "HIT-042");
        assert_eq!(input.mid_sem2, 70.5);
        assert_eq!(input.assignments, 85.0);
    }

    #[test]
    fn reports_first_missing_field_in_declared_order() {
        let mut payload = complete_payload();
        let object = payload.as_object_mut().unwrap();
        object.remove("labWork");
        object.remove("rollNumber");

        let err = validate_payload(&payload).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("rollNumber"));
        assert_eq!(err.to_string(), "Missing required field: rollNumber");
        assert!(err.is_client_error());
    }

    #[test]
    fn non_numeric_metric_is_not_a_client_error() {
        let mut payload = complete_payload();
        payload["quizzes"] = json!("lots");

        let err = validate_payload(&payload).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidNumber { field: "quizzes", .. }
        ));
        assert!(!err.is_client_error());

        payload["quizzes"] = Value::Null;
        assert!(validate_payload(&payload).is_err());
    }

    #[test]
    fn non_string_identity_fields_are_rendered_as_json() {
        let mut payload = complete_payload();
        payload["rollNumber"] = json!(1042);

        let input = validate_payload(&payload).unwrap();
        assert_eq!(input.roll_number, "1042");
    }

    #[test]
    fn coerces_booleans_and_padded_strings() {
        assert_eq!(coerce_number(&json!(true)), Some(1.0));
        assert_eq!(coerce_number(&json!(" 72.5 ")), Some(72.5));
        assert_eq!(coerce_number(&json!("-inf")), Some(f64::NEG_INFINITY));
        assert!(coerce_number(&json!("nan")).is_some_and(f64::is_nan));
        assert_eq!(coerce_number(&json!([1])), None);
        assert_eq!(coerce_number(&json!("")), None);
    }

    #[test]
    fn rejects_scalar_body() {
        assert_eq!(
            validate_payload(&json!("hello")),
            Err(ValidationError::NotAnObject)
        );
        assert_eq!(
            validate_payload(&json!([])),
            Err(ValidationError::MissingField("studentName"))
        );
    }
}
