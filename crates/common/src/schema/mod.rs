//! Record schemas and payload validation
//!
//! Every record exposed or accepted by the API is described twice:
//! a [`FieldSpec`] table for presence and JSON type, and `validator`
//! constraints on the typed struct for lengths, ranges and formats.
//! [`parse_record`] interprets both and reports every violated field.

mod message;
mod project;
mod skill;

pub use message::Message;
pub use project::Project;
pub use skill::Skill;

use bson::{Bson, Document};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use validator::{Validate, ValidationErrors};

/// JSON shape expected for a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    TextList,
    OptionalText,
}

impl FieldKind {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text | FieldKind::OptionalText => value.is_string(),
            FieldKind::Integer => as_integer(value).is_some(),
            FieldKind::TextList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::OptionalText => "expected a string",
            FieldKind::Integer => "expected an integer",
            FieldKind::TextList => "expected a list of strings",
        }
    }

    /// Well-typed stand-in for a field that failed the shape check
    fn placeholder(&self) -> Value {
        match self {
            FieldKind::Text => Value::String(String::new()),
            FieldKind::Integer => Value::from(0),
            FieldKind::TextList => Value::Array(Vec::new()),
            FieldKind::OptionalText => Value::Null,
        }
    }
}

/// Integral value of a number. Whole floats such as `90.0` count, since
/// shell-seeded documents store numeric literals as doubles.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    let whole = f.is_finite() && f.fract() == 0.0;
    (whole && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

/// Presence and type description of one record field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: false }
    }
}

/// A record type stored in its own collection
pub trait Record: Serialize + DeserializeOwned + Validate + Send + Sync {
    /// Collection holding documents of this type
    const COLLECTION: &'static str;

    /// Field table checked before typed deserialization
    const FIELDS: &'static [FieldSpec];
}

/// A single violated constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
            params: Map::new(),
        }
    }
}

/// Every constraint a payload violated, ordered by field name
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    pub violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn new(mut violations: Vec<FieldViolation>) -> Self {
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        Self { violations }
    }

    pub fn single(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self::new(vec![FieldViolation::new(field, code, message)])
    }

    /// Names of the violated fields, deduplicated
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.violations.iter().map(|v| v.field.as_str()).collect();
        fields.dedup();
        fields
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationFailure {}

impl From<ValidationErrors> for ValidationFailure {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations = Vec::new();

        for (field, errs) in errors.field_errors() {
            for err in errs {
                let mut params: Map<String, Value> = err
                    .params
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.clone()))
                    .collect();
                // Submitted values are not echoed back
                params.remove("value");

                violations.push(FieldViolation {
                    field: field.to_string(),
                    code: err.code.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                    params,
                });
            }
        }

        Self::new(violations)
    }
}

/// Check presence and JSON type of every field in `payload`.
///
/// Fields that fail are replaced by a placeholder so the typed record can
/// still be built; integral numbers are normalized to integers.
fn check_shape(payload: &mut Map<String, Value>, fields: &[FieldSpec]) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    for spec in fields {
        let violation = match payload.get(spec.name) {
            None | Some(Value::Null) if spec.required => {
                FieldViolation::new(spec.name, "required", "field required")
            }
            None | Some(Value::Null) => continue,
            Some(value) if !spec.kind.accepts(value) => {
                FieldViolation::new(spec.name, "type", spec.kind.expected())
            }
            Some(value) => {
                if let (FieldKind::Integer, Some(n)) = (spec.kind, as_integer(value)) {
                    payload.insert(spec.name.to_string(), Value::from(n));
                }
                continue;
            }
        };

        payload.insert(spec.name.to_string(), spec.kind.placeholder());
        violations.push(violation);
    }

    violations
}

/// Turn an untyped payload into a validated record.
///
/// Shape violations and constraint violations are reported together;
/// a field with a shape violation is not also checked against its
/// constraints.
pub fn parse_record<T: Record>(payload: Value) -> Result<T, ValidationFailure> {
    let Value::Object(mut map) = payload else {
        return Err(ValidationFailure::single("body", "type", "expected a JSON object"));
    };

    let mut violations = check_shape(&mut map, T::FIELDS);
    let misshapen: Vec<String> = violations.iter().map(|v| v.field.clone()).collect();

    // Null optional fields deserialize the same as absent ones
    map.retain(|_, value| !value.is_null());

    let record: T = match serde_json::from_value(Value::Object(map)) {
        Ok(record) => record,
        Err(e) => {
            violations.push(FieldViolation::new("body", "type", e.to_string()));
            return Err(ValidationFailure::new(violations));
        }
    };

    if let Err(errors) = record.validate() {
        let constraints = ValidationFailure::from(errors);
        violations.extend(
            constraints
                .violations
                .into_iter()
                .filter(|v| !misshapen.contains(&v.field)),
        );
    }

    if violations.is_empty() {
        Ok(record)
    } else {
        Err(ValidationFailure::new(violations))
    }
}

/// Validate a stored document, dropping the store-assigned `_id`
pub fn record_from_document<T: Record>(mut document: Document) -> Result<T, ValidationFailure> {
    document.remove("_id");
    parse_record(Bson::Document(document).into_relaxed_extjson())
}

/// Serialize a record for insertion; records never carry an identifier
pub fn record_to_document<T: Record>(record: &T) -> Result<Document, bson::ser::Error> {
    bson::to_document(record)
}
