//! Contact message entity

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{FieldKind, FieldSpec, Record};

/// A contact form message submitted by a visitor. Write-only through the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Message {
    #[validate(length(min = 2, max = 120, message = "length must be between 2 and 120 characters"))]
    pub name: String,

    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,

    #[validate(length(min = 5, max = 2000, message = "length must be between 5 and 2000 characters"))]
    pub message: String,
}

impl Record for Message {
    const COLLECTION: &'static str = "message";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::required("email", FieldKind::Text),
        FieldSpec::required("message", FieldKind::Text),
    ];
}
