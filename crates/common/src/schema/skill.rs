//! Skill entity

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{FieldKind, FieldSpec, Record};

/// A skill with a proficiency percentage for progress bars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Skill {
    #[validate(length(min = 1, max = 60, message = "length must be between 1 and 60 characters"))]
    pub name: String,

    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub level: i64,
}

impl Record for Skill {
    const COLLECTION: &'static str = "skill";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::required("level", FieldKind::Integer),
    ];
}
