//! Portfolio project entity

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{FieldKind, FieldSpec, Record};

/// A project showcased in the portfolio. Seeded out of band, read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[validate(length(min = 2, max = 120, message = "length must be between 2 and 120 characters"))]
    pub title: String,

    #[validate(length(min = 4, max = 500, message = "length must be between 4 and 500 characters"))]
    pub description: String,

    /// Technologies used, in display order
    #[serde(default)]
    pub tech: Vec<String>,

    /// URL for the live demo
    pub live_link: Option<String>,

    /// URL for the source code repo
    pub github_link: Option<String>,

    /// Cover image URL
    pub image: Option<String>,
}

impl Record for Project {
    const COLLECTION: &'static str = "project";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("title", FieldKind::Text),
        FieldSpec::required("description", FieldKind::Text),
        FieldSpec::optional("tech", FieldKind::TextList),
        FieldSpec::optional("liveLink", FieldKind::OptionalText),
        FieldSpec::optional("githubLink", FieldKind::OptionalText),
        FieldSpec::optional("image", FieldKind::OptionalText),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse_record;
    use serde_json::json;

    #[test]
    fn test_optional_fields_default() {
        let project: Project = parse_record(json!({
            "title": "Folio",
            "description": "Personal site"
        }))
        .unwrap();

        assert!(project.tech.is_empty());
        assert_eq!(project.live_link, None);
        assert_eq!(project.github_link, None);
        assert_eq!(project.image, None);
    }

    #[test]
    fn test_null_links_accepted() {
        let project: Project = parse_record(json!({
            "title": "Folio",
            "description": "Personal site",
            "tech": ["Rust", "axum"],
            "liveLink": null,
            "githubLink": "not really a url",
            "image": null
        }))
        .unwrap();

        assert_eq!(project.tech, vec!["Rust", "axum"]);
        assert_eq!(project.live_link, None);
        assert_eq!(project.github_link.as_deref(), Some("not really a url"));
    }

    #[test]
    fn test_title_bounds_inclusive() {
        for title in ["ab".to_string(), "x".repeat(120)] {
            let result = parse_record::<Project>(json!({
                "title": title,
                "description": "four"
            }));
            assert!(result.is_ok());
        }

        for title in ["a".to_string(), "x".repeat(121)] {
            let err = parse_record::<Project>(json!({
                "title": title,
                "description": "four"
            }))
            .unwrap_err();
            assert_eq!(err.fields(), vec!["title"]);
            assert_eq!(err.violations[0].code, "length");
            assert_eq!(err.violations[0].params["min"], json!(2));
            assert_eq!(err.violations[0].params["max"], json!(120));
        }
    }

    #[test]
    fn test_length_counts_characters() {
        // 120 two-byte characters is still 120 characters
        let title = "é".repeat(120);
        assert!(parse_record::<Project>(json!({
            "title": title,
            "description": "four"
        }))
        .is_ok());
    }

    #[test]
    fn test_description_bounds() {
        let err = parse_record::<Project>(json!({
            "title": "ok",
            "description": "abc"
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["description"]);

        let err = parse_record::<Project>(json!({
            "title": "ok",
            "description": "d".repeat(501)
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["description"]);
    }

    #[test]
    fn test_tech_must_be_strings() {
        let err = parse_record::<Project>(json!({
            "title": "ok",
            "description": "long enough",
            "tech": ["Rust", 3]
        }))
        .unwrap_err();
        assert_eq!(err.fields(), vec!["tech"]);
        assert_eq!(err.violations[0].code, "type");
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let project = Project {
            title: "Folio".into(),
            description: "Personal site".into(),
            tech: vec![],
            live_link: Some("https://example.com".into()),
            github_link: None,
            image: None,
        };
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["liveLink"], json!("https://example.com"));
        assert_eq!(value["githubLink"], json!(null));
        assert!(value.get("live_link").is_none());
    }
}
