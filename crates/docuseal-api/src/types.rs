//! Request shapes for the DocuSeal endpoints
//!
//! Optional fields are `Option`s skipped on serialization, so an absent field
//! never reaches the wire while an explicit `false` does. Shapes that the API
//! accepts more keys for than we model keep the extras in a flattened map.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Positive numeric identifier of a template, submission or submitter.
///
/// Deserializes from a JSON integer or a string of decimal digits; zero,
/// negatives, fractions and other strings are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceId(u64);

impl ResourceId {
    pub fn new(id: u64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = ResourceId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a positive integer id")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ResourceId, E> {
                ResourceId::new(v).ok_or_else(|| E::custom("id must be a positive integer, got 0"))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ResourceId, E> {
                match u64::try_from(v) {
                    Ok(v) => self.visit_u64(v),
                    Err(_) => Err(E::custom(format!(
                        "id must be a positive integer, got {v}"
                    ))),
                }
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<ResourceId, E> {
                if v.fract() == 0.0 && v >= 1.0 && v <= u64::MAX as f64 {
                    Ok(ResourceId(v as u64))
                } else {
                    Err(E::custom(format!("id must be a positive integer, got {v}")))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ResourceId, E> {
                v.trim()
                    .parse::<u64>()
                    .ok()
                    .and_then(ResourceId::new)
                    .ok_or_else(|| E::custom(format!("id must be a positive integer, got {v:?}")))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// Deserialize a non-negative whole number that may arrive as a JSON
/// integer, an integral float (`10.0`) or a string of digits.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    struct WholeVisitor;

    impl Visitor<'_> for WholeVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative whole number")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("number out of range: {v}")))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::custom(format!("expected a non-negative whole number, got {v}")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
            if v.fract() == 0.0 && v >= 0.0 && v <= u32::MAX as f64 {
                Ok(v as u32)
            } else {
                Err(E::custom(format!("expected a non-negative whole number, got {v}")))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
            v.trim()
                .parse::<u32>()
                .map_err(|_| E::custom(format!("expected a non-negative whole number, got {v:?}")))
        }
    }

    deserializer.deserialize_any(WholeVisitor)
}

fn optional_whole_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    #[derive(Deserialize)]
    struct Whole(#[serde(deserialize_with = "whole_number")] u32);

    Option::<Whole>::deserialize(deserializer).map(|whole| whole.map(|Whole(n)| n))
}

// ============================================================================
// Templates
// ============================================================================

/// Filters for `GET /templates`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(
        default,
        deserialize_with = "optional_whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub limit: Option<u32>,
}

/// Body for `POST /templates/{id}/clone`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloneTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_key: Option<String>,
}

/// Body for `POST /templates/pdf`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTemplateFromPdf {
    pub name: String,
    pub documents: Vec<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_key: Option<String>,
}

/// Source document of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    /// Base64 encoded file content
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<DocumentField>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A fillable or signable field placed on a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentField {
    pub name: String,
    pub role: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub areas: Vec<FieldArea>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Field kinds understood by DocuSeal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Signature,
    Date,
    Checkbox,
    Radio,
    Select,
    Phone,
    Email,
    Number,
    Image,
    File,
}

impl FieldType {
    pub const ALL: [FieldType; 11] = [
        FieldType::Text,
        FieldType::Signature,
        FieldType::Date,
        FieldType::Checkbox,
        FieldType::Radio,
        FieldType::Select,
        FieldType::Phone,
        FieldType::Email,
        FieldType::Number,
        FieldType::Image,
        FieldType::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Signature => "signature",
            FieldType::Date => "date",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Select => "select",
            FieldType::Phone => "phone",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Image => "image",
            FieldType::File => "file",
        }
    }
}

/// Placement of a field on a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldArea {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    #[serde(deserialize_with = "whole_number")]
    pub page: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// Submissions
// ============================================================================

/// Filters for `GET /submissions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_folder: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub limit: Option<u32>,
}

/// Caller-facing arguments for creating a submission.
///
/// The API expects submitters nested one level deeper; see
/// [`CreateSubmission::into_body`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateSubmission {
    pub template_id: ResourceId,
    pub submitters: Vec<SubmitterInput>,
    #[serde(default)]
    pub send_email: Option<bool>,
    #[serde(default)]
    pub order: Option<SubmitterOrder>,
    #[serde(default)]
    pub message: Option<EmailMessage>,
}

impl CreateSubmission {
    /// Shape the wire body: wrap the flat submitters list in a single
    /// submission entry and fill in `send_email` / `order` defaults.
    pub fn into_body(self) -> CreateSubmissionBody {
        CreateSubmissionBody {
            template_id: self.template_id,
            submission: vec![SubmissionEntry {
                submitters: self.submitters,
            }],
            send_email: self.send_email.unwrap_or(true),
            order: self.order.unwrap_or_default(),
            message: self.message,
        }
    }
}

/// Wire body for `POST /submissions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSubmissionBody {
    pub template_id: ResourceId,
    pub submission: Vec<SubmissionEntry>,
    pub send_email: bool,
    pub order: SubmitterOrder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<EmailMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionEntry {
    pub submitters: Vec<SubmitterInput>,
}

/// One signing party on a new submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitterInput {
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_sms: Option<bool>,
    /// Pre-filled field values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Signing order of submitters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitterOrder {
    #[default]
    Preserved,
    Random,
}

/// Custom notification email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

// ============================================================================
// Submitters
// ============================================================================

/// Filters for `GET /submitters`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitterListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<ResourceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_key: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub limit: Option<u32>,
}

/// Body for `PUT /submitters/{id}`. Only present fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSubmitter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_email: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<EmailMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resource_id_accepts_integers_and_digit_strings() {
        let id: ResourceId = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(id.get(), 42);

        let id: ResourceId = serde_json::from_value(json!("17")).unwrap();
        assert_eq!(id.get(), 17);

        let id: ResourceId = serde_json::from_value(json!(3.0)).unwrap();
        assert_eq!(id.get(), 3);
    }

    #[test]
    fn resource_id_rejects_non_positive_and_garbage() {
        for bad in [json!(0), json!(-4), json!(1.5), json!("abc"), json!(""), json!(true), json!(null)] {
            assert!(
                serde_json::from_value::<ResourceId>(bad.clone()).is_err(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn update_submitter_distinguishes_false_from_absent() {
        let explicit: UpdateSubmitter = serde_json::from_value(json!({"send_email": false})).unwrap();
        assert_eq!(serde_json::to_value(&explicit).unwrap(), json!({"send_email": false}));

        let omitted: UpdateSubmitter = serde_json::from_value(json!({"name": "Ada"})).unwrap();
        assert_eq!(serde_json::to_value(&omitted).unwrap(), json!({"name": "Ada"}));
    }

    #[test]
    fn create_submission_body_applies_defaults() {
        let args: CreateSubmission = serde_json::from_value(json!({
            "template_id": 7,
            "submitters": [{"email": "a@x.com", "role": "Signer"}]
        }))
        .unwrap();

        let body = serde_json::to_value(args.into_body()).unwrap();
        assert_eq!(
            body,
            json!({
                "template_id": 7,
                "submission": [{"submitters": [{"email": "a@x.com", "role": "Signer"}]}],
                "send_email": true,
                "order": "preserved"
            })
        );
    }

    #[test]
    fn create_submission_keeps_caller_choices() {
        let args: CreateSubmission = serde_json::from_value(json!({
            "template_id": 7,
            "submitters": [{"email": "a@x.com", "role": "Signer", "external_id": "crm-9"}],
            "send_email": false,
            "order": "random",
            "message": {"subject": "Please sign"}
        }))
        .unwrap();

        let body = serde_json::to_value(args.into_body()).unwrap();
        assert_eq!(body["send_email"], json!(false));
        assert_eq!(body["order"], json!("random"));
        assert_eq!(body["message"], json!({"subject": "Please sign"}));
        assert_eq!(body["submission"][0]["submitters"][0]["external_id"], json!("crm-9"));
    }

    #[test]
    fn unknown_field_type_is_rejected() {
        let result = serde_json::from_value::<DocumentField>(json!({
            "name": "Sig",
            "role": "Signer",
            "type": "hologram",
            "areas": []
        }));
        assert!(result.is_err());
    }

    #[test]
    fn field_type_names_match_serde() {
        for kind in FieldType::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }

    #[rstest::rstest]
    #[case(json!(10), Some(10))]
    #[case(json!(10.0), Some(10))]
    #[case(json!("25"), Some(25))]
    #[case(json!(0), Some(0))]
    #[case(json!(null), None)]
    fn list_limit_accepts_whole_numbers(#[case] limit: Value, #[case] expected: Option<u32>) {
        let query: TemplateListQuery = serde_json::from_value(json!({"limit": limit.clone()})).unwrap();
        assert_eq!(query.limit, expected);

        let query: SubmitterListQuery = serde_json::from_value(json!({"limit": limit})).unwrap();
        assert_eq!(query.limit, expected);
    }

    #[test]
    fn list_limit_defaults_to_absent() {
        let query: SubmissionListQuery = serde_json::from_value(json!({})).unwrap();
        assert!(query.limit.is_none());
    }

    #[rstest::rstest]
    #[case(json!(2.5))]
    #[case(json!(-1))]
    #[case(json!("ten"))]
    #[case(json!(true))]
    fn list_limit_rejects_non_whole_numbers(#[case] limit: Value) {
        assert!(serde_json::from_value::<TemplateListQuery>(json!({"limit": limit})).is_err());
    }

    #[test]
    fn field_area_accepts_float_page_and_keeps_extra_keys() {
        let area: FieldArea = serde_json::from_value(json!({
            "x": 0.1, "y": 0.2, "w": 0.3, "h": 0.05, "page": 1.0, "option": "a"
        }))
        .unwrap();
        assert_eq!(area.page, 1);

        assert_eq!(
            serde_json::to_value(&area).unwrap(),
            json!({"x": 0.1, "y": 0.2, "w": 0.3, "h": 0.05, "page": 1, "option": "a"})
        );
    }
}
