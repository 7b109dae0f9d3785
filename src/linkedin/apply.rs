// src/linkedin/apply.rs
//! Easy-apply submission payload.
//!
//! Wire shapes mirror the onsite-apply form schema: one response entry per
//! form element, each carrying either a plain text input value or an entity
//! reference (display name plus optional entity URN). File uploads travel in
//! a separate `fileUploadResponses` list keyed by the upload input URN.

use serde::Serialize;

pub const TRACKING_CODE: &str = "d_flagship3_search_srp_jobs";

/// A filled value for one form field, as collected from the caller.
#[derive(Debug, Clone)]
pub struct FieldResponse {
    pub form_element_urn: String,
    pub value: ResponseValue,
}

#[derive(Debug, Clone)]
pub enum ResponseValue {
    /// Free text or numeric answer.
    Text(String),
    /// Choice or typeahead answer resolved to an entity.
    Entity { name: String, urn: Option<String> },
    /// Reference to an already-uploaded file.
    FileUpload { input_urn: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub follow_company: bool,
    pub responses: Vec<FormElementResponse>,
    pub reference_id: String,
    pub tracking_code: String,
    pub file_upload_responses: Vec<FileUploadResponse>,
    pub tracking_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormElementResponse {
    pub form_element_urn: String,
    pub form_element_input_values: Vec<FormElementInputValue>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormElementInputValue {
    TextInputValue(String),
    EntityInputValue(EntityInputValue),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInputValue {
    pub input_entity_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_entity_urn: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUploadResponse {
    pub input_urn: String,
    pub form_element_urn: String,
}

impl ApplicationPayload {
    /// Assemble the submission payload from filled field responses.
    pub fn build(responses: &[FieldResponse], follow_company: bool) -> Self {
        let mut element_responses = Vec::new();
        let mut file_uploads = Vec::new();

        for response in responses {
            match &response.value {
                ResponseValue::Text(text) => element_responses.push(FormElementResponse {
                    form_element_urn: response.form_element_urn.clone(),
                    form_element_input_values: vec![FormElementInputValue::TextInputValue(
                        text.clone(),
                    )],
                }),
                ResponseValue::Entity { name, urn } => {
                    element_responses.push(FormElementResponse {
                        form_element_urn: response.form_element_urn.clone(),
                        form_element_input_values: vec![FormElementInputValue::EntityInputValue(
                            EntityInputValue {
                                input_entity_name: name.clone(),
                                input_entity_urn: urn.clone(),
                            },
                        )],
                    })
                }
                ResponseValue::FileUpload { input_urn } => file_uploads.push(FileUploadResponse {
                    input_urn: input_urn.clone(),
                    form_element_urn: response.form_element_urn.clone(),
                }),
            }
        }

        Self {
            follow_company,
            responses: element_responses,
            reference_id: String::new(),
            tracking_code: TRACKING_CODE.to_string(),
            file_upload_responses: file_uploads,
            tracking_id: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn element_urn(suffix: &str) -> String {
        format!(
            "urn:li:fsd_formElement:urn:li:jobs_applyformcommon_easyApplyFormElement:(4005350454,{suffix})"
        )
    }

    #[test]
    fn test_text_response_shape() {
        let payload = ApplicationPayload::build(
            &[FieldResponse {
                form_element_urn: element_urn("3497278537,numeric"),
                value: ResponseValue::Text("0".to_string()),
            }],
            true,
        );

        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(
            value["responses"][0]["formElementInputValues"][0],
            json!({"textInputValue": "0"})
        );
        assert_eq!(value["followCompany"], json!(true));
        assert_eq!(value["trackingCode"], json!(TRACKING_CODE));
    }

    #[test]
    fn test_entity_response_shape() {
        let payload = ApplicationPayload::build(
            &[FieldResponse {
                form_element_urn: element_urn("3497278545,phoneNumber~country"),
                value: ResponseValue::Entity {
                    name: "Italy (+39)".to_string(),
                    urn: Some("urn:li:country:it".to_string()),
                },
            }],
            false,
        );

        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(
            value["responses"][0]["formElementInputValues"][0],
            json!({
                "entityInputValue": {
                    "inputEntityName": "Italy (+39)",
                    "inputEntityUrn": "urn:li:country:it"
                }
            })
        );
    }

    #[test]
    fn test_entity_without_urn_omits_key() {
        let payload = ApplicationPayload::build(
            &[FieldResponse {
                form_element_urn: element_urn("3497278529,multipleChoice"),
                value: ResponseValue::Entity {
                    name: "Native or bilingual".to_string(),
                    urn: None,
                },
            }],
            true,
        );

        let value = serde_json::to_value(&payload).expect("serialize");
        let entity = &value["responses"][0]["formElementInputValues"][0]["entityInputValue"];
        assert_eq!(entity["inputEntityName"], json!("Native or bilingual"));
        assert!(entity.get("inputEntityUrn").is_none());
    }

    #[test]
    fn test_file_uploads_split_out() {
        let payload = ApplicationPayload::build(
            &[
                FieldResponse {
                    form_element_urn: element_urn("3497278561,multipleChoice"),
                    value: ResponseValue::Entity {
                        name: "email@gmail.com".to_string(),
                        urn: None,
                    },
                },
                FieldResponse {
                    form_element_urn: element_urn("3497278553,document"),
                    value: ResponseValue::FileUpload {
                        input_urn: "urn:li:fsd_resume:/abc".to_string(),
                    },
                },
            ],
            true,
        );

        assert_eq!(payload.responses.len(), 1);
        assert_eq!(payload.file_upload_responses.len(), 1);
        assert_eq!(
            payload.file_upload_responses[0].input_urn,
            "urn:li:fsd_resume:/abc"
        );
    }
}
