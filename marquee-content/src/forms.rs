// Form submission relay

use crate::client::GraphQlClient;
use crate::error::ContentError;
use marquee_core::model::FormRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{info, warn};

const SUBMIT_MUTATION: &str = "mutation SubmitForm($storeId: ID!, $formId: ID!, $formData: JSON!) { submitForm(storeId: $storeId, formId: $formId, formData: $formData) { success message } }";

const TRANSPORT_FAILURE: &str = "Failed to submit form";
const REJECTED_FALLBACK: &str = "Form submission was rejected";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub store_id: String,
    pub form_id: String,
    #[serde(default)]
    pub form_data: Map<String, Value>,
}

impl FormSubmission {
    /// Required fields of `form` that are absent or blank in this submission.
    pub fn missing_fields(&self, form: &FormRecord) -> Vec<String> {
        form.fields
            .iter()
            .filter(|field| field.required)
            .filter(|field| match self.form_data.get(&field.name) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .map(|field| field.name.clone())
            .collect()
    }
}

/// Result handed back to the submitting page: `{ success, message }` or `{ error }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormOutcome {
    Accepted {
        success: bool,
        message: String,
    },
    Rejected {
        #[serde(skip_serializing)]
        status: u16,
        error: String,
    },
}

impl FormOutcome {
    pub fn rejected(status: u16, error: impl Into<String>) -> Self {
        FormOutcome::Rejected {
            status,
            error: error.into(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            FormOutcome::Accepted { .. } => 200,
            FormOutcome::Rejected { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FormOutcome::Accepted { .. })
    }
}

#[derive(Debug, Deserialize)]
struct SubmitResult {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmitData {
    #[serde(rename = "submitForm")]
    submit_form: SubmitResult,
}

#[derive(Debug, Clone)]
pub struct FormRelay {
    graphql: GraphQlClient,
}

impl FormRelay {
    pub fn new(graphql: GraphQlClient) -> Self {
        Self { graphql }
    }

    /// Forward a submission as a GraphQL mutation.
    ///
    /// Upstream validation failures come back as 400 with the upstream message;
    /// transport failures as 500 with a generic message. Nothing is raised.
    pub async fn submit(&self, submission: &FormSubmission) -> FormOutcome {
        if submission.store_id.trim().is_empty() || submission.form_id.trim().is_empty() {
            return FormOutcome::rejected(400, "Missing storeId or formId");
        }

        let variables = json!({
            "storeId": submission.store_id,
            "formId": submission.form_id,
            "formData": submission.form_data,
        });

        match self.graphql.query::<SubmitData>(SUBMIT_MUTATION, variables).await {
            Ok(SubmitData { submit_form }) if submit_form.success => {
                info!("Form {} submitted", submission.form_id);
                FormOutcome::Accepted {
                    success: true,
                    message: submit_form.message.unwrap_or_default(),
                }
            }
            Ok(SubmitData { submit_form }) => FormOutcome::rejected(
                400,
                submit_form
                    .message
                    .unwrap_or_else(|| REJECTED_FALLBACK.to_string()),
            ),
            Err(ContentError::GraphQlError(message)) => {
                warn!("Form {} rejected upstream: {}", submission.form_id, message);
                FormOutcome::rejected(400, message)
            }
            Err(e) => {
                warn!("Form {} submission failed: {}", submission.form_id, e);
                FormOutcome::rejected(500, TRANSPORT_FAILURE)
            }
        }
    }

    /// Check required fields against the form definition before forwarding.
    pub async fn submit_checked(&self, form: &FormRecord, submission: &FormSubmission) -> FormOutcome {
        let missing = submission.missing_fields(form);
        if !missing.is_empty() {
            return FormOutcome::rejected(400, format!("Missing required fields: {}", missing.join(", ")));
        }
        self.submit(submission).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientConfig;
    use marquee_core::model::FormField;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, method},
    };

    fn submission() -> FormSubmission {
        let mut form_data = Map::new();
        form_data.insert("email".to_string(), json!("fan@example.com"));
        FormSubmission {
            store_id: "store".to_string(),
            form_id: "contact".to_string(),
            form_data,
        }
    }

    async fn relay_for(server: &MockServer) -> FormRelay {
        let config = ClientConfig::parse(&server.uri()).unwrap();
        FormRelay::new(GraphQlClient::new(&config).unwrap())
    }

    #[test]
    fn test_submission_wire_shape() {
        let value = serde_json::to_value(submission()).unwrap();
        assert_eq!(value["storeId"], "store");
        assert_eq!(value["formId"], "contact");
        assert_eq!(value["formData"]["email"], "fan@example.com");
    }

    #[test]
    fn test_outcome_wire_shape() {
        let ok = FormOutcome::Accepted {
            success: true,
            message: "Thanks".to_string(),
        };
        assert_eq!(serde_json::to_value(&ok).unwrap(), json!({ "success": true, "message": "Thanks" }));

        let err = FormOutcome::rejected(400, "Email is invalid");
        assert_eq!(serde_json::to_value(&err).unwrap(), json!({ "error": "Email is invalid" }));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "variables": { "formId": "contact", "formData": { "email": "fan@example.com" } } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "submitForm": {
                "success": true, "message": "Thanks"
            } } })))
            .mount(&server)
            .await;

        let outcome = relay_for(&server).await.submit(&submission()).await;
        assert_eq!(
            outcome,
            FormOutcome::Accepted {
                success: true,
                message: "Thanks".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_upstream_validation_failure_is_400() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "errors": [ { "message": "Email is invalid" } ]
            })))
            .mount(&server)
            .await;

        let outcome = relay_for(&server).await.submit(&submission()).await;
        assert_eq!(outcome, FormOutcome::rejected(400, "Email is invalid"));
    }

    #[tokio::test]
    async fn test_unsuccessful_result_is_400() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "submitForm": {
                "success": false
            } } })))
            .mount(&server)
            .await;

        let outcome = relay_for(&server).await.submit(&submission()).await;
        assert_eq!(outcome, FormOutcome::rejected(400, REJECTED_FALLBACK));
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic_500() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let outcome = relay_for(&server).await.submit(&submission()).await;
        assert_eq!(outcome, FormOutcome::rejected(500, TRANSPORT_FAILURE));
    }

    #[tokio::test]
    async fn test_missing_required_fields_never_reach_upstream() {
        let server = MockServer::start().await;
        let form = FormRecord {
            id: "contact".to_string(),
            name: "Contact".to_string(),
            fields: vec![
                FormField {
                    name: "email".to_string(),
                    label: "Email".to_string(),
                    field_type: "email".to_string(),
                    required: true,
                },
                FormField {
                    name: "name".to_string(),
                    label: "Name".to_string(),
                    field_type: "text".to_string(),
                    required: true,
                },
            ],
        };

        let outcome = relay_for(&server).await.submit_checked(&form, &submission()).await;
        assert_eq!(outcome, FormOutcome::rejected(400, "Missing required fields: name"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
