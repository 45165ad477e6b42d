//! Typed access to the CRM HTTP API.
//!
//! Form checks run before any request goes out, so an invalid form never
//! reaches the server.

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_types::search::filter_customers;
use shared_types::validation::{validate_customer_form, validate_note};
use shared_types::{
    ActivitiesResponse, ActivityAction, CreateActivityRequest, CreateCustomerRequest,
    CreateNoteRequest, Customer, CustomerActivity, CustomerNote, CustomersResponse,
    EmailDetailResponse, EmailHistoryResponse, EmailRecord, ErrorResponse, Insight,
    InsightsResponse, NotesResponse,
};

use crate::error::{ClientError, Result};

/// Everything the customer page shows, fetched together
#[derive(Debug, Clone)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub notes: Vec<CustomerNote>,
    pub activities: Vec<CustomerActivity>,
}

#[derive(Clone)]
pub struct CrmClient {
    client: reqwest::Client,
    base_url: String,
}

impl CrmClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:8080`
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.client.get(self.url(path)).send().await?;
        Self::read(resp).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        Self::read(resp).await
    }

    /// Treat a 404 as "nothing there"
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.get(path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        let resp: CustomersResponse = self.get("/api/customers").await?;
        Ok(resp.customers)
    }

    /// Fetches the full directory and filters it locally.
    pub async fn search_customers(&self, query: &str) -> Result<Vec<Customer>> {
        let customers = self.list_customers().await?;
        Ok(filter_customers(&customers, query))
    }

    pub async fn add_customer(&self, form: &CreateCustomerRequest) -> Result<Customer> {
        validate_customer_form(form)?;
        let customer: Customer = self.post("/api/customers", form).await?;
        tracing::info!("Customer {} added", customer.name);
        Ok(customer)
    }

    pub async fn customer(&self, id: &str) -> Result<Option<Customer>> {
        self.get_optional(&format!("/api/customers/{}", id)).await
    }

    /// Customer, notes and activities requested concurrently.
    /// `None` when the customer does not exist.
    pub async fn customer_detail(&self, id: &str) -> Result<Option<CustomerDetail>> {
        let notes_path = format!("/api/customers/{}/notes", id);
        let activities_path = format!("/api/customers/{}/activities", id);

        let (customer, notes, activities) = tokio::join!(
            self.customer(id),
            self.get::<NotesResponse>(&notes_path),
            self.get::<ActivitiesResponse>(&activities_path),
        );

        let Some(customer) = customer? else {
            return Ok(None);
        };

        Ok(Some(CustomerDetail {
            customer,
            notes: notes?.notes,
            activities: activities?.activities,
        }))
    }

    /// Saves one note and puts it at the top of `detail.notes`.
    pub async fn add_note(&self, detail: &mut CustomerDetail, content: &str) -> Result<CustomerNote> {
        validate_note(content)?;

        let note: CustomerNote = self
            .post(
                &format!("/api/customers/{}/notes", detail.customer.id),
                &CreateNoteRequest {
                    content: content.trim().to_string(),
                },
            )
            .await?;

        detail.notes.insert(0, note.clone());
        Ok(note)
    }

    pub async fn log_activity(
        &self,
        customer_id: &str,
        action: ActivityAction,
        description: &str,
    ) -> Result<CustomerActivity> {
        self.post(
            &format!("/api/customers/{}/activities", customer_id),
            &CreateActivityRequest {
                action,
                description: description.to_string(),
            },
        )
        .await
    }

    pub async fn email_history(&self, customer_id: &str) -> Result<Vec<EmailRecord>> {
        let resp: EmailHistoryResponse = self
            .get(&format!("/api/customers/{}/emails", customer_id))
            .await?;
        Ok(resp.emails)
    }

    pub async fn email_detail(&self, email_id: &str) -> Result<Option<EmailDetailResponse>> {
        self.get_optional(&format!("/api/emails/{}", email_id)).await
    }

    pub async fn generate_insights(&self, customer_id: &str) -> Result<Vec<Insight>> {
        let resp: InsightsResponse = self
            .post(&format!("/api/customers/{}/insights", customer_id), &serde_json::json!({}))
            .await?;
        Ok(resp.insights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ValidationError;

    // Nothing listens on the discard port; any request would fail with Http.
    fn offline_client() -> CrmClient {
        CrmClient::new("http://127.0.0.1:9/")
    }

    #[tokio::test]
    async fn test_invalid_customer_form_never_hits_network() {
        let client = offline_client();

        let short_name = CreateCustomerRequest {
            name: "J".to_string(),
            email: "jane@example.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            client.add_customer(&short_name).await,
            Err(ClientError::Validation(ValidationError::NameTooShort))
        ));

        let bad_email = CreateCustomerRequest {
            name: "Jane Cooper".to_string(),
            email: "jane@".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            client.add_customer(&bad_email).await,
            Err(ClientError::Validation(ValidationError::InvalidEmail))
        ));
    }

    #[tokio::test]
    async fn test_blank_note_never_hits_network() {
        let client = offline_client();
        let mut detail = CustomerDetail {
            customer: Customer {
                id: "1".to_string(),
                name: "Jane Cooper".to_string(),
                email: "jane@example.com".to_string(),
                phone: None,
                company: None,
                status: Default::default(),
                last_contact_at: None,
                initials: "JC".to_string(),
                avatar_url: None,
                created_at: 0,
            },
            notes: Vec::new(),
            activities: Vec::new(),
        };

        assert!(matches!(
            client.add_note(&mut detail, "  ").await,
            Err(ClientError::Validation(ValidationError::EmptyNote))
        ));
        assert!(detail.notes.is_empty());
    }

    #[tokio::test]
    async fn test_offline_server_is_http_error() {
        let client = offline_client();
        assert!(matches!(client.list_customers().await, Err(ClientError::Http(_))));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        assert_eq!(offline_client().url("/api/customers"), "http://127.0.0.1:9/api/customers");
    }
}
