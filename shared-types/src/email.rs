use regex::Regex;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;
use ts_rs::TS;

/// Number of characters shown in the history list before the ellipsis
pub const PREVIEW_CHARS: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum EmailDirection {
    Sent,
    Received,
}

impl EmailDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailDirection::Sent => "sent",
            EmailDirection::Received => "received",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sent" => Some(EmailDirection::Sent),
            "received" => Some(EmailDirection::Received),
            _ => None,
        }
    }
}

/// Delivery status recorded in the history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Sent,
    Failed,
    Delivered,
}

impl EmailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailStatus::Sent => "sent",
            EmailStatus::Failed => "failed",
            EmailStatus::Delivered => "delivered",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sent" => Some(EmailStatus::Sent),
            "failed" => Some(EmailStatus::Failed),
            "delivered" => Some(EmailStatus::Delivered),
            _ => None,
        }
    }
}

/// One row of `email_history`
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmailRecord {
    pub id: String,
    pub customer_id: Option<String>,
    pub subject: String,
    pub message: String,
    pub direction: EmailDirection,
    pub status: EmailStatus,
    pub reply_to: Option<String>,
    pub created_at: i64,
}

/// Outbound request accepted by the send-email function
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub customer_name: String,
    pub customer_id: Option<String>,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum InboundTag {
    #[serde(rename = "inbound")]
    Inbound,
}

/// Tagged `{type: "inbound"}` variant of the send-email body
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InboundEmailRequest {
    #[serde(rename = "type")]
    pub kind: InboundTag,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub message: String,
    pub customer_id: String,
}

/// Body of the send-email function. A body whose `type` is `"inbound"` must
/// parse as [`InboundEmailRequest`]; it never falls back to an outbound send.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum EmailFunctionRequest {
    Inbound(InboundEmailRequest),
    Outbound(SendEmailRequest),
}

impl<'de> Deserialize<'de> for EmailFunctionRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;

        if value.get("type").and_then(serde_json::Value::as_str) == Some("inbound") {
            InboundEmailRequest::deserialize(value)
                .map(EmailFunctionRequest::Inbound)
                .map_err(D::Error::custom)
        } else {
            SendEmailRequest::deserialize(value)
                .map(EmailFunctionRequest::Outbound)
                .map_err(D::Error::custom)
        }
    }
}

/// Provider-shaped email delivered to the receive-email webhook
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IncomingEmail {
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    #[ts(skip)]
    pub attachments: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    #[ts(skip)]
    pub headers: serde_json::Value,
}

impl IncomingEmail {
    /// Plain-text body, falling back to the HTML part when the text part is empty.
    pub fn body(&self) -> &str {
        if self.text.is_empty() {
            &self.html
        } else {
            &self.text
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InboundWebhookRequest {
    pub email: IncomingEmail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProviderAccepted {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProviderError {
    pub message: String,
    pub name: Option<String>,
}

/// Result of a provider call, shaped like the provider's own response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProviderResponse {
    pub data: Option<ProviderAccepted>,
    pub error: Option<ProviderError>,
}

impl ProviderResponse {
    pub fn accepted(id: impl Into<String>) -> Self {
        Self {
            data: Some(ProviderAccepted { id: id.into() }),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(ProviderError {
                message: message.into(),
                name: None,
            }),
        }
    }

    pub fn status(&self) -> EmailStatus {
        if self.error.is_some() {
            EmailStatus::Failed
        } else {
            EmailStatus::Sent
        }
    }
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmailHistoryResponse {
    pub emails: Vec<EmailRecord>,
}

/// Record prepared for the details dialog
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmailDetailResponse {
    pub email: EmailRecord,
    pub display_message: String,
    pub preview: String,
}

impl From<EmailRecord> for EmailDetailResponse {
    fn from(email: EmailRecord) -> Self {
        let display_message = strip_html_tags(&email.message);
        let preview = preview(&email.message);
        Self {
            email,
            display_message,
            preview,
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// HTML body wrapped around an outbound message.
pub fn render_email_html(customer_name: &str, message: &str) -> String {
    let body = escape_html(message).replace('\n', "<br/>");
    format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #e0e0e0; border-radius: 5px;">
  <h2 style="color: #4f46e5;">Hello {name}</h2>
  <div style="margin: 20px 0; line-height: 1.5;">
    {body}
  </div>
  <div style="margin-top: 30px; padding-top: 20px; border-top: 1px solid #e0e0e0; color: #666; font-size: 12px;">
    This email was sent from the AI CRM Spark platform.
  </div>
</div>"#,
        name = escape_html(customer_name),
        body = body,
    )
}

fn tag_regex() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

pub fn strip_html_tags(message: &str) -> String {
    tag_regex().replace_all(message, "").into_owned()
}

pub fn preview(message: &str) -> String {
    if message.chars().count() > PREVIEW_CHARS {
        let head: String = message.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_email_html_greets_and_breaks_lines() {
        let html = render_email_html("Jane Cooper", "Hi there\nSee you soon");
        assert!(html.contains("Hello Jane Cooper"));
        assert!(html.contains("Hi there<br/>See you soon"));
        assert!(html.contains("AI CRM Spark platform"));
    }

    #[test]
    fn test_render_email_html_escapes_markup() {
        let html = render_email_html("<b>Bob</b>", "1 < 2");
        assert!(html.contains("Hello &lt;b&gt;Bob&lt;/b&gt;"));
        assert!(html.contains("1 &lt; 2"));
    }

    #[test]
    fn test_strip_html_tags() {
        assert_eq!(
            strip_html_tags("<p>Hello <strong>world</strong></p>"),
            "Hello world"
        );
        assert_eq!(strip_html_tags("plain text"), "plain text");
    }

    #[test]
    fn test_preview_truncates_long_messages() {
        let long = "a".repeat(200);
        let short = preview(&long);
        assert_eq!(short.len(), PREVIEW_CHARS + 3);
        assert!(short.ends_with("..."));
        assert_eq!(preview("short"), "short");
        assert_eq!(preview(&"b".repeat(150)), "b".repeat(150));
    }

    #[test]
    fn test_function_request_picks_inbound_variant() {
        let body = serde_json::json!({
            "type": "inbound",
            "from": "jane@example.com",
            "to": "crm@example.com",
            "subject": "Hello",
            "message": "Body",
            "customerId": "1"
        });
        let parsed: EmailFunctionRequest = serde_json::from_value(body).unwrap();
        assert!(matches!(parsed, EmailFunctionRequest::Inbound(ref r) if r.customer_id == "1"));
    }

    #[test]
    fn test_malformed_inbound_never_becomes_outbound() {
        let missing_customer = serde_json::json!({
            "type": "inbound",
            "from": "jane@example.com",
            "to": "crm@example.com",
            "subject": "Hello",
            "message": "Body"
        });
        let err = serde_json::from_value::<EmailFunctionRequest>(missing_customer).unwrap_err();
        assert!(err.to_string().contains("customerId"));

        let numeric_customer = serde_json::json!({
            "type": "inbound",
            "from": "jane@example.com",
            "to": "crm@example.com",
            "subject": "Hello",
            "message": "Body",
            "customerId": 1
        });
        assert!(serde_json::from_value::<EmailFunctionRequest>(numeric_customer).is_err());
    }

    #[test]
    fn test_function_request_defaults_to_outbound() {
        let body = serde_json::json!({
            "to": "jane@example.com",
            "subject": "Hello",
            "message": "Body",
            "customerName": "Jane",
            "customerId": "1",
            "replyTo": "me@example.com"
        });
        let parsed: EmailFunctionRequest = serde_json::from_value(body).unwrap();
        match parsed {
            EmailFunctionRequest::Outbound(req) => {
                assert_eq!(req.customer_name, "Jane");
                assert_eq!(req.reply_to.as_deref(), Some("me@example.com"));
            }
            other => panic!("Expected outbound request, got {:?}", other),
        }
    }

    #[test]
    fn test_incoming_email_body_falls_back_to_html() {
        let email = IncomingEmail {
            from: "a@example.com".to_string(),
            html: "<p>hi</p>".to_string(),
            ..Default::default()
        };
        assert_eq!(email.body(), "<p>hi</p>");
    }

    #[test]
    fn test_provider_response_status() {
        assert_eq!(ProviderResponse::accepted("abc").status(), EmailStatus::Sent);
        assert_eq!(ProviderResponse::failed("bad key").status(), EmailStatus::Failed);
    }
}
