use actix_web::{web, HttpResponse};
use shared_types::assistant::WELCOME_CAPABILITIES;
use shared_types::validation::validate_chat_message;
use shared_types::{
    AssistantWelcomeResponse, ChatMessagesResponse, CreateChatSessionResponse,
    PostChatMessageRequest,
};

use crate::error::ApiError;
use crate::helpers::assistant::{AssistantError, AssistantStore};

const GREETING: &str = "Hello, I'm your AI CRM assistant. How can I help you today?";

pub async fn create_session(store: web::Data<AssistantStore>) -> HttpResponse {
    let session_id = store.create_session().await;
    tracing::debug!("Opened assistant session {}", session_id);
    HttpResponse::Created().json(CreateChatSessionResponse { session_id })
}

pub async fn list_messages(
    store: web::Data<AssistantStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let messages = store
        .messages(&path.into_inner())
        .await
        .ok_or(AssistantError::SessionNotFound)?;
    let is_loading = messages.iter().any(|m| m.is_loading);

    Ok(HttpResponse::Ok().json(ChatMessagesResponse { messages, is_loading }))
}

pub async fn post_message(
    store: web::Data<AssistantStore>,
    path: web::Path<String>,
    request: web::Json<PostChatMessageRequest>,
) -> Result<HttpResponse, ApiError> {
    let PostChatMessageRequest { content } = request.into_inner();
    validate_chat_message(&content)?;

    let posted = store.submit(&path.into_inner(), &content).await?;
    Ok(HttpResponse::Ok().json(posted))
}

/// Clear chat
pub async fn delete_session(
    store: web::Data<AssistantStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let session_id = path.into_inner();
    store.remove_session(&session_id).await?;
    tracing::debug!("Closed assistant session {}", session_id);
    Ok(HttpResponse::NoContent().finish())
}

pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok().json(AssistantWelcomeResponse {
        greeting: GREETING.to_string(),
        capabilities: WELCOME_CAPABILITIES.iter().map(|c| c.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use crate::test_support::TestApp;
    use actix_web::{http::StatusCode, test};
    use serde_json::json;
    use shared_types::{
        AssistantWelcomeResponse, ChatMessagesResponse, CreateChatSessionResponse,
        PostChatMessageResponse, CANNED_RESPONSES,
    };
    use std::time::Duration;

    #[actix_web::test]
    async fn test_conversation_round_trip() {
        let harness = TestApp::empty().await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::post().uri("/api/assistant/sessions").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let session: CreateChatSessionResponse = test::read_body_json(resp).await;
        let messages_uri = format!("/api/assistant/sessions/{}/messages", session.session_id);

        let req = test::TestRequest::post()
            .uri(&messages_uri)
            .set_json(json!({"content": "Which leads should I call?"}))
            .to_request();
        let posted: PostChatMessageResponse = test::call_and_read_body_json(&app, req).await;
        assert!(posted.placeholder.is_loading);

        let req = test::TestRequest::get().uri(&messages_uri).to_request();
        let pending: ChatMessagesResponse = test::call_and_read_body_json(&app, req).await;
        assert!(pending.is_loading);
        assert_eq!(pending.messages.len(), 2);

        let req = test::TestRequest::post()
            .uri(&messages_uri)
            .set_json(json!({"content": "Hello?"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        tokio::time::sleep(Duration::from_millis(200)).await;

        let req = test::TestRequest::get().uri(&messages_uri).to_request();
        let settled: ChatMessagesResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!settled.is_loading);
        assert_eq!(settled.messages.len(), 2);
        assert!(CANNED_RESPONSES.contains(&settled.messages[1].content.as_str()));
    }

    #[actix_web::test]
    async fn test_empty_message_and_unknown_session() {
        let harness = TestApp::empty().await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::post().uri("/api/assistant/sessions").to_request();
        let session: CreateChatSessionResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/assistant/sessions/{}/messages", session.session_id))
            .set_json(json!({"content": "   "}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/assistant/sessions/missing/messages")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_content_kept_as_typed() {
        let harness = TestApp::empty().await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::post().uri("/api/assistant/sessions").to_request();
        let session: CreateChatSessionResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/assistant/sessions/{}/messages", session.session_id))
            .set_json(json!({"content": "  Show me the pipeline\n"}))
            .to_request();
        let posted: PostChatMessageResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(posted.user_message.content, "  Show me the pipeline\n");
    }

    #[actix_web::test]
    async fn test_clear_chat_removes_session() {
        let harness = TestApp::empty().await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::post().uri("/api/assistant/sessions").to_request();
        let session: CreateChatSessionResponse = test::call_and_read_body_json(&app, req).await;
        let session_uri = format!("/api/assistant/sessions/{}", session.session_id);

        let req = test::TestRequest::delete().uri(&session_uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
        assert_eq!(harness.state.assistant.session_count().await, 0);

        let req = test::TestRequest::get()
            .uri(&format!("{}/messages", session_uri))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete().uri(&session_uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_welcome() {
        let harness = TestApp::empty().await;
        let app = test::init_service(harness.app()).await;

        let req = test::TestRequest::get().uri("/api/assistant/welcome").to_request();
        let body: AssistantWelcomeResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.capabilities.len(), 5);
        assert!(body.greeting.starts_with("Hello, I'm your AI CRM assistant"));
    }
}
