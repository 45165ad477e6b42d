use rand::seq::SliceRandom;
use shared_types::{ChatMessage, ChatRole, PostChatMessageResponse, CANNED_RESPONSES};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssistantError {
    #[error("Chat session not found")]
    SessionNotFound,
    #[error("The assistant is still answering the previous message")]
    ReplyPending,
}

struct Session {
    messages: Vec<ChatMessage>,
    last_active: Instant,
}

impl Session {
    fn new() -> Self {
        Self {
            messages: Vec::new(),
            last_active: Instant::now(),
        }
    }

    fn is_pending(&self) -> bool {
        self.messages.iter().any(|m| m.is_loading)
    }
}

/// In-memory chat sessions for the simulated assistant.
///
/// Each submission appends the user's message and one loading placeholder;
/// after `reply_delay` the placeholder is swapped for a canned reply.
/// Sessions untouched for `idle_ttl` are dropped when a new one is opened.
#[derive(Clone)]
pub struct AssistantStore {
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    reply_delay: Duration,
    idle_ttl: Duration,
}

impl AssistantStore {
    pub fn new(reply_delay: Duration, idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            reply_delay,
            idle_ttl,
        }
    }

    pub async fn create_session(&self) -> String {
        let session_id = uuid::Uuid::new_v4().to_string();
        let mut sessions = self.sessions.lock().await;

        let before = sessions.len();
        sessions.retain(|_, session| session.is_pending() || session.last_active.elapsed() < self.idle_ttl);
        if sessions.len() < before {
            tracing::debug!("Dropped {} idle assistant sessions", before - sessions.len());
        }

        sessions.insert(session_id.clone(), Session::new());
        session_id
    }

    pub async fn messages(&self, session_id: &str) -> Option<Vec<ChatMessage>> {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id).map(|session| session.messages.clone())
    }

    /// Clear a conversation. A reply still pending for it is discarded.
    pub async fn remove_session(&self, session_id: &str) -> Result<(), AssistantError> {
        let mut sessions = self.sessions.lock().await;
        sessions
            .remove(session_id)
            .map(|_| ())
            .ok_or(AssistantError::SessionNotFound)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn submit(
        &self,
        session_id: &str,
        content: &str,
    ) -> Result<PostChatMessageResponse, AssistantError> {
        let now = chrono::Utc::now().timestamp_millis();
        let user_message = ChatMessage {
            id: uuid::Uuid::new_v4().to_string(),
            role: ChatRole::User,
            content: content.to_string(),
            timestamp: now,
            is_loading: false,
        };
        let placeholder = ChatMessage {
            id: uuid::Uuid::new_v4().to_string(),
            role: ChatRole::Assistant,
            content: String::new(),
            timestamp: now,
            is_loading: true,
        };

        {
            let mut sessions = self.sessions.lock().await;
            let session = sessions
                .get_mut(session_id)
                .ok_or(AssistantError::SessionNotFound)?;

            if session.is_pending() {
                return Err(AssistantError::ReplyPending);
            }

            session.messages.push(user_message.clone());
            session.messages.push(placeholder.clone());
            session.last_active = Instant::now();
        }

        let sessions = self.sessions.clone();
        let delay = self.reply_delay;
        let session_id = session_id.to_string();
        let placeholder_id = placeholder.id.clone();

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let reply = ChatMessage {
                id: uuid::Uuid::new_v4().to_string(),
                role: ChatRole::Assistant,
                content: pick_canned_response().to_string(),
                timestamp: chrono::Utc::now().timestamp_millis(),
                is_loading: false,
            };

            let mut sessions = sessions.lock().await;
            if let Some(session) = sessions.get_mut(&session_id) {
                if let Some(slot) = session.messages.iter_mut().find(|m| m.id == placeholder_id) {
                    *slot = reply;
                }
                session.last_active = Instant::now();
            }
            tracing::debug!("Assistant replied in session {}", session_id);
        });

        Ok(PostChatMessageResponse {
            user_message,
            placeholder,
        })
    }
}

/// Uniform pick over the canned replies
pub fn pick_canned_response() -> &'static str {
    CANNED_RESPONSES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(CANNED_RESPONSES[0])
}
