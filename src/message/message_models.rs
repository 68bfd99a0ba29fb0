use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Option<Uuid>, // Set for direct messages
    pub team_id: Option<Uuid>,     // Set for team messages
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A message joined with its sender's display name, as read back for history.
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithSender {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A history entry annotated for one viewer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Whether the requesting viewer sent this message.
    pub is_own: bool,
}

impl MessageResponse {
    pub fn for_viewer(message: MessageWithSender, viewer_id: Uuid) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            sender_name: message.sender_name,
            content: message.content,
            created_at: message.created_at,
            is_own: message.sender_id == viewer_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_own_reflects_the_viewer_not_the_message() {
        let sender = Uuid::new_v4();
        let receiver = Uuid::new_v4();
        let row = MessageWithSender {
            id: Uuid::new_v4(),
            sender_id: sender,
            sender_name: "alice".to_string(),
            content: "hi".to_string(),
            created_at: Utc::now(),
        };

        let as_sender = MessageResponse::for_viewer(row.clone(), sender);
        let as_receiver = MessageResponse::for_viewer(row, receiver);

        assert!(as_sender.is_own);
        assert!(!as_receiver.is_own);
        assert_eq!(as_sender.id, as_receiver.id);
        assert_eq!(as_sender.content, as_receiver.content);
    }
}
