use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Server-to-client events.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    TeamMessageReceived(TeamMessagePayload),
    DirectMessageReceived(DirectMessagePayload),
    TeamJoined(TeamJoinedPayload),
    TeamNameUpdated(TeamNameUpdatedPayload),
    Error(ErrorPayload),
    Ping,
    Pong,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamMessagePayload {
    pub team_id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DirectMessagePayload {
    pub sender_id: Uuid,
    pub sender_name: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamJoinedPayload {
    pub team_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamNameUpdatedPayload {
    pub team_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorPayload {
    pub message: String,
}

// Client-to-server messages
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    JoinTeamRoom {
        team_id: Uuid,
    },
    JoinDirectRoom {
        user_id: Uuid,
    },
    SendTeamMessage {
        team_id: Uuid,
        content: String,
    },
    SendDirectMessage {
        receiver_id: Uuid,
        content: String,
    },
    Ping,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_messages_parse_from_tagged_json() {
        let team_id = Uuid::new_v4();
        let json = format!(
            r#"{{"type":"send_team_message","team_id":"{}","content":"hello"}}"#,
            team_id
        );

        let msg: ClientMessage = serde_json::from_str(&json).unwrap();
        match msg {
            ClientMessage::SendTeamMessage { team_id: id, content } => {
                assert_eq!(id, team_id);
                assert_eq!(content, "hello");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn server_events_serialize_with_snake_case_tag() {
        let msg = WsMessage::TeamNameUpdated(TeamNameUpdatedPayload {
            team_id: Uuid::new_v4(),
            name: "Night Crew".to_string(),
        });

        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains(r#""type":"team_name_updated""#));
        assert!(json.contains(r#""name":"Night Crew""#));
    }

    #[test]
    fn ping_round_trips() {
        let json = serde_json::to_string(&WsMessage::Ping).unwrap();
        assert_eq!(json, r#"{"type":"ping"}"#);
    }
}
