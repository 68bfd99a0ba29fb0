use crate::error::{AppError, Result};
use crate::message::message_dto::{DirectContact, InboxEntry, InboxKind};
use crate::message::message_models::{Message, MessageResponse};
use crate::message::message_repository::MessageRepository;
use crate::sanitize;
use crate::team::{team_models::Team, team_service::TeamService};
use crate::user::user_repository::UserRepository;
use crate::websocket::{
    types::{DirectMessagePayload, TeamMessagePayload, WsMessage},
    GroupKey, RoomRouter,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct MessageService {
    repo: MessageRepository,
    user_repo: UserRepository,
    team_service: TeamService,
    router: RoomRouter,
}

impl MessageService {
    pub fn new(
        repo: MessageRepository,
        user_repo: UserRepository,
        team_service: TeamService,
        router: RoomRouter,
    ) -> Self {
        Self {
            repo,
            user_repo,
            team_service,
            router,
        }
    }

    /// Persist a team message, then fan it out to the team's room.
    ///
    /// The broadcast happens only after the insert commits; a failed persist
    /// means nothing goes out.
    pub async fn send_team_message(
        &self,
        sender_id: Uuid,
        team_id: Uuid,
        content: &str,
    ) -> Result<Message> {
        let content = sanitize::clean_message(content);
        if content.trim().is_empty() {
            return Err(AppError::BadRequest("Message content is empty".to_string()));
        }

        self.team_service.verify_membership(team_id, sender_id).await?;

        let sender = self
            .user_repo
            .find_by_id(sender_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unknown sender".to_string()))?;

        let message = self.repo.create_team(sender_id, team_id, &content).await?;

        self.router.broadcast(
            &GroupKey::team(team_id),
            WsMessage::TeamMessageReceived(TeamMessagePayload {
                team_id,
                sender_id,
                sender_name: sender.name,
                content: message.content.clone(),
            }),
        );

        Ok(message)
    }

    /// Persist a direct message, then fan it out to the pair's room.
    pub async fn send_direct_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: &str,
    ) -> Result<Message> {
        let content = sanitize::clean_message(content);
        if content.trim().is_empty() {
            return Err(AppError::BadRequest("Message content is empty".to_string()));
        }

        if receiver_id == sender_id {
            return Err(AppError::BadRequest(
                "Cannot message yourself".to_string(),
            ));
        }

        self.user_repo
            .find_by_id(receiver_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Receiver not found".to_string()))?;

        let sender = self
            .user_repo
            .find_by_id(sender_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Unknown sender".to_string()))?;

        let message = self
            .repo
            .create_direct(sender_id, receiver_id, &content)
            .await?;

        self.router.broadcast(
            &GroupKey::direct(sender_id, receiver_id),
            WsMessage::DirectMessageReceived(DirectMessagePayload {
                sender_id,
                sender_name: sender.name,
                content: message.content.clone(),
            }),
        );

        Ok(message)
    }

    /// Direct-message history with one counterpart, annotated for the viewer.
    pub async fn direct_history(
        &self,
        viewer_id: Uuid,
        other_user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<MessageResponse>, i64)> {
        self.user_repo
            .find_by_id(other_user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let messages = self
            .repo
            .find_direct_conversation(viewer_id, other_user_id, limit, offset)
            .await?;
        let total = self
            .repo
            .count_direct_conversation(viewer_id, other_user_id)
            .await?;

        let responses = messages
            .into_iter()
            .map(|m| MessageResponse::for_viewer(m, viewer_id))
            .collect();

        Ok((responses, total))
    }

    /// Team history, annotated for the viewer. Members only.
    pub async fn team_history(
        &self,
        viewer_id: Uuid,
        team_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<MessageResponse>, i64)> {
        self.team_service.verify_membership(team_id, viewer_id).await?;

        let messages = self.repo.find_team_messages(team_id, limit, offset).await?;
        let total = self.repo.count_team_messages(team_id).await?;

        let responses = messages
            .into_iter()
            .map(|m| MessageResponse::for_viewer(m, viewer_id))
            .collect();

        Ok((responses, total))
    }

    pub async fn direct_contacts(&self, user_id: Uuid) -> Result<Vec<DirectContact>> {
        self.repo.find_direct_contacts(user_id).await
    }

    /// Combined inbox: direct conversations first, then team conversations.
    pub async fn inbox(&self, user_id: Uuid) -> Result<Vec<InboxEntry>> {
        let contacts = self.repo.find_direct_contacts(user_id).await?;
        let teams = self.team_service.member_teams(user_id).await?;

        Ok(build_inbox(contacts, teams))
    }
}

/// Merge direct counterparts and team memberships into one inbox listing.
///
/// Direct entries come first, then teams; within each kind the order is by
/// underlying id so repeated calls list conversations stably.
pub fn build_inbox(mut contacts: Vec<DirectContact>, mut teams: Vec<Team>) -> Vec<InboxEntry> {
    contacts.sort_by_key(|c| c.id);
    teams.sort_by_key(|t| t.id);

    let mut entries = Vec::with_capacity(contacts.len() + teams.len());

    entries.extend(contacts.into_iter().map(|c| InboxEntry {
        id: c.id,
        name: c.name,
        kind: InboxKind::Direct,
    }));
    entries.extend(teams.into_iter().map(|t| InboxEntry {
        id: t.id,
        name: t.name,
        kind: InboxKind::Team,
    }));

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn contact(name: &str) -> DirectContact {
        DirectContact {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    fn team(name: &str) -> Team {
        Team {
            id: Uuid::new_v4(),
            name: name.to_string(),
            creator_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn inbox_lists_direct_conversations_before_teams() {
        let inbox = build_inbox(vec![contact("bob")], vec![team("alpha"), team("beta")]);

        assert_eq!(inbox.len(), 3);
        assert_eq!(inbox[0].kind, InboxKind::Direct);
        assert_eq!(inbox[0].name, "bob");
        assert_eq!(inbox[1].kind, InboxKind::Team);
        assert_eq!(inbox[2].kind, InboxKind::Team);
    }

    #[test]
    fn inbox_orders_each_kind_by_id() {
        let mut contacts = vec![contact("a"), contact("b"), contact("c")];
        let sorted_ids: Vec<Uuid> = {
            let mut ids: Vec<Uuid> = contacts.iter().map(|c| c.id).collect();
            ids.sort();
            ids
        };
        // Present them unsorted
        contacts.reverse();

        let inbox = build_inbox(contacts, vec![]);
        let listed_ids: Vec<Uuid> = inbox.iter().map(|e| e.id).collect();

        assert_eq!(listed_ids, sorted_ids);
    }

    #[test]
    fn empty_inbox_is_empty() {
        assert!(build_inbox(vec![], vec![]).is_empty());
    }
}
