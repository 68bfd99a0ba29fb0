use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::room::GroupKey;
use super::types::WsMessage;

pub type WsSender = mpsc::UnboundedSender<WsMessage>;

struct Connection {
    user_id: Uuid,
    sender: WsSender,
}

/// Tracks live socket connections and their group subscriptions.
///
/// Delivery is best-effort: a send to a closed channel prunes that
/// subscriber, nothing is queued or retried. A client that was offline
/// re-fetches history on reconnect.
#[derive(Clone)]
pub struct RoomRouter {
    connections: Arc<DashMap<Uuid, Connection>>,
    rooms: Arc<DashMap<GroupKey, HashSet<Uuid>>>,
}

impl RoomRouter {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
            rooms: Arc::new(DashMap::new()),
        }
    }

    /// Register a freshly authenticated socket.
    pub fn add_connection(&self, conn_id: Uuid, user_id: Uuid, sender: WsSender) {
        self.connections.insert(conn_id, Connection { user_id, sender });
    }

    /// Subscribe a connection to a group. Idempotent.
    pub fn join(&self, key: GroupKey, conn_id: Uuid) {
        self.rooms.entry(key).or_default().insert(conn_id);
    }

    /// Deliver a message to every connection currently subscribed to `key`.
    ///
    /// Returns the number of connections reached. Subscribers whose channel
    /// has closed are dropped from the group on the way through.
    pub fn broadcast(&self, key: &GroupKey, message: WsMessage) -> usize {
        let mut delivered = 0;

        if let Some(mut subscribers) = self.rooms.get_mut(key) {
            subscribers.retain(|conn_id| match self.connections.get(conn_id) {
                Some(conn) => {
                    if conn.sender.send(message.clone()).is_ok() {
                        delivered += 1;
                        true
                    } else {
                        false
                    }
                }
                None => false,
            });
        }

        delivered
    }

    /// Push a message to every live connection belonging to one user,
    /// regardless of room membership.
    pub fn send_to_user(&self, user_id: &Uuid, message: WsMessage) {
        for entry in self.connections.iter() {
            if entry.user_id == *user_id {
                let _ = entry.sender.send(message.clone());
            }
        }
    }

    /// Drop a connection from the registry and from every group it joined.
    pub fn remove_connection(&self, conn_id: &Uuid) {
        self.connections.remove(conn_id);
        for mut entry in self.rooms.iter_mut() {
            entry.value_mut().remove(conn_id);
        }
        self.rooms.retain(|_, subscribers| !subscribers.is_empty());
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn room_size(&self, key: &GroupKey) -> usize {
        self.rooms.get(key).map(|subs| subs.len()).unwrap_or(0)
    }
}

impl Default for RoomRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::websocket::types::{TeamMessagePayload, WsMessage};

    fn payload(content: &str) -> WsMessage {
        WsMessage::TeamMessageReceived(TeamMessagePayload {
            team_id: Uuid::new_v4(),
            sender_id: Uuid::new_v4(),
            sender_name: "alice".to_string(),
            content: content.to_string(),
        })
    }

    #[tokio::test]
    async fn broadcast_reaches_only_joined_connections() {
        let router = RoomRouter::new();
        let key = GroupKey::team(Uuid::new_v4());

        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let conn_a = Uuid::new_v4();
        let conn_b = Uuid::new_v4();

        router.add_connection(conn_a, Uuid::new_v4(), tx_a);
        router.add_connection(conn_b, Uuid::new_v4(), tx_b);
        router.join(key, conn_a);
        // conn_b never joins

        let delivered = router.broadcast(&key, payload("hi"));
        assert_eq!(delivered, 1);
        assert!(rx_a.recv().await.is_some());
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn join_is_idempotent() {
        let router = RoomRouter::new();
        let key = GroupKey::team(Uuid::new_v4());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = Uuid::new_v4();
        router.add_connection(conn, Uuid::new_v4(), tx);

        router.join(key, conn);
        router.join(key, conn);
        assert_eq!(router.room_size(&key), 1);

        router.broadcast(&key, payload("once"));
        assert!(rx.recv().await.is_some());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn removed_connection_receives_nothing() {
        let router = RoomRouter::new();
        let key = GroupKey::direct(Uuid::new_v4(), Uuid::new_v4());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let conn = Uuid::new_v4();
        router.add_connection(conn, Uuid::new_v4(), tx);
        router.join(key, conn);

        router.remove_connection(&conn);
        assert_eq!(router.connection_count(), 0);

        let delivered = router.broadcast(&key, payload("gone"));
        assert_eq!(delivered, 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn closed_channel_is_pruned_on_broadcast() {
        let router = RoomRouter::new();
        let key = GroupKey::team(Uuid::new_v4());

        let (tx, rx) = mpsc::unbounded_channel();
        let conn = Uuid::new_v4();
        router.add_connection(conn, Uuid::new_v4(), tx);
        router.join(key, conn);
        drop(rx);

        let delivered = router.broadcast(&key, payload("lost"));
        assert_eq!(delivered, 0);
        assert_eq!(router.room_size(&key), 0);
    }

    #[tokio::test]
    async fn send_to_user_hits_all_of_their_sockets() {
        let router = RoomRouter::new();
        let user_id = Uuid::new_v4();

        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let (tx_other, mut rx_other) = mpsc::unbounded_channel();

        router.add_connection(Uuid::new_v4(), user_id, tx1);
        router.add_connection(Uuid::new_v4(), user_id, tx2);
        router.add_connection(Uuid::new_v4(), Uuid::new_v4(), tx_other);

        router.send_to_user(&user_id, payload("direct"));
        assert!(rx1.recv().await.is_some());
        assert!(rx2.recv().await.is_some());
        assert!(rx_other.try_recv().is_err());
    }
}
