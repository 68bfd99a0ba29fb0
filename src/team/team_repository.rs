use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

use super::team_models::{PendingRequestResponse, Team, TeamRequest};

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a team together with its two initial memberships.
    ///
    /// Runs in one transaction: the team row and both membership rows all
    /// commit, or none of them exist.
    pub async fn create_with_members(
        &self,
        name: &str,
        creator_id: Uuid,
        member_id: Uuid,
    ) -> Result<Team> {
        let mut tx = self.pool.begin().await?;

        let team = sqlx::query_as::<_, Team>(
            "INSERT INTO teams (name, creator_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(creator_id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO team_members (team_id, user_id) VALUES ($1, $2)")
            .bind(team.id)
            .bind(creator_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO team_members (team_id, user_id) VALUES ($1, $2)")
            .bind(team.id)
            .bind(member_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(team)
    }

    pub async fn find_by_id(&self, team_id: Uuid) -> Result<Option<Team>> {
        let team = sqlx::query_as::<_, Team>("SELECT * FROM teams WHERE id = $1")
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(team)
    }

    pub async fn find_user_teams(&self, user_id: Uuid) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            "SELECT t.* FROM teams t
             INNER JOIN team_members tm ON t.id = tm.team_id
             WHERE tm.user_id = $1
             ORDER BY t.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn is_member(&self, team_id: Uuid, user_id: Uuid) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM team_members
             WHERE team_id = $1 AND user_id = $2",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// True iff some team has both users as members. Symmetric in its
    /// arguments: the join does not care which side is which.
    pub async fn shared_team(&self, user_a: Uuid, user_b: Uuid) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM team_members tm1
             INNER JOIN team_members tm2 ON tm1.team_id = tm2.team_id
             WHERE tm1.user_id = $1 AND tm2.user_id = $2",
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    pub async fn get_member_count(&self, team_id: Uuid) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM team_members WHERE team_id = $1")
                .bind(team_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    pub async fn rename(&self, team_id: Uuid, name: &str) -> Result<Team> {
        let team = sqlx::query_as::<_, Team>(
            "UPDATE teams
             SET name = $1, updated_at = NOW()
             WHERE id = $2
             RETURNING *",
        )
        .bind(name)
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(team)
    }

    pub async fn create_request(&self, sender_id: Uuid, receiver_id: Uuid) -> Result<TeamRequest> {
        let request = sqlx::query_as::<_, TeamRequest>(
            "INSERT INTO team_requests (sender_id, receiver_id, status)
             VALUES ($1, $2, 'pending')
             RETURNING *",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn find_pending_requests(
        &self,
        receiver_id: Uuid,
    ) -> Result<Vec<PendingRequestResponse>> {
        let requests = sqlx::query_as::<_, PendingRequestResponse>(
            "SELECT tr.id, tr.sender_id, u.name AS sender_name, tr.created_at
             FROM team_requests tr
             INNER JOIN users u ON tr.sender_id = u.id
             WHERE tr.receiver_id = $1 AND tr.status = 'pending'
             ORDER BY tr.created_at",
        )
        .bind(receiver_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}
