pub mod auth;

use std::fmt;

use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};
use tracing::debug;

use super::{follows, likes, message};

/// A registered user of the platform.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Bcrypt hash of the user's password, never the plaintext.
    pub password: String,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // A user can post multiple messages.
    #[sea_orm(has_many = "super::message::Entity")]
    Message,
}

impl Related<message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Message.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User #{}: {}, {}>", self.id, self.username, self.email)
    }
}

impl Model {
    /// Messages posted by this user, newest first.
    pub async fn messages(&self, db: &DatabaseConnection) -> Result<Vec<message::Model>, DbErr> {
        self.find_related(message::Entity)
            .order_by_desc(message::Column::Timestamp)
            .all(db)
            .await
    }

    /// Start following `other`. Following the same user twice violates the
    /// pair's primary key and surfaces as a database error.
    pub async fn follow(
        &self,
        db: &DatabaseConnection,
        other: &Model,
    ) -> Result<follows::Model, DbErr> {
        debug!("{} starts following {}", self, other);
        follows::ActiveModel {
            follower_id: Set(self.id),
            followed_id: Set(other.id),
        }
        .insert(db)
        .await
    }

    /// Stop following `other`. Returns whether an association was removed.
    pub async fn unfollow(&self, db: &DatabaseConnection, other: &Model) -> Result<bool, DbErr> {
        debug!("{} unfollows {}", self, other);
        let res = follows::Entity::delete_by_id((self.id, other.id))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Whether this user follows `other`.
    pub async fn is_following(
        &self,
        db: &DatabaseConnection,
        other: &Model,
    ) -> Result<bool, DbErr> {
        Ok(follows::Entity::find_by_id((self.id, other.id))
            .one(db)
            .await?
            .is_some())
    }

    /// Whether `other` follows this user.
    pub async fn is_followed_by(
        &self,
        db: &DatabaseConnection,
        other: &Model,
    ) -> Result<bool, DbErr> {
        Ok(follows::Entity::find_by_id((other.id, self.id))
            .one(db)
            .await?
            .is_some())
    }

    /// All users this user follows.
    pub async fn following(&self, db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .join(JoinType::InnerJoin, follows::Relation::Followed.def().rev())
            .filter(follows::Column::FollowerId.eq(self.id))
            .all(db)
            .await
    }

    /// All users following this user.
    pub async fn followers(&self, db: &DatabaseConnection) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .join(JoinType::InnerJoin, follows::Relation::Follower.def().rev())
            .filter(follows::Column::FollowedId.eq(self.id))
            .all(db)
            .await
    }

    /// Like a message. Liking the same message twice violates the pair's
    /// primary key and surfaces as a database error.
    pub async fn like(
        &self,
        db: &DatabaseConnection,
        message: &message::Model,
    ) -> Result<likes::Model, DbErr> {
        debug!("{} likes message {}", self, message.id);
        likes::ActiveModel {
            user_id: Set(self.id),
            message_id: Set(message.id),
        }
        .insert(db)
        .await
    }

    /// Remove a like. Returns whether an association was removed.
    pub async fn unlike(
        &self,
        db: &DatabaseConnection,
        message: &message::Model,
    ) -> Result<bool, DbErr> {
        let res = likes::Entity::delete_by_id((self.id, message.id))
            .exec(db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    /// Whether this user has liked the given message.
    pub async fn has_liked(
        &self,
        db: &DatabaseConnection,
        message: &message::Model,
    ) -> Result<bool, DbErr> {
        Ok(likes::Entity::find_by_id((self.id, message.id))
            .one(db)
            .await?
            .is_some())
    }

    /// All messages this user has liked.
    pub async fn liked_messages(
        &self,
        db: &DatabaseConnection,
    ) -> Result<Vec<message::Model>, DbErr> {
        message::Entity::find()
            .join(JoinType::InnerJoin, likes::Relation::Message.def().rev())
            .filter(likes::Column::UserId.eq(self.id))
            .all(db)
            .await
    }
}
