//! This file serves as the root for all SeaORM entity modules.
//! We define the data models for the social feed application here:
//! users, the messages they post, and the follow and like association
//! tables connecting them.

pub mod follows;
pub mod likes;
pub mod message;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::follows::Entity as Follows;
    pub use super::likes::Entity as Likes;
    pub use super::message::Entity as Message;
    pub use super::user::Entity as User;
}

#[cfg(test)]
mod test {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, QueryFilter, QuerySelect, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        // Connect to the SQLite database
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        // Try to apply migrations first
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        // Setup database
        let db = setup_db().await?;

        // Create users
        let user1 = user::ActiveModel {
            username: Set("user1".to_string()),
            email: Set("user1@test.com".to_string()),
            password: Set("HASHED_PASSWORD".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let user2 = user::ActiveModel {
            username: Set("user2".to_string()),
            email: Set("user2@test.com".to_string()),
            password: Set("HASHED_PASSWORD".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Create messages
        let message1 = message::ActiveModel {
            text: Set("first post".to_string()),
            user_id: Set(user1.id),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let message2 = message::ActiveModel {
            text: Set("second post".to_string()),
            user_id: Set(user1.id),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let message3 = message::ActiveModel {
            text: Set("hello from user2".to_string()),
            user_id: Set(user2.id),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // user2 follows user1
        let follow = follows::ActiveModel {
            follower_id: Set(user2.id),
            followed_id: Set(user1.id),
        }
        .insert(&db)
        .await?;

        // user2 likes user1's first message
        let like = likes::ActiveModel {
            user_id: Set(user2.id),
            message_id: Set(message1.id),
        }
        .insert(&db)
        .await?;

        // Read back and verify data

        // Verify users
        let users = User::find().all(&db).await?;
        assert_eq!(users.len(), 2);
        assert!(users.iter().any(|u| u.username == "user1"));
        assert!(users.iter().any(|u| u.username == "user2"));

        // Verify messages
        let messages = Message::find().all(&db).await?;
        assert_eq!(messages.len(), 3);
        assert!(messages.iter().any(|m| m.text == "first post"));
        assert!(messages
            .iter()
            .any(|m| m.id == message3.id && m.user_id == user2.id));

        // Verify the follow relationship
        let follow_rows = Follows::find().all(&db).await?;
        assert_eq!(follow_rows.len(), 1);
        assert_eq!(follow_rows[0].follower_id, user2.id);
        assert_eq!(follow_rows[0].followed_id, user1.id);
        assert_eq!(follow_rows[0], follow);

        // Verify the like relationship
        let like_rows = Likes::find().all(&db).await?;
        assert_eq!(like_rows.len(), 1);
        assert_eq!(like_rows[0].user_id, like.user_id);
        assert_eq!(like_rows[0].message_id, message1.id);

        // Get the users user2 follows through the join table
        let followed = User::find()
            .join_as(
                sea_orm::JoinType::InnerJoin,
                user::Entity::belongs_to(follows::Entity)
                    .from(user::Column::Id)
                    .to(follows::Column::FollowedId)
                    .into(),
                follows::Entity,
            )
            .filter(follows::Column::FollowerId.eq(user2.id))
            .all(&db)
            .await?;

        assert_eq!(followed.len(), 1);
        assert_eq!(followed[0].id, user1.id);

        // Get messages for user1
        let user1_messages = Message::find()
            .filter(message::Column::UserId.eq(user1.id))
            .all(&db)
            .await?;

        assert_eq!(user1_messages.len(), 2);
        assert!(user1_messages.iter().any(|m| m.id == message2.id));

        Ok(())
    }
}
