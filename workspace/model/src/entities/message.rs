use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ModelTrait, Set};

use super::user;

/// A short text message posted by a single user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub text: String,
    /// When the message was posted. Filled in at creation time.
    pub timestamp: chrono::NaiveDateTime,
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::UserId",
        to = "user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {
    /// Stamp new messages with the current UTC time. Rows built without
    /// `new` fall back to the column's database-side default.
    fn new() -> Self {
        Self {
            timestamp: Set(Utc::now().naive_utc()),
            ..ActiveModelTrait::default()
        }
    }
}

impl Model {
    /// The user who posted this message.
    pub async fn author(&self, db: &DatabaseConnection) -> Result<Option<user::Model>, DbErr> {
        self.find_related(user::Entity).one(db).await
    }
}
