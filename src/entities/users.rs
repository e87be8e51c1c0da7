use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    /// Hex SHA-256 of the password text followed by the hex salt
    pub password_hash: String,

    /// 32 random bytes, hex-encoded (64 chars)
    pub salt: String,

    /// Filled by SQLite `CURRENT_TIMESTAMP` on insert.
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
