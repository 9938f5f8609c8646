//! User entity <-> model mapper

use foodshare_core::entities::User;
use foodshare_core::value_objects::Snowflake;

use crate::models::UserModel;

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            name: model.name,
            email: model.email,
            location: model.location,
            phone: model.phone,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Convert User entity reference to values for database insertion
pub struct UserInsert<'a> {
    pub id: i64,
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub location: &'a str,
    pub phone: Option<&'a str>,
}

impl<'a> UserInsert<'a> {
    pub fn new(user: &'a User, password_hash: &'a str) -> Self {
        Self {
            id: user.id.into_inner(),
            name: &user.name,
            email: &user.email,
            password_hash,
            location: &user.location,
            phone: user.phone.as_deref(),
        }
    }
}
