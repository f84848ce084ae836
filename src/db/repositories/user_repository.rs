use uuid::Uuid;

use crate::db::error::StoreError;
use crate::db::models::{User, UserRole};
use crate::db::store::Collections;

pub struct UserRepository;

impl UserRepository {
    /// Inserts a user, enforcing case-insensitive email uniqueness.
    pub fn insert(col: &mut Collections, user: User) -> Result<(), StoreError> {
        if Self::find_by_email(col, &user.email).is_some() {
            return Err(StoreError::Duplicate(format!("email '{}'", user.email)));
        }
        col.users.insert(user.id, user);
        Ok(())
    }

    pub fn get(col: &Collections, user_id: Uuid) -> Option<&User> {
        col.users.get(&user_id)
    }

    pub fn get_mut(col: &mut Collections, user_id: Uuid) -> Option<&mut User> {
        col.users.get_mut(&user_id)
    }

    pub fn find_by_email<'a>(col: &'a Collections, email: &str) -> Option<&'a User> {
        let email = email.to_lowercase();
        col.users.values().find(|u| u.email.to_lowercase() == email)
    }

    pub fn students(col: &Collections) -> impl Iterator<Item = &User> {
        col.users
            .values()
            .filter(|u| u.role == UserRole::Student)
    }

    pub fn count_by_role(col: &Collections, role: UserRole) -> usize {
        col.users.values().filter(|u| u.role == role).count()
    }
}
