//! Storage seam between the web layer and the database.
//!
//! Handlers only talk to storage through these traits. [`DbConnection`]
//! implements them on top of the Diesel models; tests plug in an in-memory
//! implementation.

use pb_models::{
    db::connection::DbConnection,
    phone::{Phone, PhoneCreate},
    prelude::Result,
    user::{User, UserCreate},
};

pub trait UserStorage {
    fn insert_user(&self, user: UserCreate) -> Result<User>;
    fn user_by_login(&self, login: &str) -> Result<Option<User>>;
    fn user_by_name(&self, name: &str) -> Result<Option<User>>;
}

pub trait PhoneStorage {
    fn insert_phone(&self, phone: PhoneCreate) -> Result<Phone>;
    fn phone_by_id(&self, id: i64) -> Result<Option<Phone>>;
    /// Returns whether a row was updated.
    fn update_phone(&self, phone: &Phone) -> Result<bool>;
    fn phones_with_number(&self, fragment: &str) -> Result<Vec<Phone>>;
    /// Returns whether a row was deleted.
    fn delete_phone(&self, id: i64) -> Result<bool>;
}

/// Everything the service persists.
pub trait Storage: UserStorage + PhoneStorage + Send + Sync {}

impl<T: UserStorage + PhoneStorage + Send + Sync> Storage for T {}

impl UserStorage for DbConnection {
    fn insert_user(&self, user: UserCreate) -> Result<User> {
        user.save(self)
    }

    fn user_by_login(&self, login: &str) -> Result<Option<User>> {
        User::fetch_by_login(login, self)
    }

    fn user_by_name(&self, name: &str) -> Result<Option<User>> {
        User::fetch_by_name(name, self)
    }
}

impl PhoneStorage for DbConnection {
    fn insert_phone(&self, phone: PhoneCreate) -> Result<Phone> {
        phone.save(self)
    }

    fn phone_by_id(&self, id: i64) -> Result<Option<Phone>> {
        Phone::fetch_by_id(id, self)
    }

    fn update_phone(&self, phone: &Phone) -> Result<bool> {
        Ok(phone.update(self)? > 0)
    }

    fn phones_with_number(&self, fragment: &str) -> Result<Vec<Phone>> {
        Phone::fetch_all_with_number(fragment, self)
    }

    fn delete_phone(&self, id: i64) -> Result<bool> {
        Phone::delete(id, self)
    }
}
