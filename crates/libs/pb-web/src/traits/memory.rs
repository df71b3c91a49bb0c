//! In-memory [`Storage`](super::storage::Storage) for tests.

use std::sync::{
    Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use pb_models::{
    phone::{Phone, PhoneCreate},
    prelude::*,
    user::{User, UserCreate},
};

use super::storage::{PhoneStorage, UserStorage};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    phones: Vec<Phone>,
    next_user_id: i64,
    next_phone_id: i64,
}

/// Storage kept in process memory.
///
/// Logins are unique and ids count up from 1, as in the SQL schema.
#[derive(Default)]
pub struct MemoryStorage {
    tables: Mutex<Tables>,
    failing: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail as if the database were gone.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Diesel(DieselError::BrokenTransactionManager));
        }
        Ok(self.tables.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl UserStorage for MemoryStorage {
    fn insert_user(&self, user: UserCreate) -> Result<User> {
        let mut tables = self.tables()?;
        if tables.users.iter().any(|u| u.login == user.login) {
            return Err(Error::Diesel(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                Box::new(String::from("users_login_key")),
            )));
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            login: user.login,
            password: user.password,
            name: user.name,
            age: user.age,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    fn user_by_login(&self, login: &str) -> Result<Option<User>> {
        Ok(self.tables()?.users.iter().find(|u| u.login == login).cloned())
    }

    fn user_by_name(&self, name: &str) -> Result<Option<User>> {
        Ok(self.tables()?.users.iter().find(|u| u.name == name).cloned())
    }
}

impl PhoneStorage for MemoryStorage {
    fn insert_phone(&self, phone: PhoneCreate) -> Result<Phone> {
        let mut tables = self.tables()?;
        tables.next_phone_id += 1;
        let phone = Phone {
            id: tables.next_phone_id,
            user_id: phone.user_id,
            phone: phone.phone,
            description: phone.description,
            is_fax: phone.is_fax,
        };
        tables.phones.push(phone.clone());
        Ok(phone)
    }

    fn phone_by_id(&self, id: i64) -> Result<Option<Phone>> {
        Ok(self.tables()?.phones.iter().find(|p| p.id == id).cloned())
    }

    fn update_phone(&self, phone: &Phone) -> Result<bool> {
        let mut tables = self.tables()?;
        match tables.phones.iter_mut().find(|p| p.id == phone.id) {
            Some(stored) => {
                *stored = phone.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn phones_with_number(&self, fragment: &str) -> Result<Vec<Phone>> {
        Ok(self
            .tables()?
            .phones
            .iter()
            .filter(|p| p.phone.contains(fragment))
            .cloned()
            .collect())
    }

    fn delete_phone(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables()?;
        let before = tables.phones.len();
        tables.phones.retain(|p| p.id != id);
        Ok(tables.phones.len() < before)
    }
}
