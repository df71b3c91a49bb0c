//! Operations performed on behalf of the authenticated user.

use pb_models::phone::{Phone, PhoneCreate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::phone::PhonePost;
use crate::prelude::*;
use crate::traits::storage::Storage;

/// The user a request acts for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtxUser {
    /// The user id taken from the session token.
    pub id: i64,
}

impl CtxUser {
    /// Stores a new phone owned by this user.
    ///
    /// Ownership always comes from the session, never from the request body.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pb_web::ctx::ctx_user::CtxUser;
    /// use pb_web::phone::PhonePost;
    /// # use pb_web::traits::storage::Storage;
    ///
    /// # fn example(storage: &dyn Storage) -> Result<(), Box<dyn std::error::Error>> {
    /// let user = CtxUser { id: 1 };
    /// let phone = user.add_phone(
    ///     PhonePost {
    ///         phone: "+1 555 0100".to_string(),
    ///         description: "office".to_string(),
    ///         is_fax: false,
    ///     },
    ///     storage,
    /// )?;
    /// assert_eq!(phone.user_id, 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_phone(&self, payload: PhonePost, storage: &dyn Storage) -> Result<Phone> {
        let phone = storage.insert_phone(PhoneCreate {
            user_id: self.id,
            phone: payload.phone,
            description: payload.description,
            is_fax: payload.is_fax,
        })?;

        info!("User {} added phone {}", self.id, phone.id);
        Ok(phone)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::{memory::MemoryStorage, storage::PhoneStorage};

    #[test]
    fn test_add_phone_is_owned_by_caller() {
        let storage = MemoryStorage::new();
        let user = CtxUser { id: 42 };

        let phone = user
            .add_phone(
                PhonePost {
                    phone: String::from("555-0100"),
                    description: String::new(),
                    is_fax: true,
                },
                &storage,
            )
            .unwrap();

        assert_eq!(phone.user_id, 42);
        assert!(phone.is_fax);
        assert_eq!(storage.phone_by_id(phone.id).unwrap(), Some(phone));
    }

    #[test]
    fn test_add_phone_storage_failure() {
        let storage = MemoryStorage::new();
        storage.set_failing(true);

        let result = CtxUser { id: 1 }.add_phone(
            PhonePost {
                phone: String::from("555-0100"),
                description: String::new(),
                is_fax: false,
            },
            &storage,
        );
        assert!(matches!(result, Err(Error::Models(_))));
    }
}
