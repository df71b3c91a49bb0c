//! Phone record operations behind the protected routes.

use pb_models::phone::Phone;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::prelude::*;
use crate::traits::storage::Storage;

/// Body of a phone creation request. The owner comes from the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhonePost {
    pub phone: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_fax: bool,
}

/// Body of a phone update request.
///
/// Every column is overwritten. When `user_id` is absent the current owner
/// is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhonePut {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub phone: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_fax: bool,
}

/// Query string of a phone search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhoneSearch {
    /// Substring of the number. Absent matches every phone.
    #[serde(default)]
    pub q: String,
}

/// Overwrites an existing phone record.
pub fn update_phone(payload: PhonePut, storage: &dyn Storage) -> Result<Phone> {
    let current = storage.phone_by_id(payload.id)?.ok_or(Error::NotFound)?;

    let phone = Phone {
        id: current.id,
        user_id: payload.user_id.unwrap_or(current.user_id),
        phone: payload.phone,
        description: payload.description,
        is_fax: payload.is_fax,
    };

    // The row may vanish between the lookup and the write.
    if !storage.update_phone(&phone)? {
        return Err(Error::NotFound);
    }
    info!("Updated phone {}", phone.id);
    Ok(phone)
}

/// Lists every phone whose number contains `fragment`.
pub fn search_phones(fragment: &str, storage: &dyn Storage) -> Result<Vec<Phone>> {
    Ok(storage.phones_with_number(fragment)?)
}

/// Parses a phone id taken from a path segment. Ids start at 1.
///
/// # Examples
///
/// ```rust
/// use pb_web::phone::parse_phone_id;
///
/// assert_eq!(parse_phone_id("12").unwrap(), 12);
/// assert!(parse_phone_id("0").is_err());
/// assert!(parse_phone_id("twelve").is_err());
/// ```
pub fn parse_phone_id(raw: &str) -> Result<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(Error::BadRequest(String::from("invalid id format"))),
    }
}

/// Deletes the phone with id `id`.
pub fn delete_phone(id: i64, storage: &dyn Storage) -> Result<()> {
    if !storage.delete_phone(id)? {
        return Err(Error::NotFound);
    }
    info!("Deleted phone {id}");
    Ok(())
}
