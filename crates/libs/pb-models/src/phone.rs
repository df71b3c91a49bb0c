//! Phone numbers owned by users.

use crate::prelude::*;
use crate::{db::connection::DbConnection, schema::phones::dsl::*};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A phone number record.
#[derive(
    Debug, Clone, Queryable, Selectable, Identifiable, AsChangeset, PartialEq, Serialize, Deserialize,
)]
#[diesel(table_name = crate::schema::phones)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Phone {
    pub id: i64,
    pub user_id: i64,
    pub phone: String,
    pub description: String,
    pub is_fax: bool,
}

/// Data for creating a new phone record.
#[derive(Insertable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = crate::schema::phones)]
pub struct PhoneCreate {
    pub user_id: i64,
    pub phone: String,
    pub description: String,
    pub is_fax: bool,
}

impl PhoneCreate {
    /// Inserts the phone and returns the stored row.
    pub fn save(self, connection: &DbConnection) -> Result<Phone> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(phones)
            .values(&self)
            .returning(Phone::as_returning())
            .get_result(conn)?)
    }
}

impl Phone {
    pub fn fetch_by_id(target: i64, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(Phone::by_id(target)
            .select(Phone::as_select())
            .first(conn)
            .optional()?)
    }

    /// Fetches every phone whose number contains `fragment`.
    pub fn fetch_all_with_number(fragment: &str, connection: &DbConnection) -> Result<Vec<Self>> {
        let conn = &mut connection.pool.get()?;
        let pattern = format!("%{}%", escape_like(fragment));

        Ok(phones
            .filter(phone.like(pattern).escape('\\'))
            .order(id.asc())
            .select(Phone::as_select())
            .load(conn)?)
    }

    /// Overwrites every column of the row identified by `self.id`.
    ///
    /// Returns the number of updated rows.
    pub fn update(&self, connection: &DbConnection) -> Result<usize> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::update(phones.filter(id.eq(self.id)))
            .set(self)
            .execute(conn)?)
    }

    /// Deletes the phone with id `target`. Returns whether a row was removed.
    pub fn delete(target: i64, connection: &DbConnection) -> Result<bool> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::delete(Phone::by_id(target)).execute(conn)? > 0)
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: i64) -> _ {
        crate::schema::phones::dsl::phones.filter(id.eq(target))
    }
}

/// Escapes LIKE wildcards so `fragment` matches literally.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
