//! User accounts.

use crate::prelude::*;
use crate::{db::connection::DbConnection, schema::users::dsl::*};
use diesel::prelude::*;
use serde::Deserialize;

/// A registered user.
///
/// `password` holds the adaptive hash of the user's password, never the
/// password itself. This type is deliberately not `Serialize`.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, PartialEq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i64,
    pub login: String,
    pub password: String,
    pub name: String,
    pub age: i32,
}

/// Data for creating a new user.
#[derive(Insertable, PartialEq, Debug, Clone, Deserialize)]
#[diesel(table_name = crate::schema::users)]
pub struct UserCreate {
    pub login: String,
    /// Already hashed password.
    pub password: String,
    pub name: String,
    pub age: i32,
}

impl UserCreate {
    /// Inserts the user and returns the stored row.
    pub fn save(self, connection: &DbConnection) -> Result<User> {
        let conn = &mut connection.pool.get()?;

        Ok(diesel::insert_into(users)
            .values(&self)
            .returning(User::as_returning())
            .get_result(conn)?)
    }
}

impl User {
    pub fn fetch_by_id(target: i64, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(User::by_id(target)
            .select(User::as_select())
            .first(conn)
            .optional()?)
    }

    pub fn fetch_by_login(target: &str, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(User::by_login(target)
            .select(User::as_select())
            .first(conn)
            .optional()?)
    }

    /// Fetches the first user registered under `target` name.
    pub fn fetch_by_name(target: &str, connection: &DbConnection) -> Result<Option<Self>> {
        let conn = &mut connection.pool.get()?;

        Ok(User::by_name(target)
            .order(id.asc())
            .select(User::as_select())
            .first(conn)
            .optional()?)
    }
}

impl User {
    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_id(target: i64) -> _ {
        crate::schema::users::dsl::users.filter(id.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_login(target: &str) -> _ {
        crate::schema::users::dsl::users.filter(login.eq(target))
    }

    #[diesel::dsl::auto_type(no_type_alias)]
    pub fn by_name(target: &str) -> _ {
        crate::schema::users::dsl::users.filter(name.eq(target))
    }
}
