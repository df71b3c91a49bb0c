//! Request context for authenticated handlers.
//!
//! The resolver middleware validates the session token once per request and
//! stores the outcome in the request extensions. Handlers take [`Ctx`] as an
//! extractor to learn who is calling.

use crate::ctx::ctx_user::CtxUser;

pub mod ctx_user;
pub mod resolver;

/// Identity attached to a request whose session token validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    /// The authenticated user.
    pub user: CtxUser,
}

impl Ctx {
    /// Creates a request context for the user with id `user_id`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pb_web::ctx::Ctx;
    ///
    /// let ctx = Ctx::new(7);
    /// assert_eq!(ctx.user.id, 7);
    /// ```
    pub fn new(user_id: i64) -> Self {
        Self {
            user: CtxUser { id: user_id },
        }
    }
}
