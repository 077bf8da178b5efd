//! Authorization checks.

use crate::{api::models::users::CurrentUser, errors::Error};

/// Hotel and room-type management is restricted to administrators.
pub fn require_admin(user: &CurrentUser) -> Result<(), Error> {
    if user.is_admin {
        Ok(())
    } else {
        Err(Error::Forbidden {
            message: "Administrator access required".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(is_admin: bool) -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            username: "someone".to_string(),
            email: "someone@example.com".to_string(),
            is_admin,
            display_name: None,
        }
    }

    #[test]
    fn admins_pass() {
        assert!(require_admin(&user(true)).is_ok());
    }

    #[test]
    fn regular_users_are_forbidden() {
        let error = require_admin(&user(false)).unwrap_err();
        assert_eq!(error.status_code(), axum::http::StatusCode::FORBIDDEN);
    }
}
