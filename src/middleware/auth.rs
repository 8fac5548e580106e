//! Authentication middleware
//!
//! Admin screens and actions are limited to the Telegram ids configured in
//! `bot.admin_ids`.

use std::collections::HashSet;
use teloxide::types::User;
use tracing::{debug, warn};
use crate::utils::errors::{VolunteerPayError, Result};

/// Authentication middleware
#[derive(Debug, Clone)]
pub struct AuthMiddleware {
    admin_ids: HashSet<i64>,
}

impl AuthMiddleware {
    /// Create a new AuthMiddleware instance
    pub fn new(admin_ids: &[i64]) -> Self {
        Self {
            admin_ids: admin_ids.iter().copied().collect(),
        }
    }

    /// Check if user is an admin
    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// Check if user is authorized for admin commands
    pub fn check_admin_auth(&self, user: &User) -> Result<()> {
        let user_id = user.id.0 as i64;

        if self.is_admin(user_id) {
            debug!(user_id = user_id, "Admin authentication successful");
            Ok(())
        } else {
            warn!(user_id = user_id, "Unauthorized admin access attempt");
            Err(VolunteerPayError::PermissionDenied(
                "Admin privileges required".to_string()
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::UserId;

    fn create_test_user(id: u64) -> User {
        User {
            id: UserId(id),
            is_bot: false,
            first_name: "Test".to_string(),
            last_name: None,
            username: None,
            language_code: None,
            is_premium: false,
            added_to_attachment_menu: false,
        }
    }

    #[test]
    fn test_admin_check() {
        let auth = AuthMiddleware::new(&[123, 456]);

        assert!(auth.is_admin(123));
        assert!(auth.is_admin(456));
        assert!(!auth.is_admin(789));
    }

    #[test]
    fn test_admin_auth() {
        let auth = AuthMiddleware::new(&[123]);

        assert!(auth.check_admin_auth(&create_test_user(123)).is_ok());
        assert!(matches!(
            auth.check_admin_auth(&create_test_user(456)),
            Err(VolunteerPayError::PermissionDenied(_))
        ));
    }
}
