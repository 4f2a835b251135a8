//! Resolves the session user into an access [`Caller`].

use actix_session::Session;
use sqlx::PgPool;

use crate::access::{Caller, MemberProfile, TeamMemberProfile};
use crate::auth::session::require_user_id;
use crate::errors::AppError;
use crate::models::team_member::TeamRole;
use crate::models::user::{self, UserProfiles};

impl From<UserProfiles> for Caller {
    fn from(p: UserProfiles) -> Self {
        let team_member = match (p.team_member_id, p.team_member_role.as_deref().and_then(TeamRole::parse)) {
            (Some(id), Some(role)) => Some(TeamMemberProfile { id, role }),
            _ => None,
        };
        let member = p.member_id.map(|id| MemberProfile {
            id,
            domain_id: p.member_domain_id,
        });
        Caller {
            user_id: Some(p.id),
            is_staff: p.is_staff,
            team_member,
            member,
        }
    }
}

/// Load the caller for the logged-in user. A session pointing at a missing or
/// deactivated user is rejected with 401.
pub async fn current_caller(pool: &PgPool, session: &Session) -> Result<Caller, AppError> {
    let user_id = require_user_id(session)?;
    match user::find_profiles(pool, user_id).await? {
        Some(profiles) => Ok(Caller::from(profiles)),
        None => {
            log::warn!("Session refers to unknown or inactive user {user_id}");
            Err(AppError::Session("User account is no longer active".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profiles() -> UserProfiles {
        UserProfiles {
            id: 7,
            is_staff: false,
            team_member_id: None,
            team_member_role: None,
            member_id: None,
            member_domain_id: None,
        }
    }

    #[test]
    fn user_without_profiles_is_unprivileged() {
        let caller = Caller::from(profiles());
        assert_eq!(caller.user_id, Some(7));
        assert!(!caller.is_privileged());
        assert!(caller.member.is_none());
    }

    #[test]
    fn team_member_and_member_profiles_are_carried() {
        let caller = Caller::from(UserProfiles {
            team_member_id: Some(3),
            team_member_role: Some("lead".to_string()),
            member_id: Some(11),
            member_domain_id: Some(2),
            ..profiles()
        });
        assert_eq!(caller.team_member_id(), Some(3));
        assert_eq!(caller.member, Some(MemberProfile { id: 11, domain_id: Some(2) }));
        assert!(caller.is_privileged());
    }
}
