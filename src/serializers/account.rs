use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::access::Caller;
use crate::models::team_member::TeamRole;
use crate::models::user::User;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TeamMemberSummary {
    pub id: i64,
    pub role: TeamRole,
    pub role_display: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MemberSummary {
    pub id: i64,
    pub domain: Option<i64>,
}

/// The logged-in user. Never includes the password hash.
#[derive(Serialize, Debug, Clone)]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
    pub team_member: Option<TeamMemberSummary>,
    pub member: Option<MemberSummary>,
}

impl ProfileResponse {
    pub fn new(user: User, caller: &Caller) -> Self {
        ProfileResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            is_staff: user.is_staff,
            date_joined: user.date_joined,
            team_member: caller.team_member.map(|tm| TeamMemberSummary {
                id: tm.id,
                role: tm.role,
                role_display: tm.role.display(),
            }),
            member: caller.member.map(|m| MemberSummary {
                id: m.id,
                domain: m.domain_id,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::TeamMemberProfile;

    #[test]
    fn profile_hides_password_and_lists_profiles() {
        let user = User {
            id: 3,
            username: "mentor1".to_string(),
            email: "m@tars.example".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            first_name: "Ravi".to_string(),
            last_name: String::new(),
            is_staff: false,
            is_active: true,
            date_joined: Utc::now(),
        };
        let caller = Caller {
            user_id: Some(3),
            team_member: Some(TeamMemberProfile { id: 8, role: TeamRole::Mentor }),
            ..Caller::default()
        };
        let json = serde_json::to_value(ProfileResponse::new(user, &caller)).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["team_member"]["role_display"], "Mentor");
        assert!(json["member"].is_null());
    }
}
