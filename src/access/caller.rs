use crate::models::team_member::TeamRole;

/// The caller's TeamMember profile (admin, lead or mentor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamMemberProfile {
    pub id: i64,
    pub role: TeamRole,
}

/// The caller's Member profile and the domain it belongs to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemberProfile {
    pub id: i64,
    pub domain_id: Option<i64>,
}

/// A request's identity, resolved once per request. Missing profiles are
/// `None`; a caller with neither profile is legitimate and simply sees nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Option<i64>,
    pub is_staff: bool,
    pub team_member: Option<TeamMemberProfile>,
    pub member: Option<MemberProfile>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Caller::default()
    }

    pub fn team_member_id(&self) -> Option<i64> {
        self.team_member.map(|tm| tm.id)
    }

    /// Staff and team members bypass every domain restriction.
    pub fn is_privileged(&self) -> bool {
        self.is_staff || self.team_member.is_some()
    }
}
