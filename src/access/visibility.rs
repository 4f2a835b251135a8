use std::collections::HashSet;

use super::caller::Caller;
use crate::models::meeting::Meeting;

/// Which active meetings a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingScope {
    All,
    /// Meetings tagged with this domain, plus meetings with no domains.
    DomainOrUnscoped(i64),
    /// Only meetings with no domains.
    UnscopedOnly,
    Nothing,
}

impl MeetingScope {
    pub fn for_caller(caller: &Caller) -> Self {
        if caller.is_staff || caller.team_member.is_some() {
            return MeetingScope::All;
        }
        match caller.member {
            Some(member) => match member.domain_id {
                Some(domain_id) => MeetingScope::DomainOrUnscoped(domain_id),
                None => MeetingScope::UnscopedOnly,
            },
            None => MeetingScope::Nothing,
        }
    }

    /// Whether a single active meeting falls inside the scope.
    pub fn admits(&self, meeting: &Meeting) -> bool {
        match self {
            MeetingScope::All => true,
            MeetingScope::DomainOrUnscoped(domain_id) => {
                meeting.is_for_all_domains() || meeting.domain_ids.contains(domain_id)
            }
            MeetingScope::UnscopedOnly => meeting.is_for_all_domains(),
            MeetingScope::Nothing => false,
        }
    }
}

/// Active meetings visible to `caller`, newest first.
pub fn visible_meetings(caller: &Caller, meetings: &[Meeting]) -> Vec<Meeting> {
    let active = || meetings.iter().filter(|m| m.is_active);

    let mut visible: Vec<Meeting> = match MeetingScope::for_caller(caller) {
        MeetingScope::All => active().cloned().collect(),
        MeetingScope::Nothing => Vec::new(),
        MeetingScope::UnscopedOnly => active().filter(|m| m.is_for_all_domains()).cloned().collect(),
        MeetingScope::DomainOrUnscoped(domain_id) => {
            let in_domain = active().filter(|m| m.domain_ids.contains(&domain_id));
            let unscoped = active().filter(|m| m.is_for_all_domains());
            let mut seen = HashSet::new();
            in_domain
                .chain(unscoped)
                .filter(|m| seen.insert(m.id))
                .cloned()
                .collect()
        }
    };
    sort_newest_first(&mut visible);
    visible
}

/// Order by `scheduled_date` descending; ties fall back to id so the order is total.
pub fn sort_newest_first(meetings: &mut [Meeting]) {
    meetings.sort_by(|a, b| {
        b.scheduled_date
            .cmp(&a.scheduled_date)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::caller::{MemberProfile, TeamMemberProfile};
    use crate::models::meeting::test_support::meeting;
    use crate::models::team_member::TeamRole;

    const AI: i64 = 1;
    const ROBOTICS: i64 = 2;

    fn member_in(domain_id: Option<i64>) -> Caller {
        Caller {
            user_id: Some(10),
            member: Some(MemberProfile { id: 100, domain_id }),
            ..Caller::default()
        }
    }

    fn ids(meetings: &[Meeting]) -> Vec<i64> {
        meetings.iter().map(|m| m.id).collect()
    }

    #[test]
    fn scope_follows_decision_order() {
        let staff_member = Caller {
            is_staff: true,
            member: Some(MemberProfile { id: 1, domain_id: Some(AI) }),
            ..Caller::default()
        };
        assert_eq!(MeetingScope::for_caller(&staff_member), MeetingScope::All);

        let mentor = Caller {
            team_member: Some(TeamMemberProfile { id: 3, role: TeamRole::Mentor }),
            member: Some(MemberProfile { id: 1, domain_id: Some(AI) }),
            ..Caller::default()
        };
        assert_eq!(MeetingScope::for_caller(&mentor), MeetingScope::All);

        assert_eq!(MeetingScope::for_caller(&member_in(Some(AI))), MeetingScope::DomainOrUnscoped(AI));
        assert_eq!(MeetingScope::for_caller(&member_in(None)), MeetingScope::UnscopedOnly);
        assert_eq!(MeetingScope::for_caller(&Caller::anonymous()), MeetingScope::Nothing);
    }

    #[test]
    fn union_does_not_duplicate_meetings() {
        // Tagged with AI and visible through the domain branch only once.
        let meetings = vec![meeting(1, 1, vec![AI, ROBOTICS]), meeting(2, 2, vec![])];
        let visible = visible_meetings(&member_in(Some(AI)), &meetings);
        assert_eq!(ids(&visible), vec![2, 1]);
    }

    #[test]
    fn member_without_domain_sees_only_unscoped() {
        let meetings = vec![meeting(1, 1, vec![]), meeting(2, 2, vec![AI])];
        assert_eq!(ids(&visible_meetings(&member_in(None), &meetings)), vec![1]);
    }

    #[test]
    fn inactive_meetings_are_never_visible() {
        let mut hidden = meeting(1, 5, vec![]);
        hidden.is_active = false;
        let meetings = vec![hidden, meeting(2, 1, vec![])];
        let staff = Caller { is_staff: true, ..Caller::default() };
        assert_eq!(ids(&visible_meetings(&staff, &meetings)), vec![2]);
        assert_eq!(ids(&visible_meetings(&member_in(None), &meetings)), vec![2]);
    }

    #[test]
    fn ordering_is_newest_first_with_id_tiebreak() {
        let meetings = vec![meeting(1, 3, vec![]), meeting(2, 7, vec![]), meeting(3, 7, vec![])];
        let staff = Caller { is_staff: true, ..Caller::default() };
        assert_eq!(ids(&visible_meetings(&staff, &meetings)), vec![3, 2, 1]);
    }

    #[test]
    fn admits_matches_visible_set() {
        let meetings = vec![
            meeting(1, 1, vec![]),
            meeting(2, 2, vec![AI]),
            meeting(3, 3, vec![ROBOTICS]),
        ];
        let caller = member_in(Some(ROBOTICS));
        let scope = MeetingScope::for_caller(&caller);
        let admitted: Vec<i64> = meetings.iter().filter(|m| scope.admits(m)).map(|m| m.id).collect();
        let mut visible = ids(&visible_meetings(&caller, &meetings));
        visible.sort();
        assert_eq!(admitted, visible);
    }
}
