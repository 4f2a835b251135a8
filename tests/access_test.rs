//! Visibility and authorization decisions over in-memory meetings.
//!
//! Covers the caller kinds (staff, team member, member with and without a
//! domain, bare user) and the ownership rule for mutations.

use chrono::{Duration, TimeZone, Utc};

use tars::access::{
    self, Caller, Denial, MeetingScope, MemberProfile, Mutation, TeamMemberProfile,
};
use tars::models::meeting::Meeting;
use tars::models::schedule::ScheduleStatus;
use tars::models::team_member::TeamRole;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const AI: i64 = 1;
const WEB: i64 = 2;

fn meeting(id: i64, day: i64, domains: Vec<i64>, scheduled_by: Option<i64>) -> Meeting {
    let base = Utc.with_ymd_and_hms(2026, 3, 1, 17, 0, 0).unwrap();
    Meeting {
        id,
        title: format!("Meeting {id}"),
        description: None,
        speaker_id: None,
        speaker_name: None,
        speaker_other: None,
        scheduled_by,
        scheduled_by_name: None,
        scheduled_date: base + Duration::days(day),
        end_time: None,
        meeting_link: None,
        location: None,
        status: ScheduleStatus::Upcoming,
        is_active: true,
        created_at: base,
        updated_at: base,
        domain_ids: domains,
    }
}

/// M1 {AI} day 1, M2 {} day 3, M3 {WEB} day 2, all scheduled by team member 10.
fn catalogue() -> Vec<Meeting> {
    vec![
        meeting(1, 1, vec![AI], Some(10)),
        meeting(2, 3, vec![], Some(10)),
        meeting(3, 2, vec![WEB], Some(10)),
    ]
}

fn staff() -> Caller {
    Caller {
        user_id: Some(1),
        is_staff: true,
        ..Caller::default()
    }
}

fn team_member(id: i64) -> Caller {
    Caller {
        user_id: Some(100 + id),
        team_member: Some(TeamMemberProfile { id, role: TeamRole::Mentor }),
        ..Caller::default()
    }
}

fn member(domain_id: Option<i64>) -> Caller {
    Caller {
        user_id: Some(500),
        member: Some(MemberProfile { id: 50, domain_id }),
        ..Caller::default()
    }
}

fn ids(meetings: &[Meeting]) -> Vec<i64> {
    meetings.iter().map(|m| m.id).collect()
}

// ---------------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------------

#[test]
fn member_in_ai_sees_ai_and_unscoped_newest_first() {
    let visible = access::visible_meetings(&member(Some(AI)), &catalogue());
    assert_eq!(ids(&visible), vec![2, 1]);
}

#[test]
fn member_without_domain_sees_only_unscoped() {
    let visible = access::visible_meetings(&member(None), &catalogue());
    assert_eq!(ids(&visible), vec![2]);
}

#[test]
fn team_member_and_staff_see_everything() {
    assert_eq!(ids(&access::visible_meetings(&team_member(10), &catalogue())), vec![2, 3, 1]);
    assert_eq!(ids(&access::visible_meetings(&staff(), &catalogue())), vec![2, 3, 1]);
}

#[test]
fn user_without_profiles_sees_nothing() {
    let caller = Caller {
        user_id: Some(9),
        ..Caller::default()
    };
    assert!(access::visible_meetings(&caller, &catalogue()).is_empty());
    assert_eq!(MeetingScope::for_caller(&caller), MeetingScope::Nothing);
}

#[test]
fn inactive_meetings_are_never_visible() {
    let mut meetings = catalogue();
    meetings[1].is_active = false;
    assert_eq!(ids(&access::visible_meetings(&staff(), &meetings)), vec![3, 1]);
    assert_eq!(ids(&access::visible_meetings(&member(Some(AI)), &meetings)), vec![1]);
}

#[test]
fn member_visibility_is_a_subset_of_staff_visibility() {
    let meetings = catalogue();
    let everything = ids(&access::visible_meetings(&staff(), &meetings));
    for caller in [member(Some(AI)), member(Some(WEB)), member(None)] {
        for id in ids(&access::visible_meetings(&caller, &meetings)) {
            assert!(everything.contains(&id));
        }
    }
}

#[test]
fn multi_domain_meeting_appears_once() {
    let meetings = vec![meeting(7, 0, vec![AI, WEB], None), meeting(8, 1, vec![], None)];
    let visible = access::visible_meetings(&member(Some(WEB)), &meetings);
    assert_eq!(ids(&visible), vec![8, 7]);
}

#[test]
fn repeated_calls_return_the_same_order() {
    let mut meetings = catalogue();
    meetings.push(meeting(4, 3, vec![], None));
    let first = access::visible_meetings(&member(Some(AI)), &meetings);
    let second = access::visible_meetings(&member(Some(AI)), &meetings);
    assert_eq!(first, second);
    // Same date as meeting 2; higher id first.
    assert_eq!(ids(&first), vec![4, 2, 1]);
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

#[test]
fn only_staff_and_team_members_create() {
    assert!(access::can_create(&staff()));
    assert!(access::can_create(&team_member(10)));
    assert_eq!(access::require_create(&member(Some(AI))), Err(Denial::CannotSchedule));
    assert_eq!(
        Denial::CannotSchedule.reason(),
        "Only team members can schedule meetings"
    );
}

#[test]
fn team_member_mutates_only_own_meetings() {
    let own = meeting(1, 0, vec![], Some(10));
    let other = meeting(2, 0, vec![], Some(11));

    assert!(access::require_mutate(&team_member(10), &own, Mutation::Update).is_ok());
    assert_eq!(
        access::require_mutate(&team_member(10), &other, Mutation::Update),
        Err(Denial::NotOwnerUpdate)
    );
    assert_eq!(
        access::require_mutate(&team_member(10), &other, Mutation::Delete),
        Err(Denial::NotOwnerDelete)
    );
    assert_eq!(
        Denial::NotOwnerDelete.reason(),
        "You can only delete meetings you created"
    );
}

#[test]
fn staff_mutates_any_meeting_even_without_scheduler() {
    let orphan = meeting(1, 0, vec![], None);
    assert!(access::can_mutate(&staff(), &orphan));
    assert!(!access::can_mutate(&team_member(10), &orphan));
}

#[test]
fn members_cannot_mutate() {
    let m = meeting(1, 0, vec![AI], Some(10));
    assert!(!access::can_mutate(&member(Some(AI)), &m));
}

#[test]
fn my_scheduled_requires_a_team_member_profile() {
    let mut meetings = catalogue();
    meetings.push(meeting(4, 5, vec![], Some(11)));

    let mine = access::my_scheduled_meetings(&team_member(10), &meetings).unwrap();
    assert_eq!(ids(&mine), vec![2, 3, 1]);

    assert_eq!(
        access::my_scheduled_meetings(&staff(), &meetings),
        Err(Denial::NotTeamMember)
    );
    assert_eq!(Denial::NotTeamMember.to_string(), "You are not a team member");
}
