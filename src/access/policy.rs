use std::fmt;

use super::caller::Caller;
use super::visibility::sort_newest_first;
use crate::models::meeting::Meeting;

/// Why a caller was refused. Denials are expected outcomes, not failures;
/// each carries the reason string returned to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    CannotSchedule,
    NotOwnerUpdate,
    NotOwnerDelete,
    NotTeamMember,
}

impl Denial {
    pub fn reason(&self) -> &'static str {
        match self {
            Denial::CannotSchedule => "Only team members can schedule meetings",
            Denial::NotOwnerUpdate => "You can only update meetings you created",
            Denial::NotOwnerDelete => "You can only delete meetings you created",
            Denial::NotTeamMember => "You are not a team member",
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Update,
    Delete,
}

pub fn can_create(caller: &Caller) -> bool {
    caller.is_staff || caller.team_member.is_some()
}

/// Staff may change any meeting; a team member only the ones they scheduled.
pub fn can_mutate(caller: &Caller, meeting: &Meeting) -> bool {
    if caller.is_staff {
        return true;
    }
    match (caller.team_member_id(), meeting.scheduled_by) {
        (Some(own), Some(scheduler)) => own == scheduler,
        _ => false,
    }
}

pub fn require_create(caller: &Caller) -> Result<(), Denial> {
    if can_create(caller) {
        Ok(())
    } else {
        Err(Denial::CannotSchedule)
    }
}

pub fn require_mutate(caller: &Caller, meeting: &Meeting, mutation: Mutation) -> Result<(), Denial> {
    if can_mutate(caller, meeting) {
        return Ok(());
    }
    Err(match mutation {
        Mutation::Update => Denial::NotOwnerUpdate,
        Mutation::Delete => Denial::NotOwnerDelete,
    })
}

/// Active meetings scheduled by the caller's team member profile, newest first.
pub fn my_scheduled_meetings(caller: &Caller, meetings: &[Meeting]) -> Result<Vec<Meeting>, Denial> {
    let own = caller.team_member_id().ok_or(Denial::NotTeamMember)?;
    let mut scheduled: Vec<Meeting> = meetings
        .iter()
        .filter(|m| m.is_active && m.scheduled_by == Some(own))
        .cloned()
        .collect();
    sort_newest_first(&mut scheduled);
    Ok(scheduled)
}
