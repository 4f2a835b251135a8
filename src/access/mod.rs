//! Meeting visibility and authorization.
//!
//! Every function here is a pure decision over a resolved [`Caller`] and an
//! in-memory meeting collection. Loading callers and meetings is the job of
//! `auth::identity` and `models::meeting`; handlers glue the three together.
//!
//! Decision order for visibility (first match wins):
//!
//! ```text
//! is_staff                     -> every active meeting
//! team member profile          -> every active meeting
//! member profile with domain d -> meetings tagged d  ∪  meetings with no domains
//! member profile, no domain    -> meetings with no domains
//! no profile                   -> nothing
//! ```

pub mod caller;
pub mod policy;
pub mod visibility;

pub use caller::{Caller, MemberProfile, TeamMemberProfile};
pub use policy::{
    can_create, can_mutate, my_scheduled_meetings, require_create, require_mutate, Denial,
    Mutation,
};
pub use visibility::{visible_meetings, MeetingScope};
