//! REST collaborator: authenticated requests, wire types and form validation.

mod auth;
pub mod team;
pub mod types;

pub use auth::AuthService;
pub(crate) use auth::{bearer, check};
pub use types::{Action, DayOfWeek, FactorId, FactorNode, QuestionFrequency, QuestionSchedule, Team, TeamMember};
