mod issue;
mod sprint;
mod user;

pub use issue::{CreatedIssue, IssueDraft};
pub use sprint::{Sprint, SprintRef, SprintState};
pub use user::User;
