//! Access policy: pure visibility and mutation decisions.
//!
//! Every rule here is a pure function over a snapshot of the directory and
//! feedback stores; services call these before touching a repository so the
//! policy stays in one place.
//!
//! Out-of-scope resources are reported as *not found*, never *forbidden*:
//! a manager probing a feedback id outside their authored set, or an
//! employee id outside their team, learns nothing about whether the
//! resource exists. The only forbidden surface is the role gate on
//! manager-only operations.

use super::feedback::Feedback;
use super::user::{User, UserId};
use super::{Error, Role};

/// True iff `employee` reports directly to `manager`. Not recursive.
pub fn is_direct_report(manager: &User, employee: &User) -> bool {
    employee.manager_id() == Some(manager.id())
}

/// True iff `manager` may author feedback about `employee`.
///
/// Equivalent to [`is_direct_report`]; creation is rejected otherwise with
/// a "not on your team" error surfaced as not-found.
pub fn can_author_feedback_for(manager: &User, employee: &User) -> bool {
    is_direct_report(manager, employee)
}

/// True iff `actor` may edit the record's strengths, improvements, or
/// sentiment. Only the authoring manager qualifies.
pub fn can_edit_feedback(actor: &UserId, feedback: &Feedback) -> bool {
    feedback.manager_id() == actor
}

/// True iff `actor` may acknowledge the record. Only the subject employee
/// qualifies, and acknowledgment is the only mutation open to them.
pub fn can_acknowledge_feedback(actor: &UserId, feedback: &Feedback) -> bool {
    feedback.employee_id() == actor
}

/// Listing direction used to scope feedback queries to the actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackDirection {
    /// Records the actor authored as a manager.
    Given,
    /// Records addressed to the actor as an employee.
    Received,
}

impl FeedbackDirection {
    /// Scoping predicate for one record.
    pub fn matches(self, actor: &UserId, feedback: &Feedback) -> bool {
        match self {
            Self::Given => feedback.manager_id() == actor,
            Self::Received => feedback.employee_id() == actor,
        }
    }
}

/// Role gate for manager-only operations.
///
/// # Errors
///
/// Returns a forbidden error when the actor does not hold the manager role;
/// this is the one place where the policy distinguishes forbidden from
/// not-found.
pub fn require_manager(actor: &User) -> Result<(), Error> {
    if actor.role() == Role::Manager {
        Ok(())
    } else {
        Err(Error::forbidden("manager role required"))
    }
}
