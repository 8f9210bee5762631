pub mod action;
pub mod application;
pub mod candidate;
pub mod execution_log;
pub mod tag;
pub mod target;
pub mod workflow;

pub use action::{ActionKind, WorkflowAction};
pub use application::Application;
pub use candidate::{Candidate, NewCandidate};
pub use execution_log::{ActionOutcome, ExecutionLog, ExecutionStats, TriggerSource};
pub use tag::{NewTag, Tag};
pub use target::{Target, TargetType};
pub use workflow::{
    Condition, ConditionOperator, Trigger, TriggerEvent, Workflow, WorkflowDraft, WorkflowFilter,
};
