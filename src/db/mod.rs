pub mod applications;
pub mod candidates;
pub mod execution_logs;
pub mod tags;
pub mod workflows;
