pub mod agent;
pub mod child;
pub mod discussion;
pub mod error_messages;
pub mod git;
pub mod log;
pub mod naming;
pub mod prompts;
pub mod scaffold;
pub mod task;
pub mod term;
pub mod validation;
pub mod wizard;
