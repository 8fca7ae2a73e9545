//! One quiz attempt from first render to graded submission.
//!
//! The moving parts are deliberately separate: [`SubmissionFlow`] is the
//! pure submit-state machine, [`QuizSession`] bundles it with the answer
//! sheet, cursor and clock, [`SessionTimers`] drives the clock from real
//! time, and [`SessionWorkflow`] performs the network round trips.

mod flow;
mod service;
mod timers;
mod workflow;

pub use flow::{SubmissionFlow, SubmitGate, SubmitPhase};
pub use service::{QuizSession, SessionProgress};
pub use timers::{SessionTimers, TimerEvent};
pub use workflow::SessionWorkflow;
