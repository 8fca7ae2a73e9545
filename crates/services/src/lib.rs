#![forbid(unsafe_code)]

pub mod authoring_service;
pub mod client;
pub mod dto;
pub mod error;
pub mod problem_service;
pub mod quiz_api;
pub mod sessions;

pub use quiz_core::Clock;

pub use authoring_service::{AuthoringError, AuthoringService, NewQuizDraft, NewQuizQuestion};
pub use client::ApiClient;
pub use error::{ApiError, SessionError};
pub use problem_service::{ProblemDetail, ProblemService, ProblemSummary};
pub use quiz_api::{HttpQuizApi, QuizApi, QuizDetail, QuizSummary};

pub use sessions::{
    QuizSession, SessionProgress, SessionTimers, SessionWorkflow, SubmissionFlow, SubmitGate,
    SubmitPhase, TimerEvent,
};
