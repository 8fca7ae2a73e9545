//! Pure reducer for the paper view: every user gesture and timer event goes
//! through here, so the whole flow is testable without a DOM.

use quiz_core::model::CountdownTick;
use services::{QuizSession, SubmitGate, SubmitPhase, TimerEvent};

/// One user gesture on the paper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaperIntent {
    SetAnswer(String),
    NextQuestion,
    PreviousQuestion,
    JumpTo(usize),
    RequestSubmit,
    ConfirmSubmit,
    DeclineSubmit,
    DismissFailure,
}

/// What the view must do after applying an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaperEffect {
    None,
    /// Begin the network submit. Emitted at most once per `Submitting` entry.
    Transmit,
}

/// Apply a gesture to the session. Rejected flow transitions (double submit,
/// confirm outside the gate) collapse to `None`: the state machine already
/// guarantees nothing happened.
pub fn apply_intent(session: &mut QuizSession, intent: PaperIntent) -> PaperEffect {
    match intent {
        PaperIntent::SetAnswer(value) => {
            session.answer_current(value);
            PaperEffect::None
        }
        PaperIntent::NextQuestion => {
            session.next_question();
            PaperEffect::None
        }
        PaperIntent::PreviousQuestion => {
            session.previous_question();
            PaperEffect::None
        }
        PaperIntent::JumpTo(index) => {
            session.jump_to_question(index);
            PaperEffect::None
        }
        PaperIntent::RequestSubmit => match session.request_submit() {
            Ok(SubmitGate::Ready) => PaperEffect::Transmit,
            Ok(SubmitGate::Confirm { .. }) | Err(_) => PaperEffect::None,
        },
        PaperIntent::ConfirmSubmit => {
            if session.confirm_submit().is_ok() {
                PaperEffect::Transmit
            } else {
                PaperEffect::None
            }
        }
        PaperIntent::DeclineSubmit => {
            // Once the countdown has expired the attempt cannot return to
            // editing; the prompt stays until the sheet is confirmed.
            if !session.is_time_up() {
                let _ = session.decline_submit();
            }
            PaperEffect::None
        }
        PaperIntent::DismissFailure => {
            session.acknowledge_failure();
            PaperEffect::None
        }
    }
}

/// Apply one timer event. Countdown expiry behaves exactly like the user
/// pressing submit, so an incomplete sheet still gates on confirmation.
pub fn apply_timer_event(session: &mut QuizSession, event: TimerEvent) -> PaperEffect {
    match event {
        TimerEvent::ElapsedTick => {
            session.tick_elapsed();
            PaperEffect::None
        }
        TimerEvent::CountdownTick => {
            if session.tick_countdown() == CountdownTick::Expired {
                apply_intent(session, PaperIntent::RequestSubmit)
            } else {
                PaperEffect::None
            }
        }
    }
}

/// The confirmation modal text while the flow is gated, `None` otherwise.
#[must_use]
pub fn confirm_prompt(session: &QuizSession) -> Option<String> {
    let SubmitPhase::Confirming { unanswered } = session.phase() else {
        return None;
    };
    let count = unanswered.len();
    if session.is_time_up() {
        Some(format!(
            "时间到，还有 {count} 道题目未作答，确定要提交吗？"
        ))
    } else {
        Some(format!("还有 {count} 道题目未作答，确定要提交吗？"))
    }
}
