mod paper_vm;
mod quiz_bank_vm;
mod result_vm;
mod time_fmt;

pub use paper_vm::{PaperEffect, PaperIntent, apply_intent, apply_timer_event, confirm_prompt};
pub use quiz_bank_vm::{QuizCardVm, map_quiz_cards};
pub use result_vm::{ResultVm, ReviewVm, map_result};
pub use time_fmt::{format_clock, format_datetime};
