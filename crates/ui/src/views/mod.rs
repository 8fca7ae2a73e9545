mod auth_required;
mod paper;
mod quiz_bank;
mod result;
mod state;

pub use auth_required::AuthRequiredView;
pub use paper::PaperView;
pub use quiz_bank::QuizBankView;
pub use result::ResultView;
pub use state::{ViewError, ViewState, view_state_from_resource};
