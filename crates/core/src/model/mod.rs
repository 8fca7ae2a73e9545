mod answer_sheet;
mod cursor;
mod ids;
mod question;
mod quiz;
mod session_clock;
mod submission;

pub use answer_sheet::AnswerSheet;
pub use cursor::Cursor;
pub use ids::{ParseIdError, QuestionId, QuizId};
pub use question::{Question, QuestionError, QuestionKind};
pub use quiz::{Quiz, QuizError};
pub use session_clock::{CountdownTick, SessionClock};
pub use submission::{QuestionReview, QuizResult, SubmissionError, SubmissionInfo};
