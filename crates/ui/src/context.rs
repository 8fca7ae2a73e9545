use std::sync::Arc;

use services::{QuizApi, SessionWorkflow};

/// What the composition root must provide to the views.
pub trait UiApp: Send + Sync {
    fn quizzes(&self) -> Arc<dyn QuizApi>;
    fn sessions(&self) -> Arc<SessionWorkflow>;
}

#[derive(Clone)]
pub struct AppContext {
    quizzes: Arc<dyn QuizApi>,
    sessions: Arc<SessionWorkflow>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quizzes: app.quizzes(),
            sessions: app.sessions(),
        }
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<dyn QuizApi> {
        Arc::clone(&self.quizzes)
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<SessionWorkflow> {
        Arc::clone(&self.sessions)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
