use dioxus::prelude::*;

use services::{ApiError, SessionError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// Terminal for the active flow; the user must log in again.
    Unauthorized,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn from_api(err: &ApiError) -> Self {
        match err {
            ApiError::Unauthorized => ViewError::Unauthorized,
            _ => ViewError::Unknown,
        }
    }

    #[must_use]
    pub fn from_session(err: &SessionError) -> Self {
        match err {
            SessionError::Api(api) => ViewError::from_api(api),
            _ => ViewError::Unknown,
        }
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            ViewError::Unauthorized => "登录已过期，请重新登录。",
            ViewError::Unknown => "出错了，请稍后重试。",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
