use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use tokio::sync::mpsc;

use quiz_core::model::{QuestionKind, QuizId};
use services::{
    ApiError, QuizSession, SessionError, SessionTimers, SubmitPhase, TimerEvent,
};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    PaperEffect, PaperIntent, apply_intent, apply_timer_event, confirm_prompt, format_clock,
};

#[component]
pub fn PaperView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let workflow = ctx.sessions();

    let session = use_signal(|| None::<QuizSession>);
    let banner = use_signal(|| None::<ViewError>);

    // One network submit per `Submitting` entry. The session is taken out of
    // the signal for the duration so no handler can touch it mid-request.
    let transmit = {
        let workflow = ctx.sessions();
        use_callback(move |()| {
            let workflow = workflow.clone();
            let mut session = session;
            let mut banner = banner;
            spawn(async move {
                let Some(mut live) = session.write().take() else {
                    return;
                };
                match workflow.submit(&mut live).await {
                    Ok(_) => {
                        session.set(Some(live));
                        navigator.replace(Route::QuizResult { quiz_id });
                    }
                    Err(SessionError::Api(ApiError::Unauthorized)) => {
                        session.set(None);
                        navigator.replace(Route::AuthRequired {});
                    }
                    Err(_) => {
                        banner.set(Some(ViewError::Unknown));
                        session.set(Some(live));
                    }
                }
            });
        })
    };

    let dispatch = use_callback(move |intent: PaperIntent| {
        let mut session = session;
        let mut effect = PaperEffect::None;
        if let Some(live) = session.write().as_mut() {
            effect = apply_intent(live, intent);
        }
        if effect == PaperEffect::Transmit {
            transmit.call(());
        }
    });

    let resource = use_resource(move || {
        let workflow = workflow.clone();
        let mut session = session;
        async move {
            let started = workflow
                .start(QuizId::new(quiz_id))
                .await
                .map_err(|err| ViewError::from_session(&err))?;
            let countdown_secs = started.remaining_secs();
            session.set(Some(started));

            // Tick loop: lives as long as this view, which also bounds the
            // interval tasks because the timer handle is owned here.
            let (events_tx, mut events_rx) = mpsc::unbounded_channel();
            let timers = SessionTimers::start(countdown_secs, events_tx);
            spawn(async move {
                let _timers = timers;
                let mut missed: Vec<TimerEvent> = Vec::new();
                while let Some(event) = events_rx.recv().await {
                    let mut effect = PaperEffect::None;
                    {
                        let mut guard = session.write();
                        // While a submit is in flight the session is out of
                        // the signal; ticks are buffered and replayed when
                        // it returns so the clock stays on wall time.
                        let Some(live) = guard.as_mut() else {
                            missed.push(event);
                            continue;
                        };
                        if live.is_submitted() {
                            break;
                        }
                        for past in missed.drain(..) {
                            if apply_timer_event(live, past) == PaperEffect::Transmit {
                                effect = PaperEffect::Transmit;
                            }
                        }
                        if apply_timer_event(live, event) == PaperEffect::Transmit {
                            effect = PaperEffect::Transmit;
                        }
                    }
                    if effect == PaperEffect::Transmit {
                        transmit.call(());
                    }
                }
            });

            Ok(())
        }
    });

    let state = view_state_from_resource(&resource);
    let loaded = session.read().is_some();

    let body = match state {
        ViewState::Error(err) => rsx! {
            p { "{err.message()}" }
            if err == ViewError::Unauthorized {
                Link { to: Route::AuthRequired {}, "重新登录" }
            }
        },
        _ if loaded => rsx! {
            PaperBody { session, banner, dispatch }
        },
        _ => rsx! {
            p { "加载中..." }
        },
    };

    rsx! {
        div { class: "page", {body} }
    }
}

#[component]
fn PaperBody(
    session: Signal<Option<QuizSession>>,
    banner: Signal<Option<ViewError>>,
    dispatch: Callback<PaperIntent>,
) -> Element {
    let guard = session.read();
    let Some(live) = guard.as_ref() else {
        // The session is briefly out of the signal while a submit is in flight.
        return rsx! { p { "正在提交..." } };
    };

    let title = live.quiz().title().to_string();
    let progress = live.progress();
    let elapsed_str = format_clock(live.elapsed_secs());
    let remaining = live.remaining_secs();
    let has_countdown = remaining.is_some();
    let remaining_str = remaining.map(|secs| format_clock(u64::from(secs))).unwrap_or_default();
    let remaining_warn = remaining.is_some_and(|secs| secs < 60);
    let question = live.current_question();
    let number = live.current_index() + 1;
    let content = question.content().to_string();
    let kind = question.kind();
    let current = live
        .answers()
        .answer(question.id())
        .unwrap_or("")
        .to_string();
    let option_rows: Vec<(String, bool)> = question
        .options()
        .iter()
        .map(|option| (option.clone(), *option == current))
        .collect();
    let answered_flags: Vec<bool> = live
        .questions()
        .iter()
        .map(|q| live.answers().is_answered(q.id()))
        .collect();
    let current_index = live.current_index();
    let is_first = live.is_first_question();
    let is_last = live.is_last_question();
    let in_flight = live.is_submit_in_flight();
    let time_up = live.is_time_up();
    let prompt = confirm_prompt(live);
    let failed = live.phase() == &SubmitPhase::Failed;
    drop(guard);

    let prompt_text = prompt.clone().unwrap_or_default();
    let gated = prompt.is_some();
    let banner_text = (*banner.read()).map_or("提交失败，请稍后重试。", |err| err.message());

    rsx! {
        header { class: "paper-header",
            h2 { "{title}" }
            span { class: "paper-clock", "已用时间 {elapsed_str}" }
            if has_countdown {
                span {
                    class: if remaining_warn { "paper-clock warning" } else { "paper-clock" },
                    "剩余时间 {remaining_str}"
                }
            }
            span { class: "paper-progress", "已答 {progress.answered} / {progress.total}" }
        }

        section { class: "question",
            h3 { "{number}. {content}" }
            match kind {
                QuestionKind::SingleChoice => rsx! {
                    div {
                        for (text, selected) in option_rows {
                            OptionButton { text, selected, dispatch }
                        }
                    }
                },
                QuestionKind::FillInBlank => rsx! {
                    input {
                        class: "answer-input",
                        value: "{current}",
                        placeholder: "请输入答案",
                        oninput: move |evt| dispatch.call(PaperIntent::SetAnswer(evt.value())),
                    }
                },
                QuestionKind::FreeResponse => rsx! {
                    textarea {
                        class: "answer-textarea",
                        value: "{current}",
                        placeholder: "请输入解答过程",
                        oninput: move |evt| dispatch.call(PaperIntent::SetAnswer(evt.value())),
                    }
                },
            }
        }

        nav { class: "review-strip",
            for (i, answered) in answered_flags.into_iter().enumerate() {
                button {
                    class: if i == current_index {
                        "current"
                    } else if answered {
                        "answered"
                    } else {
                        ""
                    },
                    onclick: move |_| dispatch.call(PaperIntent::JumpTo(i)),
                    "{i + 1}"
                }
            }
        }

        div { class: "paper-actions",
            button {
                disabled: is_first,
                onclick: move |_| dispatch.call(PaperIntent::PreviousQuestion),
                "上一题"
            }
            button {
                disabled: is_last,
                onclick: move |_| dispatch.call(PaperIntent::NextQuestion),
                "下一题"
            }
            button {
                class: "submit",
                disabled: in_flight,
                onclick: move |_| dispatch.call(PaperIntent::RequestSubmit),
                "提交"
            }
        }

        if failed {
            div { class: "banner",
                span { "{banner_text}" }
                button {
                    onclick: move |_| dispatch.call(PaperIntent::RequestSubmit),
                    "重试"
                }
                button {
                    onclick: move |_| dispatch.call(PaperIntent::DismissFailure),
                    "继续作答"
                }
            }
        }

        if gated {
            div { class: "modal-backdrop",
                div { class: "modal",
                    p { "{prompt_text}" }
                    div { class: "modal-actions",
                        if !time_up {
                            button {
                                onclick: move |_| dispatch.call(PaperIntent::DeclineSubmit),
                                "继续作答"
                            }
                        }
                        button {
                            onclick: move |_| dispatch.call(PaperIntent::ConfirmSubmit),
                            "确定提交"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn OptionButton(text: String, selected: bool, dispatch: Callback<PaperIntent>) -> Element {
    let value = text.clone();
    rsx! {
        button {
            class: if selected { "option selected" } else { "option" },
            onclick: move |_| dispatch.call(PaperIntent::SetAnswer(value.clone())),
            "{text}"
        }
    }
}
