use dioxus::prelude::*;

use quiz_core::model::QuizId;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ResultVm, ReviewVm, map_result};

#[derive(Clone, Debug, PartialEq)]
struct ResultData {
    result: ResultVm,
}

#[component]
pub fn ResultView(quiz_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let sessions = ctx.sessions();

    let resource = use_resource(move || {
        let sessions = sessions.clone();
        async move {
            let result = sessions
                .load_result(QuizId::new(quiz_id))
                .await
                .map_err(|err| ViewError::from_session(&err))?;
            Ok(ResultData {
                result: map_result(&result),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "测验结果" }

            match state {
                ViewState::Idle => rsx! {
                    p { "空闲" }
                },
                ViewState::Loading => rsx! {
                    p { "加载中..." }
                },
                ViewState::Ready(data) => rsx! {
                    ResultDetails { result: data.result.clone() }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn ResultDetails(result: ResultVm) -> Element {
    let mut current = use_signal(|| 0usize);
    let count = result.reviews.len();
    let index = current().min(count.saturating_sub(1));

    rsx! {
        div { class: "result-summary",
            span { class: "score", "{result.score}" }
            span { "共 {result.total} 题，答对 {result.correct} 题" }
            span { "用时 {result.duration_str}" }
        }

        if count > 0 {
            nav { class: "review-strip",
                for (i, review) in result.reviews.iter().enumerate() {
                    button {
                        class: if i == index {
                            "current"
                        } else if review.is_correct {
                            "correct"
                        } else {
                            "wrong"
                        },
                        onclick: move |_| current.set(i),
                        "{i + 1}"
                    }
                }
            }

            ReviewDetails { index, review: result.reviews[index].clone() }

            div { class: "paper-actions",
                button {
                    disabled: index == 0,
                    onclick: move |_| current.set(index.saturating_sub(1)),
                    "上一题"
                }
                button {
                    disabled: index + 1 >= count,
                    onclick: move |_| current.set((index + 1).min(count - 1)),
                    "下一题"
                }
            }
        }
    }
}

#[component]
fn ReviewDetails(index: usize, review: ReviewVm) -> Element {
    rsx! {
        section { class: "review",
            h3 { "{index + 1}. {review.content}" }
            p {
                if review.is_correct {
                    span { class: "correct-mark", "✓ 回答正确" }
                } else {
                    span { class: "wrong-mark", "✗ 回答错误" }
                }
            }
            dl {
                dt { "你的答案" }
                dd { "{review.user_answer_str}" }
                dt { "正确答案" }
                dd { "{review.correct_answer}" }
            }
            if !review.explanation.is_empty() {
                p { class: "explanation", "解析：{review.explanation}" }
            }
        }
    }
}
