use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizCardVm, map_quiz_cards};

#[derive(Clone, Debug, PartialEq)]
struct BankData {
    cards: Vec<QuizCardVm>,
}

#[component]
pub fn QuizBankView() -> Element {
    let ctx = use_context::<AppContext>();
    let quizzes = ctx.quizzes();

    let resource = use_resource(move || {
        let quizzes = quizzes.clone();
        async move {
            let items = quizzes
                .list_quizzes()
                .await
                .map_err(|err| ViewError::from_api(&err))?;
            Ok(BankData {
                cards: map_quiz_cards(&items),
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page quiz-bank",
            h2 { "测验列表" }

            match state {
                ViewState::Idle => rsx! {
                    p { "空闲" }
                },
                ViewState::Loading => rsx! {
                    p { "加载中..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.cards.is_empty() {
                        p { "暂无测验。" }
                    } else {
                        table {
                            thead {
                                tr {
                                    th { "名称" }
                                    th { "类型" }
                                    th { "难度" }
                                    th { "截止时间" }
                                    th { "" }
                                }
                            }
                            tbody {
                                for card in data.cards {
                                    BankRow { card }
                                }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                    if err == ViewError::Unauthorized {
                        Link { to: Route::AuthRequired {}, "重新登录" }
                    }
                },
            }
        }
    }
}

#[component]
fn BankRow(card: QuizCardVm) -> Element {
    rsx! {
        tr {
            td { "{card.title}" }
            td { "{card.kind}" }
            td { "{card.difficulty}" }
            td { "{card.deadline_str}" }
            td {
                Link { to: Route::Paper { quiz_id: card.id }, "开始作答" }
            }
        }
    }
}
