use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{AuthRequiredView, PaperView, QuizBankView, ResultView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", QuizBankView)] QuizBank {},
        #[route("/paper/:quiz_id", PaperView)] Paper { quiz_id: u64 },
        #[route("/result/:quiz_id", ResultView)] QuizResult { quiz_id: u64 },
        #[route("/auth-required", AuthRequiredView)] AuthRequired {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    rsx! {
        nav { class: "sidebar",
            h1 { "Quizdesk" }
            ul {
                li { Link { to: Route::QuizBank {}, "测验列表" } }
            }
        }
    }
}
