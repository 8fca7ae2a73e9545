use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;

/// Landing point after a 401: the stored token is already gone, so all the
/// user can do here is log in again elsewhere and come back.
#[component]
pub fn AuthRequiredView() -> Element {
    rsx! {
        div { class: "page",
            h2 { "登录已过期" }
            p { "为保护账号安全，本次登录已失效，已清除本机保存的凭据。" }
            p { "请重新登录后再回到测验列表。" }
            Link { to: Route::QuizBank {}, "返回测验列表" }
        }
    }
}
