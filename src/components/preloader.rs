use dioxus::prelude::*;

use crate::components::Icon;
use crate::config::PageConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadPhase {
    Loading,
    FadingOut,
    Done,
}

#[cfg(target_arch = "wasm32")]
async fn page_delay_ms(ms: u32) {
    gloo_timers::future::TimeoutFuture::new(ms).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn page_delay_ms(_ms: u32) {}

/// Resolves once the window `load` event has fired.
#[cfg(target_arch = "wasm32")]
async fn wait_for_window_load() {
    loop {
        let complete = web_sys::window()
            .and_then(|w| w.document())
            .map(|d| d.ready_state() == "complete")
            .unwrap_or(true);
        if complete {
            return;
        }
        gloo_timers::future::TimeoutFuture::new(50).await;
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn wait_for_window_load() {}

#[cfg(target_arch = "wasm32")]
fn mark_body_loaded() {
    if let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    {
        let _ = body.class_list().add_1("loaded");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn mark_body_loaded() {}

#[component]
pub fn Preloader() -> Element {
    let config = use_context::<PageConfig>();
    let phase = use_context::<Signal<PreloadPhase>>();

    let delay_ms = config.preloader_delay_ms;
    let fade_ms = config.fade_out_delay_ms;
    use_effect(move || {
        let mut phase = phase;
        spawn(async move {
            wait_for_window_load().await;
            page_delay_ms(delay_ms).await;
            phase.set(PreloadPhase::FadingOut);
            page_delay_ms(fade_ms).await;
            phase.set(PreloadPhase::Done);
            mark_body_loaded();
        });
    });

    let class = match phase() {
        PreloadPhase::Loading => "preloader",
        PreloadPhase::FadingOut => "preloader fade-out",
        PreloadPhase::Done => return rsx! {},
    };

    rsx! {
        div { id: "preloader", class: "{class}",
            div { class: "preloader-emblem",
                Icon { name: "goblet".to_string(), class: "preloader-goblet".to_string() }
            }
            p { class: "preloader-text", "Lighting the goblet..." }
        }
    }
}
