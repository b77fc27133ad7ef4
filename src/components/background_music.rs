use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::activation::{web, ActivationEvent};
use crate::components::Icon;
use crate::config::PageConfig;

pub const AUDIO_ELEMENT_ID: &str = "background-music";
pub const MUSIC_PROMPT_ID: &str = "music-enable-overlay";

/// How the "enable music" overlay should render.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptView {
    Hidden,
    Visible,
    FadingOut { duration_ms: u64 },
}

impl PromptView {
    /// Inline style for the overlay, `None` when it is not in the document.
    pub fn overlay_style(self) -> Option<String> {
        match self {
            Self::Hidden => None,
            Self::Visible => Some(String::new()),
            Self::FadingOut { duration_ms } => Some(format!(
                "opacity: 0; transition: opacity {duration_ms}ms ease-out;"
            )),
        }
    }
}

/// Looping background track plus the autoplay fallback prompt.
#[component]
pub fn BackgroundMusic() -> Element {
    let config = use_context::<PageConfig>();
    let prompt = use_signal(|| PromptView::Hidden);
    let music_src = config.music_src.clone();

    #[cfg(target_arch = "wasm32")]
    {
        let activation = config.activation();
        use_effect(move || {
            web::start_session(activation.clone(), AUDIO_ELEMENT_ID, prompt);
        });
    }

    rsx! {
        audio {
            id: AUDIO_ELEMENT_ID,
            src: "{music_src}",
            preload: "auto",
            r#loop: true,
        }
        ActivationPrompt { view: prompt }
    }
}

#[component]
pub fn ActivationPrompt(view: Signal<PromptView>) -> Element {
    let Some(style) = view().overlay_style() else {
        return rsx! {};
    };

    rsx! {
        div { id: MUSIC_PROMPT_ID, class: "music-enable-overlay", style: "{style}",
            button {
                class: "music-enable-button",
                r#type: "button",
                onclick: move |_| activate_music(),
                Icon { name: "music".to_string(), class: "music-enable-icon".to_string() }
                span { "Enable Background Music" }
            }
        }
    }
}

// Runs inside the click's event turn, which is what lets play() through.
#[cfg(target_arch = "wasm32")]
fn activate_music() {
    web::dispatch(ActivationEvent::PromptActivated);
}

#[cfg(not(target_arch = "wasm32"))]
fn activate_music() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_prompt_is_not_rendered() {
        assert_eq!(PromptView::Hidden.overlay_style(), None);
        assert_eq!(PromptView::Visible.overlay_style(), Some(String::new()));
    }

    #[test]
    fn fading_prompt_transitions_opacity_over_the_fade_window() {
        let style = PromptView::FadingOut { duration_ms: 500 }
            .overlay_style()
            .unwrap();
        assert_eq!(style, "opacity: 0; transition: opacity 500ms ease-out;");
    }
}
