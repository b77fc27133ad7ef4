use crate::components::{
    use_scroll_reveal, BackgroundMusic, ContentSection, HeroSection, PreloadPhase, Preloader,
    SchoolIcon,
};
use crate::config::load_page_config;
use dioxus::prelude::*;

#[component]
pub fn LandingPage() -> Element {
    let config = use_hook(load_page_config);
    let preload_phase = use_signal(|| PreloadPhase::Loading);

    // Provide state via context
    use_context_provider(|| config.clone());
    use_context_provider(|| preload_phase);

    use_scroll_reveal(config.animation_threshold);

    rsx! {
        Preloader {}
        BackgroundMusic {}
        HeroSection {}
        main { class: "sections",
            ContentSection { index: 0, title: "The Tournament".to_string(),
                p {
                    "Three schools, three champions, and one goblet to choose them. "
                    "The Triwizard Tournament returns to the academy this year."
                }
            }
            ContentSection { index: 1, title: "The Schools".to_string(),
                div { class: "school-icons",
                    SchoolIcon {
                        name: "The Academy".to_string(),
                        emblem: "castle".to_string(),
                        color: "var(--crimson-red)".to_string(),
                    }
                    SchoolIcon {
                        name: "The Palace".to_string(),
                        emblem: "fleur".to_string(),
                        color: "var(--glow-blue)".to_string(),
                    }
                    SchoolIcon {
                        name: "The Northern Institute".to_string(),
                        emblem: "ship".to_string(),
                        color: "var(--golden)".to_string(),
                    }
                }
            }
            ContentSection { index: 2, title: "The Tasks".to_string(),
                ol { class: "task-list",
                    li { "The first task: face what guards the golden egg." }
                    li { "The second task: recover what was taken beneath the lake." }
                    li { "The third task: reach the cup at the heart of the maze." }
                }
            }
        }
        footer { class: "page-footer",
            p { "Click, press a key or tap anywhere to let the music play." }
        }
    }
}
