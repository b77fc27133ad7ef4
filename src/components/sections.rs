use dioxus::prelude::*;

use crate::components::{FloatingParticles, Icon, LightStreaks, PreloadPhase, Sparkles};
use crate::config::PageConfig;

const HERO_REVEAL: &str = "opacity: 1; animation: fadeInHero 1.5s ease-out forwards;";
#[cfg(target_arch = "wasm32")]
const SECTION_HEADING_ANIMATION: &str = "fadeIn 1s ease-out 0.3s forwards";

/// `(shape transform, icon filter)` for a school icon.
pub fn hover_styles(hovered: bool) -> (&'static str, &'static str) {
    if hovered {
        ("scale(1.25) rotate(-10deg)", "drop-shadow(0 0 20px currentColor)")
    } else {
        ("scale(1) rotate(0deg)", "none")
    }
}

#[component]
pub fn HeroSection() -> Element {
    let config = use_context::<PageConfig>();
    let phase = use_context::<Signal<PreloadPhase>>();
    let reveal = if phase() == PreloadPhase::Done {
        HERO_REVEAL
    } else {
        ""
    };

    rsx! {
        header { class: "hero",
            Sparkles { count: config.sparkle_count }
            div { class: "hero-content",
                div { class: "glasses-container", style: reveal,
                    Icon { name: "goblet".to_string(), class: "hero-goblet".to_string() }
                }
                h1 { class: "hero-title", "Magical Academy" }
                h2 { style: reveal, "The Goblet of Fire" }
            }
        }
    }
}

#[component]
pub fn ContentSection(index: usize, title: String, children: Element) -> Element {
    let config = use_context::<PageConfig>();

    rsx! {
        section { class: "content-section",
            FloatingParticles { section_index: index, count: config.particle_count }
            LightStreaks { section_index: index, count: config.streak_count }
            h2 { "{title}" }
            div { class: "section-body", {children} }
        }
    }
}

#[component]
pub fn SchoolIcon(name: String, emblem: String, color: String) -> Element {
    let mut hovered = use_signal(|| false);
    let (shape_transform, filter) = hover_styles(hovered());

    rsx! {
        div {
            class: "school-icon",
            style: "color: {color}; filter: {filter};",
            onmouseenter: move |_| hovered.set(true),
            onmouseleave: move |_| hovered.set(false),
            div { class: "icon-shape", style: "transform: {shape_transform};",
                Icon { name: emblem.clone(), class: "school-emblem".to_string() }
            }
            h3 { "{name}" }
        }
    }
}

/// Adds `visible` to each `.content-section` the first time it scrolls into view.
pub fn use_scroll_reveal(threshold: f64) {
    use_effect(move || {
        #[cfg(target_arch = "wasm32")]
        observe_content_sections(threshold);
        #[cfg(not(target_arch = "wasm32"))]
        let _ = threshold;
    });
}

#[cfg(target_arch = "wasm32")]
fn observe_content_sections(threshold: f64) {
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use web_sys::{
        Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
        IntersectionObserverInit,
    };

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(sections) = document.query_selector_all(".content-section") else {
        return;
    };
    if sections.length() == 0 {
        return;
    }

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let _ = target.class_list().add_1("visible");
                if let Some(heading) = target
                    .query_selector("h2")
                    .ok()
                    .flatten()
                    .and_then(|h| h.dyn_into::<HtmlElement>().ok())
                {
                    let _ = heading
                        .style()
                        .set_property("animation", SECTION_HEADING_ANIMATION);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer =
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => observer,
            Err(err) => {
                tracing::warn!(?err, "scroll reveal unavailable");
                return;
            }
        };

    for i in 0..sections.length() {
        if let Some(section) = sections.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            observer.observe(&section);
        }
    }
    callback.forget();
}
