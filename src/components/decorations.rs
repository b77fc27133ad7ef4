use dioxus::prelude::*;

use crate::effects;

// Layouts are generated once per mount so re-renders don't reshuffle them.

#[component]
pub fn Sparkles(count: usize) -> Element {
    let sparkles = use_hook(move || effects::sparkles(count, &mut rand::thread_rng()));

    rsx! {
        div { class: "sparkles",
            for (i, sparkle) in sparkles.iter().enumerate() {
                div { key: "{i}", class: "sparkle", style: sparkle.style() }
            }
        }
    }
}

#[component]
pub fn FloatingParticles(section_index: usize, count: usize) -> Element {
    let particles = use_hook(move || {
        effects::floating_particles(section_index, count, &mut rand::thread_rng())
    });

    rsx! {
        for (i, particle) in particles.iter().enumerate() {
            div { key: "particle-{i}", class: "particle", style: particle.style() }
        }
    }
}

#[component]
pub fn LightStreaks(section_index: usize, count: usize) -> Element {
    let streaks =
        use_hook(move || effects::light_streaks(section_index, count, &mut rand::thread_rng()));

    rsx! {
        for (i, streak) in streaks.iter().enumerate() {
            div { key: "streak-{i}", class: "light-streak", style: streak.style() }
        }
    }
}
