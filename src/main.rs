use dioxus::prelude::*;
use tracing::Level;

mod activation;
mod components;
mod config;
mod effects;

use components::LandingPage;

const ACADEMY_CSS: Asset = asset!("/assets/styling/academy.css");

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Magical Academy - The Goblet of Fire" }
        document::Meta { name: "theme-color", content: "#0b0f1f" }
        document::Meta {
            name: "description",
            content: "Magical Academy welcomes the Triwizard Tournament.",
        }
        document::Stylesheet { href: ACADEMY_CSS }

        LandingPage {}
    }
}
