use dioxus::prelude::*;

#[component]
pub fn Icon(name: String, class: String) -> Element {
    let svg_content = match name.as_str() {
        "music" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                path { d: "M9 18V5l12-2v13" }
                circle { cx: "6", cy: "18", r: "3" }
                circle { cx: "18", cy: "16", r: "3" }
            }
        },
        "goblet" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "1.5",
                path { d: "M6 3h12l-1 6a5 5 0 0 1-10 0z" }
                path { d: "M12 14v5" }
                path { d: "M8 21h8" }
                path { d: "M12 2c-1 1.5-1 3 0 4.5c1-1.5 1-3 0-4.5z", fill: "currentColor" }
            }
        },
        "castle" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                path { d: "M3 21V8h3V5h2v3h3V5h2v3h3V5h2v3h3v13z" }
                path { d: "M10 21v-5a2 2 0 0 1 4 0v5" }
            }
        },
        "fleur" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                path { d: "M12 2c-2 3-2 6 0 9c2-3 2-6 0-9z" }
                path { d: "M12 11c-3-3-7-2-7 1s3 3 5 1" }
                path { d: "M12 11c3-3 7-2 7 1s-3 3-5 1" }
                path { d: "M8 15h8" }
                path { d: "M12 15v7" }
            }
        },
        "ship" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                path { d: "M2 17l2 4h16l2-4z" }
                path { d: "M12 3v14" }
                path { d: "M12 4l7 10h-7" }
                path { d: "M12 7l-5 7h5" }
            }
        },
        _ => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                circle { cx: "12", cy: "12", r: "10" }
            }
        },
    };

    svg_content
}
