use dioxus::prelude::*;

/// Before/after view: the generated image is revealed left of the slider.
#[component]
pub fn ImageComparator(original: String, generated: String) -> Element {
    let mut position = use_signal(|| 50.0f64);
    let hidden = 100.0 - position();

    rsx! {
        div { class: "comparator",
            img { class: "comparator-image", src: "{original}", alt: "Original room" }
            img {
                class: "comparator-image comparator-overlay",
                src: "{generated}",
                alt: "Redesigned room",
                style: "clip-path: inset(0 {hidden}% 0 0);",
            }
            div { class: "comparator-handle", style: "left: {position}%;" }
            input {
                r#type: "range",
                class: "comparator-slider",
                min: "0",
                max: "100",
                step: "0.5",
                value: "{position}",
                aria_label: "Compare original and redesigned room",
                oninput: move |evt: FormEvent| {
                    if let Ok(value) = evt.value().parse::<f64>() {
                        position.set(value.clamp(0.0, 100.0));
                    }
                },
            }
            span { class: "comparator-label left", "Redesign" }
            span { class: "comparator-label right", "Original" }
        }
    }
}
