use dioxus::prelude::*;

/// Footer naming the service the client talks to
#[component]
pub fn Footer(api_url: String) -> Element {
    rsx! {
        footer { class: "ws-footer",
            span { class: "ws-footer-text",
                "Analysis runs on the Wordscope service at {api_url}"
            }
        }
    }
}
