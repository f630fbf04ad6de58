use dioxus::prelude::*;
use wordscope::components::App as WordscopeApp;

const MAIN_CSS: Asset = asset!("/assets/wordscope.css");

fn main() {
    // DEBUG for development builds, INFO for release builds
    #[cfg(debug_assertions)]
    let level = dioxus::logger::tracing::Level::DEBUG;
    #[cfg(not(debug_assertions))]
    let level = dioxus::logger::tracing::Level::INFO;

    if let Err(err) = dioxus::logger::init(level) {
        eprintln!("logger failed to init: {err}");
    }

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

        let config = Config::default().with_window(
            WindowBuilder::new()
                .with_title("Wordscope")
                .with_resizable(true)
                .with_inner_size(LogicalSize::new(1100.0, 800.0))
                .with_min_inner_size(LogicalSize::new(640.0, 480.0)),
        );

        dioxus::LaunchBuilder::desktop().with_cfg(config).launch(App);
    }

    #[cfg(feature = "web")]
    {
        dioxus::launch(App);
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // asset! stylesheets do not load on desktop, inline them instead
        if cfg!(target_arch = "wasm32") {
            document::Stylesheet { href: MAIN_CSS }
        } else {
            style { {include_str!("../assets/wordscope.css")} }
        }

        body { class: "ws-body",
            WordscopeApp {}
        }
    }
}
