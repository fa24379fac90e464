//! # Tabs Example
//!
//! The same login form three times, one per UI kit, side by side in a
//! naive-ui tab strip.  Each tab provides its own adaptor, so the forms
//! resolve to different kits inside one tree.
//!
//! Run with: `cargo run --example tabs`

mod login;

use std::error::Error;

use tracing::info;
use viewless::testing::TestApp;
use viewless::tokio;
use viewless::ui::adaptor::{ant_design, element_plus, naive_ui};
use viewless::ui::kit::naive;
use viewless::{
    define_viewless_component, init_logging, AdaptorSet, ComponentRef, EventHandler, LogConfig,
    UiComponent,
};

use login::{login_form, LoginModel};

/// Provides `kit` to a login form rendered below it.
fn proxy_card(ui: &'static str, title: &'static str, kit: fn() -> AdaptorSet) -> ComponentRef {
    let form = login_form(LoginModel::new("123", ""));
    define_viewless_component("ProxyCard", move |_, cx| {
        cx.provide_adaptor(kit);
        UiComponent::new("div").slot(
            "default",
            UiComponent::new(form.clone())
                .prop("title", title)
                .on(
                    "formChange",
                    EventHandler::new(move |args| info!(ui, model = ?args.first(), "form changed")),
                ),
        )
    })
    .into()
}

fn tab(name: &'static str, label: &'static str, content: ComponentRef) -> UiComponent {
    UiComponent::new(naive::components().tab_pane)
        .key(name)
        .prop("name", name)
        .prop("tab", label)
        .slot("default", UiComponent::new(content))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging(&LogConfig::default().with_timestamp(false))?;

    let tabs = UiComponent::new(naive::components().tabs)
        .prop("type", "line")
        .slot(
            "default",
            vec![
                tab(
                    "naive-ui",
                    "Naive UI",
                    proxy_card("naive-ui", "NaiveUI form", naive_ui::use_adaptor),
                ),
                tab(
                    "element-plus",
                    "Element Plus",
                    proxy_card("element-plus", "Element Plus form", element_plus::use_adaptor),
                ),
                tab(
                    "ant-design",
                    "Ant Design",
                    proxy_card("ant-design", "Ant Design form", ant_design::use_adaptor),
                ),
            ],
        );

    let mut app = TestApp::new(tabs);
    app.mount()?;
    for card in ["NCard", "ElCard", "ACard"] {
        info!(card, mounted = app.find(card).is_some(), "kit resolved");
    }
    println!("{}", app.render_string(64, 48));
    Ok(())
}
