//! # Form Example
//!
//! Mounts the login form under one UI kit and drives it headlessly:
//! - Submitting with an empty password fails validation
//! - Typing a password through the kit's own update event
//! - Submitting again emits `submit` with the model
//! - Reset restores the values the form mounted with
//!
//! Run with: `cargo run --example form -- [naive|element|antd]`

mod login;

use std::cell::RefCell;
use std::error::Error;
use std::rc::Rc;

use tracing::info;
use viewless::testing::{MountedNode, TestApp};
use viewless::tokio;
use viewless::ui::adaptor::{ant_design, element_plus, naive_ui};
use viewless::{init_logging, AdaptorSet, EventHandler, Key, LogConfig, LogLevel, PropValue, UiComponent};

use login::{login_form, LoginModel};

struct Kit {
    adaptor: fn() -> AdaptorSet,
    button: &'static str,
    input: &'static str,
    update_event: &'static str,
}

fn kit(name: &str) -> Kit {
    match name {
        "element" => Kit {
            adaptor: element_plus::use_adaptor,
            button: "ElButton",
            input: "ElInput",
            update_event: "update:modelValue",
        },
        "antd" => Kit {
            adaptor: ant_design::use_adaptor,
            button: "AButton",
            input: "AInput",
            update_event: "update:value",
        },
        _ => Kit {
            adaptor: naive_ui::use_adaptor,
            button: "NButton",
            input: "NInput",
            update_event: "update:value",
        },
    }
}

fn keyed<'a>(app: &'a TestApp, name: &str, key: &str) -> Option<&'a MountedNode> {
    let key = Key::from(key);
    app.find_all(name).into_iter().find(|node| node.key.as_ref() == Some(&key))
}

/// Fire `click` on a button and let the spawned handler finish.
async fn click(app: &TestApp, kit: &Kit, key: &str) {
    if let Some(button) = keyed(app, kit.button, key) {
        button.emit("click", &[]);
    }
    tokio::task::yield_now().await;
}

async fn run(kit: Kit) -> Result<(), Box<dyn Error>> {
    let model = LoginModel::new("123", "");
    let submitted = Rc::new(RefCell::new(Vec::<PropValue>::new()));
    let sink = Rc::clone(&submitted);
    let root = UiComponent::new(login_form(model.clone()))
        .prop("title", "Sign in")
        .on(
            "submit",
            EventHandler::new(move |args| sink.borrow_mut().extend(args.iter().cloned())),
        );

    let mut app = TestApp::new(root).with_adaptor_set(&(kit.adaptor)());
    app.mount()?;
    println!("{}", app.render_string(48, 20));

    click(&app, &kit, "submit").await;
    info!(submitted = submitted.borrow().len(), "after submitting an empty password");

    if let Some(password) = app.find_all(kit.input).get(1) {
        password.emit(kit.update_event, &["hunter2".into()]);
    }
    app.rerender()?;
    click(&app, &kit, "submit").await;
    for payload in submitted.borrow().iter() {
        info!(%payload, "submitted");
    }

    click(&app, &kit, "reset").await;
    app.rerender()?;
    info!(model = %model.snapshot(), "after reset");
    println!("{}", app.render_string(48, 20));
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    init_logging(
        &LogConfig::default()
            .with_level(LogLevel::Debug)
            .with_timestamp(false)
            .with_directives("viewless_core::render=info"),
    )?;
    let name = std::env::args().nth(1).unwrap_or_else(|| "naive".to_string());
    let local = tokio::task::LocalSet::new();
    local.run_until(run(kit(&name))).await
}
