//! **viewless** -- describe UI component trees as data and render them
//! through whichever UI kit is in scope.
//!
//! This is the umbrella crate that re-exports everything needed to build and
//! exercise viewless trees from a single dependency:
//!
//! ```toml
//! [dependencies]
//! viewless = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`viewless_core`] are available at the crate root
//!   ([`UiComponent`], [`FlatOption`], [`render_component`],
//!   [`define_viewless_component`], [`TemplateRef`], etc.).
//! * The [`ui`] module re-exports everything from [`viewless_ui`]: the
//!   abstract components, [`FormRef`](ui::FormRef) and the kit adaptors.
//! * [`ratatui`] and [`tokio`] are re-exported so demos and downstream crates
//!   do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use viewless::testing::TestApp;
//! use viewless::ui::{adaptor::naive_ui, use_button};
//! use viewless::FlatOption;
//!
//! let button = use_button(FlatOption::new().set("type", "primary").set("defaultSlot", "Save"));
//! let mut app = TestApp::new(button).with_adaptor_set(&naive_ui::use_adaptor());
//! app.mount()?;
//! println!("{}", app.render_string(40, 4));
//! ```

pub use viewless_core::*;
pub mod ui {
    pub use viewless_ui::*;
}

// Re-export dependencies for use in demos and downstream crates
pub use ratatui;
pub use tokio;
