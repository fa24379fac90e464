//! The abstract component vocabulary.
//!
//! Each builder tags a [`FlatOption`](viewless_core::FlatOption) with an
//! abstract identifier.  Nothing here knows about any UI kit; an adaptor in
//! scope decides what each identifier becomes.

mod button;
mod card;
mod collapse;
mod form;
mod input;
mod menu;
mod steps;
mod tabs;
mod timeline;

pub use button::{use_button, BUTTON};
pub use card::{use_card, CARD};
pub use collapse::{use_collapse, use_collapse_item, COLLAPSE, COLLAPSE_ITEM};
pub use form::{members, use_form, use_form_item, FormRef, FORM, FORM_ITEM};
pub use input::{use_input, INPUT};
pub use menu::{use_menu, MenuItem, MENU};
pub use steps::{use_steps, use_steps_item, STEPS, STEPS_ITEM};
pub use tabs::{use_tab_item, use_tabs, TABS, TAB_ITEM};
pub use timeline::{use_timeline, use_timeline_item, TIMELINE, TIMELINE_ITEM};
