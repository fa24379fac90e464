//! Abstract UI components and the adaptors that map them onto real kits.
//!
//! Author trees with the builders in [`components`] (`use_form`,
//! `use_input`, ...) and install one of the [`adaptor`] factories above
//! them.  The same tree then renders as naive-ui, element-plus or
//! ant-design-vue components:
//!
//! | Abstract | naive-ui | element-plus | ant-design-vue |
//! |----------|----------|--------------|----------------|
//! | `Form` | `NForm` | `ElForm` | `AForm` |
//! | `FormItem` | `NFormItem` | `ElFormItem` | `AFormItem` |
//! | `Input` | `NInput` | `ElInput` | `AInput` |
//! | `Card` | `NCard` | `ElCard` | `ACard` |
//! | `Button` | `NButton` | `ElButton` | `AButton` |
//! | `Tabs` / `TabItem` | `NTabs` / `NTabPane` | - | - |
//!
//! The concrete components live in [`kit`] as headless stand-ins, so whole
//! trees can be mounted and exercised with
//! [`TestApp`](viewless_core::testing::TestApp).

pub mod adaptor;
pub mod components;
pub mod kit;
pub mod utils;

pub use components::*;
pub use kit::Flavor;
pub use utils::{rename_event, rename_events, rename_prop, rename_props, transform_events, transform_props};
