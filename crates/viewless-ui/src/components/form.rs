use tracing::{debug, warn};
use viewless_core::{use_viewless_component, FlatOption, PropValue, TemplateRef, UiComponent};

pub const FORM: &str = "Form";
pub const FORM_ITEM: &str = "FormItem";

/// Abstract member names every kit's form handle answers to.
pub mod members {
    pub const VALIDATE: &str = "validate";
    pub const CLEAR_VALIDATE: &str = "clearValidate";
    pub const RESET_FIELDS: &str = "resetFields";
}

/// A form bound to a model map.
///
/// Props: `modelValue`, `rules`, `inline`, `size`, `labelPosition`
/// (`left`, `right` or `top`).  Slots: `default`.
pub fn use_form(option: FlatOption) -> UiComponent {
    use_viewless_component(FORM, option)
}

/// One labelled field of a form.
///
/// Props: `prop` (the model field), `label`, `labelPosition`, `size`,
/// `required`.  Slots: `default`, `label`.
pub fn use_form_item(option: FlatOption) -> UiComponent {
    use_viewless_component(FORM_ITEM, option)
}

/// Typed access to a mounted `Form` through its template ref.
///
/// Every call answers `None` while the ref is unresolved.  Failures of the
/// underlying kit never surface as errors: `validate` reports them as
/// `false`, the other calls log and carry on.
#[derive(Clone, Debug)]
pub struct FormRef {
    inner: TemplateRef,
}

impl FormRef {
    pub fn new(inner: TemplateRef) -> Self {
        Self { inner }
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.is_resolved()
    }

    pub fn template_ref(&self) -> &TemplateRef {
        &self.inner
    }

    /// Run the kit's validation.  `Some(true)` when every field passes.
    pub async fn validate(&self) -> Option<bool> {
        let result = self.inner.call(members::VALIDATE, Vec::new()).await?;
        Some(match result {
            Ok(valid) => valid.is_truthy(),
            Err(err) => {
                debug!(%err, "form validation did not pass");
                false
            }
        })
    }

    /// Drop the validation messages currently shown.
    pub async fn clear_validate(&self) -> Option<()> {
        self.invoke(members::CLEAR_VALIDATE).await
    }

    /// Restore every field to the value it had when the form mounted.
    pub async fn reset_fields(&self) -> Option<()> {
        self.invoke(members::RESET_FIELDS).await
    }

    async fn invoke(&self, member: &str) -> Option<()> {
        if let Err(err) = self.inner.call(member, Vec::<PropValue>::new()).await? {
            warn!(member, %err, "form call failed");
        }
        Some(())
    }
}

impl From<TemplateRef> for FormRef {
    fn from(inner: TemplateRef) -> Self {
        Self::new(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewless_core::RefOwner;

    #[tokio::test]
    async fn unmounted_form_answers_nothing() {
        let form = FormRef::new(RefOwner::new().template_ref("formRef"));
        assert!(!form.is_mounted());
        assert_eq!(form.validate().await, None);
        assert_eq!(form.clear_validate().await, None);
        assert_eq!(form.reset_fields().await, None);
    }

    #[test]
    fn form_item_keeps_flat_props() {
        let item = use_form_item(
            FlatOption::new()
                .set("prop", "username")
                .set("required", true)
                .set("labelSlot", "Name"),
        );
        assert_eq!(item.target.name(), FORM_ITEM);
        assert_eq!(item.props.get("required"), Some(&PropValue::from(true)));
        assert!(item.slots.contains_key("label"));
    }
}
