use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Paragraph, Widget};
use tracing::trace;

use crate::adaptor::AdaptorSet;
use crate::component::{ComponentInstance, InstanceContext};
use crate::context::{Environment, RenderContext};
use crate::error::MountError;
use crate::handle::{Handle, HandleTable};
use crate::option::{Key, Target, UiComponent};
use crate::render::{host_event_name, render_component};
use crate::template_ref::{RefOwner, TemplateRef};
use crate::value::{PropMap, PropValue};
use crate::vnode::{Child, VNode};

/// What a [`MountedNode`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    Element,
    Component,
}

/// One node of the mounted tree.
///
/// Elements and components carry their host props; a component's only
/// child is the node it rendered.  Text nodes keep their content in
/// `name`.
#[derive(Clone, Debug)]
pub struct MountedNode {
    pub kind: NodeKind,
    pub name: String,
    pub key: Option<Key>,
    pub props: PropMap,
    pub children: Vec<MountedNode>,
    event_prefix: Rc<str>,
}

impl MountedNode {
    fn text_node(text: String, event_prefix: &Rc<str>) -> Self {
        Self {
            kind: NodeKind::Text,
            name: text,
            key: None,
            props: PropMap::new(),
            children: Vec::new(),
            event_prefix: Rc::clone(event_prefix),
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    pub fn prop(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    /// All text below this node, concatenated in order.
    pub fn text(&self) -> String {
        if self.is_text() {
            return self.name.clone();
        }
        self.children.iter().map(MountedNode::text).collect()
    }

    /// Whether the node's merged style hides it.
    pub fn is_hidden(&self) -> bool {
        self.props
            .get("style")
            .and_then(PropValue::as_map)
            .and_then(|style| style.get("display"))
            .is_some_and(|display| display.as_str() == Some("none"))
    }

    /// First node named `name` in depth-first order, this node included.
    pub fn find(&self, name: &str) -> Option<&MountedNode> {
        if !self.is_text() && self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// Every node named `name`, depth-first.
    pub fn find_all<'a>(&'a self, name: &str, out: &mut Vec<&'a MountedNode>) {
        if !self.is_text() && self.name == name {
            out.push(self);
        }
        for child in &self.children {
            child.find_all(name, out);
        }
    }

    /// Fire `event` through the node's rendered handler prop.  Returns
    /// whether a handler was bound.
    pub fn emit(&self, event: &str, args: &[PropValue]) -> bool {
        let name = host_event_name(&self.event_prefix, event);
        match self.props.get(&name).and_then(PropValue::as_handler) {
            Some(handler) => {
                handler.call(args);
                true
            }
            None => false,
        }
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        match self.kind {
            NodeKind::Text => out.push_str(&format!("{indent}{}\n", self.name)),
            NodeKind::Element => out.push_str(&format!("{indent}<{}>", self.name)),
            NodeKind::Component => out.push_str(&format!("{indent}[{}]", self.name)),
        }
        if self.is_text() {
            return;
        }
        if let Some(key) = &self.key {
            out.push_str(&format!(" #{key}"));
        }
        if self.is_hidden() {
            out.push_str(" (hidden)\n");
            return;
        }
        out.push('\n');
        for child in &self.children {
            child.write_outline(depth + 1, out);
        }
    }
}

/// A headless host that mounts option trees without a real UI framework.
///
/// `TestApp` renders a root [`UiComponent`] under an [`Environment`],
/// instantiates every concrete component it meets, resolves template refs
/// after each subtree mounts and keeps instances alive across
/// [`rerender`](TestApp::rerender) calls as long as their position, key and
/// component stay the same.
///
/// # Example
///
/// ```rust,ignore
/// use viewless_core::testing::TestApp;
/// use viewless_core::UiComponent;
///
/// let mut app = TestApp::new(UiComponent::new("div").slot("default", "hello"));
/// app.mount()?;
/// assert_eq!(app.find("div").map(|n| n.text()), Some("hello".into()));
/// assert!(app.render_string(20, 1).starts_with("<div>"));
/// ```
pub struct TestApp {
    root: UiComponent,
    env: Environment,
    owner: RefOwner,
    instances: HashMap<String, Box<dyn ComponentInstance>>,
    tree: Option<MountedNode>,
}

impl TestApp {
    pub fn new(root: impl Into<UiComponent>) -> Self {
        Self {
            root: root.into(),
            env: Environment::default(),
            owner: RefOwner::new(),
            instances: HashMap::new(),
            tree: None,
        }
    }

    /// Mount under an explicit root environment.
    pub fn with_environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Mount with `set` provided at the root.
    pub fn with_adaptor_set(mut self, set: &AdaptorSet) -> Self {
        self.env.provide(set);
        self
    }

    /// Mount from scratch, dropping any previous instances and refs.
    pub fn mount(&mut self) -> Result<&MountedNode, MountError> {
        self.instances.clear();
        self.owner = RefOwner::new();
        self.rerender()
    }

    /// Render the whole tree again, reusing mounted instances.
    pub fn rerender(&mut self) -> Result<&MountedNode, MountError> {
        self.owner.begin_render(self.env.handle_adaptor.clone());
        let cx = RenderContext {
            adaptor: self.env.adaptor.clone(),
            handle_adaptor: self.env.handle_adaptor.clone(),
            options: Rc::clone(&self.env.options),
            ..RenderContext::new()
        }
        .with_ref_owner(self.owner.clone());
        let vnode = render_component(self.root.clone(), &cx);

        let (result, seen) = {
            let mut mounter = Mounter {
                instances: &mut self.instances,
                seen: HashSet::new(),
                event_prefix: Rc::from(self.env.options.event_prefix.as_str()),
            };
            let result = mounter.mount(&vnode, &self.env, "root");
            (result, mounter.seen)
        };
        self.instances.retain(|path, _| seen.contains(path));

        Ok(&*self.tree.insert(result?))
    }

    /// The mounted tree, if [`mount`](TestApp::mount) succeeded.
    pub fn tree(&self) -> Option<&MountedNode> {
        self.tree.as_ref()
    }

    pub fn find(&self, name: &str) -> Option<&MountedNode> {
        self.tree.as_ref()?.find(name)
    }

    pub fn find_all(&self, name: &str) -> Vec<&MountedNode> {
        let mut out = Vec::new();
        if let Some(tree) = &self.tree {
            tree.find_all(name, &mut out);
        }
        out
    }

    /// A template ref for a `$ref` set on the root option itself.
    pub fn template_ref(&self, key: impl Into<String>) -> TemplateRef {
        self.owner.template_ref(key)
    }

    /// Number of live component instances.
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Indented text outline of the mounted tree.  Hidden nodes are listed
    /// without their children.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        if let Some(tree) = &self.tree {
            tree.write_outline(0, &mut out);
        }
        out
    }

    /// Draw the outline into a ratatui [`Buffer`] of the given size.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        Paragraph::new(self.outline()).render(area, &mut buf);
        buf
    }

    /// Draw the outline and return the buffer as a plain string, one line
    /// per row.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(buf[(x, y)].symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }
}

struct Mounter<'a> {
    instances: &'a mut HashMap<String, Box<dyn ComponentInstance>>,
    seen: HashSet<String>,
    event_prefix: Rc<str>,
}

impl Mounter<'_> {
    fn mount(&mut self, node: &VNode, env: &Environment, path: &str) -> Result<MountedNode, MountError> {
        trace!(path, target_name = node.target.name(), "mount");
        let (kind, children, handle) = match &node.target {
            Target::Named(tag) if tag.starts_with(|c: char| c.is_ascii_uppercase()) => {
                return Err(MountError::UnresolvedComponent(tag.clone()));
            }
            Target::Named(tag) => {
                let children = self.mount_slots(node, env, path)?;
                let handle: Handle = Rc::new(HandleTable::new(tag.as_str()).value("tagName", tag.as_str()));
                (NodeKind::Element, children, handle)
            }
            Target::Component(component) => {
                let mut instance = self
                    .instances
                    .remove(path)
                    .unwrap_or_else(|| component.instantiate());
                let mut provided = env.clone();
                let rendered = instance.render(&mut InstanceContext {
                    props: &node.props,
                    slots: &node.slots,
                    injected: env,
                    provided: &mut provided,
                });
                let child_path = format!("{path}/{}", child_segment(&rendered, 0));
                let child = self.mount(&rendered, &provided, &child_path);
                let handle: Handle = match instance.expose() {
                    Some(handle) => handle,
                    None => Rc::new(HandleTable::new(component.name())),
                };
                self.instances.insert(path.to_string(), instance);
                self.seen.insert(path.to_string());
                (NodeKind::Component, vec![child?], handle)
            }
        };

        if let (Some(ref_name), Some(owner)) = (&node.ref_name, &node.owner) {
            owner.bind(ref_name, handle);
        }

        Ok(MountedNode {
            kind,
            name: node.target.name().to_string(),
            key: node.key.clone(),
            props: node.props.clone(),
            children,
            event_prefix: Rc::clone(&self.event_prefix),
        })
    }

    fn mount_slots(&mut self, node: &VNode, env: &Environment, path: &str) -> Result<Vec<MountedNode>, MountError> {
        let mut mounted = Vec::new();
        for (slot, thunk) in &node.slots {
            for (index, child) in thunk().iter().enumerate() {
                match child {
                    Child::Text(text) => mounted.push(MountedNode::text_node(text.clone(), &self.event_prefix)),
                    Child::Node(vnode) => {
                        let child_path = format!("{path}/{slot}.{}", child_segment(vnode, index));
                        mounted.push(self.mount(vnode, env, &child_path)?);
                    }
                }
            }
        }
        Ok(mounted)
    }
}

/// Path segment identifying a child across renders: its key if it has one,
/// otherwise its index, plus the target name.
fn child_segment(node: &VNode, index: usize) -> String {
    match &node.key {
        Some(key) => format!("#{key}:{}", node.target.name()),
        None => format!("{index}:{}", node.target.name()),
    }
}
