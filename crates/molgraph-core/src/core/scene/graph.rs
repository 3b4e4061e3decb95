use super::{AttrValue, Scene, Tag};
use crate::core::io::svg::SvgWriter;
use crate::core::models::ids::{ElementId, NodeId};
use slotmap::SlotMap;
use std::collections::BTreeMap;

/// A visual element of a [`SceneGraph`].
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub attributes: BTreeMap<&'static str, AttrValue>,
    pub styles: BTreeMap<&'static str, AttrValue>,
    /// Class names in insertion order, without duplicates.
    pub classes: Vec<&'static str>,
    pub text: Option<String>,
    pub click_target: Option<NodeId>,
}

impl Element {
    fn new(tag: Tag, parent: Option<ElementId>) -> Self {
        Self {
            tag,
            parent,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            classes: Vec::new(),
            text: None,
            click_target: None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    pub fn style(&self, name: &str) -> Option<&AttrValue> {
        self.styles.get(name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }
}

/// Headless, in-memory element tree implementing [`Scene`].
///
/// The tree is rooted at an `svg` element sized to the diagram surface.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    elements: SlotMap<ElementId, Element>,
    root: ElementId,
}

impl SceneGraph {
    /// Creates a scene whose root `svg` element spans `width` x `height` units.
    pub fn new(width: f64, height: f64) -> Self {
        let mut elements = SlotMap::with_key();
        let mut root = Element::new(Tag::Svg, None);
        root.attributes.insert("width", AttrValue::Number(width));
        root.attributes.insert("height", AttrValue::Number(height));
        root.attributes.insert(
            "viewBox",
            AttrValue::Text(format!(
                "0 0 {} {}",
                super::format_number(width),
                super::format_number(height)
            )),
        );
        let root = elements.insert(root);
        Self { elements, root }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of elements, the root included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements below `from` (inclusive) carrying `class`, in document order.
    pub fn find_by_class(&self, from: ElementId, class: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(element) = self.elements.get(id) else {
                continue;
            };
            if element.has_class(class) {
                found.push(id);
            }
            stack.extend(element.children.iter().rev().copied());
        }
        found
    }

    /// Elements below `from` (inclusive) of kind `tag`, in document order.
    pub fn find_by_tag(&self, from: ElementId, tag: Tag) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(element) = self.elements.get(id) else {
                continue;
            };
            if element.tag == tag {
                found.push(id);
            }
            stack.extend(element.children.iter().rev().copied());
        }
        found
    }

    /// The atom a click on `id` selects, if any.
    pub fn hit_test(&self, id: ElementId) -> Option<NodeId> {
        self.click_target(id)
    }

    /// Serializes the scene as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        SvgWriter::to_string(self)
    }

    fn collect_subtree(&self, id: ElementId, out: &mut Vec<ElementId>) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.elements.get(current) {
                out.push(current);
                stack.extend(element.children.iter().copied());
            }
        }
    }
}

impl Scene for SceneGraph {
    fn create_element(&mut self, parent: ElementId, tag: Tag) -> ElementId {
        let id = self.elements.insert(Element::new(tag, Some(parent)));
        if let Some(parent) = self.elements.get_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    fn remove_element(&mut self, id: ElementId) {
        if id == self.root {
            return;
        }
        let Some(parent) = self.elements.get(id).and_then(|e| e.parent) else {
            return;
        };
        if let Some(parent) = self.elements.get_mut(parent) {
            parent.children.retain(|child| *child != id);
        }
        let mut subtree = Vec::new();
        self.collect_subtree(id, &mut subtree);
        for element in subtree {
            self.elements.remove(element);
        }
    }

    fn set_attribute(&mut self, id: ElementId, name: &'static str, value: AttrValue) {
        if let Some(element) = self.elements.get_mut(id) {
            element.attributes.insert(name, value);
        }
    }

    fn set_style(&mut self, id: ElementId, name: &'static str, value: AttrValue) {
        if let Some(element) = self.elements.get_mut(id) {
            element.styles.insert(name, value);
        }
    }

    fn remove_style(&mut self, id: ElementId, name: &'static str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.styles.remove(name);
        }
    }

    fn set_class(&mut self, id: ElementId, class: &'static str, enabled: bool) {
        let Some(element) = self.elements.get_mut(id) else {
            return;
        };
        let present = element.has_class(class);
        if enabled && !present {
            element.classes.push(class);
        } else if !enabled && present {
            element.classes.retain(|c| *c != class);
        }
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.text = Some(text.to_string());
        }
    }

    fn set_click_target(&mut self, id: ElementId, node: NodeId) {
        if let Some(element) = self.elements.get_mut(id) {
            element.click_target = Some(node);
        }
    }

    fn click_target(&self, id: ElementId) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(element) = current.and_then(|id| self.elements.get(id)) {
            if element.click_target.is_some() {
                return element.click_target;
            }
            current = element.parent;
        }
        None
    }
}
