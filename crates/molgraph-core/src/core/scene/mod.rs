//! # Scene Module
//!
//! The minimal capability interface rendering is written against, and a
//! headless implementation of it.
//!
//! The renderer never touches a concrete drawing surface. It creates, styles
//! and removes elements through [`Scene`], so the reconciliation and layout
//! logic can run (and be tested) without a real display. [`graph::SceneGraph`]
//! keeps the element tree in memory and can be serialized to SVG through
//! [`crate::core::io::svg`].

pub mod graph;

use crate::core::models::ids::{ElementId, NodeId};
use std::fmt;

/// Kind of a visual element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Svg,
    Group,
    Line,
    Circle,
    Text,
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Group => "g",
            Self::Line => "line",
            Self::Circle => "circle",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of an attribute or style property.
///
/// Numeric and translate values are kept unformatted so per-tick updates do
/// not allocate; formatting happens when the scene is serialized.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Number(f64),
    Text(String),
    Translate(f64, f64),
}

impl AttrValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Formats a coordinate or length without trailing zeros (`12`, `3.5`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Text(s) => f.write_str(s),
            Self::Translate(x, y) => {
                write!(f, "translate({},{})", format_number(*x), format_number(*y))
            }
        }
    }
}

/// Operations the renderer needs from a drawing surface.
///
/// Operations addressing an element that no longer exists are ignored.
pub trait Scene {
    /// Appends a new element of kind `tag` as the last child of `parent`.
    fn create_element(&mut self, parent: ElementId, tag: Tag) -> ElementId;

    /// Removes an element together with all of its descendants.
    fn remove_element(&mut self, id: ElementId);

    fn set_attribute(&mut self, id: ElementId, name: &'static str, value: AttrValue);

    fn set_style(&mut self, id: ElementId, name: &'static str, value: AttrValue);

    fn remove_style(&mut self, id: ElementId, name: &'static str);

    /// Adds (`enabled = true`) or removes a class name.
    fn set_class(&mut self, id: ElementId, class: &'static str, enabled: bool);

    fn set_text(&mut self, id: ElementId, text: &str);

    /// Registers `id` as the click surface of atom `node`.
    fn set_click_target(&mut self, id: ElementId, node: NodeId);

    /// Resolves a clicked element, or any of its ancestors, to the atom it represents.
    fn click_target(&self, id: ElementId) -> Option<NodeId>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_format_without_trailing_zeros() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(-3.5), "-3.5");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn translate_formats_as_svg_transform() {
        assert_eq!(
            AttrValue::Translate(125.0, 62.5).to_string(),
            "translate(125,62.5)"
        );
    }

    #[test]
    fn tag_names_match_svg_elements() {
        assert_eq!(Tag::Group.to_string(), "g");
        assert_eq!(Tag::Circle.name(), "circle");
    }
}
