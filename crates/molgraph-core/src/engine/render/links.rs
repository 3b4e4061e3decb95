use super::style::{bond_width, choose_color, dash_array, px, separator_width, triple_separator_width};
use crate::core::models::ids::ElementId;
use crate::core::models::link::{BondOrder, Link};
use crate::core::models::node::Node;
use crate::core::scene::{AttrValue, Scene, Tag};
use crate::engine::config::RenderConfig;

pub const LINK_CLASS: &str = "link";
pub const LINE_CLASS: &str = "link-line";
pub const SEPARATOR_CLASS: &str = "separator";
pub const SEPARATOR_DOUBLE_CLASS: &str = "separator-double";
pub const SEPARATOR_TRIPLE_CLASS: &str = "separator-triple";

/// The visual elements of one bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkElements {
    pub group: ElementId,
    pub line: ElementId,
    pub label: ElementId,
    /// Gap line of double and triple bonds.
    pub separator_double: Option<ElementId>,
    /// Centre line of triple bonds.
    pub separator_triple: Option<ElementId>,
    /// Node array indices of the endpoints at the last join.
    pub source: usize,
    pub target: usize,
}

impl LinkElements {
    pub(super) fn create<S: Scene>(scene: &mut S, parent: ElementId, source: usize, target: usize) -> Self {
        let group = scene.create_element(parent, Tag::Group);
        scene.set_class(group, LINK_CLASS, true);

        let line = scene.create_element(group, Tag::Line);
        scene.set_class(line, LINE_CLASS, true);

        let label = scene.create_element(group, Tag::Text);
        scene.set_attribute(label, "text-anchor", AttrValue::from("middle"));
        scene.set_text(label, " ");

        Self {
            group,
            line,
            label,
            separator_double: None,
            separator_triple: None,
            source,
            target,
        }
    }

    /// Every line of the bond, the primary line first.
    pub fn lines(&self) -> impl Iterator<Item = ElementId> {
        std::iter::once(self.line)
            .chain(self.separator_double)
            .chain(self.separator_triple)
    }

    pub(super) fn restyle<S: Scene>(
        &mut self,
        scene: &mut S,
        link: &Link,
        nodes: &[Node],
        config: &RenderConfig,
    ) {
        let color = choose_color(link.color.as_deref(), &config.default_link_color);

        scene.set_attribute(self.line, "source", AttrValue::Text(link.source.id().to_string()));
        scene.set_attribute(self.line, "target", AttrValue::Text(link.target.id().to_string()));
        scene.set_style(self.line, "stroke-width", px(bond_width(link.bond)));
        scene.set_style(
            self.line,
            "stroke-dasharray",
            AttrValue::Number(dash_array(link, config.dash_length)),
        );
        scene.set_style(self.line, "stroke", AttrValue::from(color));
        if link.bond.is_visible() {
            scene.remove_style(self.line, "opacity");
        } else {
            scene.set_style(self.line, "opacity", AttrValue::Number(0.0));
        }

        let (x, y) = label_position(nodes, self.source, self.target);
        scene.set_attribute(self.label, "x", AttrValue::Number(x));
        scene.set_attribute(self.label, "y", AttrValue::Number(y));

        self.sync_separators(scene, link.bond);
        if let Some(double) = self.separator_double {
            scene.set_style(double, "stroke", AttrValue::from(config.separator_color.as_str()));
            scene.set_style(double, "stroke-width", px(separator_width(link.bond)));
        }
        if let Some(triple) = self.separator_triple {
            scene.set_style(triple, "stroke", AttrValue::from(color));
            scene.set_style(triple, "stroke-width", px(triple_separator_width()));
        }
    }

    /// Adds or removes separator lines so they match `bond`.
    fn sync_separators<S: Scene>(&mut self, scene: &mut S, bond: BondOrder) {
        let wants_double = bond.count() >= 2;
        let wants_triple = bond == BondOrder::Triple;

        if !wants_triple {
            if let Some(triple) = self.separator_triple.take() {
                scene.remove_element(triple);
            }
        }
        if !wants_double {
            if let Some(double) = self.separator_double.take() {
                scene.remove_element(double);
            }
        }
        if wants_double && self.separator_double.is_none() {
            let double = scene.create_element(self.group, Tag::Line);
            scene.set_class(double, SEPARATOR_CLASS, true);
            scene.set_class(double, SEPARATOR_DOUBLE_CLASS, true);
            self.separator_double = Some(double);
        }
        if wants_triple && self.separator_triple.is_none() {
            let triple = scene.create_element(self.group, Tag::Line);
            scene.set_class(triple, SEPARATOR_CLASS, true);
            scene.set_class(triple, SEPARATOR_TRIPLE_CLASS, true);
            self.separator_triple = Some(triple);
        }
    }
}

#[inline]
pub(super) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Current coordinates of the node at `index`, `(0, 0)` when missing or not yet placed.
#[inline]
pub(super) fn coordinates(nodes: &[Node], index: usize) -> (f64, f64) {
    nodes.get(index).map_or((0.0, 0.0), |node| {
        (finite_or_zero(node.x()), finite_or_zero(node.y()))
    })
}

/// Midpoint of a bond's endpoints, where its label sits.
#[inline]
pub(super) fn label_position(nodes: &[Node], source: usize, target: usize) -> (f64, f64) {
    let (x1, y1) = coordinates(nodes, source);
    let (x2, y2) = coordinates(nodes, target);
    ((x1 + x2) / 2.0, (y1 + y2) / 2.0)
}
