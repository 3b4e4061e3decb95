use crate::core::models::ids::ElementId;
use crate::core::scene::graph::SceneGraph;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
const INDENT: &str = "  ";

/// Serializes a [`SceneGraph`] as a standalone SVG document.
pub struct SvgWriter;

impl SvgWriter {
    pub fn write_to(scene: &SceneGraph, writer: &mut impl Write) -> io::Result<()> {
        Self::write_element(scene, scene.root(), 0, writer)?;
        writer.flush()
    }

    pub fn write_to_path(scene: &SceneGraph, path: impl AsRef<Path>) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_to(scene, &mut writer)
    }

    pub fn to_string(scene: &SceneGraph) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = Self::write_to(scene, &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn write_element(
        scene: &SceneGraph,
        id: ElementId,
        depth: usize,
        w: &mut impl Write,
    ) -> io::Result<()> {
        let Some(element) = scene.element(id) else {
            return Ok(());
        };
        let indent = INDENT.repeat(depth);
        let name = element.tag.name();

        write!(w, "{}<{}", indent, name)?;
        if element.parent.is_none() {
            write!(w, " xmlns=\"{}\"", SVG_NAMESPACE)?;
        }
        if !element.classes.is_empty() {
            write!(w, " class=\"{}\"", escape(&element.classes.join(" ")))?;
        }
        for (key, value) in &element.attributes {
            write!(w, " {}=\"{}\"", key, escape(&value.to_string()))?;
        }
        if !element.styles.is_empty() {
            let style = element
                .styles
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value))
                .collect::<Vec<_>>()
                .join("; ");
            write!(w, " style=\"{}\"", escape(&style))?;
        }

        match (&element.text, element.children.is_empty()) {
            (None, true) => writeln!(w, "/>"),
            (Some(text), true) => writeln!(w, ">{}</{}>", escape(text), name),
            (text, false) => {
                writeln!(w, ">")?;
                if let Some(text) = text {
                    writeln!(w, "{}{}{}", indent, INDENT, escape(text))?;
                }
                for child in &element.children {
                    Self::write_element(scene, *child, depth + 1, w)?;
                }
                writeln!(w, "{}</{}>", indent, name)
            }
        }
    }
}

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
