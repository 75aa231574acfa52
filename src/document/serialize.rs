// SPDX-License-Identifier: PMPL-1.0-or-later
//! HTML serialization of a [`Document`].
//!
//! The tree is fed to html5ever's serializer, the same one `scraper` uses
//! for `Html::html()`, so escaping, void elements and raw-text content
//! (`script`, `style`, `noscript` with scripting enabled) follow the HTML5
//! serialization algorithm.

use super::{Document, Element, Node};
use ego_tree::iter::Edge;
use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::{LocalName, Prefix, QualName};
use std::{fmt, io};

/// Namespaces html5ever knows how to prefix on attributes
const ATTRIBUTE_NAMESPACES: &[(&str, &str)] = &[
    ("xlink", "http://www.w3.org/1999/xlink"),
    ("xml", "http://www.w3.org/XML/1998/namespace"),
    ("xmlns", "http://www.w3.org/2000/xmlns/"),
];

impl Document {
    /// Serialize the tree back to markup
    pub fn serialize(&self) -> String {
        let mut buf = Vec::new();
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        };
        // Writing into a Vec<u8> cannot fail
        let _ = serialize(&mut buf, self, opts);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: &mut S, _scope: TraversalScope) -> io::Result<()> {
        for edge in self.tree.root().traverse() {
            match edge {
                Edge::Open(node) => match node.value() {
                    Node::Document => {}
                    Node::Doctype(name) => serializer.write_doctype(name)?,
                    Node::Comment(comment) => serializer.write_comment(comment)?,
                    Node::Text(text) => serializer.write_text(text)?,
                    Node::Element(element) => {
                        let attrs: Vec<(QualName, &str)> = element
                            .attrs()
                            .map(|(name, value)| (attribute_name(name), value))
                            .collect();
                        serializer.start_elem(
                            element_name(element),
                            attrs.iter().map(|(name, value)| (name, *value)),
                        )?;
                    }
                },
                Edge::Close(node) => {
                    if let Node::Element(element) = node.value() {
                        serializer.end_elem(element_name(element))?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn element_name(element: &Element) -> QualName {
    QualName::new(
        None,
        element.namespace().url().into(),
        LocalName::from(element.name()),
    )
}

/// `xlink:href` back to its namespaced form; anything else is a plain name
fn attribute_name(key: &str) -> QualName {
    if let Some((prefix, local)) = key.split_once(':') {
        if let Some((_, url)) = ATTRIBUTE_NAMESPACES.iter().find(|(p, _)| *p == prefix) {
            return QualName::new(Some(Prefix::from(prefix)), (*url).into(), LocalName::from(local));
        }
    }
    QualName::new(None, "".into(), LocalName::from(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let doc = Document::parse("<p>a<br>b<input type=\"text\"></p>");
        assert_eq!(doc.serialize(), "<p>a<br>b<input type=\"text\"></p>");
    }

    #[test]
    fn test_boolean_attributes_get_empty_values() {
        let doc = Document::parse("<input type=\"email\" required>");
        assert_eq!(doc.serialize(), "<input type=\"email\" required=\"\">");
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let doc = Document::parse("<p title=\"a &quot;b&quot; &amp; c\">1 &lt; 2 &amp;&amp; 3 &gt; 2</p>");
        assert_eq!(
            doc.serialize(),
            "<p title=\"a &quot;b&quot; &amp; c\">1 &lt; 2 &amp;&amp; 3 &gt; 2</p>"
        );
    }

    #[test]
    fn test_script_content_is_raw() {
        let doc = Document::parse("<script>if (a < b && c) {}</script>");
        assert_eq!(doc.serialize(), "<script>if (a < b && c) {}</script>");
    }

    #[test]
    fn test_noscript_content_is_raw() {
        let input = "<!DOCTYPE html><html><head></head><body><noscript><img src=\"pixel.gif\"></noscript></body></html>";
        let doc = Document::parse(input);
        assert_eq!(doc.serialize(), input);
    }

    #[test]
    fn test_inline_svg_round_trip() {
        let input = "<svg viewBox=\"0 0 1 1\"><foreignObject></foreignObject><use xlink:href=\"#a\"></use></svg>";
        let doc = Document::parse(input);
        assert_eq!(doc.serialize(), input);
    }

    #[test]
    fn test_full_document_round_trip() {
        let input = "<!DOCTYPE html><html><head></head><body><form><label for=\"a\">A</label><input id=\"a\"></form></body></html>";
        let doc = Document::parse(input);
        assert_eq!(doc.serialize(), input);
        assert_eq!(doc.to_string(), input);
    }

    #[test]
    fn test_attribute_names() {
        assert_eq!(&*attribute_name("xlink:href").local, "href");
        assert_eq!(attribute_name("xlink:href").prefix.as_deref(), Some("xlink"));
        assert_eq!(&*attribute_name("aria-label").local, "aria-label");
        assert_eq!(&*attribute_name("foo:bar").local, "foo:bar");
    }
}
