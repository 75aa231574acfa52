// SPDX-License-Identifier: PMPL-1.0-or-later
//! Building a [`Document`] from raw markup.
//!
//! `scraper` does the HTML5 parsing; its read-only tree is then copied node
//! by node into our own arena. Input that opens like a whole page keeps its
//! doctype and `<html>` structure. Anything else is parsed as a body
//! fragment so that serializing a snippet does not grow `<html>`, `<head>`
//! and `<body>` wrappers.

use super::{Document, Element, Namespace, Node};
use ego_tree::NodeMut;
use scraper::{ElementRef, Html};

/// Leading tags that make the input a whole page rather than a snippet
const PAGE_TAGS: &[&str] = &["<!doctype", "<html", "<head", "<body"];

impl Document {
    /// Parse markup leniently. Parsing never fails.
    pub fn parse(input: &str) -> Self {
        let mut document = Document::new();
        let mut root = document.tree.root_mut();

        if is_full_document(input) {
            let html = Html::parse_document(input);
            for child in html.tree.root().children() {
                match child.value() {
                    scraper::Node::Doctype(doctype) => {
                        root.append(Node::Doctype(doctype.name().to_string()));
                    }
                    scraper::Node::Comment(comment) => {
                        root.append(Node::Comment(comment.comment.to_string()));
                    }
                    scraper::Node::Element(_) => {
                        if let Some(element) = ElementRef::wrap(child) {
                            copy_element(&mut root, element);
                        }
                    }
                    _ => {}
                }
            }
        } else {
            let html = Html::parse_fragment(input);
            // Fragment content hangs off a synthetic <html> element
            copy_children(&mut root, html.root_element());
        }

        document
    }
}

/// Whether the first tag, after whitespace and comments, opens a page
fn is_full_document(input: &str) -> bool {
    let mut rest = input.trim_start_matches('\u{feff}').trim_start();
    while let Some(comment) = rest.strip_prefix("<!--") {
        match comment.find("-->") {
            Some(end) => rest = comment[end + 3..].trim_start(),
            None => return false,
        }
    }

    let head: String = rest.chars().take(10).collect::<String>().to_ascii_lowercase();
    PAGE_TAGS.iter().any(|tag| {
        head.strip_prefix(tag).is_some_and(|after| {
            after.is_empty() || after.starts_with(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
        })
    })
}

fn copy_children(target: &mut NodeMut<'_, Node>, source: ElementRef<'_>) {
    for child in source.children() {
        match child.value() {
            scraper::Node::Text(text) => {
                target.append(Node::Text(text.text.to_string()));
            }
            scraper::Node::Comment(comment) => {
                target.append(Node::Comment(comment.comment.to_string()));
            }
            scraper::Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    copy_element(target, element);
                }
            }
            _ => {}
        }
    }
}

fn copy_element(target: &mut NodeMut<'_, Node>, source: ElementRef<'_>) {
    let value = source.value();
    let mut element = Element::in_namespace(Namespace::from_url(&value.name.ns), value.name());
    for (name, attr_value) in value.attrs.iter() {
        let key = match &name.prefix {
            Some(prefix) => format!("{}:{}", prefix, name.local),
            None => name.local.to_string(),
        };
        element.set_attr(&key, attr_value);
    }

    let mut node = target.append(Node::Element(element));
    copy_children(&mut node, source);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_has_no_wrappers() {
        let doc = Document::parse("<form><input type=\"text\" required></form>");
        assert!(doc.find_by_tag("html").is_empty());
        assert!(doc.find_by_tag("body").is_empty());
        assert_eq!(doc.find_by_tag("form").len(), 1);
    }

    #[test]
    fn test_boolean_attribute_is_present_and_empty() {
        let doc = Document::parse("<input type=\"text\" required>");
        let input = doc.find_by_tag("input")[0];
        assert_eq!(doc.attr(input, "required"), Some(""));
        assert_eq!(doc.attr(input, "aria-required"), None);
    }

    #[test]
    fn test_full_document_keeps_structure() {
        let doc = Document::parse(
            "<!DOCTYPE html><html lang=\"en\"><head><title>T</title></head><body><button>Go</button></body></html>",
        );
        let first = doc.descendants(doc.root()).nth(1).unwrap();
        assert_eq!(doc.node(first), Some(&Node::Doctype("html".to_string())));
        let html = doc.find_by_tag("html")[0];
        assert_eq!(doc.attr(html, "lang"), Some("en"));
        assert_eq!(doc.find_by_tag("body").len(), 1);
    }

    #[test]
    fn test_page_detection_looks_at_the_first_tag() {
        assert!(is_full_document("<!DOCTYPE html><p>x</p>"));
        assert!(is_full_document("\u{feff}  <HTML lang=\"en\">"));
        assert!(is_full_document("<!-- generated --> <head><title>T</title></head>"));
        assert!(is_full_document("<body class=\"x\"></body>"));
        assert!(!is_full_document("<header>x</header>"));
        assert!(!is_full_document("<bodyguard></bodyguard>"));
        assert!(!is_full_document("<form><!-- goes inside <html> later --></form>"));
        assert!(!is_full_document("<!-- unterminated <html>"));
    }

    #[test]
    fn test_comment_mentioning_html_stays_a_fragment() {
        let doc = Document::parse("<!-- wraps <html> later --><form><input required></form>");
        assert!(doc.find_by_tag("html").is_empty());
        assert!(doc.find_by_tag("body").is_empty());
        assert!(doc.serialize().starts_with("<!-- wraps <html> later --><form>"));
    }

    #[test]
    fn test_leading_body_keeps_its_attributes() {
        let doc = Document::parse("<body class=\"x\"><form><input required></form></body>");
        let body = doc.find_by_tag("body");
        assert_eq!(body.len(), 1);
        assert_eq!(doc.attr(body[0], "class"), Some("x"));
        assert!(doc.serialize().contains("<body class=\"x\"><form>"));
    }

    #[test]
    fn test_html_tag_names_are_lowercase() {
        let doc = Document::parse("<BUTTON TYPE=\"submit\">OK</BUTTON>");
        let button = doc.find_by_tag("button")[0];
        assert_eq!(doc.element(button).unwrap().name(), "button");
        assert_eq!(doc.attr(button, "type"), Some("submit"));
        assert_eq!(doc.text_content(button), "OK");
    }

    #[test]
    fn test_svg_names_and_prefixes_survive() {
        let doc = Document::parse(
            "<svg viewBox=\"0 0 1 1\"><foreignObject></foreignObject><use xlink:href=\"#a\"></use></svg>",
        );
        let svg = doc.find_by_tag("svg")[0];
        assert_eq!(doc.element(svg).unwrap().namespace(), Namespace::Svg);
        assert_eq!(doc.attr(svg, "viewBox"), Some("0 0 1 1"));

        let foreign = doc.find_by_tag("foreignObject")[0];
        assert_eq!(doc.element(foreign).unwrap().name(), "foreignObject");

        let use_element = doc.find_by_tag("use")[0];
        assert_eq!(doc.attr(use_element, "xlink:href"), Some("#a"));
    }

    #[test]
    fn test_comments_survive() {
        let doc = Document::parse("<!-- keep --><p>x</p>");
        assert!(doc.serialize().starts_with("<!-- keep -->"));
    }

    #[test]
    fn test_entities_are_decoded() {
        let doc = Document::parse("<button>Click&nbsp;here &amp; go</button>");
        let button = doc.find_by_tag("button")[0];
        assert_eq!(doc.text_content(button), "Click\u{a0}here & go");
    }
}
