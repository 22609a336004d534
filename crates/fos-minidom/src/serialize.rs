//! Markup serializer backing `outer_html`

use crate::node::NodeData;
use crate::{Environment, NodeId, XHTML_NAMESPACE};

/// HTML elements that never have a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "source", "track", "wbr",
];

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

impl Environment {
    /// Serialize a node and its subtree
    pub(crate) fn serialize(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.serialize_into(node, &mut out);
        out
    }

    fn serialize_into(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.tree.get(id) else {
            return;
        };
        match node.data() {
            NodeData::Text(text) => escape_text(text, out),
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::Document | NodeData::DocumentFragment => {
                for child in self.tree.children(id) {
                    self.serialize_into(child, out);
                }
            }
            NodeData::Element(data) => {
                let name = self.interner.get(data.local_name);
                out.push('<');
                out.push_str(name);
                for attr in &data.attrs {
                    out.push(' ');
                    out.push_str(self.interner.get(attr.name));
                    out.push_str("=\"");
                    escape_attr(&attr.value, out);
                    out.push('"');
                }
                out.push('>');

                let is_void = self.namespace_uri(id) == Some(XHTML_NAMESPACE) && VOID_ELEMENTS.contains(&name);
                if is_void {
                    return;
                }
                for child in self.tree.children(id) {
                    self.serialize_into(child, out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_element_tree() {
        let mut env = Environment::new();
        let doc = env.create_html_document().unwrap();
        let p = env.create_element(doc, "p").unwrap();
        env.set_attribute(p, "title", "a \"b\" & c").unwrap();
        let br = env.create_element(doc, "br").unwrap();
        let note = env.create_comment(doc, " note ").unwrap();
        env.append(p, ["1 < 2 & 3".into(), br.into(), note.into()]).unwrap();

        assert_eq!(
            env.outer_html(p).unwrap(),
            "<p title=\"a &quot;b&quot; &amp; c\">1 &lt; 2 &amp; 3<br><!-- note --></p>"
        );
    }

    #[test]
    fn test_serialize_document() {
        let mut env = Environment::new();
        let doc = env.create_html_document().unwrap();
        assert_eq!(env.serialize(doc), "<html><head></head><body></body></html>");
    }
}
