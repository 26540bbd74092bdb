//! HTML to page-arena scanning via `tl`.

use super::{NodeId, Page};
use crate::error::EnhanceError;

/// Parse `html` and append the resulting nodes under `parent`
/// (top level when `None`). Returns the appended top-level node ids.
pub(super) fn parse_into(
    page: &mut Page,
    html: &str,
    parent: Option<NodeId>,
) -> Result<Vec<NodeId>, EnhanceError> {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        return Err(EnhanceError::MalformedHtml);
    };

    let parser = dom.parser();
    let mut added = Vec::new();
    for handle in dom.children() {
        if let Some(id) = convert_node(page, *handle, parser, parent) {
            added.push(id);
        }
    }
    Ok(added)
}

/// Convert a `tl` node (and its subtree) into arena nodes.
fn convert_node(
    page: &mut Page,
    handle: tl::NodeHandle,
    parser: &tl::Parser,
    parent: Option<NodeId>,
) -> Option<NodeId> {
    let node = handle.get(parser)?;

    match node {
        tl::Node::Tag(tag) => {
            let tag_name = tag.name().as_utf8_str().to_lowercase();
            let id = page.create_element(parent, &tag_name);

            for (key, value) in tag.attributes().iter() {
                let key_str: &str = key.as_ref();
                let value_str = value.map(|v| v.to_string()).unwrap_or_default();
                if key_str == "class" {
                    let elem = page.element_mut(id)?;
                    for class in value_str.split_whitespace() {
                        elem.add_class(class);
                    }
                } else {
                    page.element_mut(id)?.set_attr(key_str, &value_str);
                }
            }

            for child_handle in tag.children().top().iter() {
                convert_node(page, *child_handle, parser, Some(id));
            }

            Some(id)
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            // Skip whitespace-only text
            if text.trim().is_empty() {
                None
            } else {
                Some(page.append_text(parent, &text))
            }
        }
        tl::Node::Comment(_) => None, // Skip comments
    }
}
