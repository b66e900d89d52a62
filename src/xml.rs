//! Namespace-aware lookups over a parsed document.

use log::trace;
use roxmltree::{Document, Node};

use crate::error::ConversionError;
use crate::Config;

/// Which entry of the namespace table an element name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ns {
    OpenSocial,
    Osapi,
}

pub(crate) fn parse(xml: &str) -> Result<Document<'_>, ConversionError> {
    Ok(Document::parse(xml)?)
}

pub(crate) fn is_named(node: Node, name: &str, ns: Ns, config: &Config) -> bool {
    if !node.is_element() || node.tag_name().name() != name {
        return false;
    }
    match (node.tag_name().namespace(), ns) {
        (Some(uri), Ns::OpenSocial) => uri == config.namespaces.opensocial,
        (Some(uri), Ns::Osapi) => uri == config.namespaces.osapi,
        (None, Ns::OpenSocial) => config.allow_unqualified,
        (None, Ns::Osapi) => false,
    }
}

/// First element, the root included, carrying one of `names`.
pub(crate) fn find_entity<'a, 'i>(
    doc: &'a Document<'i>,
    names: &[&str],
    config: &Config,
) -> Option<Node<'a, 'i>> {
    doc.root_element()
        .descendants()
        .find(|n| names.iter().any(|name| is_named(*n, name, Ns::OpenSocial, config)))
}

pub(crate) fn child<'a, 'i>(node: Node<'a, 'i>, name: &str, config: &Config) -> Option<Node<'a, 'i>> {
    node.children()
        .find(|c| is_named(*c, name, Ns::OpenSocial, config))
}

pub(crate) fn children<'a, 'i: 'a>(
    node: Node<'a, 'i>,
    name: &'a str,
    config: &'a Config,
) -> impl Iterator<Item = Node<'a, 'i>> + 'a {
    node.children()
        .filter(move |c| is_named(*c, name, Ns::OpenSocial, config))
}

/// Concatenated text of the element's direct text nodes, entities decoded.
pub(crate) fn text(node: Node) -> String {
    node.children()
        .filter(|c| c.is_text())
        .filter_map(|c| c.text())
        .collect()
}

pub(crate) fn child_text(node: Node, name: &str, config: &Config) -> Option<String> {
    let value = child(node, name, config).map(text);
    trace!("{} = {:?}", name, value);
    value
}

/// Child text that carries something other than whitespace; blank counts as absent.
pub(crate) fn child_value(node: Node, name: &str, config: &Config) -> Option<String> {
    child_text(node, name, config).filter(|v| !v.trim().is_empty())
}

pub(crate) fn child_number(
    node: Node,
    name: &'static str,
    config: &Config,
) -> Result<Option<f64>, ConversionError> {
    let Some(raw) = child_value(node, name, config) else {
        return Ok(None);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(ConversionError::InvalidValue { field: name, value: raw }),
    }
}
