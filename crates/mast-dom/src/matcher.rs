//! Selector matching algorithm.

use crate::document::{NodeData, Tree};
use crate::selector::{Combinator, PseudoClass, Selector, SelectorList, SelectorPart, TypeSelector};
use crate::NodeId;

/// Check if any selector of a list matches `node`.
pub(crate) fn matches_any(tree: &Tree, node: NodeId, list: &SelectorList) -> bool {
    list.iter().any(|selector| matches(tree, node, selector))
}

/// Check if a full selector matches `node`, considering combinators.
///
/// This walks the selector from right to left, checking each part against the
/// node and its ancestors or preceding siblings. Descendant and general
/// sibling combinators backtrack, so `div > p span` matches even when the
/// nearest `p` is not the one under a `div`.
pub(crate) fn matches(tree: &Tree, node: NodeId, selector: &Selector) -> bool {
    if selector.parts.is_empty() {
        return false;
    }
    matches_from(tree, node, selector, selector.parts.len() - 1)
}

fn matches_from(tree: &Tree, node: NodeId, selector: &Selector, index: usize) -> bool {
    let Some(data) = tree.nodes.get(node) else {
        return false;
    };
    if !part_matches(tree, node, data, &selector.parts[index]) {
        return false;
    }
    if index == 0 {
        return true;
    }

    match selector.combinators[index - 1] {
        Combinator::Child => data
            .parent
            .is_some_and(|parent| matches_from(tree, parent, selector, index - 1)),
        Combinator::Descendant => {
            let mut current = data.parent;
            while let Some(ancestor) = current {
                if matches_from(tree, ancestor, selector, index - 1) {
                    return true;
                }
                current = tree.nodes.get(ancestor).and_then(|d| d.parent);
            }
            false
        }
        Combinator::AdjacentSibling => preceding_siblings(tree, node, data)
            .first()
            .is_some_and(|&sibling| matches_from(tree, sibling, selector, index - 1)),
        Combinator::GeneralSibling => preceding_siblings(tree, node, data)
            .iter()
            .any(|&sibling| matches_from(tree, sibling, selector, index - 1)),
    }
}

/// Siblings before `node`, nearest first.
fn preceding_siblings(tree: &Tree, node: NodeId, data: &NodeData) -> Vec<NodeId> {
    let siblings = siblings_of(tree, data).unwrap_or_default();
    let position = siblings.iter().position(|&s| s == node).unwrap_or(0);
    siblings[..position].iter().rev().copied().collect()
}

fn siblings_of<'a>(tree: &'a Tree, data: &NodeData) -> Option<&'a [NodeId]> {
    data.parent
        .and_then(|parent| tree.nodes.get(parent))
        .map(|parent| parent.children.as_slice())
}

/// Check if a single compound part matches an element.
pub(crate) fn part_matches(tree: &Tree, node: NodeId, data: &NodeData, part: &SelectorPart) -> bool {
    if let Some(TypeSelector::Type(tag)) = &part.type_selector {
        if !tag.eq_ignore_ascii_case(&data.tag) {
            return false;
        }
    }

    if let Some(id) = &part.id {
        if data.id.as_deref() != Some(id.as_str()) {
            return false;
        }
    }

    if !part
        .classes
        .iter()
        .all(|class| data.classes.iter().any(|c| c == class))
    {
        return false;
    }

    let attributes_match = part.attributes.iter().all(|attribute| {
        let actual = match attribute.name.as_str() {
            "id" => data.id.clone(),
            "class" if !data.classes.is_empty() => Some(data.classes.join(" ")),
            "class" => None,
            name => data.attributes.get(name).cloned(),
        };
        match (&attribute.value, actual) {
            (None, actual) => actual.is_some(),
            (Some(expected), Some(actual)) => attribute.operator.test(expected, &actual),
            (Some(_), None) => false,
        }
    });
    if !attributes_match {
        return false;
    }

    part.pseudo_classes
        .iter()
        .all(|pseudo| pseudo_matches(tree, node, data, pseudo))
}

fn pseudo_matches(tree: &Tree, node: NodeId, data: &NodeData, pseudo: &PseudoClass) -> bool {
    match pseudo {
        PseudoClass::Root => node == tree.root,
        PseudoClass::FirstChild => siblings_of(tree, data).is_some_and(|s| s.first() == Some(&node)),
        PseudoClass::LastChild => siblings_of(tree, data).is_some_and(|s| s.last() == Some(&node)),
        PseudoClass::OnlyChild => siblings_of(tree, data).is_some_and(|s| s == [node]),
        PseudoClass::Empty => {
            data.children.is_empty() && data.text.as_deref().is_none_or(str::is_empty)
        }
        PseudoClass::Not(inner) => !part_matches(tree, node, data, inner),
    }
}
