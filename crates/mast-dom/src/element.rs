//! Detached element descriptions.
//!
//! An [`ElementSpec`] describes an element subtree without belonging to any
//! document. Templates are written as specs and patterns produce specs;
//! [`Document::create`](crate::Document::create) materializes one into nodes.

use std::collections::BTreeMap;

/// A detached element subtree description.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementSpec {
    /// Tag name.
    pub tag: String,
    /// Element id (`#id`).
    pub id: Option<String>,
    /// Class list (`.class`).
    pub classes: Vec<String>,
    /// Other attributes.
    pub attributes: BTreeMap<String, String>,
    /// Text content, rendered before the children.
    pub text: Option<String>,
    /// Child elements.
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    /// Create an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set the element id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element.
    pub fn with_child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Append several child elements.
    pub fn with_children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children.extend(children);
        self
    }

    /// Number of elements in this subtree, including itself.
    pub fn element_count(&self) -> usize {
        1 + self.children.iter().map(ElementSpec::element_count).sum::<usize>()
    }

    /// Rewrite every string in the subtree (id, classes, attribute values and
    /// text) through `f`, stopping at the first error. Tags and attribute
    /// names are left untouched.
    pub fn try_map_strings<F, E>(&self, f: &F) -> Result<ElementSpec, E>
    where
        F: Fn(&str) -> Result<String, E>,
    {
        Ok(ElementSpec {
            tag: self.tag.clone(),
            id: self.id.as_deref().map(f).transpose()?,
            classes: self.classes.iter().map(|c| f(c)).collect::<Result<_, E>>()?,
            attributes: self
                .attributes
                .iter()
                .map(|(name, value)| f(value).map(|value| (name.clone(), value)))
                .collect::<Result<_, E>>()?,
            text: self.text.as_deref().map(f).transpose()?,
            children: self
                .children
                .iter()
                .map(|c| c.try_map_strings(f))
                .collect::<Result<_, E>>()?,
        })
    }
}
