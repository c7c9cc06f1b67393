use std::fmt;

use crate::form::FormPart;

/// One node of quiz output, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Heading(String),
    HiddenField { name: String, value: String },
    AnswerText(String),
    SaveButton { label: String },
}

/// The output area a generated quiz is rendered into.
///
/// The container owns its nodes exclusively; the base form lives outside
/// it and survives `clear`. Hidden fields are payload carried for the
/// save submission and never appear in the user-facing view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    nodes: Vec<Node>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Heading(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Value of the first hidden field with this name, if any.
    pub fn hidden_value(&self, name: &str) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            Node::HiddenField { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn hidden_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::HiddenField { .. }))
            .count()
    }

    /// Hidden fields as multipart parts, in document order. This is the
    /// payload a save submission appends to the base form.
    pub fn form_parts(&self) -> Vec<FormPart> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::HiddenField { name, value } => Some(FormPart::text(name.clone(), value.clone())),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for node in &self.nodes {
            match node {
                Node::Heading(text) => {
                    if !first {
                        writeln!(f)?;
                    }
                    writeln!(f, "{}", text)?;
                }
                Node::AnswerText(text) => writeln!(f, "  - {}", text)?,
                Node::SaveButton { label } => {
                    writeln!(f)?;
                    writeln!(f, "[{}]", label)?;
                }
                Node::HiddenField { .. } => {}
            }
            first = false;
        }
        Ok(())
    }
}
