//! Endpoint templates.
//!
//! A template is plain text with `{NAME}` placeholders, where `NAME` is an
//! environment variable name. `{{` and `}}` stand for literal braces.
//!
//! # Design Decisions
//! - Rendering is all-or-nothing: every placeholder must resolve to a
//!   non-empty binding or no output is produced
//! - The first unbound placeholder (in template order) is reported
//! - Parsing is separate from rendering so templates can be checked offline

use thiserror::Error;

use crate::env::EnvironmentBindings;

/// Errors produced while parsing or rendering a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A `{` with no closing `}`.
    #[error("unclosed placeholder at byte {0}")]
    Unclosed(usize),

    /// A `}` that does not close a placeholder.
    #[error("unmatched '}}' at byte {0}")]
    UnmatchedClose(usize),

    /// Placeholder names must look like environment variable names.
    #[error("invalid placeholder name '{0}'")]
    InvalidName(String),

    /// A placeholder has no binding, or the binding is empty.
    #[error("no binding for placeholder {0}")]
    Unbound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a template string.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if chars.next_if(|&(_, next)| next == '{').is_some() => literal.push('{'),
                '}' if chars.next_if(|&(_, next)| next == '}').is_some() => literal.push('}'),
                '{' => {
                    let start = pos + 1;
                    let end = source[start..]
                        .find('}')
                        .map(|offset| start + offset)
                        .ok_or(TemplateError::Unclosed(pos))?;
                    let name = &source[start..end];
                    if !is_variable_name(name) {
                        return Err(TemplateError::InvalidName(name.to_string()));
                    }
                    while chars.next_if(|&(i, _)| i <= end).is_some() {}

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name.to_string()));
                }
                '}' => return Err(TemplateError::UnmatchedClose(pos)),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Variable names referenced by this template, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute every placeholder from `env`.
    pub fn render(&self, env: &EnvironmentBindings) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = env
                        .get_non_empty(name)
                        .ok_or_else(|| TemplateError::Unbound(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
