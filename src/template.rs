//! Kickoff input interpolation.
//!
//! Task descriptions, expected outputs and output paths may reference kickoff
//! inputs as `{name}`. `{{` and `}}` render literal braces. An unknown name or
//! an unterminated placeholder is an error, so a typo never silently becomes
//! an empty string.

use std::collections::BTreeMap;
use thiserror::Error;

/// Error type for interpolation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("missing kickoff input '{name}' referenced at position {position}")]
    UndefinedVariable { name: String, position: usize },

    #[error("unmatched '{{' at position {position}")]
    UnmatchedBrace { position: usize },

    #[error("empty placeholder '{{}}' at position {position}")]
    EmptyVariableName { position: usize },
}

/// Substitute `{name}` placeholders in `template` from `inputs`.
///
/// ```ignore
/// use std::collections::BTreeMap;
///
/// let inputs = BTreeMap::from([("brand".to_string(), "Acme".to_string())]);
/// let text = render_template("Storyboard for {brand} ({{draft}})", &inputs).unwrap();
/// assert_eq!(text, "Storyboard for Acme ({draft})");
/// ```
pub fn render_template(
    template: &str,
    inputs: &BTreeMap<String, String>,
) -> Result<String, TemplateError> {
    let mut rendered = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                rendered.push('{');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(TemplateError::UnmatchedBrace { position });
                }

                let name = name.trim();
                if name.is_empty() {
                    return Err(TemplateError::EmptyVariableName { position });
                }
                let value = inputs
                    .get(name)
                    .ok_or_else(|| TemplateError::UndefinedVariable {
                        name: name.to_string(),
                        position,
                    })?;
                rendered.push_str(value);
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                }
                rendered.push('}');
            }
            _ => rendered.push(ch),
        }
    }

    Ok(rendered)
}
