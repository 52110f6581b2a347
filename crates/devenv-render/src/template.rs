//! Minimal `${NAME}` template engine.
//!
//! Syntax:
//! - `${NAME}` is replaced by the value bound to `NAME`. Whitespace inside the
//!   braces is ignored; `NAME` must be an identifier.
//! - A line whose first non-blank characters are `##` is a comment and is
//!   removed together with its newline.
//! - Any other `$` is literal text.

use crate::error::RenderError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Var(String),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses `source`. `name` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Parse`] for an unterminated placeholder or a
    /// placeholder whose content is not an identifier.
    pub fn parse(name: impl Into<String>, source: &str) -> Result<Self, RenderError> {
        let name = name.into();
        let mut segments = Vec::new();
        let mut text = String::new();

        for line in source.split_inclusive('\n') {
            if line.trim_start().starts_with("##") {
                continue;
            }

            let mut rest = line;
            while let Some(start) = rest.find("${") {
                text.push_str(&rest[..start]);
                let after = &rest[start + 2..];
                let end = after.find('}').ok_or_else(|| RenderError::Parse {
                    template: name.clone(),
                    message: format!("unterminated placeholder starting at {:?}", &rest[start..]),
                })?;
                let variable = after[..end].trim();
                if !is_identifier(variable) {
                    return Err(RenderError::Parse {
                        template: name.clone(),
                        message: format!("invalid placeholder ${{{}}}", &after[..end]),
                    });
                }
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(Segment::Var(variable.to_string()));
                rest = &after[end + 1..];
            }
            text.push_str(rest);
        }
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self { name, segments })
    }

    /// The name given at parse time.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variables referenced by the template, in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Var(var) = segment {
                if !seen.contains(&var.as_str()) {
                    seen.push(var);
                }
            }
        }
        seen
    }

    /// Substitutes `vars` into the template.
    ///
    /// Variables that the template does not use are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UndefinedVariable`] if the template references a
    /// name missing from `vars`.
    pub fn render(&self, vars: &[(&str, &str)]) -> Result<String, RenderError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Var(var) => {
                    let value = vars
                        .iter()
                        .find(|(key, _)| *key == var.as_str())
                        .map(|(_, value)| *value)
                        .ok_or_else(|| RenderError::UndefinedVariable {
                            template: self.name.clone(),
                            variable: var.clone(),
                        })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_placeholders() {
        let tmpl = Template::parse("t", "image: scql:${TAG}\nport: ${ PORT }:8080\n").unwrap();
        let out = tmpl.render(&[("TAG", "latest"), ("PORT", "8060")]).unwrap();
        assert_eq!(out, "image: scql:latest\nport: 8060:8080\n");
    }

    #[test]
    fn drops_comment_lines_and_keeps_lone_dollars() {
        let tmpl = Template::parse("t", "## header\n  ## indented\ncost: $5 ${X}\n").unwrap();
        assert_eq!(tmpl.render(&[("X", "each")]).unwrap(), "cost: $5 each\n");
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let tmpl = Template::parse("engine.template", "${PARTY}").unwrap();
        match tmpl.render(&[("OTHER", "x")]) {
            Err(RenderError::UndefinedVariable { template, variable }) => {
                assert_eq!(template, "engine.template");
                assert_eq!(variable, "PARTY");
            }
            other => panic!("expected UndefinedVariable, got {other:?}"),
        }
    }

    #[test]
    fn unterminated_and_invalid_placeholders_fail_to_parse() {
        assert!(matches!(
            Template::parse("t", "a ${OPEN\n b}"),
            Err(RenderError::Parse { .. })
        ));
        assert!(matches!(
            Template::parse("t", "${1abc}"),
            Err(RenderError::Parse { .. })
        ));
        assert!(matches!(
            Template::parse("t", "${a.b}"),
            Err(RenderError::Parse { .. })
        ));
    }

    #[test]
    fn variables_are_listed_once_in_order() {
        let tmpl = Template::parse("t", "${B}${A}${B}").unwrap();
        assert_eq!(tmpl.variables(), vec!["B", "A"]);
    }
}
