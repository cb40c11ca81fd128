//! Variable substitution in page bodies.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use minijinja::Environment;

/// A named value injected into a page body at render time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    /// Placeholder name without delimiters.
    pub name: String,
    /// Replacement text.
    pub content: String,
}

impl Variable {
    /// Create a variable.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Error raised when a template pass fails.
#[derive(Debug, thiserror::Error)]
#[error("Template rendering failed: {0}")]
pub struct TemplateError(#[from] minijinja::Error);

/// Error returned when parsing an unknown engine name.
#[derive(Debug, thiserror::Error)]
#[error("Unknown template engine '{0}', expected 'naive' or 'template'")]
pub struct UnknownTemplateEngine(String);

/// Strategy used to inject variables into a page body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TemplateEngine {
    /// Literal `%name%` replacement, one variable at a time in input order.
    ///
    /// Replacement text is not escaped and may itself contain placeholders
    /// for variables later in the list.
    #[default]
    Naive,
    /// `MiniJinja` template pass: `{{ name }}`, conditionals and loops.
    ///
    /// Undefined names render as empty text. When a name repeats, the last
    /// value wins.
    #[cfg_attr(
        feature = "serde",
        serde(alias = "minijinja", alias = "liquid", alias = "liquid.js")
    )]
    Template,
}

impl TemplateEngine {
    /// Substitute `variables` into `text`.
    pub fn substitute(self, text: &str, variables: &[Variable]) -> Result<String, TemplateError> {
        match self {
            Self::Naive => Ok(substitute_naive(text, variables)),
            Self::Template => substitute_template(text, variables),
        }
    }
}

fn substitute_naive(text: &str, variables: &[Variable]) -> String {
    variables.iter().fold(text.to_owned(), |body, variable| {
        body.replace(&format!("%{}%", variable.name), &variable.content)
    })
}

fn substitute_template(text: &str, variables: &[Variable]) -> Result<String, TemplateError> {
    let context: BTreeMap<&str, &str> = variables
        .iter()
        .map(|variable| (variable.name.as_str(), variable.content.as_str()))
        .collect();
    let env = Environment::new();
    Ok(env.render_str(text, context)?)
}

impl FromStr for TemplateEngine {
    type Err = UnknownTemplateEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naive" => Ok(Self::Naive),
            "template" | "minijinja" | "liquid" | "liquid.js" => Ok(Self::Template),
            _ => Err(UnknownTemplateEngine(s.to_owned())),
        }
    }
}

impl fmt::Display for TemplateEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naive => f.write_str("naive"),
            Self::Template => f.write_str("template"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_naive_replaces_every_occurrence() {
        let vars = [Variable::new("user", "ana")];

        let result = TemplateEngine::Naive
            .substitute("%user% and %user%, not %other%", &vars)
            .unwrap();

        assert_eq!(result, "ana and ana, not %other%");
    }

    #[test]
    fn test_naive_is_order_dependent() {
        let vars = [Variable::new("a", "%b%"), Variable::new("b", "x")];
        let reversed = [Variable::new("b", "x"), Variable::new("a", "%b%")];

        assert_eq!(TemplateEngine::Naive.substitute("%a%", &vars).unwrap(), "x");
        assert_eq!(
            TemplateEngine::Naive.substitute("%a%", &reversed).unwrap(),
            "%b%"
        );
    }

    #[test]
    fn test_naive_without_variables_is_identity() {
        let text = "50% off {{ name }}";

        assert_eq!(TemplateEngine::Naive.substitute(text, &[]).unwrap(), text);
    }

    #[test]
    fn test_template_expression() {
        let vars = [Variable::new("name", "World")];

        let result = TemplateEngine::Template
            .substitute("Hello {{ name }}!", &vars)
            .unwrap();

        assert_eq!(result, "Hello World!");
    }

    #[test]
    fn test_template_conditional() {
        let vars = [Variable::new("lab", "k8s")];
        let text = "{% if lab == \"k8s\" %}kubectl{% else %}docker{% endif %}";

        assert_eq!(
            TemplateEngine::Template.substitute(text, &vars).unwrap(),
            "kubectl"
        );
    }

    #[test]
    fn test_template_undefined_renders_empty() {
        assert_eq!(
            TemplateEngine::Template
                .substitute("[{{ missing }}]", &[])
                .unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_template_last_duplicate_wins() {
        let vars = [Variable::new("v", "first"), Variable::new("v", "second")];

        assert_eq!(
            TemplateEngine::Template
                .substitute("{{ v }}", &vars)
                .unwrap(),
            "second"
        );
    }

    #[test]
    fn test_template_syntax_error() {
        let result = TemplateEngine::Template.substitute("{% if %}", &[]);

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_engine_names() {
        assert_eq!(
            "naive".parse::<TemplateEngine>().unwrap(),
            TemplateEngine::Naive
        );
        assert_eq!(
            "Liquid".parse::<TemplateEngine>().unwrap(),
            TemplateEngine::Template
        );
        assert_eq!(
            "minijinja".parse::<TemplateEngine>().unwrap(),
            TemplateEngine::Template
        );

        let err = "mustache".parse::<TemplateEngine>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown template engine 'mustache', expected 'naive' or 'template'"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(TemplateEngine::default().to_string(), "naive");
        assert_eq!(TemplateEngine::Template.to_string(), "template");
    }
}
