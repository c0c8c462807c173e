use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ExcerptTokenKind {
    #[default]
    Content,
    Reference,
}

/// One token of a declaration excerpt. Reference tokens may point at another item.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcerptToken {
    #[serde(default)]
    pub kind: ExcerptTokenKind,
    pub text: String,
    #[serde(default)]
    pub canonical_reference: Option<String>,
}

/// Literal source text for a declaration or type expression.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Excerpt {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tokens: Vec<ExcerptToken>,
}

impl Excerpt {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Tokens to render. Excerpts without token spans are treated as one content token.
    pub fn spanned_tokens(&self) -> Vec<ExcerptToken> {
        if self.tokens.is_empty() {
            vec![ExcerptToken {
                kind: ExcerptTokenKind::Content,
                text: self.text.clone(),
                canonical_reference: None,
            }]
        } else {
            self.tokens.clone()
        }
    }
}

impl From<&str> for Excerpt {
    fn from(text: &str) -> Self {
        Excerpt {
            text: text.to_string(),
            tokens: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub parameter_type: Excerpt,
    #[serde(default)]
    pub is_optional: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub constraint: Option<Excerpt>,
    #[serde(default)]
    pub default_type: Option<Excerpt>,
}
