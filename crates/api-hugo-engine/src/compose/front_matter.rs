//! Page metadata, written as a TOML block ahead of the page body.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::ApiItemKind;

/// Immutable front matter of one standalone page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: String,
    pub kind: String,
    pub package: String,
    pub unscoped_package_name: String,
    pub summary: String,
    /// Kind → (member name → link).
    pub members: BTreeMap<String, BTreeMap<String, String>>,
}

impl FrontMatter {
    /// The `+++`-fenced TOML block.
    pub fn render(&self) -> Result<String, toml::ser::Error> {
        let body = toml::to_string(self)?;
        Ok(format!("+++\n{body}+++\n"))
    }
}

/// Collects front matter while a page is composed.
#[derive(Debug, Clone, Default)]
pub struct FrontMatterBuilder {
    front_matter: FrontMatter,
}

impl FrontMatterBuilder {
    pub fn new(name: &str, kind: ApiItemKind) -> Self {
        let title = format!("{name} {}", kind.as_str())
            .chars()
            .filter(|c| !matches!(c, '"' | '\'' | '!'))
            .collect();
        Self {
            front_matter: FrontMatter {
                title,
                kind: kind.as_str().to_string(),
                ..FrontMatter::default()
            },
        }
    }

    pub fn package(mut self, scoped: &str, unscoped: &str) -> Self {
        self.front_matter.package = scoped.to_string();
        self.front_matter.unscoped_package_name = unscoped.to_string();
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.front_matter.summary = summary.into();
        self
    }

    /// Records a member link. Unnamed members are ignored.
    pub fn member(mut self, kind: ApiItemKind, name: &str, link: String) -> Self {
        if !name.is_empty() {
            self.front_matter
                .members
                .entry(kind.as_str().to_string())
                .or_default()
                .insert(name.to_string(), link);
        }
        self
    }

    pub fn finish(self) -> FrontMatter {
        self.front_matter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn title_drops_quotes_and_bangs() {
        let front_matter = FrontMatterBuilder::new("@scope/pkg!", ApiItemKind::Package).finish();

        assert_eq!(front_matter.title, "@scope/pkg Package");
    }

    #[test]
    fn renders_fenced_toml() {
        let front_matter = FrontMatterBuilder::new("Widget", ApiItemKind::Class)
            .package("@scope/pkg", "pkg")
            .summary("Draws the widget.")
            .member(ApiItemKind::Method, "render", "/docs/apis/pkg/widget#render".into())
            .member(ApiItemKind::Constructor, "", "/docs/apis/pkg/widget#".into())
            .finish();

        let rendered = front_matter.render().unwrap();

        assert!(rendered.starts_with("+++\n"));
        assert!(rendered.ends_with("+++\n"));
        assert!(rendered.contains("title = \"Widget Class\""));
        assert!(rendered.contains("unscopedPackageName = \"pkg\""));
        assert!(rendered.contains("[members.Method]"));
        assert!(rendered.contains("render = \"/docs/apis/pkg/widget#render\""));
        assert!(!rendered.contains("Constructor"));
    }
}
