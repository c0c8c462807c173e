//! # Cross-reference resolution
//!
//! Turns names and canonical references into items, and items into stable
//! link targets. [`locate`] depends only on an item's position in the tree,
//! so every pass over the same model produces the same paths.

use std::sync::LazyLock;

use regex::Regex;
use relative_path::RelativePathBuf;

use crate::model::{ApiItemKind, ApiModel, ItemId};

static BAD_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w.-]").expect("valid filename regex"));

/// Replaces characters that are unsafe in file names and URLs with `_`.
pub fn file_stem(name: &str) -> String {
    BAD_FILENAME_CHARS.replace_all(name, "_").into_owned()
}

/// `@scope/pkg` becomes `pkg`; unscoped names are returned unchanged.
pub fn unscoped_package_name(name: &str) -> &str {
    name.strip_prefix('@')
        .and_then(|scoped| scoped.split_once('/'))
        .map(|(_, unscoped)| unscoped)
        .unwrap_or(name)
}

/// File stems from the package down to the standalone page that holds `id`.
fn page_segments(model: &ApiModel, id: ItemId) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    let mut page = Vec::new();

    for item in model.hierarchy(id) {
        match item.kind() {
            ApiItemKind::Model | ApiItemKind::EntryPoint => continue,
            ApiItemKind::Package => {
                segments = vec![file_stem(unscoped_package_name(&item.name))];
            }
            _ => {
                let mut segment = file_stem(&item.name);
                if let Some(overload) = item.overload_index
                    && overload > 1
                {
                    segment.push_str(&format!("_{}", overload - 1));
                }
                segments.push(segment);
            }
        }
        if item.kind().has_standalone_page() {
            page = segments.clone();
        }
    }
    page
}

/// The site-relative path of an item: a page path for packages, classes and
/// interfaces, otherwise `<page>#<anchor>` on the nearest standalone ancestor.
pub fn locate(model: &ApiModel, id: ItemId) -> String {
    let page_path = page_segments(model, id).join("/").to_lowercase();
    let target = model.get(id);
    if target.kind().has_standalone_page() || target.kind().is_structural() {
        page_path
    } else {
        format!("{page_path}#{}", target.name.to_lowercase())
    }
}

/// Outcome of a lookup by display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    NotFound,
    Unique(ItemId),
    /// More than one item shares the name; `first` is the one in model order.
    Ambiguous { first: ItemId, count: usize },
}

pub struct Resolver<'m> {
    model: &'m ApiModel,
    /// Every export reachable from a package entry point, in model order.
    index: Vec<ItemId>,
    uri_root: String,
}

impl<'m> Resolver<'m> {
    pub fn new(model: &'m ApiModel, uri_root: impl Into<String>) -> Self {
        let index = model.top_level_exports().iter().map(|item| item.id).collect();
        Self {
            model,
            index,
            uri_root: uri_root.into(),
        }
    }

    pub fn model(&self) -> &'m ApiModel {
        self.model
    }

    pub fn uri_root(&self) -> &str {
        &self.uri_root
    }

    /// Linear search of the export index by display name.
    pub fn find_by_name(&self, name: &str) -> NameMatch {
        let mut matches = self
            .index
            .iter()
            .copied()
            .filter(|id| self.model.get(*id).name == name);

        match (matches.next(), matches.count()) {
            (None, _) => NameMatch::NotFound,
            (Some(first), 0) => NameMatch::Unique(first),
            (Some(first), rest) => NameMatch::Ambiguous {
                first,
                count: rest + 1,
            },
        }
    }

    /// Resolves a canonical reference through the model.
    pub fn resolve_reference(&self, reference: &str, context: Option<ItemId>) -> Result<ItemId, String> {
        self.model.resolve_declaration_reference(reference, context)
    }

    pub fn locate(&self, id: ItemId) -> String {
        locate(self.model, id)
    }

    /// The output file of the page holding `id`; the same path [`locate`] links to.
    pub fn page_file(&self, id: ItemId, suffix: &str) -> RelativePathBuf {
        RelativePathBuf::from(format!(
            "{}{suffix}.md",
            page_segments(self.model, id).join("/")
        ))
    }

    /// The link URL of an item under the configured URI root.
    pub fn link_for(&self, id: ItemId) -> String {
        format!("{}{}", self.uri_root, self.locate(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{find, widget_model};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("@scope/pkg", "pkg")]
    #[case("plain-pkg", "plain-pkg")]
    #[case("@scope", "@scope")]
    fn unscoped_names(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(unscoped_package_name(name), expected);
    }

    #[test]
    fn file_stem_replaces_unsafe_characters_and_keeps_case() {
        assert_eq!(file_stem("My Widget<T>"), "My_Widget_T_");
    }

    #[rstest]
    #[case("@scope/pkg!", "", "pkg.md")]
    #[case("@scope/pkg!Widget", "-api", "pkg/Widget-api.md")]
    #[case("@scope/pkg!Widget#render", "", "pkg/Widget.md")]
    fn page_files_follow_located_paths(
        #[case] reference: &str,
        #[case] suffix: &str,
        #[case] expected: &str,
    ) {
        let model = widget_model();
        let resolver = Resolver::new(&model, "");
        let id = find(&model, reference);

        assert_eq!(resolver.page_file(id, suffix), RelativePathBuf::from(expected));
    }

    #[test]
    fn unsafe_and_nested_names_share_link_and_file() {
        // Given a class with an unsafe name inside a namespace
        let json = r#"{
            "kind": "Package",
            "name": "@scope/odd",
            "members": [{
                "kind": "Namespace",
                "name": "Shapes",
                "members": [{ "kind": "Class", "name": "Box<T>" }]
            }]
        }"#;
        let mut model = ApiModel::new();
        model
            .load_package_json(json, std::path::Path::new("odd.api.json"))
            .unwrap();
        let resolver = Resolver::new(&model, "/");
        let boxed = find(&model, "@scope/odd!Shapes.Box<T>");

        // Then the link is the lowercased file path, without the extension
        let file = resolver.page_file(boxed, "");
        assert_eq!(file, RelativePathBuf::from("odd/Shapes/Box_T_.md"));
        assert_eq!(
            resolver.link_for(boxed),
            format!("/{}", file.as_str().trim_end_matches(".md").to_lowercase())
        );
    }

    #[rstest]
    #[case("@scope/pkg!", "pkg")]
    #[case("@scope/pkg!Widget", "pkg/widget")]
    #[case("@scope/pkg!Widget#render", "pkg/widget#render")]
    #[case("@scope/pkg!Sizable", "pkg/sizable")]
    #[case("@scope/pkg!createWidget", "pkg#createwidget")]
    #[case("@scope/pkg!Color.Red", "pkg#red")]
    fn locate_paths(#[case] reference: &str, #[case] expected: &str) {
        let model = widget_model();
        let id = model.resolve_declaration_reference(reference, None).unwrap();

        assert_eq!(locate(&model, id), expected);
    }

    #[test]
    fn locate_is_stable() {
        let model = widget_model();
        for item in model.top_level_exports() {
            assert_eq!(locate(&model, item.id), locate(&model, item.id));
        }
    }

    #[test]
    fn overloaded_member_of_standalone_page_keeps_plain_anchor() {
        let model = widget_model();
        let second = find(&model, "@scope/pkg!Gadget#draw(2)");

        assert_eq!(locate(&model, second), "pkg/gadget#draw");
    }

    #[test]
    fn unique_name_round_trips() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "/docs/apis/");
        let widget = find(&model, "@scope/pkg!Widget");

        assert_eq!(resolver.find_by_name("Widget"), NameMatch::Unique(widget));
        assert_eq!(resolver.link_for(widget), "/docs/apis/pkg/widget");
    }

    #[test]
    fn duplicate_name_picks_first_in_model_order() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "");
        let first = find(&model, "@scope/pkg!Options");

        assert_eq!(
            resolver.find_by_name("Options"),
            NameMatch::Ambiguous { first, count: 2 }
        );
    }

    #[test]
    fn missing_name_is_not_found() {
        let model = widget_model();
        let resolver = Resolver::new(&model, "");

        assert_eq!(resolver.find_by_name("number"), NameMatch::NotFound);
    }
}
