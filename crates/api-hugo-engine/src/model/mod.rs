//! # API model
//!
//! An immutable, fully-loaded view of one or more `.api.json` packages.
//!
//! Items are stored in an arena and addressed by [`ItemId`]. Every item records
//! its parent, so hierarchy walks and package lookups never need back-pointers
//! into the deserialized tree. Once loading (and `@inheritDoc` expansion) is
//! done the model is only ever borrowed immutably, which is what lets page
//! composition fan out across threads.

pub mod doc;
pub mod excerpt;
pub mod kind;
pub mod reference;

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::diagnostics::{Diagnostic, DiagnosticSink};

pub use doc::{DocComment, DocNode, DocParamBlock};
pub use excerpt::{Excerpt, ExcerptToken, ExcerptTokenKind, Parameter, TypeParameter};
pub use kind::{ApiItemKind, ItemDetail, ReleaseTag};
pub use reference::{DeclarationReference, ReferenceComponent};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to read API file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse API file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Expected a Package at the root of {path}, got a {found}")]
    UnexpectedRoot { path: PathBuf, found: ApiItemKind },
    #[error("Invalid input pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    #[error("Failed to scan input directory: {0}")]
    Scan(#[from] glob::GlobError),
}

/// Handle to an item inside an [`ApiModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(usize);

#[derive(Debug, Clone)]
pub struct ApiItem {
    pub id: ItemId,
    pub name: String,
    pub detail: ItemDetail,
    pub canonical_reference: Option<String>,
    pub doc_comment: Option<DocComment>,
    pub excerpt: Excerpt,
    pub release_tag: ReleaseTag,
    pub modifiers: Vec<String>,
    pub overload_index: Option<u32>,
    pub parent: Option<ItemId>,
    pub members: Vec<ItemId>,
}

impl ApiItem {
    pub fn kind(&self) -> ApiItemKind {
        self.detail.kind()
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    /// The declaration excerpt prefixed with its modifiers, e.g. `static readonly x: number;`.
    pub fn excerpt_with_modifiers(&self) -> String {
        if self.modifiers.is_empty() {
            return self.excerpt.text.clone();
        }
        format!("{} {}", self.modifiers.join(" "), self.excerpt.text)
    }

    pub fn is_deprecated(&self) -> bool {
        self.doc_comment
            .as_ref()
            .is_some_and(DocComment::is_deprecated)
    }
}

/// Serialized shape of one item in an `.api.json` file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemSpec {
    #[serde(flatten)]
    detail: ItemDetail,
    #[serde(default)]
    name: String,
    #[serde(default)]
    canonical_reference: Option<String>,
    #[serde(default)]
    doc_comment: Option<DocComment>,
    #[serde(default)]
    excerpt: Excerpt,
    #[serde(default)]
    release_tag: ReleaseTag,
    #[serde(default)]
    modifiers: Vec<String>,
    #[serde(default)]
    overload_index: Option<u32>,
    /// Decoded one at a time so unknown kinds can be skipped.
    #[serde(default)]
    members: Vec<Value>,
}

/// A member whose kind is not rendered, left out of the model at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    pub kind: String,
    pub name: String,
    /// Name of the containing item.
    pub parent: String,
}

#[derive(Debug, Clone)]
pub struct ApiModel {
    items: Vec<ApiItem>,
    skipped: Vec<SkippedItem>,
}

impl Default for ApiModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiModel {
    /// Creates an empty model holding only the root `Model` item.
    pub fn new() -> Self {
        let root = ApiItem {
            id: ItemId(0),
            name: String::new(),
            detail: ItemDetail::Model,
            canonical_reference: None,
            doc_comment: None,
            excerpt: Excerpt::default(),
            release_tag: ReleaseTag::None,
            modifiers: Vec::new(),
            overload_index: None,
            parent: None,
            members: Vec::new(),
        };
        Self {
            items: vec![root],
            skipped: Vec::new(),
        }
    }

    /// Loads every `*.api.json` file directly inside `dir`, in file name order.
    pub fn load_directory(dir: &Path) -> Result<Self, ModelError> {
        let pattern = dir.join("*.api.json").to_string_lossy().into_owned();
        let paths = glob::glob(&pattern).map_err(|source| ModelError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;

        let mut files = paths.collect::<Result<Vec<_>, _>>()?;
        files.sort();

        let mut model = Self::new();
        for file in files {
            log::info!("Reading {}", file.display());
            model.load_package_file(&file)?;
        }
        Ok(model)
    }

    pub fn load_package_file(&mut self, path: &Path) -> Result<ItemId, ModelError> {
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_package_json(&json, path)
    }

    /// Parses one package document and attaches it under the model root.
    ///
    /// `origin` is only used for error messages.
    pub fn load_package_json(&mut self, json: &str, origin: &Path) -> Result<ItemId, ModelError> {
        let spec: ItemSpec = serde_json::from_str(json).map_err(|source| ModelError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

        let found = spec.detail.kind();
        if found != ApiItemKind::Package {
            return Err(ModelError::UnexpectedRoot {
                path: origin.to_path_buf(),
                found,
            });
        }

        let spec = with_entry_point(spec);
        let root = self.root().id;
        self.insert(spec, root, origin)
    }

    fn insert(&mut self, spec: ItemSpec, parent: ItemId, origin: &Path) -> Result<ItemId, ModelError> {
        let id = ItemId(self.items.len());
        self.items.push(ApiItem {
            id,
            name: spec.name,
            detail: spec.detail,
            canonical_reference: spec.canonical_reference,
            doc_comment: spec.doc_comment,
            excerpt: spec.excerpt,
            release_tag: spec.release_tag,
            modifiers: spec.modifiers,
            overload_index: spec.overload_index,
            parent: Some(parent),
            members: Vec::new(),
        });
        self.items[parent.0].members.push(id);

        for member in spec.members {
            if let Some(kind) = member.get("kind").and_then(Value::as_str)
                && !is_known_kind(kind)
            {
                self.skipped.push(SkippedItem {
                    kind: kind.to_string(),
                    name: member
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    parent: self.items[id.0].name.clone(),
                });
                continue;
            }
            let member: ItemSpec =
                serde_json::from_value(member).map_err(|source| ModelError::Parse {
                    path: origin.to_path_buf(),
                    source,
                })?;
            self.insert(member, id, origin)?;
        }
        Ok(id)
    }

    /// Members that were left out because their kind is not rendered.
    pub fn skipped(&self) -> &[SkippedItem] {
        &self.skipped
    }

    /// Reports every skipped member as a warning.
    pub fn report_skipped(&self, sink: &dyn DiagnosticSink) {
        for item in &self.skipped {
            sink.emit(
                Diagnostic::warning(format!(
                    "Skipping unsupported {} member {}",
                    item.kind, item.name
                ))
                .for_entity(&item.parent),
            );
        }
    }

    pub fn root(&self) -> &ApiItem {
        &self.items[0]
    }

    pub fn get(&self, id: ItemId) -> &ApiItem {
        &self.items[id.0]
    }

    pub fn members(&self, id: ItemId) -> impl Iterator<Item = &ApiItem> {
        self.items[id.0].members.iter().map(|m| self.get(*m))
    }

    pub fn packages(&self) -> impl Iterator<Item = &ApiItem> {
        self.members(self.root().id)
            .filter(|item| item.kind() == ApiItemKind::Package)
    }

    pub fn find_package(&self, name: &str) -> Option<&ApiItem> {
        self.packages().find(|p| p.name == name)
    }

    /// The ancestor chain of `id`, starting at the model root and ending with the item itself.
    pub fn hierarchy(&self, id: ItemId) -> Vec<&ApiItem> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(item_id) = current {
            let item = self.get(item_id);
            chain.push(item);
            current = item.parent;
        }
        chain.reverse();
        chain
    }

    pub fn associated_package(&self, id: ItemId) -> Option<&ApiItem> {
        self.hierarchy(id)
            .into_iter()
            .find(|item| item.kind() == ApiItemKind::Package)
    }

    /// The synthetic entry point holding a package's exported symbols.
    pub fn entry_point(&self, package: ItemId) -> Option<&ApiItem> {
        self.members(package)
            .find(|item| item.kind() == ApiItemKind::EntryPoint)
    }

    /// Exported symbols of a package, in declaration order.
    pub fn exported_members(&self, package: ItemId) -> Vec<&ApiItem> {
        match self.entry_point(package) {
            Some(entry_point) => self.members(entry_point.id).collect(),
            None => Vec::new(),
        }
    }

    /// Every item reachable from the packages' entry points (top level exports only).
    pub fn top_level_exports(&self) -> Vec<&ApiItem> {
        self.packages()
            .flat_map(|package| self.exported_members(package.id))
            .collect()
    }

    /// Resolves a canonical declaration reference.
    ///
    /// References without a package part are resolved against the package of
    /// `context`. The error is a human readable explanation of what was missing.
    pub fn resolve_declaration_reference(
        &self,
        reference: &str,
        context: Option<ItemId>,
    ) -> Result<ItemId, String> {
        let parsed = DeclarationReference::parse(reference);

        let package = match &parsed.package_name {
            Some(name) => self
                .find_package(name)
                .ok_or_else(|| format!("The package \"{name}\" could not be located"))?,
            None => context
                .and_then(|id| self.associated_package(id))
                .ok_or_else(|| {
                    format!("The reference \"{reference}\" has no package name and no context")
                })?,
        };

        if parsed.components.is_empty() {
            return Ok(package.id);
        }

        let mut current = self
            .entry_point(package.id)
            .map(|entry_point| entry_point.id)
            .unwrap_or(package.id);

        for component in &parsed.components {
            let candidates: Vec<&ApiItem> = self
                .members(current)
                .filter(|member| member.name == component.name)
                .filter(|member| meaning_matches(component.meaning.as_deref(), member.kind()))
                .filter(|member| {
                    component.overload_index.is_none()
                        || member.overload_index == component.overload_index
                })
                .collect();

            current = match candidates.as_slice() {
                [] => {
                    return Err(format!(
                        "The member reference \"{}\" was not found",
                        component.name
                    ));
                }
                [single] => single.id,
                _ => {
                    return Err(format!(
                        "The member reference \"{}\" was ambiguous",
                        component.name
                    ));
                }
            };
        }

        Ok(current)
    }

    /// Copies documentation into items whose comment carries `@inheritDoc`.
    ///
    /// Unresolvable references are reported and leave the comment untouched.
    pub fn apply_inherit_doc(&mut self, sink: &dyn DiagnosticSink) {
        let mut inherited = Vec::new();

        for item in &self.items {
            let Some(reference) = item
                .doc_comment
                .as_ref()
                .and_then(|doc| doc.inherit_doc.as_deref())
            else {
                continue;
            };

            match self.resolve_declaration_reference(reference, Some(item.id)) {
                Ok(source) if source != item.id => {
                    if let Some(source_doc) = &self.get(source).doc_comment {
                        inherited.push((item.id, source_doc.clone()));
                    }
                }
                Ok(_) => {}
                Err(message) => sink.emit(
                    Diagnostic::warning(format!(
                        "Unresolved @inheritDoc tag for {}: {message}",
                        item.name
                    ))
                    .for_entity(&item.name),
                ),
            }
        }

        for (id, source_doc) in inherited {
            if let Some(doc) = self.items[id.0].doc_comment.as_mut() {
                doc.inherit_from(&source_doc);
            }
        }
    }
}

/// Packages must hold exactly one entry point; bare package files get a synthetic one.
fn with_entry_point(mut spec: ItemSpec) -> ItemSpec {
    let has_entry_point = spec
        .members
        .iter()
        .any(|member| member.get("kind").and_then(Value::as_str) == Some("EntryPoint"));
    if has_entry_point {
        return spec;
    }

    let exports = std::mem::take(&mut spec.members);
    spec.members.push(serde_json::json!({
        "kind": "EntryPoint",
        "canonicalReference": spec.canonical_reference.clone(),
        "members": exports,
    }));
    spec
}

fn is_known_kind(kind: &str) -> bool {
    serde_json::from_value::<ApiItemKind>(Value::from(kind)).is_ok()
}

fn meaning_matches(meaning: Option<&str>, kind: ApiItemKind) -> bool {
    match meaning {
        None => true,
        Some("class") => kind == ApiItemKind::Class,
        Some("interface") => kind == ApiItemKind::Interface,
        Some("enum") => kind == ApiItemKind::Enum,
        Some("function") => kind == ApiItemKind::Function,
        Some("type") => kind == ApiItemKind::TypeAlias,
        Some("var") => kind == ApiItemKind::Variable,
        Some("namespace") => kind == ApiItemKind::Namespace,
        Some("constructor") => kind == ApiItemKind::Constructor,
        Some("member") => matches!(
            kind,
            ApiItemKind::Method
                | ApiItemKind::MethodSignature
                | ApiItemKind::Property
                | ApiItemKind::PropertySignature
                | ApiItemKind::EnumMember
        ),
        Some(_) => true,
    }
}
