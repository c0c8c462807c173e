use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use api_hugo_engine::output::markdown::to_markdown;
use api_hugo_engine::{
    ApiItemKind, ApiModel, Documenter, DocumenterOutput, MemorySink, NewlineKind, PageUnit,
    PageWriter, RenderOptions,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixtures(sink: &MemorySink) -> ApiModel {
    let mut model = ApiModel::load_directory(&fixtures_dir()).unwrap();
    model.apply_inherit_doc(sink);
    model
}

fn run(options: RenderOptions) -> (ApiModel, DocumenterOutput, MemorySink) {
    let sink = MemorySink::default();
    let model = load_fixtures(&sink);
    let output = Documenter::new(&model, options).run(&sink);
    (model, output, sink)
}

fn page<'a>(output: &'a DocumenterOutput, name: &str) -> &'a PageUnit {
    output
        .pages
        .iter()
        .find(|page| page.name == name)
        .unwrap_or_else(|| panic!("no page for {name}"))
}

fn body(page: &PageUnit) -> String {
    to_markdown(std::slice::from_ref(&page.root))
}

#[test]
fn package_page_lists_widget_with_summary() {
    let (_, output, _) = run(RenderOptions::default());

    let markdown = body(page(&output, "@scope/pkg"));

    assert!(markdown.contains("| Class | Description | Notes |"));
    assert!(markdown.contains("| [Widget](/docs/apis/pkg/widget) | Draws the widget. |  |"));
    assert!(markdown.contains("{.table .class-table}"));
}

#[test]
fn class_page_has_methods_with_parameter_table() {
    let (_, output, _) = run(RenderOptions::default());

    let markdown = body(page(&output, "Widget"));

    assert!(markdown.contains("## Methods\n\n### render\n"));
    assert!(markdown.contains("| size | number | Size in pixels. |  |"));
    assert!(markdown.contains("```typescript\nrender(size: number): void;\n```"));
}

#[test]
fn examples_are_numbered_in_source_order() {
    let (_, output, _) = run(RenderOptions::default());

    let markdown = body(page(&output, "Widget"));
    let first = markdown.find("## Example 1").unwrap();
    let second = markdown.find("## Example 2").unwrap();

    assert!(first < second);
    assert!(markdown.contains("```ts\nnew Widget(\"a\").render(1);\n```"));
}

#[test]
fn unresolved_link_falls_back_to_text_and_run_continues() {
    // Given a package whose summary links to a symbol that doesn't exist
    let json = r#"{
        "kind": "Package",
        "name": "@scope/broken",
        "members": [{
            "kind": "Class",
            "name": "Broken",
            "docComment": {
                "summary": [{
                    "kind": "Paragraph",
                    "nodes": [
                        { "kind": "PlainText", "text": "See " },
                        { "kind": "LinkTag", "codeDestination": "Missing", "linkText": "the missing thing" }
                    ]
                }]
            }
        }]
    }"#;
    let mut model = ApiModel::new();
    model
        .load_package_json(json, Path::new("broken.api.json"))
        .unwrap();
    let sink = MemorySink::default();

    // When documenting it
    let output = Documenter::new(&model, RenderOptions::default()).run(&sink);

    // Then the link text is kept as plain text and a warning names the page
    assert!(output.failures.is_empty());
    let markdown = body(page(&output, "Broken"));
    assert!(markdown.contains("See the missing thing"));
    assert!(!markdown.contains("[the missing thing]"));
    let warnings = sink.warnings();
    assert!(!warnings.is_empty());
    assert!(warnings.iter().all(|w| w.message.contains("Missing")));
    assert!(
        warnings
            .iter()
            .any(|w| w.page.as_deref() == Some("broken/broken"))
    );
}

#[test]
fn allow_list_excludes_other_packages() {
    let options = RenderOptions {
        package_prefixes: vec!["@scope/".into()],
        ..RenderOptions::default()
    };

    let (_, output, _) = run(options);

    let packages: BTreeSet<&str> = output
        .pages
        .iter()
        .map(|page| page.front_matter.package.as_str())
        .collect();
    assert_eq!(packages, BTreeSet::from(["@scope/pkg"]));
    assert!(output.pages.iter().all(|page| page.name != "Extra"));
}

#[test]
fn standalone_pages_are_exactly_packages_classes_and_interfaces() {
    let (model, output, _) = run(RenderOptions::default());

    let expected: BTreeSet<String> = model
        .top_level_exports()
        .into_iter()
        .filter(|item| matches!(item.kind(), ApiItemKind::Class | ApiItemKind::Interface))
        .map(|item| item.name.clone())
        .chain(model.packages().map(|package| package.name.clone()))
        .collect();
    let actual: BTreeSet<String> = output.pages.iter().map(|page| page.name.clone()).collect();

    assert_eq!(actual, expected);
    let package_page = body(page(&output, "@scope/pkg"));
    assert!(package_page.contains("### createWidget"));
    assert!(!package_page.contains("### Widget"));
}

#[test]
fn deprecated_member_renders_badge_and_callout_once() {
    let (_, output, _) = run(RenderOptions::default());

    let markdown = body(page(&output, "Gadget"));

    assert_eq!(
        markdown
            .matches("{{< label \"Deprecated\" \"default\" >}}")
            .count(),
        1
    );
    assert_eq!(
        markdown
            .matches("{{% callout \"warning\" Deprecated %}}")
            .count(),
        1
    );
    assert!(markdown.contains("Use render instead."));
}

#[test]
fn inherited_documentation_is_rendered() {
    let (_, output, _) = run(RenderOptions::default());

    let gadget = page(&output, "Gadget");

    assert_eq!(gadget.front_matter.summary, "Draws the widget.");
    assert!(body(gadget).contains("**Extends:** [Widget](/docs/apis/pkg/widget)"));
}

#[test]
fn repeated_runs_produce_identical_pages() {
    let (_, first, _) = run(RenderOptions::default());
    let (_, second, _) = run(RenderOptions::default());

    let render = |output: &DocumenterOutput| -> Vec<(String, String)> {
        output
            .pages
            .iter()
            .map(|page| (page.path.to_string(), page.render().unwrap()))
            .collect()
    };
    assert_eq!(render(&first), render(&second));
}

#[test]
fn writer_lays_out_pages_by_package() {
    let (_, output, _) = run(RenderOptions {
        output_file_name_suffix: "-api".into(),
        ..RenderOptions::default()
    });
    let out_dir = TempDir::new().unwrap();
    let writer = PageWriter::new(out_dir.path(), NewlineKind::CrLf);

    for page in &output.pages {
        writer.write(page).unwrap();
    }

    for expected in [
        "pkg-api.md",
        "pkg/Widget-api.md",
        "pkg/Sizable-api.md",
        "extras-api.md",
        "extras/Extra-api.md",
    ] {
        assert!(out_dir.path().join(expected).is_file(), "missing {expected}");
    }
    let widget = std::fs::read_to_string(out_dir.path().join("pkg/Widget-api.md")).unwrap();
    assert!(widget.starts_with("+++\r\n"));
    assert!(!widget.replace("\r\n", "").contains('\n'));
}
