//! Shared model fixtures for unit tests.

use std::path::Path;

use crate::model::{ApiModel, ItemId};

const WIDGET_API: &str = include_str!("../../tests/fixtures/widget.api.json");
const EXTRAS_API: &str = include_str!("../../tests/fixtures/extras.api.json");

/// `@scope/pkg` followed by `@other/extras`, without `@inheritDoc` applied.
pub fn widget_model() -> ApiModel {
    let mut model = ApiModel::new();
    model
        .load_package_json(WIDGET_API, Path::new("widget.api.json"))
        .unwrap();
    model
        .load_package_json(EXTRAS_API, Path::new("extras.api.json"))
        .unwrap();
    model
}

pub fn find(model: &ApiModel, reference: &str) -> ItemId {
    model
        .resolve_declaration_reference(reference, None)
        .unwrap_or_else(|message| panic!("{reference}: {message}"))
}
