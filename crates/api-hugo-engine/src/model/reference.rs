//! Canonical declaration references such as `@scope/pkg!Widget#render:member(1)`.

/// One navigation step of a declaration reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceComponent {
    pub name: String,
    /// The `:meaning` selector (`class`, `interface`, `member`, ...), if any.
    pub meaning: Option<String>,
    /// The `(n)` overload selector, if any.
    pub overload_index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationReference {
    pub package_name: Option<String>,
    pub components: Vec<ReferenceComponent>,
}

impl DeclarationReference {
    /// Splits a reference into its package and member path.
    ///
    /// Never fails: anything that doesn't look like a selector is kept as part
    /// of the component name, and resolution reports what it couldn't find.
    pub fn parse(reference: &str) -> Self {
        let reference = reference.trim();
        let (package_name, path) = match reference.split_once('!') {
            Some((package, path)) => (Some(package.to_string()), path),
            None => (None, reference),
        };

        let components = path
            .split(['.', '#', '~'])
            .filter(|part| !part.is_empty())
            .map(parse_component)
            .collect();

        DeclarationReference {
            package_name: package_name.filter(|name| !name.is_empty()),
            components,
        }
    }
}

fn parse_component(part: &str) -> ReferenceComponent {
    let mut rest = part;
    let mut overload_index = None;

    if let Some(open) = rest.rfind('(')
        && rest.ends_with(')')
        && let Ok(index) = rest[open + 1..rest.len() - 1].parse::<u32>()
    {
        overload_index = Some(index);
        rest = &rest[..open];
    }

    let (name, meaning) = match rest.split_once(':') {
        Some((name, meaning)) => (name, Some(meaning.to_string())),
        None => (rest, None),
    };

    ReferenceComponent {
        name: name.to_string(),
        meaning,
        overload_index,
    }
}
