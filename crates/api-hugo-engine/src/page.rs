use relative_path::RelativePathBuf;

use crate::compose::FrontMatter;
use crate::model::ItemId;
use crate::output::OutputNode;
use crate::output::markdown::to_markdown;

/// One composed standalone page, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct PageUnit {
    pub entity: ItemId,
    /// Display name of the documented item, used in reports.
    pub name: String,
    /// Output path relative to the output directory.
    pub path: RelativePathBuf,
    pub front_matter: FrontMatter,
    pub root: OutputNode,
}

impl PageUnit {
    /// Front matter followed by the Markdown body, with `\n` line endings.
    pub fn render(&self) -> Result<String, toml::ser::Error> {
        let mut out = self.front_matter.render()?;
        out.push('\n');
        out.push_str(&to_markdown(std::slice::from_ref(&self.root)));
        Ok(out)
    }
}
