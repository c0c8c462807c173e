//! Parsed TSDoc comment trees as they appear in an `.api.json` model.

use serde::Deserialize;

/// A node of a documentation comment.
///
/// Kinds the documenter does not know about deserialize into
/// [`DocNode::Unrecognized`] instead of failing the whole model load.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum DocNode {
    Paragraph {
        #[serde(default)]
        nodes: Vec<DocNode>,
    },
    PlainText {
        text: String,
    },
    CodeSpan {
        code: String,
    },
    FencedCode {
        #[serde(default)]
        language: String,
        code: String,
    },
    LinkTag {
        #[serde(default)]
        code_destination: Option<String>,
        #[serde(default)]
        url_destination: Option<String>,
        #[serde(default)]
        link_text: Option<String>,
    },
    EscapedText {
        #[serde(default)]
        encoded_text: String,
        decoded_text: String,
    },
    ErrorText {
        text: String,
        #[serde(default)]
        message: Option<String>,
    },
    HtmlStartTag {
        html: String,
    },
    HtmlEndTag {
        html: String,
    },
    SoftBreak,
    Section {
        #[serde(default)]
        nodes: Vec<DocNode>,
    },
    Block {
        tag_name: String,
        #[serde(default)]
        nodes: Vec<DocNode>,
    },
    BlockTag {
        tag_name: String,
    },
    Comment,
    InlineTag {
        tag_name: String,
        #[serde(default)]
        content: String,
    },
    InheritDocTag {
        #[serde(default)]
        declaration_reference: Option<String>,
    },
    ParamBlock {
        name: String,
        #[serde(default)]
        nodes: Vec<DocNode>,
    },
    #[serde(other)]
    Unrecognized,
}

impl DocNode {
    pub fn kind_name(&self) -> &'static str {
        match self {
            DocNode::Paragraph { .. } => "Paragraph",
            DocNode::PlainText { .. } => "PlainText",
            DocNode::CodeSpan { .. } => "CodeSpan",
            DocNode::FencedCode { .. } => "FencedCode",
            DocNode::LinkTag { .. } => "LinkTag",
            DocNode::EscapedText { .. } => "EscapedText",
            DocNode::ErrorText { .. } => "ErrorText",
            DocNode::HtmlStartTag { .. } => "HtmlStartTag",
            DocNode::HtmlEndTag { .. } => "HtmlEndTag",
            DocNode::SoftBreak => "SoftBreak",
            DocNode::Section { .. } => "Section",
            DocNode::Block { .. } => "Block",
            DocNode::BlockTag { .. } => "BlockTag",
            DocNode::Comment => "Comment",
            DocNode::InlineTag { .. } => "InlineTag",
            DocNode::InheritDocTag { .. } => "InheritDocTag",
            DocNode::ParamBlock { .. } => "ParamBlock",
            DocNode::Unrecognized => "Unrecognized",
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        DocNode::PlainText { text: text.into() }
    }

    pub fn paragraph(nodes: Vec<DocNode>) -> Self {
        DocNode::Paragraph { nodes }
    }
}

/// A named `@param` or `@typeParam` block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocParamBlock {
    pub name: String,
    #[serde(default)]
    pub content: Vec<DocNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocComment {
    #[serde(default)]
    pub summary: Vec<DocNode>,
    #[serde(default)]
    pub remarks: Option<Vec<DocNode>>,
    #[serde(default)]
    pub deprecated: Option<Vec<DocNode>>,
    #[serde(default)]
    pub returns: Option<Vec<DocNode>>,
    #[serde(default)]
    pub examples: Vec<Vec<DocNode>>,
    #[serde(default)]
    pub params: Vec<DocParamBlock>,
    #[serde(default)]
    pub type_params: Vec<DocParamBlock>,
    #[serde(default)]
    pub inherit_doc: Option<String>,
}

impl DocComment {
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.is_some()
    }

    pub fn param(&self, name: &str) -> Option<&DocParamBlock> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn type_param(&self, name: &str) -> Option<&DocParamBlock> {
        self.type_params.iter().find(|p| p.name == name)
    }

    /// Replaces the inheritable sections with those of `source`, then clears the
    /// `@inheritDoc` marker.
    pub fn inherit_from(&mut self, source: &DocComment) {
        self.summary = source.summary.clone();
        self.remarks = source.remarks.clone();
        self.params = source.params.clone();
        for type_param in &source.type_params {
            self.type_params.push(type_param.clone());
        }
        self.returns = source.returns.clone();
        self.inherit_doc = None;
    }
}
