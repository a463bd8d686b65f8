//! Layout of a quote as a structured, back-end independent document.
//!
//! [`render`] maps a document and its totals to a [`RenderedDocument`]: an
//! ordered list of [`Block`]s carrying text, alignment and emphasis only.
//! The same inputs always give the same output. Back-ends (plain text here,
//! Typst in the application crate) walk the blocks.

mod bilingual;
mod dealer;
mod text;

use serde::Serialize;

use crate::calculations::Totals;
use crate::models::{QuoteDocument, TemplateVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub text: String,
    pub align: Align,
    pub bold: bool,
    pub colspan: usize,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            align: Align::Left,
            bold: false,
            colspan: 1,
        }
    }

    pub fn align(
        mut self,
        align: Align,
    ) -> Self {
        self.align = align;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn span(
        mut self,
        colspan: usize,
    ) -> Self {
        self.colspan = colspan;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub columns: usize,
    /// Header row; empty for borderless key/value tables.
    pub header: Vec<Cell>,
    pub rows: Vec<Vec<Cell>>,
    pub bordered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Block {
    Logo {
        source: String,
    },
    Heading {
        text: String,
        align: Align,
    },
    /// Section title with an underline rule.
    Section(String),
    Paragraph {
        lines: Vec<String>,
        align: Align,
        bold: bool,
    },
    Columns(Vec<Vec<Block>>),
    Table(Table),
    Signatures(Vec<String>),
}

impl Block {
    pub fn heading(text: impl Into<String>) -> Self {
        Block::Heading {
            text: text.into(),
            align: Align::Left,
        }
    }

    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Block::Paragraph {
            lines: lines.into_iter().map(Into::into).collect(),
            align: Align::Left,
            bold: false,
        }
    }

    pub fn line(text: impl Into<String>) -> Self {
        Self::lines([text])
    }

    pub fn aligned(
        self,
        to: Align,
    ) -> Self {
        match self {
            Block::Heading { text, .. } => Block::Heading { text, align: to },
            Block::Paragraph { lines, bold, .. } => Block::Paragraph {
                lines,
                align: to,
                bold,
            },
            other => other,
        }
    }

    pub fn emphasized(self) -> Self {
        match self {
            Block::Paragraph { lines, align, .. } => Block::Paragraph {
                lines,
                align,
                bold: true,
            },
            other => other,
        }
    }
}

/// A laid-out quote ready for display or export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub template: TemplateVariant,
    /// Quote number, used for the export file name.
    pub quote_number: String,
    pub blocks: Vec<Block>,
}

impl RenderedDocument {
    /// File name of the exported PDF: `Preventivo_<quoteNumber>.pdf`.
    pub fn pdf_file_name(&self) -> String {
        format!("Preventivo_{}.pdf", self.quote_number)
    }
}

/// Lays out `document` in the given template.
pub fn render(
    document: &QuoteDocument,
    totals: &Totals,
    template: TemplateVariant,
) -> RenderedDocument {
    let blocks = match template {
        TemplateVariant::DealerStyle => dealer::blocks(document, totals),
        TemplateVariant::BilingualDistributor => bilingual::blocks(document, totals),
    };

    RenderedDocument {
        template,
        quote_number: document.quote_number.clone(),
        blocks,
    }
}
