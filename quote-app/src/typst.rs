//! PDF export through the Typst compiler.
//!
//! A [`RenderedDocument`] is written out as Typst markup on a single page
//! of A4 width whose height follows the content, compiled by the `typst`
//! executable in a scratch directory, and the resulting bytes are returned.
//! All text is emitted as Typst string literals so user input is never
//! interpreted as markup.

use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;
use quote_core::RenderedDocument;
use quote_core::render::{Align, Block, Cell, Table};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::export::{ExportError, PdfExporter};
use crate::logo::decode_data_uri;

pub struct TypstExporter {
    typst_bin: String,
    scratch_root: PathBuf,
}

impl TypstExporter {
    pub fn new(typst_bin: impl Into<String>) -> Self {
        Self {
            typst_bin: typst_bin.into(),
            scratch_root: std::env::temp_dir(),
        }
    }

    async fn compile_in(
        &self,
        dir: &Path,
        document: &RenderedDocument,
    ) -> Result<Vec<u8>, ExportError> {
        let logo = document.blocks.iter().find_map(|block| match block {
            Block::Logo { source } => decode_data_uri(source),
            _ => None,
        });
        let logo_file = match &logo {
            Some(logo) => {
                let name = format!("logo.{}", logo.extension());
                tokio::fs::write(dir.join(&name), &logo.bytes).await?;
                Some(name)
            }
            None => None,
        };

        let source = to_markup(document, logo_file.as_deref());
        tokio::fs::write(dir.join("main.typ"), source).await?;

        let output = tokio::task::spawn_blocking({
            let program = self.typst_bin.clone();
            let dir = dir.to_path_buf();
            move || {
                Command::new(&program)
                    .current_dir(&dir)
                    .args(["compile", "main.typ", "main.pdf"])
                    .output()
                    .map_err(|source| ExportError::Spawn { program, source })
            }
        })
        .await
        .map_err(|e| ExportError::Task(e.to_string()))??;

        if !output.status.success() {
            return Err(ExportError::Compile(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(tokio::fs::read(dir.join("main.pdf")).await?)
    }
}

#[async_trait]
impl PdfExporter for TypstExporter {
    async fn export(
        &self,
        document: &RenderedDocument,
    ) -> Result<Vec<u8>, ExportError> {
        let dir = self.scratch_root.join(format!("quote-{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await?;
        debug!(dir = %dir.display(), "compiling quote with typst");

        let result = self.compile_in(&dir, document).await;

        if let Err(e) = tokio::fs::remove_dir_all(&dir).await {
            warn!(dir = %dir.display(), error = %e, "could not remove export scratch directory");
        }
        result
    }
}

// ---------------------------------------------------------------------------
// Markup generation
// ---------------------------------------------------------------------------

const PREAMBLE: &str = r#"#set page(width: 210mm, height: auto, margin: (x: 12mm, y: 12mm))
#set text(font: ("Liberation Sans", "Arial", "DejaVu Sans"), size: 9pt, lang: "it")
#set par(spacing: 0.6em)
"#;

/// Builds the Typst source for `document`. `logo_file` is the logo image
/// next to the source, if there is one.
pub fn to_markup(
    document: &RenderedDocument,
    logo_file: Option<&str>,
) -> String {
    let mut out = String::from(PREAMBLE);
    for block in &document.blocks {
        out.push_str(&block_markup(block, logo_file));
        out.push('\n');
    }
    out
}

fn string_literal(text: &str) -> String {
    let escaped = text.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Content for possibly multi-line text.
fn text_content(
    text: &str,
    bold: bool,
) -> String {
    let body = text
        .split('\n')
        .map(|line| format!("#{}", string_literal(line)))
        .collect::<Vec<_>>()
        .join("#linebreak()");
    if bold {
        format!("[#text(weight: \"bold\")[{body}]]")
    } else {
        format!("[{body}]")
    }
}

fn align_name(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}

fn block_markup(
    block: &Block,
    logo_file: Option<&str>,
) -> String {
    match block {
        Block::Logo { .. } => match logo_file {
            Some(file) => format!("#image({}, width: 50mm)", string_literal(file)),
            None => String::new(),
        },
        Block::Heading { text, align } => format!(
            "#align({})[#text(size: 13pt, weight: \"bold\"){}]",
            align_name(*align),
            text_content(text, false)
        ),
        Block::Section(title) => format!(
            "#v(4mm)\n#text(weight: \"bold\"){}\n#line(length: 100%, stroke: 1pt + luma(200))",
            text_content(title, false)
        ),
        Block::Paragraph { lines, align, bold } => {
            if lines.is_empty() {
                return String::new();
            }
            format!(
                "#align({}){}",
                align_name(*align),
                text_content(&lines.join("\n"), *bold)
            )
        }
        Block::Columns(columns) => {
            let cells = columns
                .iter()
                .map(|column| {
                    let inner = column
                        .iter()
                        .map(|b| block_markup(b, logo_file))
                        .collect::<Vec<_>>()
                        .join("\n");
                    format!("[\n{inner}\n]")
                })
                .collect::<Vec<_>>()
                .join(", ");
            let widths = vec!["1fr"; columns.len()].join(", ");
            format!("#grid(columns: ({widths},), column-gutter: 8mm, {cells})")
        }
        Block::Table(table) => table_markup(table),
        Block::Signatures(labels) => {
            let cells = labels
                .iter()
                .map(|label| {
                    format!(
                        "[#line(length: 100%, stroke: 1pt + luma(200))\n#align(center){}]",
                        text_content(label, false)
                    )
                })
                .collect::<Vec<_>>()
                .join(", ");
            let widths = vec!["1fr"; labels.len()].join(", ");
            format!("#v(15mm)\n#grid(columns: ({widths},), column-gutter: 30mm, {cells})")
        }
    }
}

fn cell_markup(cell: &Cell) -> String {
    format!(
        "table.cell(colspan: {}, align: {}){}",
        cell.colspan.max(1),
        align_name(cell.align),
        text_content(&cell.text, cell.bold)
    )
}

fn table_markup(table: &Table) -> String {
    let stroke = if table.bordered {
        "0.5pt + luma(180)"
    } else {
        "none"
    };
    let mut parts = vec![
        format!("columns: {}", table.columns),
        format!("stroke: {stroke}"),
        "inset: 5pt".to_string(),
    ];
    if !table.header.is_empty() {
        parts.push("fill: (_, y) => if y == 0 { luma(240) }".to_string());
        let header = table
            .header
            .iter()
            .map(|c| cell_markup(&Cell { bold: true, ..c.clone() }))
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("table.header({header})"));
    }
    parts.extend(table.rows.iter().flatten().map(cell_markup));
    format!("#v(2mm)\n#table({})", parts.join(",\n  "))
}
