//! Plain-text preview of a rendered quote, used for terminal output.
//!
//! Columns are printed one after another; tables are padded to the widest
//! cell per column. Multi-line header cells are joined with " / ".

use std::fmt::{self, Write};

use super::{Align, Block, Cell, RenderedDocument, Table};

const WIDTH: usize = 80;

impl fmt::Display for RenderedDocument {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for block in &self.blocks {
            write_block(f, block)?;
        }
        Ok(())
    }
}

fn write_block(
    out: &mut impl Write,
    block: &Block,
) -> fmt::Result {
    match block {
        Block::Logo { source } => {
            if source.starts_with("data:") {
                writeln!(out, "[logo]")
            } else {
                Ok(())
            }
        }
        Block::Heading { text, align } => {
            writeln!(out, "{}", aligned(text, *align, WIDTH))
        }
        Block::Section(title) => {
            writeln!(out)?;
            writeln!(out, "{title}")?;
            writeln!(out, "{}", "-".repeat(title.chars().count()))
        }
        Block::Paragraph { lines, align, .. } => {
            for line in lines {
                writeln!(out, "{}", aligned(line, *align, WIDTH))?;
            }
            Ok(())
        }
        Block::Columns(columns) => {
            for column in columns {
                for inner in column {
                    write_block(out, inner)?;
                }
                writeln!(out)?;
            }
            Ok(())
        }
        Block::Table(table) => write_table(out, table),
        Block::Signatures(labels) => {
            writeln!(out)?;
            let rules: Vec<String> = labels.iter().map(|_| "_".repeat(24)).collect();
            let names: Vec<String> = labels.iter().map(|l| aligned(l, Align::Center, 24)).collect();
            writeln!(out, "{}", rules.join("    "))?;
            writeln!(out, "{}", names.join("    ").trim_end())
        }
    }
}

fn cell_text(cell: &Cell) -> String {
    cell.text.replace('\n', " / ")
}

fn write_table(
    out: &mut impl Write,
    table: &Table,
) -> fmt::Result {
    let mut widths = vec![0usize; table.columns];
    for row in std::iter::once(&table.header).chain(&table.rows) {
        let mut col = 0;
        for cell in row {
            if cell.colspan == 1 && col < widths.len() {
                widths[col] = widths[col].max(cell_text(cell).chars().count());
            }
            col += cell.colspan;
        }
    }

    let write_row = |out: &mut dyn Write, row: &[Cell]| -> fmt::Result {
        let mut col = 0;
        let mut parts = Vec::with_capacity(row.len());
        for cell in row {
            let end = (col + cell.colspan).min(widths.len());
            let span_width: usize =
                widths[col..end].iter().sum::<usize>() + 3 * (end - col).saturating_sub(1);
            parts.push(aligned(&cell_text(cell), cell.align, span_width));
            col = end;
        }
        let sep = if table.bordered { " | " } else { "  " };
        writeln!(out, "{}", parts.join(sep).trim_end())
    };

    if !table.header.is_empty() {
        write_row(&mut *out, &table.header)?;
        let total: usize = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        writeln!(out, "{}", "=".repeat(total))?;
    }
    for row in &table.rows {
        write_row(&mut *out, row)?;
    }
    Ok(())
}

fn aligned(
    text: &str,
    align: Align,
    width: usize,
) -> String {
    match align {
        Align::Left => format!("{text:<width$}"),
        Align::Center => format!("{text:^width$}"),
        Align::Right => format!("{text:>width$}"),
    }
}
