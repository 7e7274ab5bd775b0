use std::{borrow::Cow, fmt::Write};

const COLUMN_GAP: &str = "  ";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

#[derive(Clone, Copy, Debug)]
pub struct Column<'a> {
    pub title: &'a str,
    pub align: Alignment,
}

impl<'a> Column<'a> {
    pub const fn left(title: &'a str) -> Self {
        Self {
            title,
            align: Alignment::Left,
        }
    }

    pub const fn right(title: &'a str) -> Self {
        Self {
            title,
            align: Alignment::Right,
        }
    }
}

/// Fixed set of columns rendered as space-padded plain text.
pub struct TextTable<'a> {
    columns: &'a [Column<'a>],
}

impl<'a> TextTable<'a> {
    pub const fn new(columns: &'a [Column<'a>]) -> Self {
        Self { columns }
    }

    /// Header, dashed rule, then one line per row. Missing cells render
    /// blank and extra cells are ignored.
    pub fn render<'r, R>(&self, rows: impl IntoIterator<Item = R>) -> String
    where
        R: AsRef<[Cow<'r, str>]>,
    {
        if self.columns.is_empty() {
            return String::new();
        }
        let rows: Vec<R> = rows.into_iter().collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| width_of(c.title)).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row.as_ref()) {
                *width = (*width).max(width_of(cell));
            }
        }

        let mut out = String::new();
        let titles: Vec<&str> = self.columns.iter().map(|c| c.title).collect();
        self.push_line(&mut out, &titles, &widths);
        let rule = widths.iter().sum::<usize>() + COLUMN_GAP.len() * (widths.len() - 1);
        let _ = writeln!(out, "{}", "-".repeat(rule));
        for row in &rows {
            let cells: Vec<&str> = row.as_ref().iter().map(|cell| &**cell).collect();
            self.push_line(&mut out, &cells, &widths);
        }
        out
    }

    fn push_line(&self, out: &mut String, cells: &[&str], widths: &[usize]) {
        let padded: Vec<String> = self
            .columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, &width))| {
                let cell = cells.get(idx).copied().unwrap_or_default();
                let pad = " ".repeat(width.saturating_sub(width_of(cell)));
                match column.align {
                    Alignment::Left => format!("{cell}{pad}"),
                    Alignment::Right => format!("{pad}{cell}"),
                }
            })
            .collect();
        let _ = writeln!(out, "{}", padded.join(COLUMN_GAP).trim_end());
    }
}

fn width_of(text: &str) -> usize {
    text.chars().count()
}
