// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, io};

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

/// A plain-text table with a bold header row and padded columns.
#[derive(Debug)]
pub struct Table<'a, T, C: TableColumn<T>> {
    columns: &'a [C],
    data: &'a [T],
    separator: &'static str,
}

impl<'a, T, C: TableColumn<T>> Table<'a, T, C> {
    pub fn new(columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            columns,
            data,
            separator: "  ",
        }
    }

    pub fn write_to(&self, w: &mut impl io::Write) -> io::Result<()> {
        let header: Vec<Cow<'_, str>> = self.columns.iter().map(TableColumn::name).collect();
        let rows: Vec<Vec<Cow<'_, str>>> = self
            .data
            .iter()
            .map(|row| self.columns.iter().map(|col| col.format(row)).collect())
            .collect();

        let widths = column_widths(std::iter::once(&header).chain(&rows));

        let header_cells = header.iter().zip(&widths).map(|(cell, &width)| {
            pad(cell, width).bold().to_string()
        });
        self.write_line(w, header_cells)?;

        for (cells, row) in rows.iter().zip(self.data) {
            let cells = self
                .columns
                .iter()
                .zip(cells)
                .zip(&widths)
                .map(|((col, cell), &width)| {
                    let cell = pad(cell, width);
                    match col.color(row) {
                        Some(color) => cell.color(color).to_string(),
                        None => cell,
                    }
                });
            self.write_line(w, cells)?;
        }
        Ok(())
    }

    fn write_line(
        &self,
        w: &mut impl io::Write,
        cells: impl Iterator<Item = String>,
    ) -> io::Result<()> {
        let line = cells.collect::<Vec<_>>().join(self.separator);
        writeln!(w, "{}", line.trim_end())
    }
}

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

/// Left-align `cell` in `width` terminal columns.
fn pad(cell: &str, width: usize) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    format!("{cell}{fill}")
}

fn column_widths<'a, 'b: 'a>(
    rows: impl Iterator<Item = &'a Vec<Cow<'b, str>>>,
) -> Vec<usize> {
    let mut max_width: Vec<usize> = Vec::new();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let width = cell.width();
            match max_width.get_mut(i) {
                Some(max) => *max = (*max).max(width),
                None => max_width.push(width),
            }
        }
    }
    max_width
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Name;

    impl TableColumn<(&str, u32)> for Name {
        fn name(&self) -> Cow<'_, str> {
            "Name".into()
        }

        fn format<'a>(&self, data: &'a (&str, u32)) -> Cow<'a, str> {
            data.0.into()
        }
    }

    #[test]
    fn pads_to_widest_cell() {
        colored::control::set_override(false);
        let data = [("short", 1), ("a longer name", 2)];
        let columns = [Name];
        let mut out = Vec::new();
        Table::new(&columns, &data).write_to(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Name\nshort\na longer name\n");
    }

    #[test]
    fn pads_by_display_width() {
        assert_eq!(pad("日程", 6), "日程  ");
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abcdef");
    }
}
