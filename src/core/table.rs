// LogTally - core/table.rs
//
// Plain-text table rendering of level counts.
// Core layer: returns a String, the caller decides where it goes.
//
// Layout:
//   +------------+-------+
//   | level name | count |
//   +------------+-------+
//   | INFO       | 3     |
//   +------------+-------+

use crate::core::model::LevelCounts;
use crate::util::constants;
use unicode_width::UnicodeWidthStr;

/// Render `counts` as an aligned two-column table.
///
/// Column widths are the widest of the header and every cell in that column,
/// measured in terminal columns. An empty `counts` renders the header block
/// and closing border with no data rows. No trailing newline.
pub fn render_counts(counts: &LevelCounts) -> String {
    let rows: Vec<[String; 2]> = counts
        .iter()
        .map(|(level, count)| [level.to_string(), count.to_string()])
        .collect();
    render(
        [constants::TABLE_HEADER_LEVEL, constants::TABLE_HEADER_COUNT],
        &rows,
    )
}

fn render(headers: [&str; 2], rows: &[[String; 2]]) -> String {
    let mut widths = [headers[0].width(), headers[1].width()];
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.width());
        }
    }

    let border = format!(
        "+{}+{}+",
        "-".repeat(widths[0] + 2),
        "-".repeat(widths[1] + 2)
    );

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(border.clone());
    lines.push(render_row(headers[0], headers[1], widths));
    lines.push(border.clone());
    for row in rows {
        lines.push(render_row(&row[0], &row[1], widths));
    }
    lines.push(border);

    lines.join("\n")
}

fn render_row(left: &str, right: &str, widths: [usize; 2]) -> String {
    format!("| {} | {} |", pad(left, widths[0]), pad(right, widths[1]))
}

/// Left-align `cell` in a field `width` columns wide.
fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.width());
    format!("{cell}{}", " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> LevelCounts {
        pairs.iter().map(|&(l, c)| (l, c)).collect()
    }

    /// Read `(level, count)` pairs back out of a rendered table.
    fn parse_rows(table: &str) -> Vec<(String, usize)> {
        table
            .lines()
            .filter(|line| line.starts_with('|'))
            .skip(1)
            .map(|line| {
                let cells: Vec<&str> = line.trim_matches('|').split('|').map(str::trim).collect();
                (cells[0].to_string(), cells[1].parse().unwrap())
            })
            .collect()
    }

    #[test]
    fn test_render_exact_layout() {
        let table = render_counts(&counts(&[("INFO", 3), ("ERROR", 1)]));
        let expected = "\
+------------+-------+
| level name | count |
+------------+-------+
| INFO       | 3     |
| ERROR      | 1     |
+------------+-------+";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_render_round_trip() {
        let original = counts(&[("INFO", 3), ("ERROR", 1)]);
        let parsed = parse_rows(&render_counts(&original));
        let recovered: LevelCounts = parsed.into_iter().collect();
        assert_eq!(recovered, original);
    }

    #[test]
    fn test_border_lines_equal_length() {
        let table = render_counts(&counts(&[("INFO", 1), ("ERROR", 1)]));
        let borders: Vec<&str> = table.lines().filter(|l| l.starts_with('+')).collect();
        assert_eq!(borders.len(), 3);
        let col1 = "level name".len().max("INFO".len()).max("ERROR".len());
        assert_eq!(borders[0], format!("+{}+-------+", "-".repeat(col1 + 2)));
        assert!(borders.iter().all(|b| b.len() == borders[0].len()));
    }

    #[test]
    fn test_wide_entries_widen_columns() {
        let table = render_counts(&counts(&[("VERY_LONG_LEVEL_NAME", 1_234_567)]));
        let widths: Vec<usize> = table.lines().map(|l| l.width()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{table}");
        assert!(table.contains("| VERY_LONG_LEVEL_NAME | 1234567 |"));
    }

    #[test]
    fn test_wide_characters_keep_alignment() {
        let table = render_counts(&counts(&[("警告", 2), ("INFO", 10)]));
        let widths: Vec<usize> = table.lines().map(|l| l.width()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]), "{table}");
    }

    #[test]
    fn test_empty_counts_render_headers_only() {
        let table = render_counts(&LevelCounts::default());
        let expected = "\
+------------+-------+
| level name | count |
+------------+-------+
+------------+-------+";
        assert_eq!(table, expected);
        assert!(parse_rows(&table).is_empty());
    }
}
