//! Aligned tabular rendering.
//!
//! ```text
//!  id | name
//! ----+------
//!  1  | a
//! ```

use std::fmt;

use crate::config::DisplayConfig;
use crate::types::Scalar;

use super::Relation;

impl Relation {
    pub fn render(&self, cfg: &DisplayConfig) -> String {
        let cell = |v: &Scalar| match v {
            Scalar::Null => cfg.null_repr.clone(),
            other => other.to_string(),
        };

        let headings: Vec<String> = self.attrs.iter().map(|a| a.to_string()).collect();
        let shown = cfg.max_rows.unwrap_or(usize::MAX).min(self.tuples.len());
        let rows: Vec<Vec<String>> = self
            .tuples
            .iter()
            .take(shown)
            .map(|t| t.iter().map(cell).collect())
            .collect();

        // One space of padding on the right of the widest entry.
        let widths: Vec<usize> = headings
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let widest = rows
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0);
                widest + 1
            })
            .collect();

        let format_row = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!(" {}{}", c, " ".repeat(w - c.chars().count())))
                .collect::<Vec<_>>()
                .join("|")
        };

        let mut lines = Vec::with_capacity(rows.len() + 3);
        lines.push(format_row(&headings[..]));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(w + 1))
                .collect::<Vec<_>>()
                .join("+"),
        );
        for row in &rows {
            lines.push(format_row(&row[..]));
        }
        let hidden = self.tuples.len() - shown;
        if hidden > 0 {
            lines.push(format!("... ({} more rows)", hidden));
        }
        lines.join("\n")
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&DisplayConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row;

    #[test]
    fn renders_aligned_table() {
        let r = Relation::new(["id", "name"], [row![1, "alice"], row![22, None::<&str>]]).unwrap();
        let expected = [
            " id | name  ",
            "----+-------",
            " 1  | alice ",
            " 22 | null  ",
        ]
        .join("\n");
        assert_eq!(r.to_string(), expected);
    }

    #[test]
    fn render_honours_config() {
        let r = Relation::new(["v"], [row![1], row![2], row![None::<i64>]]).unwrap();
        let cfg = DisplayConfig {
            null_repr: "-".into(),
            max_rows: Some(2),
        };
        let out = r.render(&cfg);
        let lines: Vec<&str> = out.lines().collect();
        // Null sorts first in storage order.
        assert_eq!(lines[2], " - ");
        assert_eq!(lines[3], " 1 ");
        assert_eq!(lines[4], "... (1 more rows)");
    }
}
