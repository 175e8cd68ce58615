use super::model::LineItem;
use super::render::{blank_right_cells, left_cells, SPACER_CELL};

/// One row's worth of content for one side of the payslip table
#[derive(Debug, Clone, PartialEq)]
pub enum RowFragment {
    /// Label and currency value
    Line {
        label: String,
        value: Option<f64>,
        bold: bool,
    },
    /// Count cells (days, RC, DC, ...) sharing a single row
    Header(Vec<HeaderCell>),
    /// Section heading spanning the whole side
    Heading(String),
    /// Empty row added by balancing
    Placeholder,
}

impl RowFragment {
    pub fn line(label: impl Into<String>, value: Option<f64>) -> Self {
        RowFragment::Line {
            label: label.into(),
            value,
            bold: false,
        }
    }

    pub fn bold_line(label: impl Into<String>, value: Option<f64>) -> Self {
        RowFragment::Line {
            label: label.into(),
            value,
            bold: true,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RowFragment::Placeholder)
    }

    /// Label shown for this row in plain-text previews
    pub fn label(&self) -> String {
        match self {
            RowFragment::Line { label, .. } | RowFragment::Heading(label) => label.clone(),
            RowFragment::Header(cells) => cells
                .iter()
                .map(|c| c.label.as_str())
                .collect::<Vec<_>>()
                .join(" / "),
            RowFragment::Placeholder => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub label: String,
    pub value: Option<f64>,
    /// Number of table columns the cell occupies
    pub span: usize,
}

/// Markup rendered ahead of time by a producer, carrying the number of table
/// rows it contains so the balancer never has to look inside it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreRenderedBlock {
    row_count: usize,
    markup: String,
}

impl PreRenderedBlock {
    /// Wrap markup whose row count the producer already knows. Blank markup
    /// always counts as zero rows.
    pub fn new(markup: impl Into<String>, row_count: usize) -> Self {
        let markup = markup.into();
        let row_count = if markup.trim().is_empty() { 0 } else { row_count };
        Self { row_count, markup }
    }

    /// Wrap markup of unknown shape, counting its `<tr>` opening markers.
    pub fn from_markup(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let row_count = count_row_markers(&markup);
        Self::new(markup, row_count)
    }

    /// Render custom allowance rows as full table rows: the allowance in the
    /// earnings cells and an empty deductions group.
    pub fn allowance_rows(items: &[LineItem]) -> Self {
        let rows: Vec<String> = items
            .iter()
            .filter(|item| item.is_displayable())
            .map(|item| {
                let line = RowFragment::line(item.label.clone(), item.value);
                format!(
                    "<tr>{}{}{}</tr>",
                    left_cells(&line),
                    SPACER_CELL,
                    blank_right_cells()
                )
            })
            .collect();

        Self::new(rows.join("\n"), rows.len())
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// A block without rows is never injected, whatever its markup holds.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0 || self.markup.trim().is_empty()
    }
}

/// Count `<tr` opening markers (`<tr>` or `<tr ...>`), ignoring case and
/// other tags sharing the prefix such as `<track>`.
fn count_row_markers(markup: &str) -> usize {
    let lower = markup.to_ascii_lowercase();
    let bytes = lower.as_bytes();

    lower
        .match_indices("<tr")
        .filter(|(i, _)| match bytes.get(i + 3) {
            Some(b'>') => true,
            Some(c) => c.is_ascii_whitespace(),
            None => false,
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_exactly_the_row_markers() {
        let markup = "<tr><td>a</td></tr>\n<TR class=\"x\"><td>b</td></TR>";
        assert_eq!(PreRenderedBlock::from_markup(markup).row_count(), 2);
    }

    #[test]
    fn ignores_lookalike_tags() {
        let markup = "<tr><td><track src=\"a\"><trace></td></tr>";
        assert_eq!(PreRenderedBlock::from_markup(markup).row_count(), 1);
    }

    #[test]
    fn blank_markup_counts_zero() {
        assert_eq!(PreRenderedBlock::from_markup("").row_count(), 0);
        assert_eq!(PreRenderedBlock::new("   \n", 3).row_count(), 0);
        assert!(PreRenderedBlock::new("  ", 3).is_empty());
    }

    #[test]
    fn markup_without_rows_is_empty() {
        let block = PreRenderedBlock::from_markup("<div>Site Allowance 1500</div>");
        assert_eq!(block.row_count(), 0);
        assert!(block.is_empty());
        assert!(PreRenderedBlock::new("<tr><td>x</td></tr>", 0).is_empty());
        assert!(!PreRenderedBlock::new("<tr><td>x</td></tr>", 1).is_empty());
    }

    #[test]
    fn allowance_rows_count_what_they_render() {
        let items = vec![
            LineItem::new("Site Allowance", 1500.0),
            LineItem::new("", 0.0),
            LineItem::new("Night Shift", 800.0),
        ];
        let block = PreRenderedBlock::allowance_rows(&items);

        assert_eq!(block.row_count(), 2);
        assert_eq!(count_row_markers(block.markup()), 2);
        assert!(block.markup().contains("Site Allowance"));
        assert!(block.markup().contains("1,500.00"));
    }
}
