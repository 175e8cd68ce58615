use log::debug;

use super::fragment::{PreRenderedBlock, RowFragment};
use super::normalize::NormalizedRows;

/// Both sides padded so they end on the same table row
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedRows {
    pub left: Vec<RowFragment>,
    pub right: Vec<RowFragment>,
    pub block: Option<PreRenderedBlock>,
    pub left_padding: usize,
    pub right_padding: usize,
}

impl BalancedRows {
    /// Number of synchronized rows the merge loop walks
    pub fn loop_rows(&self) -> usize {
        self.left.len().max(self.right.len())
    }

    /// Rows contributed by the pre-rendered block
    pub fn block_rows(&self) -> usize {
        self.block.as_ref().map_or(0, PreRenderedBlock::row_count)
    }
}

/// Pad the shorter side with placeholder rows.
///
/// Rows inside the block count towards the earnings side but are not
/// materialized as placeholders; they are injected whole during the merge.
pub fn balance(rows: NormalizedRows) -> BalancedRows {
    let NormalizedRows {
        mut left,
        mut right,
        block,
    } = rows;

    let block_rows = block.as_ref().map_or(0, PreRenderedBlock::row_count);
    let (left_padding, right_padding) = padding(left.len() + block_rows, right.len());

    debug!(
        "balancing rows: left={} (+{} pre-rendered) right={} -> pad left {}, right {}",
        left.len(),
        block_rows,
        right.len(),
        left_padding,
        right_padding
    );

    left.extend(std::iter::repeat(RowFragment::Placeholder).take(left_padding));
    right.extend(std::iter::repeat(RowFragment::Placeholder).take(right_padding));

    BalancedRows {
        left,
        right,
        block,
        left_padding,
        right_padding,
    }
}

/// Placeholder rows owed to (left, right)
pub fn padding(effective_left: usize, effective_right: usize) -> (usize, usize) {
    (
        effective_right.saturating_sub(effective_left),
        effective_left.saturating_sub(effective_right),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(n: usize) -> Vec<RowFragment> {
        (0..n)
            .map(|i| RowFragment::line(format!("row {i}"), Some(1.0)))
            .collect()
    }

    fn rows(left: usize, right: usize, block: Option<PreRenderedBlock>) -> NormalizedRows {
        NormalizedRows {
            left: lines(left),
            right: lines(right),
            block,
        }
    }

    #[test]
    fn pads_the_shorter_side_only() {
        assert_eq!(padding(2, 5), (3, 0));
        assert_eq!(padding(8, 6), (0, 2));
        assert_eq!(padding(4, 4), (0, 0));
        assert_eq!(padding(0, 0), (0, 0));
    }

    #[test]
    fn equal_sides_are_untouched() {
        let balanced = balance(rows(6, 6, None));
        assert_eq!(balanced.left.len(), 6);
        assert_eq!(balanced.right.len(), 6);
        assert!(!balanced.left.iter().any(RowFragment::is_placeholder));
        assert!(!balanced.right.iter().any(RowFragment::is_placeholder));
    }

    #[test]
    fn block_rows_count_towards_the_left_side() {
        let block = PreRenderedBlock::new("<tr></tr><tr></tr>", 2);
        let balanced = balance(rows(8, 8, Some(block)));

        assert_eq!(balanced.left_padding, 0);
        assert_eq!(balanced.right_padding, 2);
        assert_eq!(balanced.left.len(), 8);
        assert_eq!(balanced.right.len(), 10);
        assert_eq!(balanced.left.len() + balanced.block_rows(), balanced.right.len());
    }

    #[test]
    fn block_can_cover_a_shorter_left_side() {
        let block = PreRenderedBlock::new("<tr></tr><tr></tr><tr></tr>", 3);
        let balanced = balance(rows(5, 7, Some(block)));

        assert_eq!(balanced.left_padding, 0);
        assert_eq!(balanced.right_padding, 1);
        assert_eq!(balanced.left.len() + balanced.block_rows(), balanced.right.len());
    }

    #[test]
    fn balancing_is_stable() {
        let first = balance(rows(3, 9, None));
        let second = balance(rows(3, 9, None));
        assert_eq!(first, second);
        assert_eq!(first.left_padding, 6);
        assert!(first.left[3..].iter().all(RowFragment::is_placeholder));
    }
}
