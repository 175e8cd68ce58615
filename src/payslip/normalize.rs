use log::{debug, warn};

use super::fragment::{HeaderCell, PreRenderedBlock, RowFragment};
use super::model::{LineItem, PayrollAmounts, PayslipInput};

/// Columns available to the earnings side of the table
pub const LEFT_COLUMNS: usize = 4;

/// Where the earnings detail rows come from
#[derive(Debug, Clone, PartialEq)]
pub enum EarningsMode {
    /// Fixed Basic .. Adjustment rows, with optional allowance rows injected
    /// beneath Bike & Fuel
    Legacy(Option<PreRenderedBlock>),
    Dynamic(Vec<LineItem>),
}

impl EarningsMode {
    /// Dynamic mode is active iff earnings rows were supplied and non-empty.
    pub fn select(input: &PayslipInput) -> Self {
        let block = allowance_block(input);

        match input.earnings_rows.as_deref() {
            Some(rows) if !rows.is_empty() => {
                if block.is_some() {
                    warn!("allowance rows are ignored when dynamic earnings rows are supplied");
                }
                EarningsMode::Dynamic(rows.to_vec())
            }
            _ => EarningsMode::Legacy(block),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, EarningsMode::Legacy(_))
    }
}

/// Structured rows ready for balancing
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRows {
    pub left: Vec<RowFragment>,
    pub right: Vec<RowFragment>,
    /// Present only in legacy mode with a non-empty block
    pub block: Option<PreRenderedBlock>,
}

/// Build both sides of the table from the input. Never fails: missing data
/// falls back to the legacy layout.
pub fn normalize(input: &PayslipInput) -> NormalizedRows {
    let mode = EarningsMode::select(input);
    debug!(
        "earnings mode: {}",
        if mode.is_legacy() { "legacy" } else { "dynamic" }
    );

    let mut left = vec![header_row(input)];
    let block = match mode {
        EarningsMode::Legacy(block) => {
            left.extend(legacy_earnings(&input.amounts));
            block
        }
        EarningsMode::Dynamic(rows) => {
            left.extend(
                rows.into_iter()
                    .map(|row| RowFragment::line(row.label, row.value)),
            );
            None
        }
    };

    NormalizedRows {
        left,
        right: deduction_side(&input.deduction_rows, &input.amounts),
        block,
    }
}

fn allowance_block(input: &PayslipInput) -> Option<PreRenderedBlock> {
    let block = if !input.allowance_rows.is_empty() {
        PreRenderedBlock::allowance_rows(&input.allowance_rows)
    } else {
        PreRenderedBlock::from_markup(input.allowance_markup.clone().unwrap_or_default())
    };

    (!block.is_empty()).then_some(block)
}

/// The row of count cells at the top of the earnings side
fn header_row(input: &PayslipInput) -> RowFragment {
    match input.header_rows.as_deref() {
        Some(items) if !items.is_empty() => dynamic_header(items),
        _ => {
            let amounts = &input.amounts;
            RowFragment::Header(vec![
                HeaderCell {
                    label: "Days".to_string(),
                    value: amounts.working_days,
                    span: 1,
                },
                HeaderCell {
                    label: "RC".to_string(),
                    value: amounts.rc_count,
                    span: 1,
                },
                HeaderCell {
                    label: "DC".to_string(),
                    value: amounts.dc_count,
                    span: 2,
                },
            ])
        }
    }
}

/// One cell per item; the last cell absorbs the columns left over.
fn dynamic_header(items: &[LineItem]) -> RowFragment {
    if items.len() > LEFT_COLUMNS {
        warn!(
            "{} header cells supplied, only the first {} fit the earnings columns",
            items.len(),
            LEFT_COLUMNS
        );
    }

    let items = &items[..items.len().min(LEFT_COLUMNS)];
    let last = items.len() - 1;

    let cells = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let remaining = LEFT_COLUMNS - index;
            HeaderCell {
                label: item.label.clone(),
                value: item.value,
                span: if index == last && remaining > 1 {
                    remaining
                } else {
                    1
                },
            }
        })
        .collect();

    RowFragment::Header(cells)
}

fn legacy_earnings(amounts: &PayrollAmounts) -> Vec<RowFragment> {
    vec![
        RowFragment::bold_line("Basic", amounts.basic_salary),
        RowFragment::line("Bike & Fuel", amounts.bike_fuel),
        RowFragment::line("Mobile Data", amounts.mobile_data),
        RowFragment::line("Mobile Phone", amounts.mobile_phone),
        RowFragment::line("80%", amounts.value_80),
        RowFragment::line("Visit", amounts.visit),
        RowFragment::line("Adjustment", amounts.adjustment),
    ]
}

/// Rows appended after the caller's deductions, in display order
#[derive(Debug, Clone, Copy)]
enum Trailing {
    TotalDeduction,
    ContributionHeading,
    EpfEmployer,
    EtfEmployer,
    ContributionTotal,
}

const TRAILING_ROWS: [Trailing; 5] = [
    Trailing::TotalDeduction,
    Trailing::ContributionHeading,
    Trailing::EpfEmployer,
    Trailing::EtfEmployer,
    Trailing::ContributionTotal,
];

impl Trailing {
    fn fragment(self, amounts: &PayrollAmounts) -> RowFragment {
        match self {
            Trailing::TotalDeduction => {
                RowFragment::bold_line("TOTAL DEDUCTION", amounts.total_deduction)
            }
            Trailing::ContributionHeading => {
                RowFragment::Heading("Employer Contribution".to_string())
            }
            Trailing::EpfEmployer => RowFragment::line("EPF 12%", amounts.epf_employer),
            Trailing::EtfEmployer => RowFragment::line("ETF 3%", amounts.etf_employer),
            Trailing::ContributionTotal => {
                RowFragment::bold_line("Total Contribution", amounts.contribution_total)
            }
        }
    }
}

fn deduction_side(rows: &[LineItem], amounts: &PayrollAmounts) -> Vec<RowFragment> {
    rows.iter()
        .filter(|row| row.is_displayable())
        .map(|row| RowFragment::line(row.label.clone(), row.value))
        .chain(TRAILING_ROWS.iter().map(|t| t.fragment(amounts)))
        .collect()
}
