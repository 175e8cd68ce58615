mod balance;
mod fragment;
mod model;
mod normalize;
mod render;

pub use balance::{balance, padding, BalancedRows};
pub use fragment::{HeaderCell, PreRenderedBlock, RowFragment};
pub use model::{EmployeeInfo, LineItem, PayrollAmounts, PayslipInput};
pub use normalize::{normalize, EarningsMode, NormalizedRows, LEFT_COLUMNS};
pub use render::{
    body_markup, layout, merge, render_payslip, TableRow, INJECT_AFTER_ROW, RIGHT_COLUMNS,
};

pub(crate) use render::{company_line, contact_line, logo_img};
