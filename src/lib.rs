pub mod config;
pub mod error;
pub mod format;
pub mod payslip;
pub mod pdf;
pub mod report;

pub use config::{Address, CompanyInfo, Config, RenderSettings};
pub use error::{PayslipError, Result};
pub use payslip::{layout, render_payslip, LineItem, PayslipInput, PreRenderedBlock};
pub use report::{render_column_report, render_preset, ColumnConfig, ReportKind};
