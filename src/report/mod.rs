mod columns;
mod render;

pub use columns::{Align, CellFormat, ColumnConfig, DetailRecord, ReportKind};
pub use render::{render_column_report, render_preset, AggregateRecord, ColumnReport, ReportInput};
