mod wkhtmltopdf;

pub use wkhtmltopdf::{converter_available, convert_html};
