use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayslipError {
    #[error("Config directory not found at {0}. Run 'payslip init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("Failed to parse input file {path}: {reason}")]
    InputParse { path: PathBuf, reason: String },

    #[error("Unsupported input file '{0}'. Expected a .toml or .json file")]
    UnsupportedInput(PathBuf),

    #[error("Failed to read asset {path}: {source}")]
    AssetRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("wkhtmltopdf not found. Install it from https://wkhtmltopdf.org/ to use --pdf")]
    ConverterNotFound,

    #[error("Failed to convert to PDF: {0}")]
    PdfConversion(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),
}

pub type Result<T> = std::result::Result<T, PayslipError>;
