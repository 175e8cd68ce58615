use base64::Engine;
use clap::{Parser, Subcommand};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use payslip::config::{
    config_dir, load_config, load_input, resolve_output_dir, Config, CONFIG_TEMPLATE,
    PAYSLIP_TEMPLATE, REPORT_TEMPLATE,
};
use payslip::error::{PayslipError, Result};
use payslip::format::{currency, integer};
use payslip::payslip::{layout, merge, render_payslip, PayslipInput, RowFragment, TableRow};
use payslip::pdf::{convert_html, converter_available};
use payslip::report::{render_preset, ReportInput, ReportKind};

#[derive(Parser)]
#[command(name = "payslip")]
#[command(version, about = "Balanced payslip and payroll report renderer", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.payslip or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// Render a payslip input file (.toml or .json) to HTML
    Render {
        /// Payslip input file
        input: PathBuf,

        /// Custom output file path (default: output_dir/PAYSLIP-<code>-<period>.html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Logo image to embed (png, jpg or svg)
        #[arg(long)]
        logo: Option<PathBuf>,

        /// TrueType font to embed for numeric cells
        #[arg(long)]
        font: Option<PathBuf>,

        /// Also convert the HTML to PDF with wkhtmltopdf
        #[arg(long)]
        pdf: bool,
    },

    /// Show how the earnings and deductions rows line up
    Layout {
        /// Payslip input file
        input: PathBuf,
    },

    /// Render a single-column payroll report to HTML
    Report {
        /// Report type
        #[arg(value_enum)]
        kind: ReportKind,

        /// Report input file
        input: PathBuf,

        /// Custom output file path (default: output_dir/REPORT-<kind>-<period>.html)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Logo image to embed (png, jpg or svg)
        #[arg(long)]
        logo: Option<PathBuf>,

        /// Also convert the HTML to PDF with wkhtmltopdf
        #[arg(long)]
        pdf: bool,
    },

    /// Show configuration status
    Status,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Render {
            input,
            output,
            logo,
            font,
            pdf,
        } => cmd_render(&cfg_dir, &input, output, logo, font, pdf),
        Commands::Layout { input } => cmd_layout(&input),
        Commands::Report {
            kind,
            input,
            output,
            logo,
            pdf,
        } => cmd_report(&cfg_dir, kind, &input, output, logo, pdf),
        Commands::Status => cmd_status(&cfg_dir),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    if cfg_dir.exists() {
        return Err(PayslipError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;

    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("sample-payslip.toml"), PAYSLIP_TEMPLATE)?;
    fs::write(cfg_dir.join("sample-report.toml"), REPORT_TEMPLATE)?;

    println!("Initialized payslip config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your company details:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Render the sample payslip:  payslip render {}/sample-payslip.toml",
        cfg_dir.display()
    );
    println!(
        "  3. Render the sample report:   payslip report deposit-tools {}/sample-report.toml",
        cfg_dir.display()
    );

    Ok(())
}

fn require_config(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(PayslipError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    load_config(cfg_dir)
}

/// Read an asset file and encode it as base64
fn read_base64(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| PayslipError::AssetRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// Read an image file as a data URI
fn logo_data_uri(path: &Path) -> Result<String> {
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    };
    Ok(format!("data:{mime};base64,{}", read_base64(path)?))
}

/// Build a file name from the non-empty parts, keeping it filesystem safe
fn output_file_name(prefix: &str, parts: &[Option<&str>]) -> String {
    let mut name = prefix.to_string();
    for part in parts.iter().flatten() {
        let cleaned: String = part
            .trim()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        if !cleaned.is_empty() {
            name.push('-');
            name.push_str(&cleaned);
        }
    }
    format!("{name}.html")
}

fn write_document(html: &str, html_path: &Path, pdf: bool) -> Result<()> {
    if let Some(parent) = html_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(html_path, html)?;
    info!("wrote {} bytes to {}", html.len(), html_path.display());
    println!("  Saved:  {}", html_path.display());

    if pdf {
        let pdf_path = html_path.with_extension("pdf");
        convert_html(html_path, &pdf_path)?;
        println!("  PDF:    {}", pdf_path.display());
    }

    Ok(())
}

/// Render a payslip to HTML
fn cmd_render(
    cfg_dir: &Path,
    input_path: &Path,
    output: Option<PathBuf>,
    logo: Option<PathBuf>,
    font: Option<PathBuf>,
    pdf: bool,
) -> Result<()> {
    let config = require_config(cfg_dir)?;
    let mut input: PayslipInput = load_input(input_path)?;

    if input.company.is_none() {
        input.company = Some(config.company.clone());
    }
    if let Some(path) = logo {
        input.logo = Some(logo_data_uri(&path)?);
    }
    if let Some(path) = font {
        input.font = Some(read_base64(&path)?);
    }

    let html = render_payslip(&input, &config.render);

    let output_path = output.unwrap_or_else(|| {
        let name = output_file_name(
            "PAYSLIP",
            &[
                input.employee.code.as_deref(),
                input.employee.period.as_deref(),
            ],
        );
        resolve_output_dir(&config.render.output_dir, cfg_dir).join(name)
    });

    println!(
        "Rendered payslip for {}",
        input.employee.name.as_deref().unwrap_or("(unnamed)")
    );
    println!("  Net pay: {}", currency(input.amounts.net_salary));
    write_document(&html, &output_path, pdf)
}

#[derive(Tabled)]
struct LayoutRow {
    #[tabled(rename = "#")]
    index: String,
    #[tabled(rename = "EARNINGS")]
    earnings: String,
    #[tabled(rename = "AMOUNT")]
    earnings_amount: String,
    #[tabled(rename = "DEDUCTIONS")]
    deductions: String,
    #[tabled(rename = "AMOUNT")]
    deductions_amount: String,
}

/// Label and amount text for one side of a row
fn describe(fragment: Option<&RowFragment>) -> (String, String) {
    match fragment {
        None => ("(absent)".to_string(), String::new()),
        Some(RowFragment::Placeholder) => ("(padding)".to_string(), String::new()),
        Some(line @ RowFragment::Line { value, .. }) => (line.label(), currency(*value)),
        Some(RowFragment::Heading(title)) => (format!("== {title} =="), String::new()),
        Some(RowFragment::Header(cells)) => (
            cells
                .iter()
                .map(|c| format!("{}: {}", c.label, integer(c.value)))
                .collect::<Vec<_>>()
                .join("  "),
            String::new(),
        ),
    }
}

/// Print the balanced row pairing as a table
fn cmd_layout(input_path: &Path) -> Result<()> {
    let input: PayslipInput = load_input(input_path)?;
    let rows = layout(&input);
    let merged = merge(&rows);

    let mut index = 0;
    let table_rows: Vec<LayoutRow> = merged
        .iter()
        .map(|row| match row {
            TableRow::Pair { left, right } => {
                let (earnings, earnings_amount) = describe(*left);
                let (deductions, deductions_amount) = describe(*right);
                index += 1;
                LayoutRow {
                    index: index.to_string(),
                    earnings,
                    earnings_amount,
                    deductions,
                    deductions_amount,
                }
            }
            TableRow::Raw(_) => LayoutRow {
                index: "+".to_string(),
                earnings: format!("(pre-rendered, {} rows)", rows.block_rows()),
                earnings_amount: String::new(),
                deductions: String::new(),
                deductions_amount: String::new(),
            },
        })
        .collect();

    let table = Table::new(table_rows).with(Style::rounded()).to_string();
    println!("{table}");
    println!(
        "TOTAL EARNINGS {}   NET PAY {}",
        currency(input.amounts.gross_salary),
        currency(input.amounts.net_salary)
    );
    println!();
    println!("Body rows:      {}", rows.loop_rows());
    println!("Left padding:   {}", rows.left_padding);
    println!("Right padding:  {}", rows.right_padding);
    println!("Pre-rendered:   {}", rows.block_rows());

    Ok(())
}

/// Render a single-column report to HTML
fn cmd_report(
    cfg_dir: &Path,
    kind: ReportKind,
    input_path: &Path,
    output: Option<PathBuf>,
    logo: Option<PathBuf>,
    pdf: bool,
) -> Result<()> {
    let config = require_config(cfg_dir)?;
    let mut input: ReportInput = load_input(input_path)?;

    if input.company.is_none() {
        input.company = Some(config.company.clone());
    }
    if let Some(path) = logo {
        input.logo = Some(logo_data_uri(&path)?);
    }

    let html = render_preset(kind, &input);

    let output_path = output.unwrap_or_else(|| {
        let slug = kind.title().split_whitespace().next().unwrap_or("report");
        let name = output_file_name(
            "REPORT",
            &[Some(slug), input.record.period.as_deref()],
        );
        resolve_output_dir(&config.render.output_dir, cfg_dir).join(name)
    });

    println!("Rendered {}", kind.title());
    println!("  Rows:   {}", input.details.len());
    write_document(&html, &output_path, pdf)
}

/// Show configuration status
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    let config = require_config(cfg_dir)?;

    println!("Payslip Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!(
        "Company:          {}",
        config.company.company_name.as_deref().unwrap_or("(not set)")
    );
    println!("Numeric font:     {}", config.render.numeric_font);
    println!(
        "Output directory: {}",
        resolve_output_dir(&config.render.output_dir, cfg_dir).display()
    );
    println!(
        "PDF converter:    {}",
        if converter_available() {
            "wkhtmltopdf (found)"
        } else {
            "wkhtmltopdf (not found)"
        }
    );

    Ok(())
}
