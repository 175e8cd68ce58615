use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub company: CompanyInfo,
    #[serde(default)]
    pub render: RenderSettings,
}

/// Display metadata printed in the document header and footer.
/// Every field is optional and renders blank when absent.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct CompanyInfo {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub company_phone: Option<String>,
    #[serde(default)]
    pub company_email: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl Address {
    /// Non-blank address parts in street, city, state, country order
    pub fn parts(&self) -> Vec<&str> {
        [&self.street, &self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct RenderSettings {
    /// Font family used for numeric cells; falls back to monospace
    pub numeric_font: String,
    pub footer_message: String,
    pub output_dir: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            numeric_font: "CrashNumberingGothic".to_string(),
            footer_message: "Thank You for Being a Part with Us".to_string(),
            output_dir: "~/.payslip/output".to_string(),
        }
    }
}
