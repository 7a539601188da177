//! Fiscal Information Agency business registration API client.

use async_trait::async_trait;
use serde::Deserialize;

use super::error::LookupError;
use super::fullwidth::to_half_width;
use super::resolver::LookupSource;
use crate::core::{CompanyInfo, RegistrySettings};

/// Registration record as returned by the FIA open data API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FiaResponse {
    business_nm: Option<String>,
    business_address: Option<String>,
}

/// Primary source: the government business registry.
///
/// `GET {base_url}{tax_id}` returning JSON with `businessNm` and
/// `businessAddress`. The registry pads names and addresses with full-width
/// digits and letters; these are normalized to ASCII.
#[derive(Debug, Clone)]
pub struct FiaRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl FiaRegistry {
    /// Build a client with the configured timeout and User-Agent.
    pub fn new(settings: &RegistrySettings) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(settings.primary_timeout())
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| LookupError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: settings.primary_url.clone(),
        })
    }
}

#[async_trait]
impl LookupSource for FiaRegistry {
    fn name(&self) -> &str {
        "fia"
    }

    async fn fetch(&self, tax_id: &str) -> Result<CompanyInfo, LookupError> {
        let url = format!("{}{}", self.base_url, tax_id);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        let body = resp.text().await?;
        parse_registration(&body)
    }
}

/// Read a registry response body.
pub(crate) fn parse_registration(body: &str) -> Result<CompanyInfo, LookupError> {
    // Unknown IDs come back as 200 with an empty body.
    if body.trim().is_empty() {
        return Err(LookupError::NotFound);
    }
    let resp: FiaResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Parse(e.to_string()))?;

    let name = resp
        .business_nm
        .map(|n| to_half_width(n.trim()))
        .filter(|n| !n.is_empty())
        .ok_or(LookupError::NotFound)?;
    let address = resp
        .business_address
        .map(|a| to_half_width(a.trim()))
        .unwrap_or_default();

    Ok(CompanyInfo::new(name, address))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_registration() {
        let body = r#"{"businessNm":"鼎祥氣體有限公司","businessAddress":"臺中市西屯區工業區２０路１２號","businessSetupDate":"0790101"}"#;
        let info = parse_registration(body).unwrap();
        assert_eq!(info.name, "鼎祥氣體有限公司");
        assert_eq!(info.address, "臺中市西屯區工業區20路12號");
    }

    #[test]
    fn normalizes_full_width_name() {
        let body = r#"{"businessNm":"ＡＢＣ科技股份有限公司"}"#;
        let info = parse_registration(body).unwrap();
        assert_eq!(info.name, "ABC科技股份有限公司");
        assert_eq!(info.address, "");
    }

    #[test]
    fn empty_body_is_not_found() {
        assert!(matches!(parse_registration(""), Err(LookupError::NotFound)));
        assert!(matches!(parse_registration("  \n"), Err(LookupError::NotFound)));
    }

    #[test]
    fn blank_name_is_not_found() {
        let body = r#"{"businessNm":"  ","businessAddress":"台北市"}"#;
        assert!(matches!(parse_registration(body), Err(LookupError::NotFound)));
    }

    #[test]
    fn html_error_page_is_parse_error() {
        let body = "<html><body>Service Unavailable</body></html>";
        assert!(matches!(parse_registration(body), Err(LookupError::Parse(_))));
    }

    #[test]
    fn client_builds_from_defaults() {
        let registry = FiaRegistry::new(&RegistrySettings::default()).unwrap();
        assert_eq!(registry.name(), "fia");
        assert!(registry.base_url.starts_with("https://"));
    }
}
