//! Public company directory used as a fallback when the registry has no answer.

use std::sync::OnceLock;

use async_trait::async_trait;
use scraper::{Html, Selector};

use super::error::LookupError;
use super::fullwidth::to_half_width;
use super::resolver::LookupSource;
use crate::core::{CompanyInfo, RegistrySettings};

/// Separators between the company name and the rest of a page title.
const TITLE_SEPARATORS: &[char] = &['-', '|', '_', '–', '｜'];

/// Phrases a directory puts in the title when it has no such company.
const MISS_MARKERS: &[&str] = &["查無", "找不到", "Not Found", "404"];

fn og_title_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| {
        Selector::parse(r#"meta[property="og:title"]"#).expect("invalid og:title selector")
    })
}

fn title_selector() -> &'static Selector {
    static SEL: OnceLock<Selector> = OnceLock::new();
    SEL.get_or_init(|| Selector::parse("title").expect("invalid title selector"))
}

/// Secondary source: scrapes the company name from a directory page title.
///
/// Less authoritative than the registry and without addresses; the address
/// is always empty.
#[derive(Debug, Clone)]
pub struct TwincnDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl TwincnDirectory {
    /// Build a client with the configured timeout and User-Agent.
    pub fn new(settings: &RegistrySettings) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(settings.secondary_timeout())
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| LookupError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: settings.secondary_url.clone(),
        })
    }
}

#[async_trait]
impl LookupSource for TwincnDirectory {
    fn name(&self) -> &str {
        "twincn"
    }

    async fn fetch(&self, tax_id: &str) -> Result<CompanyInfo, LookupError> {
        let url = format!("{}{}", self.base_url, tax_id);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }
        let body = resp.text().await?;
        let name = parse_title_name(&body, tax_id)?;
        Ok(CompanyInfo::new(name, ""))
    }
}

/// Extract the company name from a directory page.
///
/// Prefers `og:title`, falls back to `<title>`, and keeps the text before
/// the first separator.
pub(crate) fn parse_title_name(html: &str, tax_id: &str) -> Result<String, LookupError> {
    let doc = Html::parse_document(html);

    let og_title = doc
        .select(og_title_selector())
        .filter_map(|el| el.value().attr("content"))
        .map(str::to_string)
        .next();
    let title = og_title.or_else(|| {
        doc.select(title_selector())
            .next()
            .map(|el| el.text().collect::<String>())
    });
    let title = title.ok_or_else(|| LookupError::Parse("page has no title".into()))?;

    if MISS_MARKERS.iter().any(|m| title.contains(m)) {
        return Err(LookupError::NotFound);
    }

    let name = title
        .split(TITLE_SEPARATORS)
        .map(str::trim)
        .find(|part| !part.is_empty())
        .map(to_half_width)
        .unwrap_or_default();

    // A title echoing the ID back carries no name.
    if name.is_empty() || name == tax_id {
        return Err(LookupError::NotFound);
    }
    Ok(name)
}
