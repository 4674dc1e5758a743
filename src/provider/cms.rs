use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use log::info;
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::catalog::snapshot::CatalogPage;

const PAGE_TYPE: &str = "house_designs.HouseDesignsIndexPage";

#[derive(Deserialize)]
struct PagesResponse {
    #[serde(default)]
    items: Vec<CatalogPage>,
}

/// Client for the CMS pages API that serves the house designs index page.
#[derive(Clone)]
pub struct CmsClient {
    http: Client,
    api_base_url: String,
    page_slug: String,
}

impl CmsClient {
    pub fn new(api_base_url: &str, page_slug: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("housedesigns/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            page_slug: page_slug.to_string(),
        })
    }

    pub fn pages_url(&self) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/pages/", self.api_base_url))
            .with_context(|| format!("invalid CMS base url '{}'", self.api_base_url))?;
        url.query_pairs_mut()
            .append_pair("type", PAGE_TYPE)
            .append_pair("fields", "*")
            .append_pair("slug", &self.page_slug);
        Ok(url)
    }

    pub async fn fetch_page(&self) -> Result<CatalogPage> {
        let url = self.pages_url()?;
        info!("Fetching house designs page from {url}");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("HTTP error! status: {}", status.as_u16());
        }

        let body = response
            .text()
            .await
            .context("failed to read CMS response body")?;
        parse_pages_response(&body)
    }

    pub fn describe(&self) -> String {
        format!("{} (slug '{}')", self.api_base_url, self.page_slug)
    }
}

/// Takes the first page of a pages API listing.
pub fn parse_pages_response(body: &str) -> Result<CatalogPage> {
    let response: PagesResponse =
        serde_json::from_str(body).context("malformed CMS pages response")?;
    response
        .items
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("House Designs page not found"))
}
