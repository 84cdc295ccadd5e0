//! Section rendering: server-rendered fragments fetched for partial page
//! updates.

use reqwest::Url;

use super::{check_status, StorefrontClient};
use crate::error::ClientError;
use crate::types::SectionMap;

impl StorefrontClient {
    /// Fetches one section as HTML (`GET /?section_id=<id>`).
    ///
    /// # Errors
    ///
    /// Any transport or status error.
    pub async fn fetch_section(&self, section_id: &str) -> Result<String, ClientError> {
        let url = self.section_url(section_id);
        tracing::debug!(%url, section_id, "fetching section");
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "text/html")
            .send()
            .await?;
        let response = check_status(response, &url).await?;
        Ok(response.text().await?)
    }

    /// Fetches several sections rendered for the page at `path` with the
    /// given query `params` (`GET <path>?<params>&sections=a,b`).
    ///
    /// # Errors
    ///
    /// Any transport or status error, or [`ClientError::Deserialize`] when the
    /// body is not a JSON object of section ids.
    pub async fn fetch_sections(
        &self,
        path: &str,
        params: &[(String, String)],
        sections: &[&str],
    ) -> Result<SectionMap, ClientError> {
        let url = self.sections_url(path, params, sections)?;
        tracing::debug!(%url, ?sections, "fetching sections");
        self.send_json(self.client.get(url.clone()), &url, "sections")
            .await
    }

    pub(crate) fn section_url(&self, section_id: &str) -> Url {
        let mut url = self.origin.clone();
        url.set_path("/");
        url.query_pairs_mut().append_pair("section_id", section_id);
        url
    }

    pub(crate) fn sections_url(
        &self,
        path: &str,
        params: &[(String, String)],
        sections: &[&str],
    ) -> Result<Url, ClientError> {
        let mut url = self.endpoint(path)?;
        url.set_query(None);
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("sections", &sections.join(","));
        }
        Ok(url)
    }
}
