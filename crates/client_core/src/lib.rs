use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use shared::{
    domain::{Cif, Company},
    error::ErrorDetail,
};
use tracing::debug;
use url::Url;

pub mod error;

pub use error::DirectoryError;

type Result<T> = std::result::Result<T, DirectoryError>;

/// The directory operations the panel needs, behind a seam so UI code can
/// run against a fake directory in tests.
#[async_trait]
pub trait CompanyDirectory: Send + Sync {
    async fn list_companies(&self) -> Result<Vec<Company>>;
    async fn get_company(&self, cif: &Cif) -> Result<Company>;
    async fn create_company(&self, company: &Company) -> Result<()>;
    async fn update_company(&self, cif: &Cif, company: &Company) -> Result<()>;
    async fn delete_company(&self, cif: &Cif) -> Result<()>;
}

/// reqwest-backed directory client. One request per operation, no retry,
/// no caching; a slow service simply delays the caller.
pub struct HttpCompanyDirectory {
    http: Client,
    base_url: String,
}

impl HttpCompanyDirectory {
    pub fn new(base_url: &str) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|_| DirectoryError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DirectoryError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/companies/", self.base_url)
    }

    fn record_url(&self, cif: &Cif) -> String {
        format!("{}/companies/{}", self.base_url, cif)
    }
}

/// Turns a completed non-2xx response into the taxonomy. 404 on a
/// single-record operation becomes `NotFound`; everything else keeps the
/// status and the service's `detail` text when the body carries one.
async fn reject(response: Response, cif: Option<&Cif>) -> DirectoryError {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        if let Some(cif) = cif {
            return DirectoryError::NotFound(cif.clone());
        }
    }
    let detail = match response.json::<ErrorDetail>().await {
        Ok(body) => body.detail,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unrecognized error response")
            .to_string(),
    };
    DirectoryError::Api {
        status: status.as_u16(),
        detail,
    }
}

#[async_trait]
impl CompanyDirectory for HttpCompanyDirectory {
    async fn list_companies(&self) -> Result<Vec<Company>> {
        debug!("directory: list companies");
        let response = self.http.get(self.collection_url()).send().await?;
        if !response.status().is_success() {
            return Err(reject(response, None).await);
        }
        Ok(response.json().await?)
    }

    async fn get_company(&self, cif: &Cif) -> Result<Company> {
        debug!(cif = cif.as_str(), "directory: get company");
        let response = self.http.get(self.record_url(cif)).send().await?;
        if !response.status().is_success() {
            return Err(reject(response, Some(cif)).await);
        }
        Ok(response.json().await?)
    }

    async fn create_company(&self, company: &Company) -> Result<()> {
        debug!(cif = company.cif.as_str(), "directory: create company");
        let response = self
            .http
            .post(self.collection_url())
            .json(company)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(reject(response, None).await);
        }
        Ok(())
    }

    async fn update_company(&self, cif: &Cif, company: &Company) -> Result<()> {
        debug!(cif = cif.as_str(), "directory: update company");
        let response = self
            .http
            .put(self.record_url(cif))
            .json(company)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(reject(response, Some(cif)).await);
        }
        Ok(())
    }

    async fn delete_company(&self, cif: &Cif) -> Result<()> {
        debug!(cif = cif.as_str(), "directory: delete company");
        let response = self.http.delete(self.record_url(cif)).send().await?;
        if !response.status().is_success() {
            return Err(reject(response, Some(cif)).await);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
