//! Custom SSL certificate endpoints.

use crate::error::Result;

use super::client::ApiClient;
use super::types::{SslCertificate, SslCertificateCreateInput};

impl ApiClient {
    /// Lists one page of custom SSL certificates.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_ssl_certificates(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<SslCertificate>> {
        self.get_page("/ssl_certificates/custom", page, per_page)
            .await
    }

    /// Lists all custom SSL certificates.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_all_ssl_certificates(&self) -> Result<Vec<SslCertificate>> {
        self.get_all("/ssl_certificates/custom").await
    }

    /// Gets a custom SSL certificate by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the certificate is not found or the API call fails.
    pub async fn get_ssl_certificate(&self, id: &str) -> Result<SslCertificate> {
        self.get_json(&format!("/ssl_certificates/custom/{id}"), &[])
            .await
    }

    /// Uploads a custom SSL certificate.
    ///
    /// # Errors
    ///
    /// Returns an error if the certificate is rejected or the API call fails.
    pub async fn add_ssl_certificate(
        &self,
        input: &SslCertificateCreateInput,
    ) -> Result<SslCertificate> {
        self.post_json("/ssl_certificates/custom", input).await
    }
}
