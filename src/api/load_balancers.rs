//! Load balancer endpoints.

use crate::error::Result;

use super::client::ApiClient;
use super::types::LoadBalancer;

impl ApiClient {
    /// Lists one page of load balancers.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_load_balancers(&self, page: u32, per_page: u32) -> Result<Vec<LoadBalancer>> {
        self.get_page("/load_balancers", page, per_page).await
    }

    /// Lists all load balancers.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_all_load_balancers(&self) -> Result<Vec<LoadBalancer>> {
        self.get_all("/load_balancers").await
    }

    /// Gets a load balancer by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the balancer is not found or the API call fails.
    pub async fn get_load_balancer(&self, id: &str) -> Result<LoadBalancer> {
        self.get_json(&format!("/load_balancers/{id}"), &[]).await
    }

    /// Deletes a load balancer.
    ///
    /// # Errors
    ///
    /// Returns an error if the balancer is not found or the API call fails.
    pub async fn delete_load_balancer(&self, id: &str) -> Result<()> {
        self.delete(&format!("/load_balancers/{id}")).await
    }
}
