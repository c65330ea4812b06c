//! Account SSH key endpoints.

use crate::error::Result;

use super::client::ApiClient;
use super::types::{SshKey, SshKeyCreateInput, SshKeyUpdateInput};

impl ApiClient {
    /// Lists one page of account SSH keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_ssh_keys(&self, page: u32, per_page: u32) -> Result<Vec<SshKey>> {
        self.get_page("/ssh_keys", page, per_page).await
    }

    /// Lists all account SSH keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_all_ssh_keys(&self) -> Result<Vec<SshKey>> {
        self.get_all("/ssh_keys").await
    }

    /// Gets an SSH key by fingerprint.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not found or the API call fails.
    pub async fn get_ssh_key(&self, fingerprint: &str) -> Result<SshKey> {
        self.get_json(&format!("/ssh_keys/{fingerprint}"), &[]).await
    }

    /// Registers a new SSH key on the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is rejected or the API call fails.
    pub async fn add_ssh_key(&self, input: &SshKeyCreateInput) -> Result<SshKey> {
        self.post_json("/ssh_keys", input).await
    }

    /// Renames an SSH key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not found or the API call fails.
    pub async fn update_ssh_key(
        &self,
        fingerprint: &str,
        input: &SshKeyUpdateInput,
    ) -> Result<SshKey> {
        self.put_json(&format!("/ssh_keys/{fingerprint}"), input)
            .await
    }

    /// Removes an SSH key from the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not found or the API call fails.
    pub async fn delete_ssh_key(&self, fingerprint: &str) -> Result<()> {
        self.delete(&format!("/ssh_keys/{fingerprint}")).await
    }
}
