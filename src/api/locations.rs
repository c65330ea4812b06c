//! Provisioning catalog endpoints.
//!
//! Locations, the server models orderable at each location, and the drive
//! models compatible with each server model. Drive model IDs from here are
//! what `--drive-slot <position>=<model-id>` refers to.

use crate::error::Result;

use super::client::ApiClient;
use super::types::{DriveModel, Location, ServerModel};

impl ApiClient {
    /// Lists all datacenter locations.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_locations(&self) -> Result<Vec<Location>> {
        self.get_all("/locations").await
    }

    /// Lists server models orderable at a location.
    ///
    /// # Errors
    ///
    /// Returns an error if the location is not found or the API call fails.
    pub async fn list_server_models(&self, location_id: i64) -> Result<Vec<ServerModel>> {
        self.get_all(&format!("/locations/{location_id}/order_options/server_models"))
            .await
    }

    /// Lists drive models compatible with a server model.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not found or the API call fails.
    pub async fn list_drive_models(
        &self,
        location_id: i64,
        server_model_id: i64,
    ) -> Result<Vec<DriveModel>> {
        self.get_all(&format!(
            "/locations/{location_id}/order_options/server_models/{server_model_id}/drive_models"
        ))
        .await
    }
}
