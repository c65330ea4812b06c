//! Dedicated server endpoints.

use tracing::info;

use crate::error::Result;

use super::client::ApiClient;
use super::types::{DedicatedServerCreateInput, Host};

impl ApiClient {
    /// Lists one page of hosts.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_hosts(&self, page: u32, per_page: u32) -> Result<Vec<Host>> {
        self.get_page("/hosts", page, per_page).await
    }

    /// Lists all hosts, following pagination to exhaustion.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn list_all_hosts(&self) -> Result<Vec<Host>> {
        self.get_all("/hosts").await
    }

    /// Gets a dedicated server by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not found or the API call fails.
    pub async fn get_dedicated_server(&self, id: &str) -> Result<Host> {
        self.get_json(&format!("/hosts/dedicated_servers/{id}"), &[])
            .await
    }

    /// Orders dedicated servers, one per hostname in the request.
    ///
    /// The drives structure of the request is expected to be fully built
    /// by [`crate::storage::populate_storage`]; it is sent unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is rejected or the API call fails.
    pub async fn create_dedicated_servers(
        &self,
        input: &DedicatedServerCreateInput,
    ) -> Result<Vec<Host>> {
        info!(
            "Ordering {} dedicated server(s), model {}, location {}",
            input.hosts.len(),
            input.server_model_id,
            input.location_id
        );
        self.post_json("/hosts/dedicated_servers", input).await
    }

    /// Powers a dedicated server on.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not found or the API call fails.
    pub async fn power_on(&self, id: &str) -> Result<Host> {
        self.post_empty(&format!("/hosts/dedicated_servers/{id}/power_on"))
            .await
    }

    /// Powers a dedicated server off.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not found or the API call fails.
    pub async fn power_off(&self, id: &str) -> Result<Host> {
        self.post_empty(&format!("/hosts/dedicated_servers/{id}/power_off"))
            .await
    }

    /// Power-cycles a dedicated server.
    ///
    /// # Errors
    ///
    /// Returns an error if the host is not found or the API call fails.
    pub async fn power_cycle(&self, id: &str) -> Result<Host> {
        self.post_empty(&format!("/hosts/dedicated_servers/{id}/power_cycle"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{DriveSlot, DrivesInput, HostLayout, HostProvision, LayoutPartition};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_create_sends_drives_structure_unchanged() {
        let server = MockServer::start().await;

        let input = DedicatedServerCreateInput {
            server_model_id: 119,
            location_id: 2,
            operating_system_id: Some(7),
            ssh_key_fingerprints: vec![],
            hosts: vec![HostProvision {
                hostname: String::from("web-01"),
            }],
            drives: DrivesInput {
                slots: vec![DriveSlot {
                    position: 1,
                    drive_model_id: Some(441),
                }],
                layout: vec![HostLayout {
                    slot_positions: vec![1],
                    raid: Some(0),
                    partitions: vec![LayoutPartition {
                        target: String::from("/"),
                        size: 0,
                        fill: true,
                        fs: Some(String::from("ext4")),
                    }],
                }],
            },
        };

        Mock::given(method("POST"))
            .and(path("/hosts/dedicated_servers"))
            .and(body_json(serde_json::json!({
                "server_model_id": 119,
                "location_id": 2,
                "operating_system_id": 7,
                "hosts": [{ "hostname": "web-01" }],
                "drives": {
                    "slots": [{ "position": 1, "drive_model_id": 441 }],
                    "layout": [{
                        "slot_positions": [1],
                        "raid": 0,
                        "partitions": [{
                            "target": "/",
                            "size": 0,
                            "fill": true,
                            "fs": "ext4"
                        }]
                    }]
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([{
                "id": "a1b2c3",
                "title": "web-01",
                "status": "init",
                "created_at": "2026-01-15T10:00:00Z"
            }])))
            .mount(&server)
            .await;

        let client = ApiClient::new("t").unwrap().with_endpoint(server.uri());
        let hosts = client.create_dedicated_servers(&input).await.unwrap();
        assert_eq!(hosts.len(), 1);
        assert_eq!(hosts[0].id, "a1b2c3");
    }
}
