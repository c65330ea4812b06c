//! Rackforge API types and data structures.
//!
//! This module defines the types used for communication with the Rackforge
//! REST API. The drive configuration types ([`DriveSlot`], [`HostLayout`],
//! [`LayoutPartition`]) are also the working representation of the
//! [`crate::storage`] builder; they are constructed fresh for one command
//! invocation and serialized once into the outbound create request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Hosts
// ============================================================================

/// A dedicated server as reported by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    /// Unique host identifier.
    pub id: String,
    /// Host title (usually the hostname).
    pub title: String,
    /// Location code the host is provisioned in.
    #[serde(default)]
    pub location_code: String,
    /// Lifecycle status (e.g. "init", "pending", "active").
    #[serde(default)]
    pub status: String,
    /// Operational status (e.g. "normal", "provisioning").
    #[serde(default)]
    pub operational_status: String,
    /// Public IPv4 address, if assigned.
    #[serde(default)]
    pub public_ipv4_address: Option<String>,
    /// Private IPv4 address, if assigned.
    #[serde(default)]
    pub private_ipv4_address: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Hostname entry for a dedicated server order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HostProvision {
    /// Hostname to assign to the new server.
    pub hostname: String,
}

/// Request body for ordering dedicated servers.
///
/// Every field can be pre-seeded from a JSON input file; flag values are
/// applied on top of the decoded file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DedicatedServerCreateInput {
    /// Server model identifier from the provisioning catalog.
    #[serde(default)]
    pub server_model_id: i64,
    /// Location identifier to provision in.
    #[serde(default)]
    pub location_id: i64,
    /// Operating system identifier to install.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_system_id: Option<i64>,
    /// Fingerprints of account SSH keys to authorize on the new servers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_key_fingerprints: Vec<String>,
    /// One entry per server to order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<HostProvision>,
    /// Drive bay population and RAID/partition layout.
    #[serde(default)]
    pub drives: DrivesInput,
}

// ============================================================================
// Drive configuration
// ============================================================================

/// Drive bay population and RAID/partition layout of a create request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DrivesInput {
    /// Physical bay assignments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<DriveSlot>,
    /// RAID groupings with their partition tables.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layout: Vec<HostLayout>,
}

/// One drive bay assignment: bay `position` holds drive model
/// `drive_model_id`, or is explicitly cleared when the model is absent.
///
/// Slot assignments describe physical population only; they are
/// independent of the RAID grouping in [`HostLayout`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriveSlot {
    /// Bay position on the server chassis.
    pub position: u32,
    /// Drive model identifier, absent to clear the bay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_model_id: Option<i64>,
}

/// One RAID grouping of drive bays and its partition table.
///
/// A layout is well-formed only when `slot_positions` is non-empty and
/// `raid` is present; both are enforced at parse time by
/// [`crate::storage::parse_layouts`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HostLayout {
    /// Bay positions grouped into this layout.
    pub slot_positions: Vec<u32>,
    /// RAID level of the grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raid: Option<u32>,
    /// Partition table of the grouping; `target` is unique per layout.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partitions: Vec<LayoutPartition>,
}

/// A single filesystem mount definition belonging to one layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayoutPartition {
    /// Mount path, unique within the owning layout.
    pub target: String,
    /// Partition size in megabytes.
    #[serde(default)]
    pub size: i64,
    /// Whether the partition consumes all remaining space.
    #[serde(default)]
    pub fill: bool,
    /// Filesystem type, when one should be created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs: Option<String>,
}

// ============================================================================
// SSH keys
// ============================================================================

/// An account SSH key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshKey {
    /// Display name of the key.
    pub name: String,
    /// MD5 fingerprint, the key's identifier in the API.
    pub fingerprint: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Request body for registering an SSH key.
#[derive(Debug, Clone, Serialize)]
pub struct SshKeyCreateInput {
    /// Display name of the key.
    pub name: String,
    /// OpenSSH-formatted public key.
    pub public_key: String,
}

/// Request body for renaming an SSH key.
#[derive(Debug, Clone, Serialize)]
pub struct SshKeyUpdateInput {
    /// New display name.
    pub name: String,
}

// ============================================================================
// SSL certificates
// ============================================================================

/// A custom SSL certificate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SslCertificate {
    /// Unique certificate identifier.
    pub id: String,
    /// Display name of the certificate.
    pub name: String,
    /// SHA-1 fingerprint of the public certificate.
    #[serde(default)]
    pub sha1_fingerprint: String,
    /// Expiration timestamp.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Request body for uploading a custom SSL certificate.
#[derive(Debug, Clone, Serialize)]
pub struct SslCertificateCreateInput {
    /// Display name of the certificate.
    pub name: String,
    /// PEM-encoded public certificate.
    pub public_key: String,
    /// PEM-encoded private key.
    pub private_key: String,
    /// PEM-encoded intermediate chain, when supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_key: Option<String>,
}

// ============================================================================
// Load balancers
// ============================================================================

/// A load balancer instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadBalancer {
    /// Unique load balancer identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Balancer type (e.g. "l4", "l7").
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: String,
    /// External addresses serving traffic.
    #[serde(default)]
    pub external_addresses: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Provisioning catalog
// ============================================================================

/// A datacenter location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Unique location identifier.
    pub id: i64,
    /// Human-readable name.
    pub name: String,
    /// Short location code (e.g. "AMS1").
    pub code: String,
    /// Features supported at this location.
    #[serde(default)]
    pub supported_features: Vec<String>,
}

/// A server model orderable at a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerModel {
    /// Unique server model identifier.
    pub id: i64,
    /// Model name.
    pub name: String,
    /// CPU model name.
    #[serde(default)]
    pub cpu_name: String,
    /// Number of CPUs.
    #[serde(default)]
    pub cpu_count: u32,
    /// RAM size in gigabytes.
    #[serde(default)]
    pub ram_size: u32,
    /// Number of drive bays on the chassis.
    #[serde(default)]
    pub drive_slots_count: u32,
    /// Whether a hardware RAID controller is present.
    #[serde(default)]
    pub has_raid_controller: bool,
}

/// A drive model compatible with a server model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveModel {
    /// Unique drive model identifier, referenced by `--drive-slot`.
    pub id: i64,
    /// Drive model name.
    pub name: String,
    /// Capacity in megabytes.
    #[serde(default)]
    pub capacity: i64,
    /// Interface (e.g. "SATA3", "NVMe-PCIe").
    #[serde(default)]
    pub interface: String,
    /// Form factor (e.g. "2.5", "3.5").
    #[serde(default)]
    pub form_factor: String,
    /// Media type (e.g. "SSD", "HDD").
    #[serde(default)]
    pub media_type: String,
}
