//! Rackforge API client and wire types.
//!
//! The client is a thin REST wrapper: bearer-token auth, a request
//! timeout, typed JSON decoding and page-number pagination. Endpoint
//! methods are grouped per resource in the sibling modules.

mod client;
mod hosts;
mod load_balancers;
mod locations;
mod ssh_keys;
mod ssl;
mod types;

pub use client::{ApiClient, DEFAULT_ENDPOINT};
pub use types::{
    DedicatedServerCreateInput, DriveModel, DriveSlot, DrivesInput, Host, HostLayout,
    HostProvision, LayoutPartition, LoadBalancer, Location, ServerModel, SshKey,
    SshKeyCreateInput, SshKeyUpdateInput, SslCertificate, SslCertificateCreateInput,
};
