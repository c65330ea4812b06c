//! Local configuration for the CLI.
//!
//! This module handles the profile settings file (endpoint and API token
//! per profile) and the JSON input files that pre-seed create requests.

mod input;
mod settings;

pub use input::read_input_json;
pub use settings::{load_dotenv, Profile, Settings, ENV_API_TOKEN, ENV_ENDPOINT};
