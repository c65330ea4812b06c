//! JSON input files for pre-seeding request bodies.

use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

use crate::error::{ConfigError, RackforgeError, Result};

/// Decodes a user-supplied JSON file into a request body.
///
/// Used by `host add --input` to pre-seed the create request; flag values
/// are applied on top of whatever the file provides, and layouts from the
/// file participate in the merge as ordinary existing layouts.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or not valid JSON
/// for the expected shape.
pub fn read_input_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(RackforgeError::Config(ConfigError::FileNotFound {
            path: path.to_path_buf(),
        }));
    }

    info!("Reading input from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| {
        RackforgeError::Config(ConfigError::ParseError {
            message: format!("Failed to read file: {e}"),
            location: path.display().to_string(),
        })
    })?;

    serde_json::from_str(&content).map_err(|e| {
        RackforgeError::Config(ConfigError::ParseError {
            message: format!("JSON parse error: {e}"),
            location: path.display().to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DedicatedServerCreateInput;
    use std::io::Write;

    #[test]
    fn test_decodes_partial_create_request() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "server_model_id": 119,
                "drives": {{
                    "layout": [
                        {{ "slot_positions": [1, 2], "raid": 1 }}
                    ]
                }}
            }}"#
        )
        .unwrap();

        let input: DedicatedServerCreateInput = read_input_json(file.path()).unwrap();
        assert_eq!(input.server_model_id, 119);
        assert_eq!(input.location_id, 0); // absent fields default
        assert_eq!(input.drives.layout.len(), 1);
        assert_eq!(input.drives.layout[0].slot_positions, vec![1, 2]);
        assert_eq!(input.drives.layout[0].raid, Some(1));
    }

    #[test]
    fn test_missing_file_is_a_config_error() {
        let err =
            read_input_json::<DedicatedServerCreateInput>(Path::new("/nonexistent/input.json"))
                .unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn test_invalid_json_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = read_input_json::<DedicatedServerCreateInput>(file.path()).unwrap_err();
        assert!(err.to_string().contains("JSON parse error"));
    }
}
