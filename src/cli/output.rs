//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying API resources
//! in text tables or JSON. Column selection for tables goes through the
//! pure [`validate_field_mask`] function.

use serde::Serialize;
use tabled::builder::Builder;

use crate::api::{
    DriveModel, Host, LoadBalancer, Location, ServerModel, SshKey, SslCertificate,
};
use crate::error::{ConfigError, RackforgeError, Result};

use super::commands::OutputFormat;

/// Timestamp format used in table cells.
const TABLE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
    /// Optional column mask for table output.
    fields: Option<String>,
}

/// A resource that can be rendered as a table row.
pub trait Listable {
    /// Column names in display order.
    const COLUMNS: &'static [&'static str];

    /// Renders the cell for a column; columns are validated upstream.
    fn cell(&self, column: &str) -> String;
}

/// Validates a comma-separated column mask against the allowed columns.
///
/// Pure function: the selected columns are returned in mask order, and an
/// unknown name fails with the full list of valid columns. Empty entries
/// (stray commas) are ignored.
///
/// # Errors
///
/// Returns an error naming the first unknown column.
pub fn validate_field_mask(mask: &str, allowed: &[&str]) -> Result<Vec<String>> {
    let mut selected = Vec::new();

    for field in mask.split(',') {
        let field = field.trim();
        if field.is_empty() {
            continue;
        }
        if !allowed.contains(&field) {
            return Err(RackforgeError::Config(ConfigError::InvalidFieldMask {
                field: field.to_string(),
                allowed: allowed.join(", "),
            }));
        }
        selected.push(field.to_string());
    }

    Ok(selected)
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self {
            format,
            fields: None,
        }
    }

    /// Sets the column mask applied to table output.
    #[must_use]
    pub fn with_fields(mut self, fields: Option<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Formats a list of resources as a table or JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid field mask or unserializable data.
    pub fn format_list<T: Listable + Serialize>(&self, items: &[T]) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_pretty_json(items),
            OutputFormat::Text => self.format_table(items),
        }
    }

    /// Formats a single resource as key/value lines or JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be serialized.
    pub fn format_item<T: Serialize>(&self, item: &T) -> Result<String> {
        match self.format {
            OutputFormat::Json => to_pretty_json(item),
            OutputFormat::Text => {
                let value = serde_json::to_value(item)
                    .map_err(|e| RackforgeError::internal(format!("Serialization failed: {e}")))?;

                let mut output = String::new();
                if let serde_json::Value::Object(map) = value {
                    for (key, entry) in map {
                        let rendered = match entry {
                            serde_json::Value::String(s) => s,
                            serde_json::Value::Null => String::from("-"),
                            other => other.to_string(),
                        };
                        output.push_str(&format!("{key}: {rendered}\n"));
                    }
                }
                Ok(output)
            }
        }
    }

    /// Renders a table with the selected columns.
    fn format_table<T: Listable>(&self, items: &[T]) -> Result<String> {
        if items.is_empty() {
            return Ok(String::from("No results.\n"));
        }

        let columns: Vec<String> = match &self.fields {
            Some(mask) => validate_field_mask(mask, T::COLUMNS)?,
            None => T::COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        };

        let mut builder = Builder::default();
        builder.push_record(columns.iter().map(String::as_str));
        for item in items {
            builder.push_record(columns.iter().map(|column| item.cell(column)));
        }

        Ok(builder.build().to_string())
    }
}

/// Serializes a value as pretty JSON.
fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| RackforgeError::internal(format!("Serialization failed: {e}")))
}

// ============================================================================
// Table rows
// ============================================================================

impl Listable for Host {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "title",
        "location",
        "status",
        "operational_status",
        "public_ipv4",
        "created",
    ];

    fn cell(&self, column: &str) -> String {
        match column {
            "id" => self.id.clone(),
            "title" => self.title.clone(),
            "location" => self.location_code.clone(),
            "status" => self.status.clone(),
            "operational_status" => self.operational_status.clone(),
            "public_ipv4" => self.public_ipv4_address.clone().unwrap_or_default(),
            "created" => self.created_at.format(TABLE_TIME_FORMAT).to_string(),
            _ => String::new(),
        }
    }
}

impl Listable for SshKey {
    const COLUMNS: &'static [&'static str] = &["name", "fingerprint", "created", "updated"];

    fn cell(&self, column: &str) -> String {
        match column {
            "name" => self.name.clone(),
            "fingerprint" => self.fingerprint.clone(),
            "created" => self.created_at.format(TABLE_TIME_FORMAT).to_string(),
            "updated" => self.updated_at.format(TABLE_TIME_FORMAT).to_string(),
            _ => String::new(),
        }
    }
}

impl Listable for SslCertificate {
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "sha1_fingerprint", "expires", "created"];

    fn cell(&self, column: &str) -> String {
        match column {
            "id" => self.id.clone(),
            "name" => self.name.clone(),
            "sha1_fingerprint" => self.sha1_fingerprint.clone(),
            "expires" => self
                .expires_at
                .map(|t| t.format(TABLE_TIME_FORMAT).to_string())
                .unwrap_or_default(),
            "created" => self.created_at.format(TABLE_TIME_FORMAT).to_string(),
            _ => String::new(),
        }
    }
}

impl Listable for LoadBalancer {
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "type", "status", "external_addresses", "created"];

    fn cell(&self, column: &str) -> String {
        match column {
            "id" => self.id.clone(),
            "name" => self.name.clone(),
            "type" => self.kind.clone(),
            "status" => self.status.clone(),
            "external_addresses" => self.external_addresses.join(", "),
            "created" => self.created_at.format(TABLE_TIME_FORMAT).to_string(),
            _ => String::new(),
        }
    }
}

impl Listable for Location {
    const COLUMNS: &'static [&'static str] = &["id", "name", "code", "features"];

    fn cell(&self, column: &str) -> String {
        match column {
            "id" => self.id.to_string(),
            "name" => self.name.clone(),
            "code" => self.code.clone(),
            "features" => self.supported_features.join(", "),
            _ => String::new(),
        }
    }
}

impl Listable for ServerModel {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "cpu",
        "cpu_count",
        "ram_gb",
        "drive_slots",
        "raid_controller",
    ];

    fn cell(&self, column: &str) -> String {
        match column {
            "id" => self.id.to_string(),
            "name" => self.name.clone(),
            "cpu" => self.cpu_name.clone(),
            "cpu_count" => self.cpu_count.to_string(),
            "ram_gb" => self.ram_size.to_string(),
            "drive_slots" => self.drive_slots_count.to_string(),
            "raid_controller" => String::from(if self.has_raid_controller { "yes" } else { "no" }),
            _ => String::new(),
        }
    }
}

impl Listable for DriveModel {
    const COLUMNS: &'static [&'static str] =
        &["id", "name", "capacity_mb", "interface", "form_factor", "media_type"];

    fn cell(&self, column: &str) -> String {
        match column {
            "id" => self.id.to_string(),
            "name" => self.name.clone(),
            "capacity_mb" => self.capacity.to_string(),
            "interface" => self.interface.clone(),
            "form_factor" => self.form_factor.clone(),
            "media_type" => self.media_type.clone(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: u32,
        name: String,
    }

    impl Listable for Row {
        const COLUMNS: &'static [&'static str] = &["id", "name"];

        fn cell(&self, column: &str) -> String {
            match column {
                "id" => self.id.to_string(),
                "name" => self.name.clone(),
                _ => String::new(),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                id: 1,
                name: String::from("alpha"),
            },
            Row {
                id: 2,
                name: String::from("beta"),
            },
        ]
    }

    #[test]
    fn test_validate_field_mask_accepts_known_columns() {
        let selected = validate_field_mask("name, id", &["id", "name"]).unwrap();
        assert_eq!(selected, vec!["name", "id"]);
    }

    #[test]
    fn test_validate_field_mask_rejects_unknown_column() {
        let err = validate_field_mask("id,bogus", &["id", "name"]).unwrap_err();
        assert!(err.to_string().contains("Unknown field 'bogus'"));
        assert!(err.to_string().contains("id, name"));
    }

    #[test]
    fn test_text_table_respects_mask() {
        let formatter = OutputFormatter::new(OutputFormat::Text)
            .with_fields(Some(String::from("name")));
        let table = formatter.format_list(&rows()).unwrap();
        assert!(table.contains("alpha"));
        assert!(table.contains("name"));
        assert!(!table.contains('1'));
    }

    #[test]
    fn test_empty_list_renders_placeholder() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let table = formatter.format_list::<Row>(&[]).unwrap();
        assert_eq!(table, "No results.\n");
    }

    #[test]
    fn test_json_list_is_pretty_printed() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let json = formatter.format_list(&rows()).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["name"], "alpha");
    }

    #[test]
    fn test_item_text_renders_key_value_lines() {
        let formatter = OutputFormatter::new(OutputFormat::Text);
        let output = formatter
            .format_item(&Row {
                id: 7,
                name: String::from("gamma"),
            })
            .unwrap();
        assert!(output.contains("id: 7"));
        assert!(output.contains("name: gamma"));
    }
}
