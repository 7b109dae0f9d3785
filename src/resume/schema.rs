// src/resume/schema.rs
//! Schema loading and validation of the generated resume YAML.

use anyhow::{Context, Result};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::path::Path;

/// Outcome of validating generated YAML against the resume schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// Human-readable report block for stdout.
    pub fn render(&self, output: &Path) -> String {
        let mut report = format!("Validation Report for {}\n", output.display());
        report.push_str(&"=".repeat(40));
        report.push('\n');
        if self.valid {
            report.push_str("YAML is valid and conforms to the schema.\n");
        } else {
            report.push_str("YAML is not valid. Errors:\n");
            for error in &self.errors {
                report.push_str(error);
                report.push('\n');
            }
        }
        report
    }
}

/// Load a YAML document (the JSON-Schema-shaped resume schema) into a JSON
/// value usable by the validator.
pub fn load_yaml_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read YAML file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML file: {}", path.display()))
}

/// Validate generated YAML text against the schema. Parse failures and
/// schema violations both land in the report; this never panics.
pub fn validate_resume_yaml(yaml_text: &str, schema: &Value) -> ValidationReport {
    let instance: Value = match serde_yaml::from_str(yaml_text) {
        Ok(value) => value,
        Err(e) => {
            return ValidationReport {
                valid: false,
                errors: vec![format!("YAML parse error: {e}")],
            }
        }
    };

    let compiled = match JSONSchema::compile(schema) {
        Ok(compiled) => compiled,
        Err(e) => {
            return ValidationReport {
                valid: false,
                errors: vec![format!("Schema compilation error: {e}")],
            }
        }
    };

    match compiled.validate(&instance) {
        Ok(()) => ValidationReport {
            valid: true,
            errors: Vec::new(),
        },
        Err(errors) => ValidationReport {
            valid: false,
            errors: errors.map(|e| e.to_string()).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn minimal_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "personal_information": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "email": {"type": "string"}
                    },
                    "required": ["name"]
                }
            },
            "required": ["personal_information"]
        })
    }

    #[test]
    fn test_valid_yaml_passes() {
        let report = validate_resume_yaml(
            "personal_information:\n  name: Ada\n  email: ada@example.com\n",
            &minimal_schema(),
        );
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let report = validate_resume_yaml("personal_information:\n  email: a@b.c\n", &minimal_schema());
        assert!(!report.valid);
        assert!(!report.errors.is_empty());
    }

    #[test]
    fn test_unparseable_yaml_is_invalid_not_panic() {
        let report = validate_resume_yaml("personal_information: [unclosed", &minimal_schema());
        assert!(!report.valid);
        assert!(report.errors[0].contains("YAML parse error"));
    }

    #[test]
    fn test_report_rendering() {
        let report = ValidationReport {
            valid: true,
            errors: Vec::new(),
        };
        let rendered = report.render(Path::new("out.yaml"));
        assert!(rendered.starts_with("Validation Report for out.yaml\n"));
        assert!(rendered.contains("YAML is valid and conforms to the schema."));
    }

    #[test]
    fn test_load_yaml_document() {
        let mut file = tempfile::NamedTempFile::new().expect("tmp file");
        file.write_all(b"type: object\nproperties:\n  name:\n    type: string\n")
            .expect("write schema");

        let schema = load_yaml_document(file.path()).expect("load");
        assert_eq!(schema["type"], json!("object"));
        assert_eq!(schema["properties"]["name"]["type"], json!("string"));
    }
}
