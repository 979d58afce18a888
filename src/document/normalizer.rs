use std::path::Path;

use anyhow::anyhow;

use super::{DocumentError, DocumentFile};

/// A specification document normalized to JSON, ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDocument {
    /// Valid JSON text of the document.
    pub json_content: String,

    /// File name under which the document is uploaded (the source file name,
    /// with its extension rewritten to `.json` when the source was YAML).
    pub file_name: String,
}

/// Normalize a specification document to JSON, dispatching on its extension.
///
/// YAML documents are parsed into an untyped value tree and re-serialized as
/// indented JSON. JSON documents are checked for well-formedness and pass
/// through byte-for-byte, so the uploaded payload stays identical to the
/// source. This function performs no I/O.
pub fn normalize(document: &DocumentFile) -> Result<NormalizedDocument, DocumentError> {
    match document.extension.as_str() {
        "yaml" | "yml" => {
            let value: serde_json::Value = serde_yaml::from_str(&document.raw_content)
                .map_err(|e| DocumentError::InvalidYaml(document.file_name.clone(), anyhow!(e)))?;
            let json_content = serde_json::to_string_pretty(&value)
                .map_err(|e| DocumentError::InvalidYaml(document.file_name.clone(), anyhow!(e)))?;

            Ok(NormalizedDocument {
                json_content,
                file_name: Path::new(&document.file_name)
                    .with_extension("json")
                    .to_string_lossy()
                    .to_string(),
            })
        }
        "json" => {
            serde_json::from_str::<serde_json::Value>(&document.raw_content)
                .map_err(|e| DocumentError::InvalidJson(document.file_name.clone(), anyhow!(e)))?;

            Ok(NormalizedDocument {
                json_content: document.raw_content.clone(),
                file_name: document.file_name.clone(),
            })
        }
        extension => Err(DocumentError::UnsupportedFormat {
            extension: extension.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn document_file(file_name: &str, extension: &str, raw_content: &str) -> DocumentFile {
        DocumentFile {
            path: PathBuf::from(file_name),
            raw_content: raw_content.to_string(),
            extension: extension.to_string(),
            file_name: file_name.to_string(),
            size_in_bytes: raw_content.len() as u64,
        }
    }

    #[test]
    fn yaml_document_is_converted_to_json_and_renamed() {
        let document = document_file(
            "petstore.yaml",
            "yaml",
            "openapi: 3.0.0\ninfo:\n  title: Petstore\n  version: 1.0.0\n",
        );

        let normalized = normalize(&document).unwrap();

        assert_eq!("petstore.json", normalized.file_name);
        let value: serde_json::Value = serde_json::from_str(&normalized.json_content).unwrap();
        assert_eq!(
            serde_json::json!({
                "openapi": "3.0.0",
                "info": { "title": "Petstore", "version": "1.0.0" }
            }),
            value
        );
    }

    #[test]
    fn yaml_conversion_preserves_the_value_tree() {
        let yaml = "paths:\n  /pets:\n    get:\n      responses:\n        '200':\n          description: ok\nservers:\n  - url: https://example.net\n";
        let document = document_file("api.yml", "yml", yaml);

        let normalized = normalize(&document).unwrap();

        let from_json: serde_json::Value = serde_json::from_str(&normalized.json_content).unwrap();
        let from_yaml: serde_json::Value = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(from_yaml, from_json);
        assert_eq!("api.json", normalized.file_name);
    }

    #[test]
    fn yaml_conversion_is_stable_across_runs() {
        let document = document_file("api.yaml", "yaml", "a: 1\nb:\n  - x\n  - y\n");

        let first = normalize(&document).unwrap();
        let second = normalize(&document).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn json_document_passes_through_unchanged() {
        let json = "{\n    \"openapi\":   \"3.0.0\",\n    \"info\": {}\n}";
        let document = document_file("petstore.json", "json", json);

        let normalized = normalize(&document).unwrap();

        assert_eq!(json, normalized.json_content);
        assert_eq!("petstore.json", normalized.file_name);
    }

    #[test]
    fn malformed_yaml_fails_with_invalid_yaml() {
        let document = document_file("broken.yaml", "yaml", "key: [unclosed\n  indent: bad\n");

        let error = normalize(&document).unwrap_err();

        assert!(
            matches!(error, DocumentError::InvalidYaml(ref name, _) if name == "broken.yaml"),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn malformed_json_fails_with_invalid_json() {
        let document = document_file("broken.json", "json", r#"{"a": 1,}"#);

        let error = normalize(&document).unwrap_err();

        assert!(
            matches!(error, DocumentError::InvalidJson(ref name, _) if name == "broken.json"),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let document = document_file("notes.txt", "txt", "not a spec");

        let error = normalize(&document).unwrap_err();

        assert!(
            matches!(error, DocumentError::UnsupportedFormat { ref extension } if extension == "txt")
        );
        assert!(error.to_string().contains(".yaml, .yml, .json"));
    }

    #[test]
    fn missing_extension_is_rejected() {
        let document = document_file("petstore", "", "{}");

        let error = normalize(&document).unwrap_err();

        assert!(matches!(error, DocumentError::UnsupportedFormat { .. }));
    }
}
