use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_valid::Validate;

pub const ACCEPTED_FILE_TYPES: [&str; 2] = ["application/pdf", "text/plain"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileError {
    #[error("Please upload a file.")]
    NotAFile,
    #[error("File must be less than {0} MB")]
    TooLarge(u64),
    #[error("Invalid file type, accepted types are: pdf and txt")]
    InvalidType,
}

/// A file as submitted by the browser: metadata plus a base64 body.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInput {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub data: Option<String>,
}

impl FileInput {
    pub fn decode(&self) -> Result<Vec<u8>, FileError> {
        let data = self.data.as_deref().ok_or(FileError::NotAFile)?;
        general_purpose::STANDARD
            .decode(data)
            .map_err(|_| FileError::NotAFile)
    }

    /// Rules run in order and stop at the first violation.
    pub fn check(&self, max_size: u64, accepted: &[&str]) -> Result<(), FileError> {
        if self.name.trim().is_empty() {
            return Err(FileError::NotAFile);
        }
        let bytes = self.decode()?;

        // declared size may lie, the payload may not
        let size = self.size.max(bytes.len() as u64);
        if size > max_size {
            return Err(FileError::TooLarge(max_size / 1_000_000));
        }

        if !accepted.contains(&self.content_type.as_str()) {
            return Err(FileError::InvalidType);
        }
        Ok(())
    }
}

/// Upload form of the file-management page. Null entries are skipped.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesForm {
    #[serde(default)]
    pub files: Vec<Option<FileInput>>,
}

impl FilesForm {
    /// Errors keyed as `files.<index>`.
    pub fn validate_files(&self, max_size: u64) -> Result<(), Map<String, Value>> {
        let mut errors = Map::new();
        for (index, file) in self.files.iter().enumerate() {
            if let Some(Err(err)) = file.as_ref().map(|f| f.check(max_size, &ACCEPTED_FILE_TYPES)) {
                errors.insert(format!("files.{}", index), Value::from(vec![err.to_string()]));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn non_empty_ids(ids: &Vec<String>) -> Result<(), serde_valid::validation::Error> {
    if ids.iter().any(|id| id.trim().is_empty()) {
        return Err(serde_valid::validation::Error::Custom(
            "File ids must not be empty.".to_string(),
        ));
    }
    Ok(())
}

/// List of file ids, used by the bulk delete endpoint.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FilesCheckForm {
    #[serde(rename = "fileIds")]
    #[validate(unique_items)]
    #[validate(custom(non_empty_ids))]
    pub file_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1_000_000;

    fn file(name: &str, content_type: &str, size: u64) -> FileInput {
        FileInput {
            name: name.to_string(),
            content_type: content_type.to_string(),
            size,
            data: Some(general_purpose::STANDARD.encode(b"hello")),
        }
    }

    #[test]
    fn accepts_pdf_and_text_under_limit() {
        assert!(file("a.pdf", "application/pdf", MB).check(5 * MB, &ACCEPTED_FILE_TYPES).is_ok());
        assert!(file("a.txt", "text/plain", 10).check(5 * MB, &ACCEPTED_FILE_TYPES).is_ok());
    }

    #[test]
    fn oversized_file_fails_with_size_message() {
        let err = file("big.pdf", "application/pdf", 10 * MB)
            .check(5 * MB, &ACCEPTED_FILE_TYPES)
            .unwrap_err();
        assert_eq!(err, FileError::TooLarge(5));
        assert_eq!(err.to_string(), "File must be less than 5 MB");
    }

    #[test]
    fn docx_fails_with_type_message() {
        let err = file(
            "cv.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            1_000,
        )
        .check(5 * MB, &ACCEPTED_FILE_TYPES)
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid file type, accepted types are: pdf and txt"
        );
    }

    #[test]
    fn entry_without_payload_is_not_a_file() {
        let mut entry = file("a.pdf", "application/pdf", 10);
        entry.data = None;
        assert_eq!(
            entry.check(5 * MB, &ACCEPTED_FILE_TYPES).unwrap_err().to_string(),
            "Please upload a file."
        );
        entry.data = Some("%%% not base64".to_string());
        assert_eq!(entry.check(5 * MB, &ACCEPTED_FILE_TYPES), Err(FileError::NotAFile));
    }

    #[test]
    fn null_entry_passes() {
        let form = FilesForm { files: vec![None] };
        assert!(form.validate_files(5 * MB).is_ok());
    }

    #[test]
    fn errors_are_keyed_by_index() {
        let form = FilesForm {
            files: vec![
                Some(file("a.pdf", "application/pdf", 10)),
                Some(file("b.docx", "application/msword", 10)),
            ],
        };
        let errors = form.validate_files(5 * MB).unwrap_err();
        assert!(!errors.contains_key("files.0"));
        assert_eq!(
            errors["files.1"][0],
            "Invalid file type, accepted types are: pdf and txt"
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<FilesForm>(r#"{"files":[],"extra":1}"#).is_err());
        assert!(serde_json::from_str::<FilesCheckForm>(r#"{"fileIds":["a"],"x":true}"#).is_err());
    }

    #[test]
    fn file_ids_must_be_unique_and_non_empty() {
        let ok = FilesCheckForm { file_ids: vec!["a".into(), "b".into()] };
        assert!(ok.validate().is_ok());

        let duplicated = FilesCheckForm { file_ids: vec!["a".into(), "a".into()] };
        assert!(duplicated.validate().is_err());

        let blank = FilesCheckForm { file_ids: vec![" ".into()] };
        assert!(blank.validate().is_err());
    }
}
