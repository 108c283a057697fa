use crate::forms::file::{FileError, FileInput};
use crate::models;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_valid::Validate;

pub const ACCEPTED_AVATAR_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

fn default_temperature() -> f32 {
    models::DEFAULT_ASSISTANT_TEMP
}

/// Create and edit form for assistants. On edit `avatar` carries the current
/// avatar URL; an empty value means the user cleared it.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AssistantForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 256)]
    pub name: String,
    #[serde(default)]
    #[validate(max_length = 512)]
    pub description: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 256000)]
    pub instructions: String,
    #[serde(default = "default_temperature")]
    #[validate(minimum = 0.0)]
    #[validate(maximum = 2.0)]
    pub temperature: f32,
    #[serde(default)]
    pub data_sources: Option<String>,
    #[serde(default)]
    pub pictogram: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(rename = "avatarFile", default)]
    pub avatar_file: Option<FileInput>,
}

/// What the edit action does with the stored avatar.
#[derive(Debug, Clone, PartialEq)]
pub enum AvatarChange<'a> {
    Upload(&'a FileInput),
    Remove,
    Keep(String),
}

impl AssistantForm {
    /// Static rules plus the avatar file rules, merged into field errors.
    pub fn check(&self, max_avatar_size: u64) -> Result<(), Map<String, Value>> {
        let mut errors = match self.validate() {
            Ok(()) => Map::new(),
            Err(errors) => super::field_errors(&errors),
        };

        if let Some(Err(err)) = self
            .avatar_file
            .as_ref()
            .map(|file| file.check(max_avatar_size, &ACCEPTED_AVATAR_TYPES))
        {
            let message = match err {
                FileError::InvalidType => {
                    "Invalid file type, accepted types are: jpeg and png".to_string()
                }
                other => other.to_string(),
            };
            errors.insert("avatarFile".to_string(), Value::from(vec![message]));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn avatar_change(&self) -> AvatarChange<'_> {
        match (&self.avatar_file, self.avatar.as_deref().map(str::trim)) {
            (Some(file), _) => AvatarChange::Upload(file),
            (None, None) | (None, Some("")) => AvatarChange::Remove,
            (None, Some(url)) => AvatarChange::Keep(url.to_string()),
        }
    }

    /// Build the API payload. Avatar is left empty for callers to fill in.
    pub fn to_params(&self, model: String, user_id: &str) -> models::AssistantParams {
        let defaults = models::AssistantMetadata::defaults();
        models::AssistantParams {
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            instructions: Some(self.instructions.clone()),
            model: Some(model),
            temperature: Some(self.temperature),
            metadata: Some(models::AssistantMetadata {
                data_sources: self.data_sources.clone().unwrap_or_default(),
                pictogram: self
                    .pictogram
                    .clone()
                    .filter(|p| !p.is_empty())
                    .unwrap_or(defaults.pictogram),
                avatar: String::new(),
                user_id: user_id.to_string(),
            }),
        }
    }
}

impl From<models::Assistant> for AssistantForm {
    fn from(assistant: models::Assistant) -> Self {
        AssistantForm {
            name: assistant.name.unwrap_or_default(),
            description: assistant.description.unwrap_or_default(),
            instructions: assistant.instructions.unwrap_or_default(),
            temperature: assistant
                .temperature
                .unwrap_or(models::DEFAULT_ASSISTANT_TEMP),
            data_sources: Some(assistant.metadata.data_sources),
            pictogram: Some(assistant.metadata.pictogram),
            avatar: Some(assistant.metadata.avatar),
            avatar_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose, Engine as _};

    fn form() -> AssistantForm {
        AssistantForm {
            name: "Helper".to_string(),
            description: "Answers questions".to_string(),
            instructions: "Be brief.".to_string(),
            temperature: 0.5,
            ..Default::default()
        }
    }

    fn png() -> FileInput {
        FileInput {
            name: "me.png".to_string(),
            content_type: "image/png".to_string(),
            size: 3,
            data: Some(general_purpose::STANDARD.encode([1u8, 2, 3])),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(form().check(5_000_000).is_ok());
    }

    #[test]
    fn temperature_out_of_range_is_a_field_error() {
        let mut f = form();
        f.temperature = 3.0;
        let errors = f.check(5_000_000).unwrap_err();
        assert!(errors.contains_key("temperature"));
    }

    #[test]
    fn missing_name_and_instructions_are_reported() {
        let mut f = form();
        f.name.clear();
        f.instructions.clear();
        let errors = f.check(5_000_000).unwrap_err();
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("instructions"));
    }

    #[test]
    fn avatar_must_be_an_image() {
        let mut f = form();
        let mut file = png();
        file.content_type = "application/pdf".to_string();
        f.avatar_file = Some(file);
        let errors = f.check(5_000_000).unwrap_err();
        assert_eq!(
            errors["avatarFile"][0],
            "Invalid file type, accepted types are: jpeg and png"
        );
    }

    #[test]
    fn avatar_change_follows_form_fields() {
        let mut f = form();
        assert_eq!(f.avatar_change(), AvatarChange::Remove);

        f.avatar = Some("http://storage/a.png".to_string());
        assert_eq!(
            f.avatar_change(),
            AvatarChange::Keep("http://storage/a.png".to_string())
        );

        let file = png();
        f.avatar_file = Some(file.clone());
        assert_eq!(f.avatar_change(), AvatarChange::Upload(&file));
    }

    #[test]
    fn params_carry_owner_and_default_pictogram() {
        let params = form().to_params("model-x".to_string(), "user-1");
        let metadata = params.metadata.unwrap();
        assert_eq!(params.model.as_deref(), Some("model-x"));
        assert_eq!(metadata.user_id, "user-1");
        assert_eq!(metadata.pictogram, models::DEFAULT_PICTOGRAM);
        assert!(metadata.avatar.is_empty());
    }
}
