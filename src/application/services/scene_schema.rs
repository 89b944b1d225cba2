//! Scene schema - Structural validation of decoded model output
//!
//! Turns an untyped JSON tree into typed scenes or a [`SchemaViolation`]
//! naming the offending field path. Validation is structural only: whether a
//! trigger sentence really is a verbatim quote, or whether a description
//! mentions banned content, is part of the instruction contract and is not
//! checked here.

use serde_json::{Map, Value};

use crate::domain::entities::{Character, Environment, Scene, SchemaViolation};
use crate::domain::value_objects::{CharacterRole, EnvironmentType};

/// Field names of the payload, shared with the instruction builder
pub mod fields {
    pub const SCENES: &str = "scenes";
    pub const LOCATION: &str = "location";
    pub const CHAPTER_BEAT: &str = "chapter_beat";
    pub const TRIGGER_SENTENCE: &str = "trigger_sentence";
    pub const CHARACTERS: &str = "characters";
    pub const NAME: &str = "name";
    pub const ROLE: &str = "role";
    pub const VISUAL_DESCRIPTION: &str = "visual_description";
    pub const SKYBOX_ENVIRONMENT: &str = "skybox_environment";
    /// Accepted alias for `skybox_environment`
    pub const ENVIRONMENT: &str = "environment";
    pub const VISUAL_PROMPT: &str = "visual_prompt";
    pub const ENVIRONMENT_TYPE: &str = "environment_type";
    pub const NEGATIVE_PROMPT: &str = "negative_prompt";
}

/// Parse a decoded chapter payload into scenes
///
/// Accepts `{"scenes": [...]}` or a bare array of scenes.
pub fn parse_chapter_output(value: &Value) -> Result<Vec<Scene>, SchemaViolation> {
    let scenes = match value {
        Value::Array(items) => items,
        Value::Object(object) => required_array(object, "", fields::SCENES)?,
        other => {
            return Err(SchemaViolation::new(
                "$",
                format!("expected an object or array, found {}", type_name(other)),
            ))
        }
    };

    scenes
        .iter()
        .enumerate()
        .map(|(i, scene)| parse_scene(scene, &format!("{}[{}]", fields::SCENES, i)))
        .collect()
}

fn parse_scene(value: &Value, path: &str) -> Result<Scene, SchemaViolation> {
    let object = as_object(value, path)?;

    let location = required_str(object, path, fields::LOCATION)?;
    let chapter_beat = required_str(object, path, fields::CHAPTER_BEAT)?;
    let trigger_sentence = required_str(object, path, fields::TRIGGER_SENTENCE)?;

    let characters = required_array(object, path, fields::CHARACTERS)?
        .iter()
        .enumerate()
        .map(|(i, character)| {
            parse_character(
                character,
                &format!("{}[{}]", join(path, fields::CHARACTERS), i),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (environment_key, environment_value) = [fields::SKYBOX_ENVIRONMENT, fields::ENVIRONMENT]
        .into_iter()
        .find_map(|key| object.get(key).map(|v| (key, v)))
        .ok_or_else(|| missing(path, fields::SKYBOX_ENVIRONMENT))?;
    let environment = parse_environment(environment_value, &join(path, environment_key))?;

    Ok(characters.into_iter().fold(
        Scene::new(location, chapter_beat, trigger_sentence, environment),
        Scene::with_character,
    ))
}

fn parse_character(value: &Value, path: &str) -> Result<Character, SchemaViolation> {
    let object = as_object(value, path)?;

    let name = required_str(object, path, fields::NAME)?;
    if name.trim().is_empty() {
        return Err(SchemaViolation::new(
            join(path, fields::NAME),
            "must not be empty",
        ));
    }

    let role_str = required_str(object, path, fields::ROLE)?;
    let role = CharacterRole::parse(&role_str).ok_or_else(|| {
        SchemaViolation::new(
            join(path, fields::ROLE),
            format!(
                "invalid value \"{}\", expected one of {}",
                role_str,
                CharacterRole::choices()
            ),
        )
    })?;

    let visual_description = required_str(object, path, fields::VISUAL_DESCRIPTION)?;

    Ok(Character::new(name, role, visual_description))
}

fn parse_environment(value: &Value, path: &str) -> Result<Environment, SchemaViolation> {
    let object = as_object(value, path)?;

    let visual_prompt = required_str(object, path, fields::VISUAL_PROMPT)?;

    let type_str = required_str(object, path, fields::ENVIRONMENT_TYPE)?;
    let environment_type = EnvironmentType::parse(&type_str).ok_or_else(|| {
        SchemaViolation::new(
            join(path, fields::ENVIRONMENT_TYPE),
            format!(
                "invalid value \"{}\", expected one of {}",
                type_str,
                EnvironmentType::choices()
            ),
        )
    })?;

    // Optional: null and absent both mean "let repair fill it in"
    let negative_prompt = match object.get(fields::NEGATIVE_PROMPT) {
        None | Some(Value::Null) => None,
        Some(Value::String(prompt)) => Some(prompt.clone()),
        Some(other) => {
            return Err(wrong_type(
                &join(path, fields::NEGATIVE_PROMPT),
                "a string",
                other,
            ))
        }
    };

    let environment = Environment::new(visual_prompt, environment_type);
    Ok(match negative_prompt {
        Some(prompt) => environment.with_negative_prompt(prompt),
        None => environment,
    })
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaViolation> {
    value
        .as_object()
        .ok_or_else(|| wrong_type(path, "an object", value))
}

fn required_str(
    object: &Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<String, SchemaViolation> {
    let value = object.get(key).ok_or_else(|| missing(path, key))?;
    value
        .as_str()
        .map(String::from)
        .ok_or_else(|| wrong_type(&join(path, key), "a string", value))
}

fn required_array<'a>(
    object: &'a Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<&'a Vec<Value>, SchemaViolation> {
    let value = object.get(key).ok_or_else(|| missing(path, key))?;
    value
        .as_array()
        .ok_or_else(|| wrong_type(&join(path, key), "an array", value))
}

fn missing(path: &str, key: &str) -> SchemaViolation {
    SchemaViolation::new(join(path, key), "missing required field")
}

fn wrong_type(path: &str, expected: &str, found: &Value) -> SchemaViolation {
    SchemaViolation::new(
        path,
        format!("expected {}, found {}", expected, type_name(found)),
    )
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
