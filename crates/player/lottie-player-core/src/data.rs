//! Decoding of dropped animation files.
//!
//! The animation format belongs to the rendering library; this only turns the
//! file's text into a JSON object the library can be handed.

use serde_json::Value as JsonValue;

use crate::error::PlayerError;

/// Parse dropped text into animation data.
pub fn parse_animation_data(text: &str) -> Result<JsonValue, PlayerError> {
    let value: JsonValue = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(PlayerError::NotAnObject);
    }
    Ok(value)
}
