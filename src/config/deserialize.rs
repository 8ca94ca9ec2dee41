// ABOUTME: Custom serde deserializers for settings types.
// ABOUTME: Validates endpoint templates while the settings file is parsed.

use serde::Deserialize;

use super::EndpointTemplate;

pub fn deserialize_endpoint_template<'de, D>(deserializer: D) -> Result<EndpointTemplate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    EndpointTemplate::parse(&s).map_err(serde::de::Error::custom)
}
