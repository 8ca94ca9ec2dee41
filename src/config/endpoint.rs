// ABOUTME: Per-zone upload URL template.
// ABOUTME: The `{zone}` placeholder is replaced by the target zone name.

use std::fmt;

use crate::types::Zone;

pub const ZONE_PLACEHOLDER: &str = "{zone}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTemplate(String);

impl EndpointTemplate {
    pub fn parse(value: &str) -> Result<Self, String> {
        if !value.contains(ZONE_PLACEHOLDER) {
            return Err(format!(
                "endpoint `{value}` must contain the {ZONE_PLACEHOLDER} placeholder"
            ));
        }
        Ok(Self(value.to_string()))
    }

    pub fn url_for(&self, zone: &Zone) -> String {
        self.0.replace(ZONE_PLACEHOLDER, zone.as_str())
    }
}

impl fmt::Display for EndpointTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
