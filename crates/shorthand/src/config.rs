use crate::error::{Result, ShorthandError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Generation settings, loadable from a TOML file
///
/// Every field defaults to the conventions of the shipped library, so a
/// config file only needs to name the fields it overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShorthandConfig {
    /// Reserved prefix identifying library methods (e.g. `MR_`)
    pub prefix: String,
    /// Macro token marking declarations that already carry a deprecation
    pub deprecation_marker: String,
    /// Type substring that forces an iOS-only compile guard
    pub platform_conditional_type: String,
    /// Preprocessor flag wrapping the generated files
    pub shorthand_flag: String,
    /// Framework types whose categories are eligible for generation
    pub allowed_objects: Vec<String>,
    /// Imports prepended to the generated header
    pub header_imports: Vec<String>,
    /// Core-integration header imported by the generated implementation
    pub implementation_import: String,
}

impl Default for ShorthandConfig {
    fn default() -> Self {
        Self {
            prefix: crate::RESERVED_PREFIX.to_string(),
            deprecation_marker: crate::DEPRECATION_MARKER.to_string(),
            platform_conditional_type: crate::PLATFORM_CONDITIONAL_TYPE.to_string(),
            shorthand_flag: crate::SHORTHAND_FLAG.to_string(),
            allowed_objects: vec![
                "NSManagedObject".to_string(),
                "NSManagedObjectContext".to_string(),
                "NSManagedObjectModel".to_string(),
                "NSPersistentStoreCoordinator".to_string(),
                "NSPersistentStore".to_string(),
            ],
            header_imports: vec![
                "MagicalRecordDeprecated.h".to_string(),
                "NSManagedObjectContext+MagicalSaves.h".to_string(),
            ],
            implementation_import: "CoreData+MagicalRecord.h".to_string(),
        }
    }
}

impl ShorthandConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ShorthandError::ConfigNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Whether a declaring object is eligible for generation
    pub fn allows_object(&self, object: &str) -> bool {
        self.allowed_objects.iter().any(|o| o == object)
    }
}
