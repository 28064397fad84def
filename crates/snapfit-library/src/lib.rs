#![warn(missing_docs)]

//! Named parameter presets for snap features.
//!
//! A library file holds named geometry profiles and named gap profiles for
//! one feature family, plus which of each is the default. Records are flat
//! name → number maps; the family's schema decides which keys belong in a
//! profile ([`FieldGroup::Geometry`]) and which in a gap profile
//! ([`FieldGroup::Gap`]). Placement is never stored.
//!
//! The file format:
//!
//! ```json
//! {
//!   "default_profile": "default",
//!   "default_gap_profile": "default",
//!   "profiles": { "default": { "length": 1.2, "...": 0.0 } },
//!   "gap_profiles": { "default": { "gap_length": 0.015, "...": 0.0 } }
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use snapfit_geometry::{FeatureVariant, Location};
//! use snapfit_library::ProfileLibrary;
//!
//! let mut library = ProfileLibrary::fallback(FeatureVariant::Cantilever);
//! let longer = FeatureVariant::Cantilever
//!     .default_geometry()
//!     .with("length", 2.0);
//! library.create_profile("long", &longer).unwrap();
//!
//! let params = library
//!     .resolve(Some("long"), None, Location::Middle, Location::Top)
//!     .unwrap();
//! assert_eq!(params.number("length").unwrap(), 2.0);
//! assert!(FeatureVariant::Cantilever.validate_ranges(&params).is_ok());
//! ```

mod error;

pub use error::{LibraryError, Result};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use snapfit_geometry::{FeatureVariant, Location};
use snapfit_math::round_to;
use snapfit_params::{FieldGroup, ParameterSet};
use tracing::{debug, warn};

/// A stored record: parameter name → value.
pub type Record = BTreeMap<String, f64>;

/// Name of the built-in profile and gap profile.
pub const DEFAULT_NAME: &str = "default";

/// Decimal places kept when a record is stored.
const STORED_DECIMALS: i32 = 3;

/// The on-disk library document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileDocument {
    /// Name of the profile used when none is chosen.
    pub default_profile: String,
    /// Name of the gap profile used when none is chosen. `None` once the
    /// default gap profile has been deleted.
    pub default_gap_profile: Option<String>,
    /// Geometry profiles by name.
    pub profiles: BTreeMap<String, Record>,
    /// Gap profiles by name.
    pub gap_profiles: BTreeMap<String, Record>,
}

impl ProfileDocument {
    /// Serialize to a pretty-printed JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from a JSON string. Integers load as numbers.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check defaults and every record against `variant`'s schema.
    pub fn validate(&self, variant: FeatureVariant) -> Result<()> {
        if !self.profiles.contains_key(&self.default_profile) {
            return Err(LibraryError::UnknownProfile(self.default_profile.clone()));
        }
        if let Some(name) = &self.default_gap_profile {
            if !self.gap_profiles.contains_key(name) {
                return Err(LibraryError::UnknownGapProfile(name.clone()));
            }
        }

        let schema = variant.schema();
        let records = self
            .profiles
            .iter()
            .map(|entry| (FieldGroup::Geometry, entry))
            .chain(self.gap_profiles.iter().map(|entry| (FieldGroup::Gap, entry)));
        for (group, (name, record)) in records {
            schema
                .validate_group(group, &to_set(record))
                .map_err(|source| LibraryError::Invalid {
                    entry: name.clone(),
                    variant,
                    source,
                })?;
        }
        Ok(())
    }
}

fn to_set(record: &Record) -> ParameterSet {
    record.iter().map(|(k, v)| (k.as_str(), *v)).collect()
}

/// A validated [`ProfileDocument`] bound to one feature family.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileLibrary {
    variant: FeatureVariant,
    document: ProfileDocument,
}

impl ProfileLibrary {
    /// Bind `document` to `variant` after validating it.
    pub fn new(variant: FeatureVariant, document: ProfileDocument) -> Result<Self> {
        document.validate(variant)?;
        Ok(Self { variant, document })
    }

    /// The built-in library: the family's stock presets under [`DEFAULT_NAME`].
    pub fn fallback(variant: FeatureVariant) -> Self {
        let numbers = |set: ParameterSet| -> Record {
            set.iter()
                .filter_map(|(k, v)| v.as_number().map(|n| (k.to_string(), n)))
                .collect()
        };
        let document = ProfileDocument {
            default_profile: DEFAULT_NAME.to_string(),
            default_gap_profile: Some(DEFAULT_NAME.to_string()),
            profiles: BTreeMap::from([(
                DEFAULT_NAME.to_string(),
                numbers(variant.default_geometry()),
            )]),
            gap_profiles: BTreeMap::from([(
                DEFAULT_NAME.to_string(),
                numbers(variant.default_gaps()),
            )]),
        };
        Self { variant, document }
    }

    /// Read and validate a library file.
    pub fn load(path: &Path, variant: FeatureVariant) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let library = Self::new(variant, ProfileDocument::from_json(&json)?)?;
        debug!(
            path = %path.display(),
            profiles = library.document.profiles.len(),
            gap_profiles = library.document.gap_profiles.len(),
            "loaded profile library"
        );
        Ok(library)
    }

    /// Like [`ProfileLibrary::load`], replacing an unreadable or invalid file
    /// with [`ProfileLibrary::fallback`].
    pub fn load_or_fallback(path: &Path, variant: FeatureVariant) -> Self {
        match Self::load(path, variant) {
            Ok(library) => library,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    %variant,
                    error = %err,
                    "profile library rejected, using built-in presets"
                );
                Self::fallback(variant)
            }
        }
    }

    /// Write the library as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.document.to_json()?)?;
        Ok(())
    }

    /// Family the library is bound to.
    pub fn variant(&self) -> FeatureVariant {
        self.variant
    }

    /// The underlying document.
    pub fn document(&self) -> &ProfileDocument {
        &self.document
    }

    /// Name of the default profile.
    pub fn default_profile(&self) -> &str {
        &self.document.default_profile
    }

    /// Name of the default gap profile, if one is set.
    pub fn default_gap_profile(&self) -> Option<&str> {
        self.document.default_gap_profile.as_deref()
    }

    /// Profile names in sorted order.
    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.document.profiles.keys().map(String::as_str)
    }

    /// Gap profile names in sorted order.
    pub fn gap_profile_names(&self) -> impl Iterator<Item = &str> {
        self.document.gap_profiles.keys().map(String::as_str)
    }

    /// Look up a profile.
    pub fn profile(&self, name: &str) -> Option<&Record> {
        self.document.profiles.get(name)
    }

    /// Look up a gap profile.
    pub fn gap_profile(&self, name: &str) -> Option<&Record> {
        self.document.gap_profiles.get(name)
    }

    /// Pick the `group` keys out of `values`, rounded for storage.
    ///
    /// `values` may be a complete parameter set; keys of other groups are
    /// ignored.
    fn capture(&self, name: &str, group: FieldGroup, values: &ParameterSet) -> Result<Record> {
        let invalid = |source| LibraryError::Invalid {
            entry: name.to_string(),
            variant: self.variant,
            source,
        };
        self.variant
            .schema()
            .keys_in(group)
            .map(|key| {
                let value = values.number(key).map_err(invalid)?;
                Ok((key.to_string(), round_to(value, STORED_DECIMALS)))
            })
            .collect()
    }

    /// Store `values` as a new profile.
    pub fn create_profile(&mut self, name: &str, values: &ParameterSet) -> Result<()> {
        if self.document.profiles.contains_key(name) {
            return Err(LibraryError::DuplicateName(name.to_string()));
        }
        let record = self.capture(name, FieldGroup::Geometry, values)?;
        self.document.profiles.insert(name.to_string(), record);
        Ok(())
    }

    /// Replace the values of an existing profile.
    pub fn overwrite_profile(&mut self, name: &str, values: &ParameterSet) -> Result<()> {
        if !self.document.profiles.contains_key(name) {
            return Err(LibraryError::UnknownProfile(name.to_string()));
        }
        let record = self.capture(name, FieldGroup::Geometry, values)?;
        self.document.profiles.insert(name.to_string(), record);
        Ok(())
    }

    /// Make an existing profile the default.
    pub fn set_default_profile(&mut self, name: &str) -> Result<()> {
        if !self.document.profiles.contains_key(name) {
            return Err(LibraryError::UnknownProfile(name.to_string()));
        }
        self.document.default_profile = name.to_string();
        Ok(())
    }

    /// Remove a profile. The default profile cannot be removed.
    pub fn delete_profile(&mut self, name: &str) -> Result<()> {
        if self.document.default_profile == name {
            return Err(LibraryError::DeleteDefault(name.to_string()));
        }
        self.document
            .profiles
            .remove(name)
            .map(drop)
            .ok_or_else(|| LibraryError::UnknownProfile(name.to_string()))
    }

    /// Store `values` as a new gap profile.
    pub fn create_gap_profile(&mut self, name: &str, values: &ParameterSet) -> Result<()> {
        if self.document.gap_profiles.contains_key(name) {
            return Err(LibraryError::DuplicateName(name.to_string()));
        }
        let record = self.capture(name, FieldGroup::Gap, values)?;
        self.document.gap_profiles.insert(name.to_string(), record);
        Ok(())
    }

    /// Replace the values of an existing gap profile.
    pub fn overwrite_gap_profile(&mut self, name: &str, values: &ParameterSet) -> Result<()> {
        if !self.document.gap_profiles.contains_key(name) {
            return Err(LibraryError::UnknownGapProfile(name.to_string()));
        }
        let record = self.capture(name, FieldGroup::Gap, values)?;
        self.document.gap_profiles.insert(name.to_string(), record);
        Ok(())
    }

    /// Make an existing gap profile the default.
    pub fn set_default_gap_profile(&mut self, name: &str) -> Result<()> {
        if !self.document.gap_profiles.contains_key(name) {
            return Err(LibraryError::UnknownGapProfile(name.to_string()));
        }
        self.document.default_gap_profile = Some(name.to_string());
        Ok(())
    }

    /// Remove a gap profile. Removing the default leaves no default set.
    pub fn delete_gap_profile(&mut self, name: &str) -> Result<()> {
        if self.document.gap_profiles.remove(name).is_none() {
            return Err(LibraryError::UnknownGapProfile(name.to_string()));
        }
        if self.document.default_gap_profile.as_deref() == Some(name) {
            self.document.default_gap_profile = None;
        }
        Ok(())
    }

    /// Assemble a complete parameter set from a profile, a gap profile and
    /// a placement.
    ///
    /// `None` selects the default. With no default gap profile set, the
    /// family's stock gaps are used.
    pub fn resolve(
        &self,
        profile: Option<&str>,
        gap_profile: Option<&str>,
        x_location: Location,
        y_location: Location,
    ) -> Result<ParameterSet> {
        let name = profile.unwrap_or(self.default_profile());
        let geometry = self
            .profile(name)
            .ok_or_else(|| LibraryError::UnknownProfile(name.to_string()))?;

        let gaps = match gap_profile.or(self.default_gap_profile()) {
            Some(name) => to_set(
                self.gap_profile(name)
                    .ok_or_else(|| LibraryError::UnknownGapProfile(name.to_string()))?,
            ),
            None => self.variant.default_gaps(),
        };

        Ok(to_set(geometry)
            .merged(&gaps)
            .with("x_location", x_location.as_str())
            .with("y_location", y_location.as_str()))
    }
}
