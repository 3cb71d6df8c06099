//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading facility and
//! leave policy configuration from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::calculation::LeavePolicy;
use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, EngineMetadata, FacilitiesConfig, Facility, PolicyConfig};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and resolves the leave policy in force for a facility on a date.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml          # Deployment metadata
/// ├── facilities.yaml      # Facilities (tenants)
/// └── policies/
///     └── 2024-01-01.yaml  # Leave policy effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// let policy = loader.leave_policy(Some("sakura_home"), today).unwrap();
/// println!("Deadline day: {}", policy.submission_deadline_day());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any deadline day is outside 1-31
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;
        let facilities = Self::load_yaml::<FacilitiesConfig>(&path.join("facilities.yaml"))?;
        let policies = Self::load_policies(&path.join("policies"))?;

        for policy in &policies {
            LeavePolicy::new(policy.submission_deadline_day)?;
            for (code, day) in &policy.facility_overrides {
                if !facilities.facilities.contains_key(code) {
                    return Err(EngineError::InvalidConfig {
                        message: format!(
                            "policy effective {} overrides unknown facility '{}'",
                            policy.effective_date, code
                        ),
                    });
                }
                LeavePolicy::new(*day)?;
            }
        }

        let config = EngineConfig::new(metadata, facilities.facilities, policies);

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all policy files from the policies directory.
    fn load_policies(policies_dir: &Path) -> EngineResult<Vec<PolicyConfig>> {
        let dir_str = policies_dir.display().to_string();

        let entries = fs::read_dir(policies_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut policies = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                policies.push(Self::load_yaml::<PolicyConfig>(&path)?);
            }
        }

        if policies.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no policy files found)", dir_str),
            });
        }

        Ok(policies)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the deployment metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Gets a facility by its code.
    ///
    /// # Returns
    ///
    /// Returns the facility if found, or `FacilityNotFound` error.
    pub fn get_facility(&self, code: &str) -> EngineResult<&Facility> {
        self.config
            .facilities()
            .get(code)
            .ok_or_else(|| EngineError::FacilityNotFound {
                code: code.to_string(),
            })
    }

    /// Resolves the leave policy in force for a facility on `date`.
    ///
    /// With `facility` set to `None` the policy default deadline is used.
    ///
    /// # Errors
    ///
    /// - `FacilityNotFound` if the facility code is unknown
    /// - `PolicyNotFound` if no policy is effective on or before `date`
    pub fn leave_policy(&self, facility: Option<&str>, date: NaiveDate) -> EngineResult<LeavePolicy> {
        if let Some(code) = facility {
            self.get_facility(code)?;
        }

        let policy = self
            .config
            .policy_in_force(date)
            .ok_or_else(|| EngineError::PolicyNotFound {
                facility: facility.unwrap_or("default").to_string(),
                date,
            })?;

        LeavePolicy::new(policy.deadline_day_for(facility))
    }
}
