//! Configuration types for the Attendance Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

/// Metadata about the engine deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Short identifier for this configuration set.
    pub code: String,
    /// The human-readable name of the deployment.
    pub name: String,
    /// The version of the configuration set.
    pub version: String,
}

/// A care facility (tenant) known to the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct Facility {
    /// The human-readable name of the facility.
    pub name: String,
    /// A description of the facility.
    #[serde(default)]
    pub description: String,
}

/// Facilities configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct FacilitiesConfig {
    /// Map of facility code to facility details.
    pub facilities: HashMap<String, Facility>,
}

/// Leave submission policy in force from an effective date.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// The date from which this policy applies.
    pub effective_date: NaiveDate,
    /// Default day of month after which regular requests for next month close.
    pub submission_deadline_day: u32,
    /// Per-facility deadline days that replace the default.
    #[serde(default)]
    pub facility_overrides: HashMap<String, u32>,
}

impl PolicyConfig {
    /// Returns the deadline day for a facility, or the default when `None`.
    pub fn deadline_day_for(&self, facility: Option<&str>) -> u32 {
        facility
            .and_then(|code| self.facility_overrides.get(code).copied())
            .unwrap_or(self.submission_deadline_day)
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Deployment metadata.
    metadata: EngineMetadata,
    /// Facilities served by this deployment.
    facilities: HashMap<String, Facility>,
    /// Policies by effective date (sorted oldest first).
    policies: Vec<PolicyConfig>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        metadata: EngineMetadata,
        facilities: HashMap<String, Facility>,
        policies: Vec<PolicyConfig>,
    ) -> Self {
        let mut sorted_policies = policies;
        sorted_policies.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            facilities,
            policies: sorted_policies,
        }
    }

    /// Returns the deployment metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns all facilities.
    pub fn facilities(&self) -> &HashMap<String, Facility> {
        &self.facilities
    }

    /// Returns all policies, oldest first.
    pub fn policies(&self) -> &[PolicyConfig] {
        &self.policies
    }

    /// Returns the latest policy effective on or before `date`.
    pub fn policy_in_force(&self, date: NaiveDate) -> Option<&PolicyConfig> {
        self.policies
            .iter()
            .rev()
            .find(|policy| policy.effective_date <= date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(effective: &str, day: u32) -> PolicyConfig {
        PolicyConfig {
            effective_date: NaiveDate::parse_from_str(effective, "%Y-%m-%d").unwrap(),
            submission_deadline_day: day,
            facility_overrides: HashMap::new(),
        }
    }

    fn metadata() -> EngineMetadata {
        EngineMetadata {
            code: "test".to_string(),
            name: "Test".to_string(),
            version: "1".to_string(),
        }
    }

    #[test]
    fn test_policies_sorted_on_construction() {
        let config = EngineConfig::new(
            metadata(),
            HashMap::new(),
            vec![policy("2025-04-01", 18), policy("2024-01-01", 20)],
        );

        let dates: Vec<String> = config
            .policies()
            .iter()
            .map(|p| p.effective_date.to_string())
            .collect();
        assert_eq!(dates, vec!["2024-01-01", "2025-04-01"]);
    }

    #[test]
    fn test_policy_in_force_picks_latest_effective() {
        let config = EngineConfig::new(
            metadata(),
            HashMap::new(),
            vec![policy("2024-01-01", 20), policy("2025-04-01", 18)],
        );

        let date = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        assert!(config.policy_in_force(date("2023-12-31")).is_none());
        assert_eq!(
            config
                .policy_in_force(date("2025-03-31"))
                .unwrap()
                .submission_deadline_day,
            20
        );
        assert_eq!(
            config
                .policy_in_force(date("2025-04-01"))
                .unwrap()
                .submission_deadline_day,
            18
        );
    }

    #[test]
    fn test_deadline_day_override() {
        let mut p = policy("2024-01-01", 20);
        p.facility_overrides.insert("sakura_home".to_string(), 15);

        assert_eq!(p.deadline_day_for(Some("sakura_home")), 15);
        assert_eq!(p.deadline_day_for(Some("midori_care")), 20);
        assert_eq!(p.deadline_day_for(None), 20);
    }

    #[test]
    fn test_policy_yaml_overrides_default_to_empty() {
        let yaml = "effective_date: 2024-01-01\nsubmission_deadline_day: 20\n";
        let parsed: PolicyConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(parsed.facility_overrides.is_empty());
        assert_eq!(parsed.submission_deadline_day, 20);
    }
}
