//! Vercel scoping variables passed to every Vercel CLI launch

use std::collections::BTreeMap;

use crate::types::InputConfig;

/// Variable selecting the Vercel team / account
pub const ORG_ID_VAR: &str = "VERCEL_ORG_ID";
/// Variable selecting the Vercel project
pub const PROJECT_ID_VAR: &str = "VERCEL_PROJECT_ID";

/// Environment overrides merged into a subprocess environment.
///
/// The process environment itself is never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides(BTreeMap<String, String>);

impl EnvOverrides {
    /// Value of an override
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of overrides
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is overridden
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Collect the org / project ids that are configured
pub fn vercel_env(config: &InputConfig<'_>) -> EnvOverrides {
    tracing::info!("[Set env starts]");
    let mut vars = BTreeMap::new();
    if let Some(org_id) = &config.vercel_org_id {
        vars.insert(ORG_ID_VAR.to_string(), org_id.to_string());
    }
    if let Some(project_id) = &config.vercel_project_id {
        vars.insert(PROJECT_ID_VAR.to_string(), project_id.to_string());
    }
    tracing::info!("[Set env ends]");
    EnvOverrides(vars)
}
