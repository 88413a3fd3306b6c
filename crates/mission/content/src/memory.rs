//! In-memory scenario source for hosts and tests that build records in code.

use mission_core::{ResolvedScenario, ScenarioError, ScenarioRecord, ScenarioSource};

#[derive(Clone, Debug, Default)]
pub struct StaticScenarioSource {
    records: Vec<ScenarioRecord>,
}

impl StaticScenarioSource {
    pub fn new(records: Vec<ScenarioRecord>) -> Self {
        Self { records }
    }

    pub fn with(mut self, record: ScenarioRecord) -> Self {
        self.records.push(record);
        self
    }

    pub fn records(&self) -> &[ScenarioRecord] {
        &self.records
    }
}

impl ScenarioSource for StaticScenarioSource {
    fn resolve(&self, name: &str) -> Result<ResolvedScenario, ScenarioError> {
        let mut matches = self.records.iter().filter(|record| record.name == name);
        match (matches.next(), matches.count()) {
            (None, _) => Err(ScenarioError::NotFound {
                name: name.to_string(),
            }),
            (Some(record), 0) => Ok(ResolvedScenario::clean(record.clone())),
            (Some(_), extra) => Err(ScenarioError::Duplicate {
                name: name.to_string(),
                count: extra + 1,
            }),
        }
    }

    fn names(&self) -> Vec<String> {
        self.records.iter().map(|record| record.name.clone()).collect()
    }
}
