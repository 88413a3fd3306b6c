use crate::error::ScenarioError;
use crate::state::ScenarioRecord;

/// A scenario record plus the data faults absorbed while reading it.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedScenario {
    pub record: ScenarioRecord,
    /// Tagged messages such as `GET_COORDINATE_ERROR: ped 0 x`.
    pub diagnostics: Vec<String>,
}

impl ResolvedScenario {
    pub fn clean(record: ScenarioRecord) -> Self {
        Self {
            record,
            diagnostics: Vec::new(),
        }
    }
}

/// Resolves scenario records by exact name.
///
/// Implementations re-read their backing data on every call: authored
/// scenarios may change between runs.
pub trait ScenarioSource {
    fn resolve(&self, name: &str) -> Result<ResolvedScenario, ScenarioError>;

    /// All scenario names in authoring order.
    fn names(&self) -> Vec<String>;
}
