//! Scenario record loader.
//!
//! Scenarios live in a single XML document:
//!
//! ```xml
//! <missions>
//!   <element>
//!     <name>Airport run</name>
//!     <description>First line|Second line</description>
//!     <ped><hash>1830688247</hash><position><x>1</x><y>2</y><z>3</z><t>90</t></position></ped>
//!     <vehicle><hash>bus</hash><position>...</position></vehicle>
//!     <destination><position><x>..</x><y>..</y><z>..</z></position></destination>
//!     <money>150</money>
//!   </element>
//! </missions>
//! ```
//!
//! Every accessor on [`ScenarioView`] absorbs its own faults: a missing node
//! or malformed number yields the sentinel from [`ScenarioRecord`] and a
//! tagged diagnostic, never an error.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use mission_core::{
    Axis, ElementKind, EntitySpawnSpec, ModelId, Position, ResolvedScenario, ScenarioError,
    ScenarioRecord, ScenarioSource,
};
use roxmltree::{Document, Node};

const SCENARIO_TAG: &str = "element";
const NAME_TAG: &str = "name";
const DESCRIPTION_TAG: &str = "description";
const HASH_TAG: &str = "hash";
const POSITION_TAG: &str = "position";
const MONEY_TAG: &str = "money";
/// Nested reward field names, in lookup order.
const AMOUNT_TAGS: [&str; 2] = ["ammount", "amount"];

/// Reward encodings, tried in order; the first that parses wins.
const REWARD_PARSERS: [fn(Node<'_, '_>) -> Option<i32>; 2] = [bare_amount, nested_amount];

/// Parsed scenario document.
pub struct ScenarioDocument<'input> {
    doc: Document<'input>,
}

impl<'input> ScenarioDocument<'input> {
    pub fn parse(text: &'input str) -> Result<Self, ScenarioError> {
        let doc = Document::parse(text).map_err(|e| ScenarioError::Load {
            reason: e.to_string(),
        })?;
        Ok(Self { doc })
    }

    /// Scenario names in document order.
    pub fn names(&self) -> Vec<String> {
        self.scenarios()
            .filter_map(|scenario| child(scenario, NAME_TAG))
            .map(|name| inner_text(name).trim().to_string())
            .collect()
    }

    /// View over the scenario named exactly `name`.
    pub fn scenario<'a>(&'a self, name: &str) -> ScenarioView<'a, 'input> {
        let mut matches = self.scenarios().filter(|scenario| {
            child(*scenario, NAME_TAG).is_some_and(|n| inner_text(n).trim() == name)
        });
        let element = matches.next();
        let duplicates = matches.count();
        ScenarioView {
            name: name.to_string(),
            element,
            matches: element.map_or(0, |_| 1 + duplicates),
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    fn scenarios<'a>(&'a self) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
        children(self.doc.root_element(), SCENARIO_TAG)
    }
}

/// Fault-tolerant accessors over one scenario record.
pub struct ScenarioView<'a, 'input> {
    name: String,
    element: Option<Node<'a, 'input>>,
    matches: usize,
    diagnostics: RefCell<Vec<String>>,
}

impl<'a, 'input> ScenarioView<'a, 'input> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exists(&self) -> bool {
        self.element.is_some()
    }

    /// Raw description text; empty when absent.
    pub fn description(&self) -> String {
        let Some(element) = self.element(|| "GET_DESC_ERROR".to_string()) else {
            return String::new();
        };
        child(element, DESCRIPTION_TAG)
            .map(|node| inner_text(node).trim().to_string())
            .unwrap_or_default()
    }

    /// Number of passenger sub-records, or `-1`.
    pub fn passenger_count(&self) -> i32 {
        let Some(element) = self.element(|| "GET_PED_NUMBER_ERROR".to_string()) else {
            return ScenarioRecord::MISSING_NUMBER;
        };
        children(element, ElementKind::Passenger.tag()).count() as i32
    }

    /// Numeric model hash of passenger `index`, or `-1`.
    pub fn passenger_hash(&self, index: usize) -> i32 {
        let tag = || format!("GET_HASH_ERROR: {} {}", ElementKind::Passenger, index);
        let Some(element) = self.element(tag) else {
            return ScenarioRecord::MISSING_NUMBER;
        };
        let text = children(element, ElementKind::Passenger.tag())
            .nth(index)
            .and_then(|ped| child(ped, HASH_TAG))
            .map(inner_text);
        match text.as_deref().map(str::trim).map(str::parse::<i32>) {
            Some(Ok(hash)) => hash,
            _ => {
                self.report(tag());
                ScenarioRecord::MISSING_NUMBER
            }
        }
    }

    /// Model of vehicle `index`; the default bus when absent.
    pub fn vehicle_hash(&self, index: usize) -> ModelId {
        let tag = || format!("GET_VEHICLE_HASH_ERROR: {index}");
        let fallback = || ModelId::Name(ScenarioRecord::DEFAULT_VEHICLE_MODEL.to_string());
        let Some(element) = self.element(tag) else {
            return fallback();
        };
        let model = children(element, ElementKind::Vehicle.tag())
            .nth(index)
            .and_then(|vehicle| child(vehicle, HASH_TAG))
            .and_then(|hash| ModelId::parse(&inner_text(hash)));
        model.unwrap_or_else(|| {
            self.report(tag());
            fallback()
        })
    }

    /// One coordinate of sub-record `index` of `kind`, or `100000.0`.
    pub fn coordinate(&self, kind: ElementKind, index: usize, axis: Axis) -> f32 {
        let tag = || format!("GET_COORDINATE_ERROR: {kind} {index} {axis}");
        let Some(element) = self.element(tag) else {
            return ScenarioRecord::MISSING_COORDINATE;
        };
        let text = children(element, kind.tag())
            .nth(index)
            .and_then(|record| child(record, POSITION_TAG))
            .and_then(|position| axis.tags().iter().find_map(|t| child(position, t)))
            .map(inner_text);
        match text.as_deref().map(str::trim).map(str::parse::<f32>) {
            Some(Ok(value)) if value.is_finite() => value,
            _ => {
                self.report(tag());
                ScenarioRecord::MISSING_COORDINATE
            }
        }
    }

    pub fn position(&self, kind: ElementKind, index: usize) -> Position {
        Position::new(
            self.coordinate(kind, index, Axis::X),
            self.coordinate(kind, index, Axis::Y),
            self.coordinate(kind, index, Axis::Z),
        )
    }

    pub fn spawn_spec(&self, kind: ElementKind, index: usize, model: ModelId) -> EntitySpawnSpec {
        EntitySpawnSpec::new(
            model,
            self.position(kind, index),
            self.coordinate(kind, index, Axis::Heading),
        )
    }

    /// Reward amount, bare (`<money>150</money>`) or nested
    /// (`<money><ammount>150</ammount></money>`); `-1` when neither parses.
    pub fn money_reward(&self) -> i32 {
        let tag = || "GET_MONEY_ERROR".to_string();
        let Some(element) = self.element(tag) else {
            return ScenarioRecord::MISSING_REWARD;
        };
        let reward = child(element, MONEY_TAG)
            .and_then(|money| REWARD_PARSERS.iter().find_map(|parse| parse(money)));
        reward.unwrap_or_else(|| {
            self.report(tag());
            ScenarioRecord::MISSING_REWARD
        })
    }

    /// Builds the full record. Fails only when the name does not match
    /// exactly one scenario.
    pub fn resolve(&self) -> Result<ResolvedScenario, ScenarioError> {
        match self.matches {
            0 => {
                return Err(ScenarioError::NotFound {
                    name: self.name.clone(),
                });
            }
            1 => {}
            count => {
                return Err(ScenarioError::Duplicate {
                    name: self.name.clone(),
                    count,
                });
            }
        }

        let passengers = (0..self.passenger_count().max(0) as usize)
            .map(|i| {
                let model = ModelId::Hash(self.passenger_hash(i));
                self.spawn_spec(ElementKind::Passenger, i, model)
            })
            .collect();
        let record = ScenarioRecord {
            name: self.name.clone(),
            description: ScenarioRecord::split_description(&self.description()),
            passengers,
            vehicle: self.spawn_spec(ElementKind::Vehicle, 0, self.vehicle_hash(0)),
            destination: self.position(ElementKind::Destination, 0),
            reward: self.money_reward(),
        };
        Ok(ResolvedScenario {
            record,
            diagnostics: self.take_diagnostics(),
        })
    }

    /// Drains diagnostics recorded by the accessors so far.
    pub fn take_diagnostics(&self) -> Vec<String> {
        self.diagnostics.take()
    }

    fn element(&self, tag: impl FnOnce() -> String) -> Option<Node<'a, 'input>> {
        if self.element.is_none() {
            self.report(format!("{}: scenario '{}' not found", tag(), self.name));
        }
        self.element
    }

    fn report(&self, message: String) {
        tracing::warn!("{}", message);
        self.diagnostics.borrow_mut().push(message);
    }
}

/// Scenario source backed by an XML file, re-read on every resolve.
#[derive(Clone, Debug)]
pub struct ScenarioDataStore {
    path: PathBuf,
}

impl ScenarioDataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<String, ScenarioError> {
        super::read_file(&self.path).map_err(|e| ScenarioError::Load {
            reason: e.to_string(),
        })
    }
}

impl ScenarioSource for ScenarioDataStore {
    fn resolve(&self, name: &str) -> Result<ResolvedScenario, ScenarioError> {
        let text = self.read()?;
        let document = ScenarioDocument::parse(&text)?;
        document.scenario(name).resolve()
    }

    fn names(&self) -> Vec<String> {
        let names = self
            .read()
            .and_then(|text| ScenarioDocument::parse(&text).map(|doc| doc.names()));
        names.unwrap_or_else(|err| {
            tracing::warn!("{}", err);
            Vec::new()
        })
    }
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.has_tag_name(tag))
}

fn child<'a, 'input: 'a>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.has_tag_name(tag))
}

/// Concatenated text of all descendants.
fn inner_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

fn bare_amount(money: Node<'_, '_>) -> Option<i32> {
    let own_text: String = money
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    own_text.trim().parse().ok()
}

fn nested_amount(money: Node<'_, '_>) -> Option<i32> {
    AMOUNT_TAGS
        .iter()
        .find_map(|tag| child(money, tag))
        .and_then(|amount| inner_text(amount).trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSIONS: &str = r#"
<missions>
  <element>
    <name>Airport run</name>
    <description>Three tourists need a lift. | Get them to the terminal.</description>
    <ped>
      <hash>1830688247</hash>
      <position><x>10.5</x><y>-20</y><z>30</z><t>90</t></position>
    </ped>
    <ped>
      <hash>-1038739309</hash>
      <position><x>12</x><y>-21</y><z>30</z><t>180</t></position>
    </ped>
    <vehicle>
      <hash>bus</hash>
      <position><x>0</x><y>0</y><z>29.5</z><t>45</t></position>
    </vehicle>
    <destination>
      <position><x>-1034.6</x><y>-2733.6</y><z>20.2</z></position>
    </destination>
    <money>150</money>
  </element>
  <element>
    <name>Legacy reward</name>
    <ped><hash>not-a-number</hash><position><x>1</x><y>oops</y><z>3</z></position></ped>
    <vehicle><hash>-713569950</hash></vehicle>
    <money><ammount>150</ammount></money>
  </element>
  <element>
    <name>Broken reward</name>
    <money>abc</money>
  </element>
  <element>
    <name>Amount spelling</name>
    <money><amount> 75 </amount></money>
  </element>
</missions>
"#;

    #[test]
    fn lists_names_in_document_order() {
        let doc = ScenarioDocument::parse(MISSIONS).unwrap();
        assert_eq!(
            doc.names(),
            vec!["Airport run", "Legacy reward", "Broken reward", "Amount spelling"]
        );
    }

    #[test]
    fn resolves_complete_record() {
        let doc = ScenarioDocument::parse(MISSIONS).unwrap();
        let resolved = doc.scenario("Airport run").resolve().unwrap();
        let record = resolved.record;

        assert!(resolved.diagnostics.is_empty(), "{:?}", resolved.diagnostics);
        assert_eq!(
            record.description,
            vec!["Three tourists need a lift.", "Get them to the terminal."]
        );
        assert_eq!(record.passengers.len(), 2);
        assert_eq!(record.passengers[0].model, ModelId::Hash(1830688247));
        assert_eq!(record.passengers[0].position, Position::new(10.5, -20.0, 30.0));
        assert_eq!(record.passengers[1].heading, 180.0);
        assert_eq!(record.vehicle.model, ModelId::Name("bus".into()));
        assert_eq!(record.vehicle.heading, 45.0);
        assert_eq!(record.destination, Position::new(-1034.6, -2733.6, 20.2));
        assert_eq!(record.reward, 150);
    }

    #[test]
    fn both_reward_encodings_agree() {
        let doc = ScenarioDocument::parse(MISSIONS).unwrap();
        assert_eq!(doc.scenario("Airport run").money_reward(), 150);
        assert_eq!(doc.scenario("Legacy reward").money_reward(), 150);
        assert_eq!(doc.scenario("Amount spelling").money_reward(), 75);
    }

    #[test]
    fn unparsable_reward_is_sentinel() {
        let doc = ScenarioDocument::parse(MISSIONS).unwrap();
        let view = doc.scenario("Broken reward");
        assert_eq!(view.money_reward(), -1);
        assert_eq!(view.take_diagnostics(), vec!["GET_MONEY_ERROR".to_string()]);
    }

    #[test]
    fn malformed_coordinates_are_sentinels() {
        let doc = ScenarioDocument::parse(MISSIONS).unwrap();
        let view = doc.scenario("Legacy reward");
        assert_eq!(view.coordinate(ElementKind::Passenger, 0, Axis::X), 1.0);
        assert_eq!(view.coordinate(ElementKind::Passenger, 0, Axis::Y), 100_000.0);
        assert_eq!(view.coordinate(ElementKind::Passenger, 0, Axis::Heading), 100_000.0);
        assert_eq!(view.coordinate(ElementKind::Vehicle, 0, Axis::Z), 100_000.0);
        assert_eq!(view.coordinate(ElementKind::Destination, 3, Axis::X), 100_000.0);
        assert_eq!(view.take_diagnostics().len(), 4);
    }

    #[test]
    fn malformed_hashes_are_sentinels() {
        let doc = ScenarioDocument::parse(MISSIONS).unwrap();
        let view = doc.scenario("Legacy reward");
        assert_eq!(view.passenger_hash(0), -1);
        assert_eq!(view.passenger_hash(7), -1);
        assert_eq!(view.vehicle_hash(0), ModelId::Hash(-713569950));
        assert_eq!(
            doc.scenario("Broken reward").vehicle_hash(0),
            ModelId::Name("bus".into())
        );
    }

    #[test]
    fn unknown_scenario_degrades_every_accessor() {
        let doc = ScenarioDocument::parse(MISSIONS).unwrap();
        let view = doc.scenario("Nowhere");
        assert!(!view.exists());
        assert_eq!(view.description(), "");
        assert_eq!(view.passenger_count(), -1);
        assert_eq!(view.passenger_hash(0), -1);
        assert_eq!(view.coordinate(ElementKind::Vehicle, 0, Axis::X), 100_000.0);
        assert_eq!(view.money_reward(), -1);
        assert_eq!(
            view.resolve(),
            Err(ScenarioError::NotFound {
                name: "Nowhere".into()
            })
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let xml = "<missions><element><name>A</name></element><element><name>A</name></element></missions>";
        let doc = ScenarioDocument::parse(xml).unwrap();
        assert_eq!(
            doc.scenario("A").resolve(),
            Err(ScenarioError::Duplicate {
                name: "A".into(),
                count: 2
            })
        );
    }

    #[test]
    fn unreadable_store_reports_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScenarioDataStore::new(dir.path().join("missing.xml"));
        let err = store.resolve("Airport run").unwrap_err();
        assert!(matches!(err, ScenarioError::Load { .. }));
        assert!(err.to_string().starts_with("Failed to load missions.xml"));
        assert!(store.names().is_empty());
    }

    #[test]
    fn store_rereads_file_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missions.xml");
        std::fs::write(&path, MISSIONS).unwrap();
        let store = ScenarioDataStore::new(&path);
        assert_eq!(store.resolve("Airport run").unwrap().record.reward, 150);

        std::fs::write(&path, MISSIONS.replace("<money>150</money>", "<money>300</money>")).unwrap();
        assert_eq!(store.resolve("Airport run").unwrap().record.reward, 300);
    }
}
