use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::error::CatalogError;
use crate::data::species::NamedResource;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveMeta {
    #[serde(default)]
    pub ailment: Option<NamedResource>,
    #[serde(default)]
    pub ailment_chance: u8,
    /// Positive drains, negative is recoil, as a percent of damage dealt.
    #[serde(default)]
    pub drain: i16,
    /// Percent of the user's max HP restored.
    #[serde(default)]
    pub healing: i16,
    #[serde(default)]
    pub stat_chance: u8,
    /// Effect category such as `damage+raise` or `damage+lower`.
    #[serde(default)]
    pub category: Option<NamedResource>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatChangeEntry {
    pub change: i8,
    pub stat: NamedResource,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub element: NamedResource,
    #[serde(default)]
    pub power: Option<u16>,
    #[serde(default)]
    pub accuracy: Option<u8>,
    #[serde(default)]
    pub pp: Option<u8>,
    #[serde(default)]
    pub priority: i8,
    pub damage_class: NamedResource,
    #[serde(default)]
    pub effect_chance: Option<u8>,
    #[serde(default)]
    pub meta: Option<MoveMeta>,
    #[serde(default)]
    pub stat_changes: Vec<StatChangeEntry>,
    #[serde(default)]
    pub target: Option<NamedResource>,
}

#[derive(Clone, Debug, Default)]
pub struct MoveDatabase {
    moves: HashMap<String, MoveRecord>,
}

impl MoveDatabase {
    pub fn new() -> Self {
        Self {
            moves: HashMap::new(),
        }
    }

    pub fn load_default() -> Result<Self, CatalogError> {
        const DEFAULT_MOVES_YAML: &str = include_str!("../../data/moves.yaml");
        Self::load_from_yaml_str(DEFAULT_MOVES_YAML)
    }

    pub fn insert(&mut self, record: MoveRecord) {
        self.moves.insert(record.name.clone(), record);
    }

    pub fn get(&self, name: &str) -> Option<&MoveRecord> {
        self.moves.get(name)
    }

    pub fn as_map(&self) -> &HashMap<String, MoveRecord> {
        &self.moves
    }

    pub fn load_from_json_value(value: Value) -> Result<Self, CatalogError> {
        let value = match value {
            Value::Object(mut obj) if obj.contains_key("moves") => {
                obj.remove("moves").unwrap_or(Value::Null)
            }
            other => other,
        };

        let map_result: Result<HashMap<String, MoveRecord>, _> =
            serde_json::from_value(value.clone());
        if let Ok(map) = map_result {
            let mut db = Self::new();
            for (_, record) in map {
                db.insert(record);
            }
            return Ok(db);
        }

        let records: Vec<MoveRecord> = serde_json::from_value(value)?;
        let mut db = Self::new();
        for record in records {
            db.insert(record);
        }
        Ok(db)
    }

    pub fn load_from_json_str(json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        Self::load_from_json_value(value)
    }

    pub fn load_from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        // Go through serde_json so both formats share one set of rules.
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        Self::load_from_json_value(yaml_to_json(yaml_value))
    }

    pub fn load_from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::load_from_json_str(&content),
            _ => Self::load_from_yaml_str(&content),
        }
    }
}

/// Convert serde_yaml::Value to serde_json::Value
pub(crate) fn yaml_to_json(yaml: serde_yaml::Value) -> Value {
    match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            } else {
                Value::Null
            }
        }
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(seq) => Value::Array(seq.into_iter().map(yaml_to_json).collect()),
        serde_yaml::Value::Mapping(map) => {
            let obj: serde_json::Map<String, Value> = map
                .into_iter()
                .filter_map(|(k, v)| {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        _ => return None,
                    };
                    Some((key, yaml_to_json(v)))
                })
                .collect();
            Value::Object(obj)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}
