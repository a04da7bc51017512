//! External creature records, in the catalog service's wire shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::core::error::CatalogError;
use crate::data::moves::yaml_to_json;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NamedResource {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            url: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveEntry {
    #[serde(rename = "move")]
    pub entry: NamedResource,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilityEntry {
    #[serde(default)]
    pub is_hidden: bool,
    pub slot: u8,
    pub ability: NamedResource,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
    #[serde(default)]
    pub abilities: Vec<AbilityEntry>,
}

#[derive(Clone, Debug, Default)]
pub struct SpeciesDatabase {
    species: HashMap<String, SpeciesRecord>,
}

impl SpeciesDatabase {
    pub fn new() -> Self {
        Self {
            species: HashMap::new(),
        }
    }

    pub fn insert(&mut self, record: SpeciesRecord) {
        self.species.insert(record.name.clone(), record);
    }

    pub fn get(&self, name: &str) -> Option<&SpeciesRecord> {
        self.species.get(name)
    }

    pub fn as_map(&self) -> &HashMap<String, SpeciesRecord> {
        &self.species
    }

    /// Records sorted by catalog id.
    pub fn sorted(&self) -> Vec<&SpeciesRecord> {
        let mut list: Vec<_> = self.species.values().collect();
        list.sort_by_key(|s| s.id);
        list
    }

    /// Accepts a list of records, a map keyed by name, or `{ "species": ... }`.
    pub fn load_from_json_value(value: Value) -> Result<Self, CatalogError> {
        let value = match value {
            Value::Object(mut obj) if obj.contains_key("species") => {
                obj.remove("species").unwrap_or(Value::Null)
            }
            other => other,
        };
        let records: Vec<SpeciesRecord> = match value {
            Value::Array(_) => serde_json::from_value(value)?,
            Value::Object(map) => map
                .into_iter()
                .map(|(_, v)| serde_json::from_value(v))
                .collect::<Result<_, _>>()?,
            other => serde_json::from_value(Value::Array(vec![other]))?,
        };
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

    pub fn load_default() -> Result<Self, CatalogError> {
        const DEFAULT_SPECIES_YAML: &str = include_str!("../../data/species.yaml");
        Self::load_from_yaml_str(DEFAULT_SPECIES_YAML)
    }
}
