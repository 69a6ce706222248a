// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Mutable in-memory model store
//!
//! A `Model` owns the entity graph of one loaded IFC file and hands out
//! fresh express ids for entities created at runtime. The query/mutation
//! surface is async: each store access is a suspension point, and callers
//! await them strictly in issue order. There is no internal locking; the
//! store is single-writer by construction.

use crate::error::{Error, Result};
use crate::parser::{parse_entity, EntityScanner};
use crate::schema::IfcType;
use crate::value::{AttrValue, EntityInstance};
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};

/// Mapping of model id to a set of targeted express ids
///
/// The shape shared by selections, highlight groups and restriction sets.
pub type ElementIdMap = FxHashMap<String, FxHashSet<u32>>;

/// One loaded model: an owned entity graph keyed by express id
#[derive(Debug)]
pub struct Model {
    entities: FxHashMap<u32, EntityInstance>,
    next_id: u32,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Create an empty model
    pub fn new() -> Self {
        Self {
            entities: FxHashMap::default(),
            next_id: 1,
        }
    }

    /// Build a model from STEP file content
    ///
    /// Scans the whole content for entity lines and parses each one.
    /// Malformed lines are skipped with a warning; they never abort the load.
    pub fn from_step(content: &str) -> Self {
        let estimated = content.len() / 50;
        let mut entities =
            FxHashMap::with_capacity_and_hasher(estimated, Default::default());
        let mut next_id = 1;

        for (id, line) in EntityScanner::new(content) {
            match parse_entity(line) {
                Ok(entity) => {
                    next_id = next_id.max(id + 1);
                    entities.insert(id, entity);
                }
                Err(e) => {
                    tracing::warn!(id, error = %e, "skipping malformed entity line");
                }
            }
        }

        Self { entities, next_id }
    }

    /// Fetch the attributes of an entity
    /// Returns None for ids the graph does not know.
    pub async fn attributes(&self, id: u32) -> Option<&EntityInstance> {
        self.entities.get(&id)
    }

    /// Register an entity with the graph
    ///
    /// An instance with id 0 receives a fresh express id; an instance that
    /// carries one keeps it and replaces any previous entity under that id.
    /// Returns the id the entity ended up under.
    pub async fn register(&mut self, mut entity: EntityInstance) -> u32 {
        if entity.id == 0 {
            entity.id = self.next_id;
        }
        let id = entity.id;
        self.next_id = self.next_id.max(id + 1);
        self.entities.insert(id, entity);
        id
    }

    /// Append a value to a list attribute of an existing entity
    pub async fn push_list_item(&mut self, id: u32, index: usize, value: AttrValue) -> Result<()> {
        let entity = self
            .entities
            .get_mut(&id)
            .ok_or(Error::EntityNotFound(id))?;
        entity
            .get_list_mut(index)
            .ok_or(Error::NotAList { id, index })?
            .push(value);
        Ok(())
    }

    /// Iterate all entities (arbitrary order)
    pub fn entities(&self) -> impl Iterator<Item = &EntityInstance> {
        self.entities.values()
    }

    /// Express ids of all entities of one type, ascending
    pub fn ids_of_type(&self, ifc_type: IfcType) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .entities
            .values()
            .filter(|e| e.ifc_type == ifc_type)
            .map(|e| e.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Check whether an entity exists
    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.entities.contains_key(&id)
    }

    /// Number of entities in the graph
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Collection of loaded models keyed by model id, in load order
#[derive(Debug, Default)]
pub struct ModelStore {
    models: IndexMap<String, Model>,
}

impl ModelStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            models: IndexMap::new(),
        }
    }

    /// Load a model from STEP content under the given id
    pub fn load(&mut self, id: impl Into<String>, content: &str) -> &Model {
        let id = id.into();
        let model = Model::from_step(content);
        tracing::debug!(model = %id, entities = model.len(), "model loaded");
        self.models.insert(id.clone(), model);
        &self.models[&id]
    }

    /// Insert an already-built model
    pub fn insert(&mut self, id: impl Into<String>, model: Model) {
        self.models.insert(id.into(), model);
    }

    /// Get a model by id
    pub fn get(&self, id: &str) -> Option<&Model> {
        self.models.get(id)
    }

    /// Get a model by id, mutably
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Model> {
        self.models.get_mut(id)
    }

    /// Iterate (model id, model) pairs in load order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Model)> {
        self.models.iter()
    }

    /// Number of loaded models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if no models are loaded
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
