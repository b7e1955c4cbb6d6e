use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Ordered, deduplicated set of entity ids.
///
/// Catalog payloads reference parents either as a bare number or as an array
/// of numbers (`modalidadIds`, `nivelId`). Both shapes, as well as `null`,
/// deserialize into this one representation so filtering code never has to
/// inspect the wire shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IdSet(BTreeSet<u32>);

impl IdSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(id: u32) -> Self {
        Self(BTreeSet::from([id]))
    }

    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    pub fn insert(&mut self, id: u32) -> bool {
        self.0.insert(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<u32> for IdSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for IdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for id in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{id}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireIds {
    One(u32),
    Many(Vec<Option<u32>>),
}

impl<'de> Deserialize<'de> for IdSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = match Option::<WireIds>::deserialize(deserializer)? {
            None => Self::new(),
            Some(WireIds::One(id)) => Self::single(id),
            Some(WireIds::Many(ids)) => ids.into_iter().flatten().collect(),
        };
        Ok(ids)
    }
}
