//! Name interning.
//!
//! Each distinct name is assigned the next free index the first time it is
//! seen. There is no removal: an identifier stays valid for the lifetime of
//! the interner.

use std::collections::HashMap;
use std::marker::PhantomData;

use super::InternedId;
use crate::error::{Result, TopologyError};

/// Bidirectional name <-> identifier table
#[derive(Debug)]
pub struct Interner<T> {
    ids: HashMap<String, u32>,
    names: Vec<String>,
    _kind: PhantomData<T>,
}

impl<T: InternedId> Interner<T> {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            names: Vec::new(),
            _kind: PhantomData,
        }
    }

    /// Get the identifier for `name`, minting a new one if needed.
    ///
    /// Fails once every `u32` index has been handed out.
    pub fn intern(&mut self, name: &str) -> Result<T> {
        if let Some(&index) = self.ids.get(name) {
            return Ok(T::from_index(index));
        }

        let index = Self::index_for(self.names.len())?;
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), index);
        Ok(T::from_index(index))
    }

    fn index_for(position: usize) -> Result<u32> {
        u32::try_from(position).map_err(|_| TopologyError::IdentifierSpaceExhausted)
    }

    /// Get the identifier for `name` without minting
    pub fn lookup(&self, name: &str) -> Option<T> {
        self.ids.get(name).map(|&index| T::from_index(index))
    }

    /// Get the name an identifier was minted from
    pub fn resolve(&self, id: T) -> Option<&str> {
        self.names.get(id.index() as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<T: InternedId> Default for Interner<T> {
    fn default() -> Self {
        Self::new()
    }
}
