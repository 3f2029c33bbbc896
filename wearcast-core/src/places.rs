//! Saved places, newest first, persisted as a JSON array.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{config::Config, model::Place};

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceBook {
    path: PathBuf,
    places: Vec<Place>,
}

impl PlaceBook {
    /// Empty book that will be written to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), places: Vec::new() }
    }

    /// Load the book from the platform data directory.
    pub fn load_default() -> Result<Self> {
        Self::load(&Config::places_file_path()?)
    }

    /// Load from `path`; a missing file is an empty book.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::empty(path));
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read places file: {}", path.display()))?;

        let places: Vec<Place> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse places file: {}", path.display()))?;

        Ok(Self { path: path.to_path_buf(), places })
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(&self.places)
            .context("Failed to serialize saved places")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write places file: {}", self.path.display()))?;

        Ok(())
    }

    /// Insert at the front. Returns `false` and leaves the book untouched if
    /// the postal code is already saved.
    pub fn add(&mut self, place: Place) -> bool {
        if self.get(&place.zip).is_some() {
            return false;
        }
        self.places.insert(0, place);
        true
    }

    /// Remove by postal code, returning the removed place.
    pub fn remove(&mut self, zip: &str) -> Option<Place> {
        let idx = self.places.iter().position(|p| p.zip == zip)?;
        Some(self.places.remove(idx))
    }

    pub fn get(&self, zip: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.zip == zip)
    }

    pub fn most_recent(&self) -> Option<&Place> {
        self.places.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.places.iter()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
