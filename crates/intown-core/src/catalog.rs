//! The read-only shop, plan, and category catalog.
//!
//! A [`Catalog`] is built once at startup and shared behind an `Arc`. It has
//! no mutating methods.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::ConfigError;

const BUILTIN_CATALOG: &str = include_str!("../../../config/catalog.yaml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub category: String,
    pub lat: f64,
    pub lng: f64,
    pub price: f64,
    pub savings: f64,
    pub address: String,
}

impl Shop {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// Case-insensitive exact category match.
    #[must_use]
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub price_per_month: f64,
    pub benefits: Vec<String>,
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    shops: Vec<Shop>,
    #[serde(default)]
    plans: Vec<Plan>,
    #[serde(default)]
    categories: Vec<Category>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    shops: Vec<Shop>,
    plans: Vec<Plan>,
    categories: Vec<Category>,
}

impl Catalog {
    /// The catalog compiled into the binary from `config/catalog.yaml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the embedded YAML fails to parse or validate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::CatalogFileParse` on malformed YAML and
    /// `ConfigError::Validation` on blank or duplicate ids.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        validate(&file)?;
        Ok(Self {
            shops: file.shops,
            plans: file.plans,
            categories: file.categories,
        })
    }

    /// Load and validate a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load from `path` when given, otherwise fall back to [`Catalog::builtin`].
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Catalog::load`] and [`Catalog::builtin`].
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, ConfigError> {
        let catalog = match path {
            Some(path) => Self::load(path)?,
            None => Self::builtin()?,
        };
        tracing::info!(
            source = %path.map_or_else(|| "builtin".to_string(), |p| p.display().to_string()),
            shops = catalog.shops.len(),
            plans = catalog.plans.len(),
            categories = catalog.categories.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    #[must_use]
    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    #[must_use]
    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn shop(&self, id: &str) -> Option<&Shop> {
        self.shops.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn plan(&self, id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }
}

fn validate(file: &CatalogFile) -> Result<(), ConfigError> {
    check_unique("shop", file.shops.iter().map(|s| (s.id.as_str(), s.name.as_str())))?;
    check_unique("plan", file.plans.iter().map(|p| (p.id.as_str(), p.name.as_str())))?;
    check_unique(
        "category",
        file.categories.iter().map(|c| (c.id.as_str(), c.name.as_str())),
    )?;

    for shop in &file.shops {
        if shop.category.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "shop '{}' has an empty category",
                shop.id
            )));
        }
        if !shop.lat.is_finite() || !shop.lng.is_finite() {
            return Err(ConfigError::Validation(format!(
                "shop '{}' has non-finite coordinates",
                shop.id
            )));
        }
    }

    Ok(())
}

fn check_unique<'a>(
    kind: &str,
    entries: impl Iterator<Item = (&'a str, &'a str)>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for (id, name) in entries {
        if id.trim().is_empty() {
            return Err(ConfigError::Validation(format!("{kind} id must be non-empty")));
        }
        if name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{kind} '{id}' must have a non-empty name"
            )));
        }
        if !seen.insert(id) {
            return Err(ConfigError::Validation(format!("duplicate {kind} id: '{id}'")));
        }
    }
    Ok(())
}
