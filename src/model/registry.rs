//! Model registry: every registered model, validated and classified by capability.

use crate::case::{plural_slug, underscore};
use crate::error::RegistrationError;
use crate::magic::{is_magic, root_name};
use crate::model::{ModelDefinition, ModelManifest};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{LazyLock, OnceLock};

static MODEL_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("valid regex"));
static SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z0-9_]+$").expect("valid regex"));

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub name: String,
    /// Underscored name; registry order is lexicographic on this.
    pub source_id: String,
    pub plural_slug: String,
    pub is_queryable: bool,
    pub is_searchable: bool,
    pub fields: Vec<String>,
    pub basic_fields: Vec<String>,
    pub search_fields: Vec<String>,
}

impl ModelDescriptor {
    fn from_definition(def: &dyn ModelDefinition) -> Result<Self, RegistrationError> {
        let name = def.name().to_string();
        if !MODEL_NAME.is_match(&name) {
            return Err(RegistrationError::InvalidName(name));
        }
        let slug = match def.plural_slug() {
            Some(s) => s.to_string(),
            None => plural_slug(&name),
        };
        if !SLUG.is_match(&slug) {
            return Err(RegistrationError::InvalidSlug { model: name, slug });
        }
        if let Some(field) = def.fields().iter().find(|f| is_magic(root_name(f))) {
            return Err(RegistrationError::ReservedFieldCollision {
                model: name,
                field: (*field).to_string(),
            });
        }

        let queryable = def.as_queryable().filter(|q| q.queryable());
        let searchable = def.as_searchable().filter(|s| s.searchable());
        let to_owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Ok(ModelDescriptor {
            source_id: underscore(&name),
            name,
            plural_slug: slug,
            is_queryable: queryable.is_some(),
            is_searchable: searchable.is_some(),
            fields: to_owned(def.fields()),
            basic_fields: queryable.map(|q| to_owned(q.basic_fields())).unwrap_or_default(),
            search_fields: searchable.map(|s| to_owned(s.search_fields())).unwrap_or_default(),
        })
    }
}

/// Registered models in a deterministic order. Immutable once built, so the
/// capability views are computed at most once.
#[derive(Debug)]
pub struct ModelRegistry {
    models: Vec<ModelDescriptor>,
    queryable: OnceLock<Vec<ModelDescriptor>>,
    searchable: OnceLock<Vec<ModelDescriptor>>,
}

impl ModelRegistry {
    /// Validate and register every definition in the manifest. Either all of them
    /// register or an error is returned and no registry exists.
    pub fn discover_and_register(source: &ModelManifest) -> Result<Self, RegistrationError> {
        let mut models = source
            .iter()
            .map(ModelDescriptor::from_definition)
            .collect::<Result<Vec<_>, _>>()?;
        models.sort_by(|a, b| a.source_id.cmp(&b.source_id).then_with(|| a.name.cmp(&b.name)));

        for pair in models.windows(2) {
            if pair[0].name == pair[1].name {
                return Err(RegistrationError::DuplicateName(pair[0].name.clone()));
            }
        }
        check_unique_slugs(models.iter().filter(|m| m.is_queryable))?;
        check_unique_slugs(models.iter().filter(|m| m.is_searchable))?;

        for m in &models {
            tracing::debug!(
                model = %m.name,
                slug = %m.plural_slug,
                queryable = m.is_queryable,
                searchable = m.is_searchable,
                "registered model"
            );
        }

        Ok(ModelRegistry {
            models,
            queryable: OnceLock::new(),
            searchable: OnceLock::new(),
        })
    }

    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    pub fn queryable_models(&self) -> &[ModelDescriptor] {
        self.queryable
            .get_or_init(|| self.models.iter().filter(|m| m.is_queryable).cloned().collect())
    }

    pub fn searchable_models(&self) -> &[ModelDescriptor] {
        self.searchable
            .get_or_init(|| self.models.iter().filter(|m| m.is_searchable).cloned().collect())
    }

    pub fn get(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn queryable_by_slug(&self, slug: &str) -> Option<&ModelDescriptor> {
        self.queryable_models().iter().find(|m| m.plural_slug == slug)
    }

    pub fn searchable_by_slug(&self, slug: &str) -> Option<&ModelDescriptor> {
        self.searchable_models().iter().find(|m| m.plural_slug == slug)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

fn check_unique_slugs<'a>(models: impl Iterator<Item = &'a ModelDescriptor>) -> Result<(), RegistrationError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for m in models {
        if let Some(first) = seen.insert(m.plural_slug.as_str(), m.name.as_str()) {
            return Err(RegistrationError::DuplicateSlug(
                m.plural_slug.clone(),
                first.to_string(),
                m.name.clone(),
            ));
        }
    }
    Ok(())
}
