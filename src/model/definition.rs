//! Model definitions and their capability interfaces.
//!
//! A model declares what it is (name, fields) and which capabilities it supports by
//! returning `Some` from `as_queryable` / `as_searchable`. Models are registered through
//! an explicit [`ModelManifest`] built at startup.

/// Bulk listing/filtering support on the model's collection route.
pub trait Queryable: Send + Sync {
    /// Capability check; a model may implement the trait but switch itself off.
    fn queryable(&self) -> bool {
        true
    }

    /// Fields returned when a request does not select fields explicitly.
    fn basic_fields(&self) -> &[&'static str] {
        &[]
    }
}

/// Full-text search support on the search route.
pub trait Searchable: Send + Sync {
    fn searchable(&self) -> bool {
        true
    }

    /// Fields the search engine matches the query text against.
    fn search_fields(&self) -> &[&'static str] {
        &[]
    }
}

pub trait ModelDefinition: Send + Sync {
    /// CamelCase model name, e.g. `Bill` or `CommitteeHearing`.
    fn name(&self) -> &str;

    /// Top-level field names stored on documents of this model.
    fn fields(&self) -> &[&'static str];

    /// Explicit plural slug for names the regular rules get wrong.
    fn plural_slug(&self) -> Option<&str> {
        None
    }

    fn as_queryable(&self) -> Option<&dyn Queryable> {
        None
    }

    fn as_searchable(&self) -> Option<&dyn Searchable> {
        None
    }
}

/// Ordered list of model definitions to register.
#[derive(Default)]
pub struct ModelManifest {
    definitions: Vec<Box<dyn ModelDefinition>>,
}

impl ModelManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<M: ModelDefinition + 'static>(mut self, model: M) -> Self {
        self.definitions.push(Box::new(model));
        self
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ModelDefinition> {
        self.definitions.iter().map(|d| d.as_ref())
    }
}
