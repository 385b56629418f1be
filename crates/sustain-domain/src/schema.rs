//! Collection schema module - the declared shape of a record family

use crate::record::PropertyValue;

/// Storage type of a single property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Free text, vectorized by the collection's embedding provider
    Text,

    /// Floating point number
    Number,

    /// Whole number
    Int,
}

impl DataType {
    /// Get the data type name as the store spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Text => "text",
            DataType::Number => "number",
            DataType::Int => "int",
        }
    }

    /// Whether a value may be stored in a property of this type
    pub fn accepts(&self, value: &PropertyValue) -> bool {
        matches!(
            (self, value),
            (DataType::Text, PropertyValue::Text(_))
                | (DataType::Number, PropertyValue::Number(_))
                | (DataType::Int, PropertyValue::Int(_))
        )
    }
}

/// Semantic-embedding configuration bound to a collection
///
/// The pipeline never computes embeddings itself; this only names the
/// external provider module the store should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Vectorizer {
    /// OpenAI text embeddings (`text2vec-openai`)
    #[default]
    Text2VecOpenAi,

    /// No vectorization
    None,
}

impl Vectorizer {
    /// Get the provider module name
    pub fn as_str(&self) -> &'static str {
        match self {
            Vectorizer::Text2VecOpenAi => "text2vec-openai",
            Vectorizer::None => "none",
        }
    }

    /// Parse a vectorizer from its module name
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text2vec-openai" => Some(Vectorizer::Text2VecOpenAi),
            "none" => Some(Vectorizer::None),
            _ => None,
        }
    }
}

impl std::str::FromStr for Vectorizer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid vectorizer: {}", s))
    }
}

/// A named, typed property of a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    /// Property name
    pub name: String,

    /// Storage type
    pub data_type: DataType,
}

impl PropertyDef {
    /// Create a new property definition
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Declared shape of one record family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSchema {
    /// Collection name
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// Ordered property list
    pub properties: Vec<PropertyDef>,

    /// Embedding provider binding
    pub vectorizer: Vectorizer,
}

impl CollectionSchema {
    /// Schema for the KPI fact collection
    ///
    /// # Examples
    ///
    /// ```
    /// use sustain_domain::{CollectionSchema, DataType};
    ///
    /// let schema = CollectionSchema::kpi_facts("FerreroKPI", "Structured KPIs");
    /// assert_eq!(schema.properties.len(), 7);
    /// assert_eq!(schema.property("value").unwrap().data_type, DataType::Number);
    /// ```
    pub fn kpi_facts(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            properties: vec![
                PropertyDef::new("category", DataType::Text),
                PropertyDef::new("metric", DataType::Text),
                PropertyDef::new("unit", DataType::Text),
                PropertyDef::new("year", DataType::Text),
                PropertyDef::new("value", DataType::Number),
                PropertyDef::new("notes", DataType::Text),
                PropertyDef::new("source", DataType::Text),
            ],
            vectorizer: Vectorizer::default(),
        }
    }

    /// Schema for the narrative passage collection
    pub fn narrative(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            properties: vec![
                PropertyDef::new("page", DataType::Int),
                PropertyDef::new("section", DataType::Text),
                PropertyDef::new("text", DataType::Text),
            ],
            vectorizer: Vectorizer::default(),
        }
    }

    /// Override the embedding provider
    pub fn with_vectorizer(mut self, vectorizer: Vectorizer) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    /// Look up a property by name
    pub fn property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Check that a property list conforms to this schema
    ///
    /// Every property must be declared and carry a value of the declared type.
    pub fn check(&self, properties: &[(&str, PropertyValue)]) -> Result<(), String> {
        for (name, value) in properties {
            let def = self
                .property(name)
                .ok_or_else(|| format!("unknown property '{}' for {}", name, self.name))?;
            if !def.data_type.accepts(value) {
                return Err(format!(
                    "property '{}' expects {}, got {:?}",
                    name,
                    def.data_type.as_str(),
                    value
                ));
            }
        }
        Ok(())
    }
}
