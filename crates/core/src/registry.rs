//! Name-to-variant factory
//!
//! Variants identify themselves through their [`VariantInfo`]; the registry
//! only maps a short code or display name to the tag.
//!
//! [`VariantInfo`]: crate::VariantInfo

use crate::error::GraphError;
use crate::variant::Graph;

#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: Vec<Graph>,
}

impl Registry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in graph
    pub fn with_defaults() -> Self {
        Self {
            entries: Graph::ALL.to_vec(),
        }
    }

    pub fn register(&mut self, graph: Graph) -> Result<(), GraphError> {
        if self.entries.contains(&graph) {
            return Err(GraphError::DuplicateVariant(graph.short_code()));
        }
        self.entries.push(graph);
        Ok(())
    }

    /// Look up a variant by short code or display name, ignoring ASCII case
    pub fn create(&self, name: &str) -> Result<Graph, GraphError> {
        let name = name.trim();
        self.entries
            .iter()
            .copied()
            .find(|graph| {
                graph.short_code().eq_ignore_ascii_case(name) || graph.name().eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| GraphError::UnknownVariant(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = Graph> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_by_short_code_and_name() {
        let registry = Registry::with_defaults();
        assert_eq!(registry.create("GR3-Phi").unwrap(), Graph::Gr3Phi);
        assert_eq!(registry.create("gr3-phi").unwrap(), Graph::Gr3Phi);
        assert_eq!(registry.create("Bit-Reversal Graph").unwrap(), Graph::Brg);
    }

    #[test]
    fn test_unknown_variant() {
        let registry = Registry::with_defaults();
        assert_eq!(
            registry.create("Dragonfly"),
            Err(GraphError::UnknownVariant("Dragonfly".to_string()))
        );
    }

    #[test]
    fn test_empty_registry_knows_nothing() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.create("BRG").is_err());
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = Registry::new();
        registry.register(Graph::Brg).unwrap();
        assert_eq!(
            registry.register(Graph::Brg),
            Err(GraphError::DuplicateVariant("BRG"))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iteration_keeps_registration_order() {
        let mut registry = Registry::new();
        registry.register(Graph::Brg).unwrap();
        registry.register(Graph::Gr3Phi).unwrap();
        let codes: Vec<&str> = registry.iter().map(Graph::short_code).collect();
        assert_eq!(codes, vec!["BRG", "GR3-Phi"]);
    }
}
