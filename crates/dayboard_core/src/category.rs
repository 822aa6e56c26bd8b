use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const FALLBACK_LABEL: &str = "Tarefa";
pub const FALLBACK_COLOR: &str = "#ff2d6f";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub color: String,
    /// Name of the icon the presenter draws for this category.
    pub icon: String,
}

impl Category {
    pub fn new(id: &str, label: &str, color: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Display metadata for a habit's category, resolved from a catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryView {
    pub label: String,
    pub color: String,
    pub icon: Option<String>,
}

/// Lookup table from category id to its label, color and icon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryCatalog {
    order: Vec<String>,
    by_id: HashMap<String, Category>,
}

impl CategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in categories offered by the habit picker.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for category in [
            Category::new("tarefa", "Tarefa", "#ff2d6f", "clock"),
            Category::new("quitar_habito", "Quitar um hábito", "#ff7b00", "clock"),
            Category::new("arte", "Arte", "#c21b5a", "paint-brush"),
            Category::new("meditacao", "Meditação", "#6b21a8", "brain"),
            Category::new("estudo", "Estudo", "#6b21a8", "book-open"),
            Category::new("esporte", "Esporte", "#0ea5b7", "running"),
            Category::new("social", "Social", "#14b8a6", "users"),
            Category::new("musica", "Música", "#6d28d9", "music"),
            Category::new("alimentacao", "Alimentação", "#f97316", "apple"),
            Category::new("casa", "Casa", "#0ea5b7", "home"),
            Category::new("trabalho", "Trabalho", "#a855f7", "briefcase"),
            Category::new("saude", "Saúde", "#ef4444", "heartbeat"),
            Category::new("nutricao", "Nutrição", "#f59e0b", "utensils"),
            Category::new("financas", "Finanças", "#22c55e", "money-bill"),
            Category::new("energia", "Energia", "#dc2626", "bolt"),
            Category::new("outdoors", "Ao ar livre", "#16a34a", "tree"),
            Category::new("outros", "Outros", "#a3a3a3", "question"),
        ] {
            catalog.insert(category);
        }
        catalog
    }

    /// Adds or replaces a category. Replacing keeps its position.
    pub fn insert(&mut self, category: Category) {
        if !self.by_id.contains_key(&category.id) {
            self.order.push(category.id.clone());
        }
        self.by_id.insert(category.id.clone(), category);
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Categories in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    pub fn resolve(&self, id: &str) -> CategoryView {
        match self.get(id) {
            Some(category) => CategoryView {
                label: category.label.clone(),
                color: category.color.clone(),
                icon: Some(category.icon.clone()),
            },
            None => CategoryView {
                label: FALLBACK_LABEL.to_string(),
                color: FALLBACK_COLOR.to_string(),
                icon: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_keeps_picker_order() {
        let catalog = CategoryCatalog::standard();
        assert_eq!(catalog.len(), 17);
        let ids: Vec<_> = catalog.iter().map(|c| c.id.as_str()).take(3).collect();
        assert_eq!(ids, ["tarefa", "quitar_habito", "arte"]);
        assert_eq!(catalog.iter().last().map(|c| c.id.as_str()), Some("outros"));
    }

    #[test]
    fn resolves_known_and_unknown_ids() {
        let catalog = CategoryCatalog::standard();
        let sport = catalog.resolve("esporte");
        assert_eq!(sport.label, "Esporte");
        assert_eq!(sport.color, "#0ea5b7");
        assert_eq!(sport.icon.as_deref(), Some("running"));

        let unknown = catalog.resolve("astronomia");
        assert_eq!(unknown.label, FALLBACK_LABEL);
        assert_eq!(unknown.color, FALLBACK_COLOR);
        assert!(unknown.icon.is_none());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut catalog = CategoryCatalog::new();
        catalog.insert(Category::new("a", "A", "#000", "x"));
        catalog.insert(Category::new("b", "B", "#111", "y"));
        catalog.insert(Category::new("a", "Alpha", "#222", "z"));
        let labels: Vec<_> = catalog.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Alpha", "B"]);
    }
}
