//! Menu items and menu filtering.
//!
//! Filtering is a pure function of the loaded items and the query; nothing
//! is indexed or cached, it is simply recomputed for every page view.

use serde::{Deserialize, Serialize};

use crate::types::{Category, MenuItemId, Price};

/// A purchasable catalog entry.
///
/// Items are immutable once ingested from the catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Absolute image URL, if the catalog provided one.
    pub image: Option<String>,
    pub category: Category,
    pub available: bool,
    pub rating: Option<f32>,
}

/// Category half of a menu query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Parse the `category` query parameter.
    ///
    /// Missing values, `all`, and ids outside the known set all mean
    /// [`CategoryFilter::All`].
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        param
            .filter(|p| !p.eq_ignore_ascii_case("all"))
            .and_then(|p| p.parse::<Category>().ok())
            .map_or(Self::All, Self::Only)
    }

    /// Identifier for URLs (`all` or the category id).
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.id(),
        }
    }

    #[must_use]
    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

/// A category filter combined with free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuQuery {
    pub category: CategoryFilter,
    search: String,
}

impl MenuQuery {
    #[must_use]
    pub fn new(category: CategoryFilter, search: &str) -> Self {
        Self {
            category,
            search: search.trim().to_lowercase(),
        }
    }

    /// The normalized (trimmed, lowercased) search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Whether an item passes both the category and the search filter.
    ///
    /// Search is a case-insensitive substring match on name or description.
    #[must_use]
    pub fn matches(&self, item: &MenuItem) -> bool {
        if !self.category.matches(item.category) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        item.name.to_lowercase().contains(&self.search)
            || item.description.to_lowercase().contains(&self.search)
    }

    /// Items matching the query, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, items: &'a [MenuItem]) -> Vec<&'a MenuItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn item(id: i64, name: &str, category: Category, cents: u32) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(id),
            name: name.to_string(),
            description: format!("Freshly made {}", name.to_lowercase()),
            price: Price::from_cents(cents),
            image: None,
            category,
            available: true,
            rating: Some(4.5),
        }
    }

    pub fn menu() -> Vec<MenuItem> {
        vec![
            item(1, "Margherita Pizza", Category::Pizza, 1299),
            item(2, "Pepperoni Pizza", Category::Pizza, 1499),
            item(3, "Double Bacon Burger", Category::Burger, 1149),
            item(4, "Butter Chicken", Category::Indian, 1399),
            item(5, "Chocolate Lava Cake", Category::Dessert, 699),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::menu;
    use super::*;

    fn names(items: &[&MenuItem]) -> Vec<String> {
        items.iter().map(|i| i.name.clone()).collect()
    }

    #[test]
    fn test_category_filter_returns_only_that_category() {
        let items = menu();
        let query = MenuQuery::new(CategoryFilter::from_param(Some("pizza")), "");
        let found = query.apply(&items);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|i| i.category == Category::Pizza));
    }

    #[test]
    fn test_all_returns_everything() {
        let items = menu();
        let query = MenuQuery::new(CategoryFilter::from_param(Some("all")), "");
        assert_eq!(query.apply(&items).len(), items.len());
        let query = MenuQuery::new(CategoryFilter::from_param(None), "");
        assert_eq!(query.apply(&items).len(), items.len());
    }

    #[test]
    fn test_unknown_category_param_means_all() {
        assert_eq!(CategoryFilter::from_param(Some("sushi")), CategoryFilter::All);
    }

    #[test]
    fn test_search_is_case_insensitive_on_name_and_description() {
        let items = menu();
        let query = MenuQuery::new(CategoryFilter::All, "  PIZZA ");
        assert_eq!(
            names(&query.apply(&items)),
            vec!["Margherita Pizza", "Pepperoni Pizza"]
        );

        // "freshly made butter chicken" only matches via the description
        let query = MenuQuery::new(CategoryFilter::All, "made butter");
        assert_eq!(names(&query.apply(&items)), vec!["Butter Chicken"]);
    }

    #[test]
    fn test_category_and_search_combine() {
        let items = menu();
        let query = MenuQuery::new(CategoryFilter::Only(Category::Pizza), "pepperoni");
        assert_eq!(names(&query.apply(&items)), vec!["Pepperoni Pizza"]);

        let query = MenuQuery::new(CategoryFilter::Only(Category::Dessert), "pizza");
        assert!(query.apply(&items).is_empty());
    }
}
