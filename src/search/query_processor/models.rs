use serde::{Deserialize, Serialize};

use crate::catalog::Category;


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPart {

    pub category: Option<Category>,

    /// Canonical gazetteer name.
    pub location: Option<String>,

    /// Only populated when no category keyword matched.
    pub keywords: Vec<String>,

    pub quantity: Option<usize>,

    pub nearby: bool,

    pub original_text: String,
}

impl QueryPart {
    pub fn new(original_text: impl Into<String>) -> Self {
        Self {
            category: None,
            location: None,
            keywords: Vec::new(),
            quantity: None,
            nearby: false,
            original_text: original_text.into(),
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_quantity(mut self, quantity: usize) -> Self {
        self.quantity = Some(quantity).filter(|n| *n > 0);
        self
    }

    pub fn nearby(mut self, nearby: bool) -> Self {
        self.nearby = nearby;
        self
    }

    /// Keywords constrain the match only in keyword mode.
    pub fn uses_keywords(&self) -> bool {
        self.category.is_none() && !self.keywords.is_empty()
    }

    pub fn is_unconstrained(&self) -> bool {
        self.category.is_none() && self.location.is_none() && !self.uses_keywords()
    }

    /// Per-part result cap: the requested quantity, or `default_cap`.
    pub fn result_limit(&self, default_cap: usize) -> usize {
        match self.quantity {
            Some(n) if n > 0 => n,
            _ => default_cap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_limit() {
        let part = QueryPart::new("museus");
        assert_eq!(part.result_limit(5), 5);
        assert_eq!(part.clone().with_quantity(3).result_limit(5), 3);
        assert_eq!(part.with_quantity(0).result_limit(5), 5);
    }

    #[test]
    fn test_constraint_detection() {
        assert!(QueryPart::new("olá").is_unconstrained());
        assert!(!QueryPart::new("x").with_location("coimbra").is_unconstrained());

        let keyword_part = QueryPart::new("igreja românica").with_keywords(["igreja"]);
        assert!(keyword_part.uses_keywords());
        assert!(!keyword_part.clone().with_category(Category::Museums).uses_keywords());
    }
}
