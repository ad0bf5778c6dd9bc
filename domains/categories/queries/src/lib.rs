use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCategoriesQuery;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchCategoriesQuery {
    pub value: String,
}
