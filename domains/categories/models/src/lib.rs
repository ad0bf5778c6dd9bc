pub mod categories;

pub use categories::{Category, CategorySummary, CreateCategoryParams};
