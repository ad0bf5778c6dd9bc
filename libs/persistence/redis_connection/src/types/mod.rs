pub mod hash;
pub mod list;
pub mod normal;

pub use hash::Hash;
pub use list::List;
pub use normal::Normal;
