/// Traversal options shared by the collectors
pub mod options;

pub use options::CollectOptions;
