pub mod fake_tree_provider;

pub use fake_tree_provider::{FakeTreeProvider, ProviderCall};
