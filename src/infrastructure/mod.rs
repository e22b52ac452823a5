//! Infrastructure layer - external concerns

pub mod crypto;
pub mod notifier;
pub mod storage;

pub use notifier::LoggingNotifier;
pub use storage::InMemoryRepositoryProvider;
