pub mod capability;
pub mod fetcher;
pub mod pool;
pub mod reference;

pub use capability::Capability;
pub use fetcher::{HttpFetcher, ProviderFetch, fetch_validated};
pub use pool::{KeyPool, MirrorList};
pub use reference::{ApiKey, ProviderRef};
