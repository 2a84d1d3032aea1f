#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::{
    CommodityType, NewPriceSnapshot, NewProfile, PriceError, PriceInput, PricePerKilo,
    PriceSnapshot, PriceSummary, Profile, ProfileFields, ProfileId, ProfileWithHistory, UserId,
};
pub use ports::{
    AuthError, CoreError, ErrorKind, IdentityVerifier, PriceHistoryRepository, ProfileRepository,
    Repos, RepositoryError,
};
pub use services::{
    AppCore, DirectoryService, PriceHistoryRecorder, ProfileLocks, ProfileService,
};
pub use utils::validation::ValidationError;

// Re-export path utilities
pub use paths::{PathError, ResolvedPaths, data_root, database_path};

#[cfg(test)]
use tokio_test as _;
