pub mod category;
pub mod detail;
pub mod layout;
pub mod listing;
pub mod pagination;
pub mod traits;

pub use category::CategoryResolver;
pub use detail::DetailEnricher;
pub use layout::{MarkupNextPage, NextPagePredicate, SiteLayout};
pub use listing::{ListingExtractor, PageListings};
pub use pagination::PaginationController;
pub use traits::{build_client, HttpFetcher, PageFetcher};
