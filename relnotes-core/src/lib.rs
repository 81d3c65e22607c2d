//! # relnotes-core
//!
//! Content layer for release notes on a documentation site.
//!
//! This crate discovers release and highlight documents, parses their front
//! matter, derives permalinks, links each collection with previous/next
//! neighbours and rewrites relative markdown links into permalinks.

pub mod config;
pub mod frontmatter;
pub mod links;
pub mod loader;
pub mod metadata;
pub mod models;
pub mod paginate;
pub mod routes;
pub mod scanner;
pub mod slug;
pub mod url;

pub use config::{BuildMode, Config, SortOrder};
pub use links::{rewrite_markdown_links, LinkResolver};
pub use loader::{load_content, LoadError, LoadedContent};
pub use metadata::MetadataBuilder;
pub use models::{Document, PaginatorRef, Paginated, ReadingTime, Release, ReleaseHighlight, Tag};
pub use paginate::link_sequence;
pub use routes::{build_routes, Route, RouteKind};
pub use scanner::Scanner;
pub use slug::slugify;
