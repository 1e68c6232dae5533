//! Lazily resolved Wikipedia pages backed by the MediaWiki query API.
//!
//! A [`Page`] starts out knowing only its title, namespace and language. Every other attribute
//! group is fetched on first access, at most once, and cached for the lifetime of the page.
//! Page extracts are reshaped into an [`Outline`] of nested sections.

pub mod client;
pub mod config;
pub mod format;
pub mod groups;
pub mod headings;
pub mod markup;
pub mod model;
pub mod namespace;
pub mod outline;
pub mod page;
pub mod pagination;
pub mod section;
pub mod transport;
pub mod util;

pub use client::Wikipedia;
pub use config::WikiConfig;
pub use format::{ExtractFormat, FormatRules};
pub use groups::CallGroup;
pub use namespace::Namespace;
pub use outline::Outline;
pub use page::{MISSING_PAGE_ID, Page, PageMap};
pub use section::{Section, SectionRef};
pub use transport::{HttpTransport, QueryParams, Transport};
