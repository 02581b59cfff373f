//! Building blocks of article acquisition.
//!
//! Acquisition works in two phases, each split into small pieces:
//!
//! 1. **Searching**: build a query ([`query`]), fetch the results page
//!    ([`fetch`]) and pull candidate links out of it ([`results`])
//! 2. **Resolving**: turn each link into article text ([`resolver`]), trying
//!    structured extraction first ([`primary`]) and a tag scan second
//!    ([`fallback`])
//!
//! # Common Patterns
//!
//! - Every outbound request carries a rotated browser identity ([`identity`])
//! - Network access goes through traits ([`fetch::PageFetcher`],
//!   [`primary::ArticleExtractor`]) so the pipeline can be driven by fakes
//! - Extractors are fail-soft: they return empty or sentinel text, never errors
//!
//! The retry loop and fan-out live in [`crate::acquisition`].

pub mod fallback;
pub mod fetch;
pub mod identity;
pub mod primary;
pub mod query;
pub mod resolver;
pub mod results;
