//! # docsift-fetch
//!
//! Byte source resolution for docsift.
//!
//! [`SourceResolver`] turns a [`DocumentReference`](docsift_core::DocumentReference)
//! into [`RawContent`](docsift_core::RawContent) by trying, in order, a shared
//! document link, a data URL, bare base64 and finally the reference's download
//! URL.
//!
//! ## Providers
//!
//! | Host | Flow |
//! |------|------|
//! | `docs.google.com` | Export as pdf, docx, txt, then html |
//! | `drive.google.com` | `uc?export=download`, then the viewer page |
//! | `dropbox.com` | Rewrite to `dl.dropboxusercontent.com` with `raw=1` |
//! | `onedrive.live.com`, `1drv.ms` | Plain GET; failures mean sign-in is needed |
//! | any host | Path ending in a known document extension |
//!
//! ## HTTP
//!
//! All requests go through the [`HttpFetcher`](docsift_core::HttpFetcher) trait.
//! [`HttpClient`] is the reqwest implementation; [`MemoryFetcher`] serves
//! canned responses for tests.

pub mod http;
pub mod inline;
pub mod memory;
pub mod providers;
pub mod resolver;

pub use http::HttpClient;
pub use memory::{MemoryFetcher, MemoryRequest, MemoryResponse};
pub use providers::Provider;
pub use resolver::SourceResolver;
