//! Object storage adapter using Apache OpenDAL.
//!
//! Uploaded images are written to an S3-compatible bucket (Cloudflare R2 in
//! production) with a single atomic put per object:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  ObjectStore::put(key, bytes, content_type)              │
//! ├──────────────────────────────────────────────────────────┤
//! │  StorageService  ──►  opendal::Operator                  │
//! │                        ├─ services::S3     (R2, S3)      │
//! │                        └─ services::Memory (dev, tests)  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Keys form a flat namespace: writing an existing key replaces the object.

mod config;
mod error;
mod service;

pub use config::StorageProvider;
pub use error::StorageError;
pub use service::{DEFAULT_CONTENT_TYPE, ObjectStore, StorageService};
