//! Core logic for imgvault.
//!
//! This crate contains the protocol-independent pieces of the service and has
//! ZERO web dependencies.
//!
//! # Modules
//!
//! - `delivery` - Mapping storage keys to CDN delivery URLs
//! - `storage` - Object storage adapter (Cloudflare R2 / S3 via OpenDAL)

pub mod delivery;
pub mod storage;
