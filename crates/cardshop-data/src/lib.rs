//! Card metadata lookup and catalog assembly.
//!
//! This crate provides:
//! - `CardLookup` - Name-keyed metadata lookup capability
//! - `ScryfallClient` - HTTP implementation against the Scryfall API
//! - `RequestPacer` - Fixed-interval request pacing
//! - `CatalogAssembler` - Joins inventory rows to metadata into a `Catalog`
//! - `load_inventory` - Reads the local inventory source

mod assembler;
mod client;
mod lookup;
mod pacer;
mod source;
mod timeout;

pub use assembler::*;
pub use client::*;
pub use lookup::*;
pub use pacer::*;
pub use source::*;
pub use timeout::*;
