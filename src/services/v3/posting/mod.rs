//! Posting (shipment) endpoints, version 3.

pub mod fbs;

pub use fbs::FbsService;
