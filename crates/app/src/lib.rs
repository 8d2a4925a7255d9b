//! Larder storefront application: catalog lookup, sign-in and the on-disk store behind
//! the `larder` command.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod context;
pub mod observability;
pub mod storage;
