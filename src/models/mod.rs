//! Data models for the Zendesk API.
//!
//! This module contains type definitions for Support tickets, ticket
//! comments, Help Center articles, and the shared search envelope.
//! All of them are read-only projections of remote records.

mod article;
mod comment;
mod common;
mod ticket;

pub use article::*;
pub use comment::*;
pub use common::*;
pub use ticket::*;
