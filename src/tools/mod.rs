//! MCP tool inputs and response views.
//!
//! This module contains the input types for each tool and the trimmed
//! JSON projections the tools return.

mod inputs;
mod views;

pub use inputs::*;
pub use views::*;
