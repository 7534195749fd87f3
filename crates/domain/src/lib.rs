#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod catalog;
mod error;
mod report;
mod service;
mod sync_token;
mod workout;

pub use error::*;
pub use report::*;
pub use service::*;
pub use sync_token::*;
pub use workout::*;
