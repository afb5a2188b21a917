//! Storefront-Common: Shared types used across the storefront crates.
//!
//! - **Typed IDs**: integer newtypes for customers, products and orders
//! - **Error Handling**: the unified [`Error`] type and [`Result`] alias
//!
//! # Examples
//!
//! ```
//! use storefront_common::{CustomerId, Error, Result};
//!
//! let id = CustomerId::from(2);
//! assert_eq!(id.get(), 2);
//!
//! fn check(id: CustomerId) -> Result<()> {
//!     if id.get() <= 0 {
//!         return Err(Error::validation("customer id must be positive"));
//!     }
//!     Ok(())
//! }
//! assert!(check(id).is_ok());
//! assert!(check(CustomerId::from(0)).is_err());
//! ```

pub mod error;
pub mod ids;

pub use error::{Error, Result};
pub use ids::*;
