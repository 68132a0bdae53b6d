//! Composable decoders from untyped [`serde_json::Value`]s into typed Rust
//! data.
//!
//! A schema is written either as a [`Decoder`] or as a plain literal that
//! stands for one: text matches itself exactly, a pair `(A, B)` decodes a
//! two-element array, and a field map decodes an object. The
//! [`record!`] macro declares a struct together with its decoder. Schemas
//! are resolved once, with [`decoder`], and then applied to any number of
//! values; each application either returns the decoded value or a
//! [`DecodeError`] that says what went wrong and where.
//!
//! ```
//! use json_decoder::{array, boolean, number, option, record, string, union, Decoder};
//! use serde_json::json;
//!
//! record! {
//!     #[derive(Debug)]
//!     struct User {
//!         id: f64 = number(),
//!         username: String = string(),
//!         is_banned: bool = boolean(),
//!         role: &'static str = union(("admin", "member")),
//!         phone_numbers: Vec<String> = array(string()),
//!         ssn: Option<String> = option(string()),
//!     }
//! }
//!
//! let user = User::decoder()
//!     .decode(&json!({
//!         "id": 100,
//!         "username": "Fred",
//!         "is_banned": false,
//!         "role": "member",
//!         "phone_numbers": ["0123", "0987"],
//!     }))
//!     .unwrap();
//!
//! assert_eq!("Fred", user.username);
//! assert_eq!(None, user.ssn);
//!
//! let err = User::decoder()
//!     .decode(&json!({ "id": "100" }))
//!     .unwrap_err();
//!
//! assert_eq!("expected number, found string at $.id", err.to_string());
//! ```

mod decode;
mod decoder;
mod error;
mod higher_order;
mod literal;
mod primitive;
mod unify;

pub use decode::*;
pub use decoder::*;
pub use error::*;
pub use higher_order::*;
pub use literal::*;
pub use primitive::*;
pub use unify::*;

#[doc(hidden)]
pub use serde_json::Value;
