//! Text primitives shared by every answer rule.
//!
//! Each rule in `src/rules/**` compares a free-form guess against an official
//! value. Before any comparison both sides go through the same small pipeline:
//!
//! ```text
//! raw guess ──┬─ normalize()      (normalize.rs)  -> "mexico city"
//!             ├─ iso_code_of()    (normalize.rs)  -> "USD"
//!             └─ parse_integer()  (number.rs)     -> 1234567 | ParseError
//! ```
//!
//! ## Responsibilities by module
//!
//! - `normalize.rs`: case folding, diacritic stripping and separator collapse.
//!   Total and idempotent.
//! - `number.rs`: strict integer extraction for population guesses.
//!
//! Both are pure and allocation-light; they are safe to call concurrently from
//! any number of requests.

#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/number.rs"]
mod number;

pub use normalize::{iso_code_of, normalize};
pub use number::parse_integer;
