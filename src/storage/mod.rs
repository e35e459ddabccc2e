//! Durable storage of reasons and entries.
//!  - [key_value::KeyValueStore] abstracts the place where bytes end up.
//!  - Reasons and entries each live in their own slot, see [slots].
//!  - A slot is always rewritten as a whole.

pub mod entities;
pub mod key_value;
pub mod slots;
