//! Work-item model and token codec.
//!
//! Every unit of work in a pcopy run is an [`Operation`]. Operations travel
//! between participants as opaque string tokens; this crate owns the only
//! place where that string form is produced or parsed:
//!
//! * [`Operation`] and [`Opcode`] - the typed work item
//! * [`encode`] / [`decode`] - the token codec
//! * [`Operation::chunk_range`] - the byte range a COPY operation covers
//!
//! # Example
//!
//! ```rust,ignore
//! use pcopy_operation::{Operation, decode, encode};
//!
//! let op = Operation::treewalk("/src/a", 4, None);
//! let token = encode(&op);
//! assert_eq!(decode(&token)?, op);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod codec;
mod error;
mod operation;
mod os_bytes;

pub use codec::{decode, encode};
pub use error::{CodecError, ParseOpcodeError};
pub use operation::{DEFAULT_CHUNK_SIZE, Opcode, Operation};
