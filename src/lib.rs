//! A byte-size value type.
//!
//! [`FileSize`] stores a quantity of bytes and converts it between decimal
//! (kB, MB, GB, ...) and binary (KiB, MiB, GiB, ...) unit representations,
//! formats it as a grouped or auto-scaled human-readable string, and parses
//! size strings back into byte counts.
//!
//! ```
//! use filesize::FileSize;
//!
//! // Convert between units.
//! assert_eq!(FileSize::from_bytes(1536.0).to_kibibytes().round(1).as_number(), 1.5);
//! assert_eq!(FileSize::from_kilobytes(1.0).to_kibibytes().round(3).as_number(), 0.977);
//!
//! // Format.
//! assert_eq!(FileSize::from_bytes(1024.0).as_string(), "1,024 B");
//! assert_eq!(FileSize::from_bytes(1500000000.0).for_humans(), "1.50 GB");
//! assert_eq!(FileSize::from_bytes(1500000000.0).in_binary().for_humans(), "1.40 GiB");
//!
//! // Parse.
//! let size = FileSize::parse("1.5 MiB")?;
//! assert_eq!(size.to_bytes().as_integer(), 1_572_864);
//! # Ok::<(), filesize::Error>(())
//! ```
//!
//! A `FileSize` is a mutable builder behind a fluent interface: each
//! presentation call consumes the value and returns the updated one, and none
//! of them touch the underlying byte count. It is not internally thread-safe.

mod error;
mod parse;
mod size;
mod unit;

pub use error::Error;
pub use size::FileSize;
pub use unit::{Base, Unit};
