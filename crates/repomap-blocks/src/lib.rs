//! Comment styles and map-block encoding for the repository map generator.
//!
//! A map block is the repository tree rendered as a comment at the head of a
//! source file:
//!
//! ```text
//! # Repository Map:
//! # project/
//! # ├── main.py
//! # └── util.py
//! # File: main.py
//! ```
//!
//! The [`style`] module picks the comment markers for a file extension and
//! the [`codec`] module encodes blocks and replaces a previously inserted block
//! in place, so repeated runs converge on the same file content.

pub mod codec;
pub mod error;
pub mod style;

pub use codec::{Applied, FILE_LABEL, MAP_HEADER, MapBlockCodec, apply, encode};
pub use error::{Error, Result};
pub use style::{CommentStyle, DEFAULT_STYLE, style_for};
