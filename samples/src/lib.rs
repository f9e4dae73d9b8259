//! Sample set resolution for voice cloning uploads.
//!
//! A sample directory holds audio clips and, optionally, one `.txt`
//! transcript per clip sharing the clip's filename stem:
//!
//! ```text
//! samples/
//!   en_1.wav   en_1.txt
//!   en_2.wav   en_2.txt
//! ```
//!
//! [`resolve`] validates such a directory before anything is uploaded.
//! Either every clip has a non-empty transcript or none does; a directory
//! in between is rejected with the list of clips that still need one.

mod error;
mod resolver;

pub use error::{Error, Result};
pub use resolver::{resolve, Resolver, Sample, SampleSet, DEFAULT_AUDIO_EXTENSIONS, TRANSCRIPT_EXTENSION};
