//! Desktop side of framepack: turns a directory of 1-bit frames into the
//! binary container and the embeddable source, and back into images.

pub mod error;
pub mod pipeline;
pub mod std_fs;

pub use error::PackError;
