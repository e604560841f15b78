use alloc::string::String;

use crate::{Error, Layout, Result};

/// Settings shared by every frame of one pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Carried into the generated source as a comment only.
    pub dither: Option<String>,
    pub layout: Layout,
}

impl PackConfig {
    pub fn new(width: u32, height: u32, fps: u32) -> Self {
        Self {
            width,
            height,
            fps,
            dither: None,
            layout: Layout::default(),
        }
    }

    pub fn with_dither(mut self, dither: impl Into<String>) -> Self {
        self.dither = Some(dither.into());
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(Error::InvalidConfig("width must be at least 1"));
        }
        if self.height == 0 {
            return Err(Error::InvalidConfig("height must be at least 1"));
        }
        if self.fps == 0 {
            return Err(Error::InvalidConfig("fps must be at least 1"));
        }
        // ends up inside a line comment of the generated source
        if self.dither.as_deref().is_some_and(|d| d.chars().any(char::is_control)) {
            return Err(Error::InvalidConfig("dither must not contain control characters"));
        }
        Ok(())
    }

    /// Size of one packed frame in bytes.
    pub fn packed_len(&self) -> usize {
        self.layout.packed_len(self.width, self.height)
    }
}
