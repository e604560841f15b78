//! Renders a [`FrameSequence`] as source code that can be compiled into the
//! playback program: dimension constants, the frame offset table and one flat
//! byte array with exactly the bytes of the binary container.

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::str::FromStr;

use crate::{Error, FrameSequence, Result};

const VALUES_PER_LINE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceLanguage {
    /// A C/C++ header with `#define` constants and `static const` arrays.
    #[default]
    C,
    /// A Rust module with `pub const` and `pub static` items.
    Rust,
}

impl FromStr for SourceLanguage {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c" | "h" | "cpp" => Ok(SourceLanguage::C),
            "rust" | "rs" => Ok(SourceLanguage::Rust),
            _ => Err(format!("unknown source language `{s}`, expected `c` or `rust`")),
        }
    }
}

pub struct SourceEmitter<'a> {
    name: &'a str,
    language: SourceLanguage,
    generator: &'a str,
}

impl<'a> SourceEmitter<'a> {
    /// `name` prefixes every emitted item, e.g. `bad_apple` gives
    /// `BAD_APPLE_WIDTH` and `bad_apple_data`.
    pub fn new(name: &'a str, language: SourceLanguage) -> Result<Self> {
        if !is_identifier(name) {
            return Err(Error::InvalidConfig("name must be a valid identifier"));
        }
        Ok(Self {
            name,
            language,
            generator: "pack_frames",
        })
    }

    /// Tool name written into the header comment.
    pub fn with_generator(mut self, generator: &'a str) -> Self {
        self.generator = generator;
        self
    }

    pub fn emit(&self, sequence: &FrameSequence) -> Result<String> {
        let container = sequence.to_container()?;
        let offsets = sequence.offsets();
        let table = offset_table(&offsets)?;
        let config = sequence.config();
        let upper = self.name.to_ascii_uppercase();
        let total = container.len();

        let mut code = String::new();
        code.push_str(&format!("// Generated automatically by {}\n", self.generator));
        if let Some(dither) = &config.dither {
            code.push_str(&format!("// Dither: {dither}\n"));
        }

        let constants = [
            ("WIDTH", "u32", config.width as usize),
            ("HEIGHT", "u32", config.height as usize),
            ("FPS", "u32", config.fps as usize),
            ("FRAME_COUNT", "usize", sequence.len()),
        ];
        match self.language {
            SourceLanguage::C => {
                code.push_str("#pragma once\n");
                code.push_str("#include <stdint.h>\n\n");
                for (suffix, _, value) in constants {
                    code.push_str(&format!("#define {upper}_{suffix} {value}\n"));
                }
                code.push('\n');
                code.push_str(&format!("static const uint32_t {}_offsets[] = {{\n", self.name));
            }
            SourceLanguage::Rust => {
                code.push('\n');
                for (suffix, ty, value) in constants {
                    code.push_str(&format!("pub const {upper}_{suffix}: {ty} = {value};\n"));
                }
                code.push('\n');
                code.push_str(&format!(
                    "pub static {upper}_OFFSETS: [u32; {}] = [\n",
                    offsets.len()
                ));
            }
        }

        let offset_strings: Vec<String> = table.iter().map(ToString::to_string).collect();
        for line in offset_strings.chunks(VALUES_PER_LINE) {
            code.push_str(&format!("    {},\n", line.join(", ")));
        }

        match self.language {
            SourceLanguage::C => {
                code.push_str("};\n\n");
                code.push_str(&format!("static const uint8_t {}_data[] = {{\n", self.name));
            }
            SourceLanguage::Rust => {
                code.push_str("];\n\n");
                code.push_str(&format!("pub static {upper}_DATA: [u8; {total}] = [\n"));
            }
        }

        for (i, (frame, &offset)) in sequence.frames().iter().zip(&offsets).enumerate() {
            code.push_str(&format!(
                "    // Frame {i} (RLE: {} bytes)\n",
                frame.compressed().len()
            ));
            let record = &container[offset..offset + frame.record_size()];
            for line in record.chunks(VALUES_PER_LINE) {
                let bytes: Vec<String> = line.iter().map(|b| format!("0x{b:02X}")).collect();
                code.push_str(&format!("    {},\n", bytes.join(", ")));
            }
        }

        match self.language {
            SourceLanguage::C => code.push_str("};\n\n"),
            SourceLanguage::Rust => code.push_str("];\n\n"),
        }
        code.push_str(&format!(
            "// Total: {total} bytes (~{:.1} KB)\n",
            total as f64 / 1024.0
        ));
        Ok(code)
    }
}

/// Offsets are emitted as 32-bit values.
fn offset_table(offsets: &[usize]) -> Result<Vec<u32>> {
    offsets
        .iter()
        .map(|&offset| {
            u32::try_from(offset)
                .map_err(|_| Error::InvalidConfig("container too large for 32-bit offsets"))
        })
        .collect()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
