// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON text formatting
//!
//! A small streaming emitter producing the tab-indented BIM-JSON layout:
//! one value per line, one tab per nesting level, commas written before the
//! next sibling. Coordinates and triangles use fixed-width columns so large
//! meshes stay readable.

use std::fmt::{self, Display, Write};

use crate::Point3;

/// Number formatting for geometry arrays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Digits after the decimal point for coordinates
    pub coord_precision: usize,
    /// Minimum width of a coordinate component, right-aligned
    pub coord_width: usize,
    /// Minimum width of a triangle index, right-aligned
    pub index_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            coord_precision: 12,
            coord_width: 18,
            index_width: 6,
        }
    }
}

/// Escape text for use inside a JSON string literal
///
/// Works on UTF-16 code units: anything below 0x20 or above 0x7F without a
/// short escape becomes `\uXXXX`, so the output is plain ASCII.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for unit in value.encode_utf16() {
        match unit {
            0x22 => out.push_str("\\\""),
            0x09 => out.push_str("\\t"),
            0x0C => out.push_str("\\f"),
            0x0D => out.push_str("\\r"),
            0x0A => out.push_str("\\n"),
            0x08 => out.push_str("\\b"),
            0x5C => out.push_str("\\\\"),
            u if u < 0x20 || u > 0x7F => {
                // Writing to a String cannot fail
                let _ = write!(out, "\\u{:04X}", u);
            }
            u => out.push(char::from(u as u8)),
        }
    }
    out
}

/// Shortest round-trip text for a double; `null` when not finite
pub fn format_double(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        "null".to_string()
    }
}

fn coord(value: f64, options: &FormatOptions) -> String {
    if value.is_finite() {
        format!(
            "{:>width$.prec$}",
            value,
            width = options.coord_width,
            prec = options.coord_precision
        )
    } else {
        format!("{:>width$}", "null", width = options.coord_width)
    }
}

/// `[x, y, z ]` with fixed-width components
pub fn format_xyz(point: &Point3<f64>, options: &FormatOptions) -> String {
    format!(
        "[{}, {}, {} ]",
        coord(point.x, options),
        coord(point.y, options),
        coord(point.z, options)
    )
}

/// `[a, b, c ]` with fixed-width indices
pub fn format_triangle(triangle: &[u32; 3], options: &FormatOptions) -> String {
    let w = options.index_width;
    format!(
        "[{:>w$}, {:>w$}, {:>w$} ]",
        triangle[0],
        triangle[1],
        triangle[2],
        w = w
    )
}

struct Frame {
    closer: char,
    items: usize,
}

/// Streaming writer over an in-memory buffer
pub struct JsonWriter {
    out: String,
    stack: Vec<Frame>,
    options: FormatOptions,
}

impl JsonWriter {
    pub fn new(options: FormatOptions) -> Self {
        Self {
            out: String::new(),
            stack: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    fn indent(&mut self, level: usize) {
        for _ in 0..level {
            self.out.push('\t');
        }
    }

    fn begin_item(&mut self, key: Option<&str>) -> fmt::Result {
        let level = self.stack.len().saturating_sub(1);
        if let Some(frame) = self.stack.last_mut() {
            if frame.items > 0 {
                self.out.push(',');
            }
            frame.items += 1;
            self.out.push('\n');
        }
        self.indent(level);
        if let Some(key) = key {
            write!(self.out, "\"{}\": ", escape_string(key))?;
        }
        Ok(())
    }

    pub fn begin_object(&mut self, key: Option<&str>) -> fmt::Result {
        self.begin_item(key)?;
        self.out.push('{');
        self.stack.push(Frame {
            closer: '}',
            items: 0,
        });
        Ok(())
    }

    pub fn begin_array(&mut self, key: Option<&str>) -> fmt::Result {
        self.begin_item(key)?;
        self.out.push('[');
        self.stack.push(Frame {
            closer: ']',
            items: 0,
        });
        Ok(())
    }

    /// Close the innermost object or array; empty containers stay on one line
    pub fn end(&mut self) -> fmt::Result {
        let frame = self.stack.pop().ok_or(fmt::Error)?;
        if frame.items > 0 {
            self.out.push('\n');
            self.indent(self.stack.len().saturating_sub(1));
        }
        self.out.push(frame.closer);
        Ok(())
    }

    /// Pre-formatted JSON value (number, boolean, `null`, inline literal)
    pub fn raw(&mut self, key: Option<&str>, value: impl Display) -> fmt::Result {
        self.begin_item(key)?;
        write!(self.out, "{}", value)
    }

    pub fn string(&mut self, key: Option<&str>, value: &str) -> fmt::Result {
        self.begin_item(key)?;
        write!(self.out, "\"{}\"", escape_string(value))
    }

    pub fn boolean(&mut self, key: Option<&str>, value: bool) -> fmt::Result {
        self.raw(key, value)
    }

    pub fn null(&mut self, key: Option<&str>) -> fmt::Result {
        self.raw(key, "null")
    }

    pub fn double(&mut self, key: Option<&str>, value: f64) -> fmt::Result {
        self.raw(key, format_double(value))
    }

    pub fn point(&mut self, point: &Point3<f64>) -> fmt::Result {
        let text = format_xyz(point, &self.options);
        self.raw(None, text)
    }

    pub fn triangle(&mut self, triangle: &[u32; 3]) -> fmt::Result {
        let text = format_triangle(triangle, &self.options);
        self.raw(None, text)
    }

    /// Consume the writer; fails if a container is still open
    pub fn finish(self) -> Result<String, fmt::Error> {
        if !self.stack.is_empty() {
            return Err(fmt::Error);
        }
        Ok(self.out)
    }
}
