// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type shared by the whole crate.  Nothing inside the
//! escape-time loop can fail; everything here is either a bad
//! configuration caught before the first frame, or a sink that could
//! not present a frame.

use std::io;

/// Everything that can stop a zoom run.
#[derive(Debug, Fail)]
pub enum ZoomError {
    /// A run parameter is out of range.
    #[fail(display = "invalid configuration: {}", _0)]
    Config(String),

    /// A palette contained no colours.
    #[fail(display = "palette has no entries")]
    EmptyPalette,

    /// A palette file line could not be parsed.
    #[fail(display = "palette line {}: {}", line, reason)]
    Palette {
        /// One-based line number in the palette source.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The sink handed to the renderer is not the size of the view.
    #[fail(
        display = "sink is {}x{} but the view is {}x{}",
        sink_width, sink_height, width, height
    )]
    SinkMismatch {
        /// Width of the sink.
        sink_width: usize,
        /// Height of the sink.
        sink_height: usize,
        /// Width of the configured view.
        width: usize,
        /// Height of the configured view.
        height: usize,
    },

    /// Reading a palette or writing a frame failed.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for ZoomError {
    fn from(err: io::Error) -> Self {
        ZoomError::Io(err)
    }
}
