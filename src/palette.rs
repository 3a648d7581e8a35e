// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Colour lookup.  Escape results are mapped onto a short cyclic
//! table: result 1 takes the first entry, result `L` the last, result
//! `L + 1` wraps back to the first.  Members of the set (result 0) are
//! always black.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use errors::ZoomError;

/// An 8-bit-per-channel colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// The colour of points inside the set.
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

const FIRE: [(u8, u8, u8); 40] = [
    (255, 180, 4),
    (240, 156, 4),
    (220, 124, 4),
    (156, 71, 4),
    (72, 20, 4),
    (251, 180, 4),
    (180, 74, 4),
    (180, 70, 4),
    (164, 91, 4),
    (100, 28, 4),
    (191, 82, 4),
    (47, 5, 4),
    (138, 39, 4),
    (81, 27, 4),
    (192, 89, 4),
    (61, 27, 4),
    (216, 148, 4),
    (71, 14, 4),
    (142, 48, 4),
    (196, 102, 4),
    (58, 9, 4),
    (132, 45, 4),
    (95, 15, 4),
    (92, 21, 4),
    (166, 59, 4),
    (244, 178, 4),
    (194, 121, 4),
    (120, 41, 4),
    (53, 14, 4),
    (80, 15, 4),
    (23, 3, 4),
    (249, 204, 4),
    (97, 25, 4),
    (124, 30, 4),
    (151, 57, 4),
    (104, 36, 4),
    (239, 171, 4),
    (131, 57, 4),
    (111, 23, 4),
    (4, 2, 4),
];

/// A non-empty, cyclically indexed colour table.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    entries: Vec<Rgb>,
}

impl Palette {
    /// Wraps a list of colours.  An empty list is rejected.
    pub fn new(entries: Vec<Rgb>) -> Result<Palette, ZoomError> {
        if entries.is_empty() {
            return Err(ZoomError::EmptyPalette);
        }
        Ok(Palette { entries })
    }

    /// Reads a palette from a text file.  See `from_reader`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Palette, ZoomError> {
        let file = File::open(path)?;
        Palette::from_reader(file)
    }

    /// Reads a palette with one `r,g,b` triple per line.  Blank lines
    /// and lines starting with `#` are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Palette, ZoomError> {
        let mut entries = vec![];
        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            entries.push(parse_rgb(line).ok_or_else(|| ZoomError::Palette {
                line: index + 1,
                reason: format!("expected r,g,b with each channel in 0..=255, got {:?}", line),
            })?);
        }
        Palette::new(entries)
    }

    /// The number of entries; never zero.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The colour for an escape result.  0 is black; any other result
    /// `r` picks entry `(r - 1) mod len`, which is the wrapped form of
    /// `(r mod len) - 1`.
    pub fn color(&self, result: u32) -> Rgb {
        if result == 0 {
            return Rgb::BLACK;
        }
        self.entries[(result as usize - 1) % self.entries.len()]
    }
}

impl Default for Palette {
    /// The 40 entry orange-to-black fire palette.
    fn default() -> Self {
        Palette {
            entries: FIRE.iter().map(|&(r, g, b)| Rgb(r, g, b)).collect(),
        }
    }
}

fn parse_rgb(s: &str) -> Option<Rgb> {
    let channels: Vec<Option<u8>> = s.split(',').map(|c| u8::from_str(c.trim()).ok()).collect();
    match channels.as_slice() {
        [Some(r), Some(g), Some(b)] => Some(Rgb(*r, *g, *b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_has_forty_entries() {
        let pal = Palette::default();
        assert_eq!(pal.len(), 40);
        assert_eq!(pal.color(1), Rgb(255, 180, 4));
        assert_eq!(pal.color(2), Rgb(240, 156, 4));
    }

    #[test]
    fn zero_is_black() {
        assert_eq!(Palette::default().color(0), Rgb::BLACK);
    }

    #[test]
    fn result_equal_to_length_takes_last_entry() {
        let pal = Palette::default();
        assert_eq!(pal.color(40), Rgb(4, 2, 4));
        assert_eq!(pal.color(80), Rgb(4, 2, 4));
    }

    #[test]
    fn results_wrap_around() {
        let pal = Palette::default();
        assert_eq!(pal.color(41), pal.color(1));
        assert_eq!(pal.color(1000), pal.color(40));
        assert_eq!(pal.color(u32::max_value()), pal.color(u32::max_value() % 40));
    }

    #[test]
    fn single_entry_palette() {
        let pal = Palette::new(vec![Rgb(1, 2, 3)]).unwrap();
        assert_eq!(pal.color(1), Rgb(1, 2, 3));
        assert_eq!(pal.color(7), Rgb(1, 2, 3));
        assert_eq!(pal.color(0), Rgb::BLACK);
    }

    #[test]
    fn empty_palette_is_rejected() {
        match Palette::new(vec![]) {
            Err(ZoomError::EmptyPalette) => (),
            other => panic!("expected EmptyPalette, got {:?}", other),
        }
    }

    #[test]
    fn reads_text_palette() {
        let text = "# warm\n255,0,0\n\n 0, 255 , 0\n0,0,255\n";
        let pal = Palette::from_reader(text.as_bytes()).unwrap();
        assert_eq!(pal.len(), 3);
        assert_eq!(pal.color(2), Rgb(0, 255, 0));
        assert_eq!(pal.color(3), Rgb(0, 0, 255));
    }

    #[test]
    fn bad_line_is_reported_by_number() {
        let text = "255,0,0\n# comment\n1,2\n";
        match Palette::from_reader(text.as_bytes()) {
            Err(ZoomError::Palette { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected a palette error, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_channel_is_rejected() {
        assert!(Palette::from_reader("256,0,0\n".as_bytes()).is_err());
    }

    #[test]
    fn comments_only_is_empty() {
        match Palette::from_reader("# nothing\n\n".as_bytes()) {
            Err(ZoomError::EmptyPalette) => (),
            other => panic!("expected EmptyPalette, got {:?}", other),
        }
    }
}
