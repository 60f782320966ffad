//! The two standard Type 1 fonts used on the page and their advance widths.

/// Glyph widths in thousandths of the font size, for ' ' through '~'
const HELVETICA: [u16; 95] = [
  278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' to '/'
  556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // digits
  278, 278, 584, 584, 584, 556, 1015, // ':' to '@'
  667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' to 'M'
  722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' to 'Z'
  278, 278, 278, 469, 556, 333, // '[' to '`'
  556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' to 'm'
  556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' to 'z'
  334, 260, 334, 584, // '{' to '~'
];

const HELVETICA_BOLD: [u16; 95] = [
  278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' to '/'
  556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // digits
  333, 333, 584, 584, 584, 611, 975, // ':' to '@'
  722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A' to 'M'
  722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' to 'Z'
  333, 278, 333, 584, 556, 333, // '[' to '`'
  556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a' to 'm'
  611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n' to 'z'
  389, 280, 389, 584, // '{' to '~'
];

/// Width assumed for characters outside the table
const DEFAULT_WIDTH: u16 = 556;

/// Height of capital letters, close to what a label visually occupies
const CAP_HEIGHT: f32 = 0.718;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Font {
  Regular,
  Bold,
}

impl Font {
  pub const ALL: [Self; 2] = [Self::Regular, Self::Bold];

  pub const fn base_font(self) -> &'static [u8] {
    match self {
      Self::Regular => b"Helvetica",
      Self::Bold => b"Helvetica-Bold",
    }
  }

  /// Name of the font in the page resources
  pub const fn resource_name(self) -> &'static [u8] {
    match self {
      Self::Regular => b"F1",
      Self::Bold => b"F2",
    }
  }

  const fn widths(self) -> &'static [u16; 95] {
    match self {
      Self::Regular => &HELVETICA,
      Self::Bold => &HELVETICA_BOLD,
    }
  }

  pub fn text_width(self, text: &str, size: f32) -> f32 {
    let units: u32 = encode(text)
      .iter()
      .map(|byte| {
        let width = byte
          .checked_sub(b' ')
          .and_then(|idx| self.widths().get(usize::from(idx)))
          .copied()
          .unwrap_or(DEFAULT_WIDTH);

        u32::from(width)
      })
      .sum();

    units as f32 * size / 1000.0
  }

  pub fn text_height(self, size: f32) -> f32 {
    CAP_HEIGHT * size
  }
}

/// WinAnsi bytes for `text`; Latin-1 passes through, anything else becomes '?'
pub fn encode(text: &str) -> Vec<u8> {
  text
    .chars()
    .map(|c| match u32::from(c) {
      code @ (0x20..=0x7e | 0xa0..=0xff) => code as u8,
      _ => b'?',
    })
    .collect()
}
