//! Colour palettes, diverging five-class schemes from <https://colorbrewer2.org>

use crate::error::{Error, Result};

pub const PALETTE_COUNT: usize = 9;
pub const PALETTE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
  pub fn as_float(self) -> (f32, f32, f32) {
    (
      f32::from(self.0) / 255.0,
      f32::from(self.1) / 255.0,
      f32::from(self.2) / 255.0,
    )
  }
}

/// Text, borders and the shading of elapsed weeks
pub const INK: Rgb = Rgb(0, 0, 0);

pub const WHITE: Rgb = Rgb(255, 255, 255);

static PALETTES: [[Rgb; PALETTE_SIZE]; PALETTE_COUNT] = [
  // BrBG
  [Rgb(166, 97, 26), Rgb(223, 194, 125), Rgb(245, 245, 245), Rgb(128, 205, 193), Rgb(1, 133, 113)],
  // PiYG
  [Rgb(77, 172, 38), Rgb(184, 225, 134), Rgb(247, 247, 247), Rgb(241, 182, 218), Rgb(208, 28, 139)],
  // PRGn
  [Rgb(123, 50, 148), Rgb(194, 165, 207), Rgb(247, 247, 247), Rgb(166, 219, 160), Rgb(0, 136, 55)],
  // PuOr
  [Rgb(94, 60, 153), Rgb(178, 171, 210), Rgb(247, 247, 247), Rgb(253, 184, 99), Rgb(230, 97, 1)],
  // RdBu
  [Rgb(5, 113, 176), Rgb(146, 197, 222), Rgb(247, 247, 247), Rgb(244, 165, 130), Rgb(202, 0, 32)],
  // RdGy
  [Rgb(64, 64, 64), Rgb(186, 186, 186), Rgb(255, 255, 255), Rgb(244, 165, 130), Rgb(202, 0, 32)],
  // RdYlBu
  [Rgb(44, 123, 182), Rgb(171, 217, 233), Rgb(255, 255, 191), Rgb(253, 174, 97), Rgb(215, 25, 28)],
  // RdYlGn
  [Rgb(26, 150, 65), Rgb(166, 217, 106), Rgb(255, 255, 191), Rgb(253, 174, 97), Rgb(215, 25, 28)],
  // Spectral
  [Rgb(43, 131, 186), Rgb(171, 221, 164), Rgb(255, 255, 191), Rgb(253, 174, 97), Rgb(215, 25, 28)],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
  colors: [Rgb; PALETTE_SIZE],
}

impl Palette {
  pub const fn title(&self) -> Rgb {
    self.colors[0]
  }

  pub const fn current_week(&self) -> Rgb {
    self.colors[0]
  }

  pub const fn month_band(&self) -> Rgb {
    self.colors[1]
  }

  pub const fn future_week(&self) -> Rgb {
    self.colors[2]
  }

  pub const fn minor_holiday(&self) -> Rgb {
    self.colors[3]
  }

  pub const fn major_holiday(&self) -> Rgb {
    self.colors[4]
  }
}

/// Pick one of the predefined palettes, `invert` swaps the roles end for end
pub fn select(index: i64, invert: bool) -> Result<Palette> {
  let mut colors = usize::try_from(index)
    .ok()
    .and_then(|index| PALETTES.get(index))
    .copied()
    .ok_or(Error::InvalidPalette(index))?;

  if invert {
    colors.reverse();
  }

  Ok(Palette { colors })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn inverted_is_reversed() {
    for index in 0..PALETTE_COUNT as i64 {
      let plain = select(index, false).unwrap();
      let inverted = select(index, true).unwrap();

      let mut reversed = plain.colors;
      reversed.reverse();
      assert_eq!(reversed, inverted.colors);
      assert_eq!(plain.title(), inverted.major_holiday());
    }
  }

  #[test]
  fn selection_is_deterministic() {
    assert_eq!(select(4, false).unwrap(), select(4, false).unwrap());
    assert_eq!(Rgb(166, 97, 26), select(0, false).unwrap().title());
    assert_eq!(Rgb(245, 245, 245), select(0, false).unwrap().future_week());
  }

  #[test]
  fn rejects_out_of_range() {
    for index in [-1, 9, 100, i64::MIN] {
      assert!(matches!(select(index, false), Err(Error::InvalidPalette(i)) if i == index));
      assert!(select(index, true).is_err());
    }
  }

  #[test]
  fn converts_to_unit_range() {
    assert_eq!((0.0, 1.0, 0.2), Rgb(0, 255, 51).as_float());
  }
}
