use std::collections::BTreeSet;

use pdf_writer::{Content, Filter, Finish as _, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::calendar::grid::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::palette::Rgb;

use super::font::{self, Font};

/// Drawing surface for a single page, coordinates have their origin at the
/// top-left corner and grow downwards
pub struct Canvas {
  content: Content,
  /// Opacities in percent that need a graphics state
  alphas: BTreeSet<u8>,
}

impl Canvas {
  pub fn new() -> Self {
    Self {
      content: Content::new(),
      alphas: BTreeSet::new(),
    }
  }

  fn flip(y: f32) -> f32 {
    PAGE_HEIGHT - y
  }

  pub fn set_color(&mut self, color: Rgb, alpha: f32) {
    let (r, g, b) = color.as_float();
    let percent = (alpha.clamp(0.0, 1.0) * 100.0).round() as u8;
    self.alphas.insert(percent);

    self.content
      .set_parameters(Name(alpha_name(percent).as_bytes()))
      .set_fill_rgb(r, g, b)
      .set_stroke_rgb(r, g, b);
  }

  pub fn set_line_width(&mut self, width: f32) {
    self.content.set_line_width(width);
  }

  pub fn rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) {
    self.content.rect(x, Self::flip(y + height), width, height);
  }

  pub fn fill_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) {
    self.rectangle(x, y, width, height);
    self.content.fill_nonzero();
  }

  pub fn stroke_rectangle(&mut self, x: f32, y: f32, width: f32, height: f32) {
    self.rectangle(x, y, width, height);
    self.content.stroke();
  }

  pub fn line(&mut self, (x0, y0): (f32, f32), (x1, y1): (f32, f32)) {
    self.content
      .move_to(x0, Self::flip(y0))
      .line_to(x1, Self::flip(y1))
      .stroke();
  }

  /// Draw `label` centred within the given box
  pub fn center_text(&mut self, x: f32, y: f32, width: f32, height: f32, label: &str, font: Font, size: f32) {
    let text_width = font.text_width(label, size);
    let text_height = font.text_height(size);
    let encoded = font::encode(label);

    self.content
      .begin_text()
      .set_font(Name(font.resource_name()), size)
      .next_line(
        x + (width - text_width) / 2.0,
        Self::flip(y + (height + text_height) / 2.0),
      )
      .show(Str(&encoded))
      .end_text();
  }

  /// Assemble the single page document
  pub fn finish(self, title: &str) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
      let r = Ref::new(next_id);
      next_id += 1;
      r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let page_id = alloc();
    let content_id = alloc();
    let info_id = alloc();

    let fonts: Vec<(Font, Ref)> = Font::ALL.iter().map(|font| (*font, alloc())).collect();
    let states: Vec<(u8, Ref)> = self.alphas.iter().map(|alpha| (*alpha, alloc())).collect();

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id).kids([page_id]).count(1);

    {
      let mut page = pdf.page(page_id);
      page
        .media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
        .parent(pages_id)
        .contents(content_id);

      let mut resources = page.resources();
      {
        let mut entries = resources.fonts();
        for (font, font_ref) in &fonts {
          entries.pair(Name(font.resource_name()), *font_ref);
        }
      }
      {
        let mut entries = resources.ext_g_states();
        for (alpha, state_ref) in &states {
          entries.pair(Name(alpha_name(*alpha).as_bytes()), *state_ref);
        }
      }
      resources.finish();
      page.finish();
    }

    for (font, font_ref) in &fonts {
      pdf
        .type1_font(*font_ref)
        .base_font(Name(font.base_font()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (alpha, state_ref) in &states {
      let value = f32::from(*alpha) / 100.0;
      pdf.ext_graphics(*state_ref).non_stroking_alpha(value).stroking_alpha(value);
    }

    let raw = self.content.finish();
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
    pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

    pdf
      .document_info(info_id)
      .title(TextStr(title))
      .producer(TextStr(concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))));

    pdf.finish()
  }
}

fn alpha_name(percent: u8) -> String {
  format!("A{percent}")
}
