use pdf_writer::{Content, Str};

use super::metrics::{self, Font};
use crate::color::Rgb;
use crate::destination::Destination;
use crate::layout::Rect;

/// Bézier control point distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

/// Clickable area on a page that jumps to a named destination.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub rect: Rect,
    pub destination: Destination,
}

/// Drawing operations of a single page.
///
/// Collects the page content stream together with the link annotations that
/// have to be attached to the page once it is written out.
pub struct Canvas {
    content: Content,
    links: Vec<Link>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Canvas {
            content: Content::new(),
            links: Vec::new(),
        }
    }

    fn set_fill(&mut self, color: Rgb) {
        let (r, g, b) = color.components();
        self.content.set_fill_rgb(r, g, b);
    }

    fn set_stroke(&mut self, color: Rgb, width: f32) {
        let (r, g, b) = color.components();
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(width);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.set_fill(color);
        self.content.rect(rect.x, rect.y, rect.width, rect.height);
        self.content.fill_nonzero();
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: f32) {
        self.set_stroke(color, width);
        self.content.rect(rect.x, rect.y, rect.width, rect.height);
        self.content.stroke();
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb, width: f32) {
        self.set_stroke(color, width);
        self.content.move_to(from.0, from.1);
        self.content.line_to(to.0, to.1);
        self.content.stroke();
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgb) {
        let k = KAPPA * radius;

        self.set_fill(color);
        self.content.move_to(cx + radius, cy);
        self.content
            .cubic_to(cx + radius, cy + k, cx + k, cy + radius, cx, cy + radius);
        self.content
            .cubic_to(cx - k, cy + radius, cx - radius, cy + k, cx - radius, cy);
        self.content
            .cubic_to(cx - radius, cy - k, cx - k, cy - radius, cx, cy - radius);
        self.content
            .cubic_to(cx + k, cy - radius, cx + radius, cy - k, cx + radius, cy);
        self.content.close_path();
        self.content.fill_nonzero();
    }

    /// Draws `text` with its baseline starting at `(x, y)`.
    pub fn text(&mut self, x: f32, y: f32, font: Font, size: f32, color: Rgb, text: &str) {
        self.set_fill(color);
        self.content.begin_text();
        self.content.set_font(font.resource_name(), size);
        self.content.next_line(x, y);
        self.content.show(Str(&metrics::encode(text)));
        self.content.end_text();
    }

    /// Draws `text` horizontally centered on `center_x`.
    pub fn text_centered(
        &mut self,
        center_x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Rgb,
        text: &str,
    ) {
        let width = font.text_width(text, size);
        self.text(center_x - width / 2.0, y, font, size, color, text);
    }

    /// Draws `text` rotated by 270° so it reads top to bottom, centered on
    /// `(x, y)` along its baseline.
    pub fn text_vertical(&mut self, x: f32, y: f32, font: Font, size: f32, color: Rgb, text: &str) {
        let width = font.text_width(text, size);

        self.content.save_state();
        self.content.transform([0.0, -1.0, 1.0, 0.0, x, y]);
        self.text(-width / 2.0, 0.0, font, size, color, text);
        self.content.restore_state();
    }

    pub fn link(&mut self, rect: Rect, destination: &Destination) {
        self.links.push(Link {
            rect,
            destination: destination.clone(),
        });
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Consumes the canvas, returning the encoded content stream and the
    /// links registered on it.
    pub fn finish(self) -> (Vec<u8>, Vec<Link>) {
        (self.content.finish(), self.links)
    }
}
