//! Contains the Viewport struct, which describes the window on the
//! complex plane currently being sampled, and the mapping between a
//! pixel on the integral plane and the complex point it samples.

use num::Complex;

/// Describes the x, y of a pixel in a frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// A rectangular window on the complex plane, described by its center
/// and the half-width of the region it spans.  Halving `inv_zoom`
/// doubles the magnification.
#[derive(Copy, Clone, Debug)]
pub struct Viewport {
    /// Half the width of the sampled window, in complex-plane units.
    pub inv_zoom: f64,
    /// Where the window is centered.  Each zoom step nudges this by a
    /// fraction of the current window rather than recomputing it, so
    /// rounding drift stays bounded by the number of steps taken.
    pub center: Complex<f64>,
}

impl Viewport {
    /// A window of the given half-width centered on the origin.
    pub fn new(inv_zoom: f64) -> Viewport {
        Viewport {
            inv_zoom,
            center: Complex { re: 0.0, im: 0.0 },
        }
    }

    /// Doubles the magnification in place.
    pub fn zoom_in(&mut self) {
        self.inv_zoom *= 0.5;
    }

    /// Given the row and column of a pixel in a `width` by `height`
    /// frame, return the complex number that pixel samples.  Both
    /// axes are scaled by the frame width; the vertical term is
    /// re-centered by `height / (2 * width)` so the window keeps the
    /// aspect ratio of the frame itself.
    pub fn pixel_to_point(&self, pixel: Pixel, width: usize, height: usize) -> Complex<f64> {
        let relative_x = pixel.0 as f64 / width as f64;
        let relative_y = pixel.1 as f64 / width as f64;
        let scale_y = height as f64 / (width as f64 * 2.0);
        Complex {
            re: self.inv_zoom * (relative_x - 0.5) + self.center.re,
            im: self.inv_zoom * (relative_y - scale_y) + self.center.im,
        }
    }

    /// Moves the center toward the given pixel's position within the
    /// current window.  The offset accumulates onto the existing
    /// center; it is never recomputed from scratch.
    pub fn recenter(&mut self, pixel: Pixel, width: usize, height: usize) {
        self.center.re += (pixel.0 as f64 / width as f64 - 0.5) * self.inv_zoom;
        self.center.im += (pixel.1 as f64 / height as f64 - 0.5) * self.inv_zoom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_center_pixel_samples_the_viewport_center() {
        let vp = Viewport::new(2.0);
        let c = vp.pixel_to_point(Pixel(8, 8), 16, 16);
        assert_eq!(c, Complex::new(0.0, 0.0));
    }

    #[test]
    fn vertical_samples_follow_the_panel_aspect() {
        // On a 5:3 panel the center pixel still lands on the center
        // of the window, because the vertical re-centering term uses
        // the same width scale as the samples themselves.
        let vp = Viewport::new(1.0);
        let c = vp.pixel_to_point(Pixel(400, 240), 800, 480);
        assert_eq!(c, Complex::new(0.0, 0.0));
    }

    #[test]
    fn corner_pixels_sample_the_window_edge() {
        let vp = Viewport::new(2.0);
        let c = vp.pixel_to_point(Pixel(0, 0), 16, 16);
        assert_eq!(c, Complex::new(-1.0, -1.0));
    }

    #[test]
    fn zooming_in_halves_the_window() {
        let mut vp = Viewport::new(2.0);
        vp.zoom_in();
        assert_eq!(vp.inv_zoom, 1.0);
        vp.zoom_in();
        assert_eq!(vp.inv_zoom, 0.5);
    }

    #[test]
    fn recentering_accumulates_across_steps() {
        let mut vp = Viewport::new(1.0);
        vp.recenter(Pixel(12, 8), 16, 16);
        assert_eq!(vp.center, Complex::new(0.25, 0.0));
        vp.recenter(Pixel(4, 12), 16, 16);
        assert_eq!(vp.center, Complex::new(0.0, 0.25));
    }
}
