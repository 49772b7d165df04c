// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The two rendering passes.  Both walk every pixel of the frame,
//! map it through the viewport to a point on the complex plane, and
//! iterate the quadratic recurrence until the point escapes or the
//! depth budget runs out.  The probe pass is a cheap binary
//! classification used only to hunt for the set's border; the final
//! pass spends twice the depth and maps escape times through a
//! repeating palette.

use framebuffer::FrameBuffer;
use num::Complex;
use viewport::{Pixel, Viewport};

/// Palette value for points that never escaped within the budget.
pub const INTERIOR: u8 = 0x0;

/// Probe-pass palette value for points that escaped.
pub const ESCAPED: u8 = 0x1;

// A point whose magnitude passes 2 can only run away from there.
const ESCAPE_RADIUS_SQ: f64 = 4.0;

/// This is our classic iterator function, which either returns the
/// number of iterations it took to escape the Mandelbrot set, or it
/// returns nothing at all.  A point already outside the escape radius
/// escapes on iteration zero.
pub fn escape_count(c: Complex<f64>, depth: usize) -> Option<usize> {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for i in 0..depth {
        z = z * z + c;
        if z.norm_sqr() > ESCAPE_RADIUS_SQ {
            return Some(i);
        }
    }
    None
}

/// Fills the frame with a binary escaped/not-escaped classification
/// of the viewport at the given depth.  Every pixel is overwritten.
/// The result is not meant to be looked at; it exists so the border
/// of the set can be searched for a place worth zooming into.
pub fn probe_pass(frame: &mut FrameBuffer, viewport: &Viewport, depth: usize) {
    let (width, height) = (frame.width(), frame.height());
    for (row, col) in iproduct!(0..height, 0..width) {
        let c = viewport.pixel_to_point(Pixel(col, row), width, height);
        let color = match escape_count(c, depth) {
            Some(_) => ESCAPED,
            None => INTERIOR,
        };
        frame.set(col, row, color);
    }
}

/// How escape times become ink.  A small set of bands repeats several
/// times over the escape-time range, and a skew exponent spends most
/// of the color changes on points near the border of the set, where
/// neighboring escape times differ by little.
#[derive(Copy, Clone, Debug)]
pub struct Palette {
    /// The number of distinct bands.  Band values start at 1; zero
    /// stays reserved for the interior.
    pub bands: u8,
    /// How many times the bands cycle across the escape-time range.
    pub repetitions: u8,
    /// Exponent concentrating band changes near the set border.
    pub skew: f64,
}

impl Default for Palette {
    fn default() -> Palette {
        Palette {
            bands: 7,
            repetitions: 4,
            skew: 1.4,
        }
    }
}

impl Palette {
    /// Maps an escape count at the given depth to a palette value.
    /// Interior points get 0; escaped points get a band in
    /// `1..=bands`, chosen by scaling `(depth - count)` through the
    /// skew exponent and wrapping by the band count.
    pub fn index_for(&self, escape: Option<usize>, depth: usize) -> u8 {
        match escape {
            None => INTERIOR,
            Some(count) => {
                let depth = depth as f64;
                let sweep = f64::from(self.bands) * f64::from(self.repetitions) / depth;
                let skewed = (depth - count as f64).powf(self.skew) / depth.powf(self.skew - 1.0);
                ((sweep * skewed) as u8 % self.bands) + 1
            }
        }
    }
}

/// Fills the frame with the palette rendering of the viewport at the
/// given depth.  Every pixel is overwritten.  This is the pass whose
/// output goes to the panel.
pub fn final_pass(frame: &mut FrameBuffer, viewport: &Viewport, depth: usize, palette: &Palette) {
    let (width, height) = (frame.width(), frame.height());
    for (row, col) in iproduct!(0..height, 0..width) {
        let c = viewport.pixel_to_point(Pixel(col, row), width, height);
        frame.set(col, row, palette.index_for(escape_count(c, depth), depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framebuffer::packed_len;

    #[test]
    fn the_origin_never_escapes() {
        assert_eq!(escape_count(Complex::new(0.0, 0.0), 100), None);
    }

    #[test]
    fn points_outside_the_escape_radius_escape_immediately() {
        assert_eq!(escape_count(Complex::new(2.5, 0.0), 100), Some(0));
        assert_eq!(escape_count(Complex::new(0.0, -3.0), 100), Some(0));
    }

    #[test]
    fn escape_counts_stay_below_the_depth_budget() {
        for (row, col) in iproduct!(0..9, 0..9) {
            let c = Complex::new(col as f64 / 2.0 - 2.0, row as f64 / 2.0 - 2.0);
            if let Some(count) = escape_count(c, 25) {
                assert!(count < 25);
            }
        }
    }

    #[test]
    fn probe_classifies_the_toy_viewport() {
        let mut bytes = vec![0u8; packed_len(16, 16)];
        let mut frame = FrameBuffer::new(&mut bytes, 16, 16).unwrap();
        let vp = Viewport::new(2.0);
        probe_pass(&mut frame, &vp, 50);
        // The center pixel samples (0, 0), squarely inside the set.
        assert_eq!(frame.get(8, 8), INTERIOR);
        // The corner samples (-1, -1), which escapes at iteration 2.
        assert_eq!(escape_count(Complex::new(-1.0, -1.0), 50), Some(2));
        assert_eq!(frame.get(0, 0), ESCAPED);
        for (row, col) in iproduct!(0..16, 0..16) {
            assert!(frame.get(col, row) <= ESCAPED);
        }
    }

    #[test]
    fn interior_points_use_the_reserved_color() {
        assert_eq!(Palette::default().index_for(None, 100), INTERIOR);
    }

    #[test]
    fn escape_times_map_to_the_expected_bands() {
        let palette = Palette::default();
        assert_eq!(palette.index_for(Some(99), 100), 1);
        assert_eq!(palette.index_for(Some(90), 100), 2);
        assert_eq!(palette.index_for(Some(50), 100), 4);
    }

    #[test]
    fn final_palette_values_stay_in_range() {
        let palette = Palette::default();
        let mut bytes = vec![0u8; packed_len(16, 16)];
        let mut frame = FrameBuffer::new(&mut bytes, 16, 16).unwrap();
        let vp = Viewport::new(2.0);
        final_pass(&mut frame, &vp, 100, &palette);
        for (row, col) in iproduct!(0..16, 0..16) {
            assert!(frame.get(col, row) <= palette.bands);
        }
    }
}
