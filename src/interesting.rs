//! Finds "interesting pixels" in a probe frame.  For our purposes,
//! "interesting" means the pixel did not escape but at least one of
//! its four neighbors did, which puts it right on the border of the
//! Mandelbrot set.  The border is where the detail lives, so zooming
//! onto any such pixel is guaranteed to keep something worth looking
//! at in the window.  Which border pixel we zoom onto is chosen at
//! random; that randomness is the only thing that makes two runs of
//! this renderer produce different pictures.

use framebuffer::FrameBuffer;
use rand::prelude::*;
use render::INTERIOR;
use viewport::Pixel;

/// Scratch storage for border candidates.  One of these lives for a
/// whole render and is cleared and refilled on every probe pass, so
/// the allocation happens once no matter how many zoom steps run.
pub struct CandidateSet {
    pixels: Vec<Pixel>,
    capacity: usize,
}

impl CandidateSet {
    /// A candidate set that will never hold more than `capacity`
    /// pixels in a single scan.
    pub fn new(capacity: usize) -> CandidateSet {
        CandidateSet {
            pixels: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// The default sizing: ten rows' worth of candidates.  Probe
    /// frames of the set's border are sparse enough that this is
    /// rarely hit, and a noisy frame that does hit it still yields a
    /// usable pick from the part that was scanned.
    pub fn for_width(width: usize) -> CandidateSet {
        CandidateSet::new(width * 10)
    }

    /// The number of candidates collected by the last scan.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Whether the last scan collected anything at all.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Scans a probe frame for border pixels and picks one uniformly at
/// random from the injected generator.  Only the interior of the
/// frame is scanned; skipping the outermost ring means every
/// candidate has four readable neighbors.  The scan stops early once
/// the candidate set is full, trading completeness for a bounded
/// cost on noisy frames.
///
/// A frame with no border at all, because the probe came back
/// uniformly escaped or uniformly interior, yields the center pixel,
/// which is always a valid coordinate to zoom onto.
pub fn find_interesting_pixel<R: Rng>(
    frame: &FrameBuffer,
    candidates: &mut CandidateSet,
    rng: &mut R,
) -> Pixel {
    candidates.pixels.clear();
    let (width, height) = (frame.width(), frame.height());
    if width >= 3 && height >= 3 {
        'scan: for row in 1..height - 1 {
            for col in 1..width - 1 {
                if frame.get(col, row) != INTERIOR {
                    continue;
                }
                let escaped_neighbor = frame.get(col, row - 1) != INTERIOR
                    || frame.get(col, row + 1) != INTERIOR
                    || frame.get(col - 1, row) != INTERIOR
                    || frame.get(col + 1, row) != INTERIOR;
                if escaped_neighbor {
                    candidates.pixels.push(Pixel(col, row));
                    if candidates.pixels.len() >= candidates.capacity {
                        break 'scan;
                    }
                }
            }
        }
    }
    match candidates.pixels.choose(rng) {
        Some(pixel) => *pixel,
        None => Pixel(width / 2, height / 2),
    }
}
