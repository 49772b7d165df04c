#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelzoom renderer
//!
//! The Mandelbrot takes a point on the complex plane and repeatedly
//! multiplies it by itself, measuring how quickly that number goes to
//! infinity.  This "velocity" is the number used to render the image.
//! Most renderers leave the choice of where to look up to a human.
//! This one chooses for itself: it renders a series of cheap, shallow
//! black-and-white probes of the set, finds a pixel sitting on the
//! border between the black heart and the escaping outside, and zooms
//! in on it.  After a few rounds of probing and re-centering it
//! renders the final window at full depth, with a small repeating
//! palette that cycles faster the closer a point sits to the border.
//!
//! The output is not a grayscale image but a framebuffer for a
//! seven-color electrophoretic panel: four bits per pixel, two pixels
//! to a byte, each value an index into the panel's fixed set of inks.
//! The caller hands in that buffer, fully allocated, and gets it back
//! fully painted.  Nothing here talks to hardware; pushing the bytes
//! over the wire is somebody else's job.

#[macro_use]
extern crate itertools;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate num;
extern crate rand;

pub mod framebuffer;
pub mod interesting;
pub mod render;
pub mod viewport;
pub mod zoom;

pub use framebuffer::{packed_len, FrameBuffer, RenderError};
pub use render::Palette;
pub use viewport::{Pixel, Viewport};
pub use zoom::{RenderConfig, ZoomRenderer};
