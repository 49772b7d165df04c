// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drives the whole render: a fixed number of probe/select/re-center
//! rounds, each doubling the magnification, followed by one full-depth
//! pass at wherever the probes ended up pointing.

use framebuffer::{FrameBuffer, RenderError};
use interesting::{find_interesting_pixel, CandidateSet};
use rand::Rng;
use render::{final_pass, probe_pass, Palette};
use viewport::Viewport;

/// Everything a render needs to know up front.  The defaults are the
/// native values for the 7.3" seven-color panel this renderer was
/// built around.
#[derive(Copy, Clone, Debug)]
pub struct RenderConfig {
    /// Frame width in pixels.
    pub width: usize,
    /// Frame height in pixels.
    pub height: usize,
    /// Iteration budget for the probe passes.  Shallow on purpose:
    /// the probes only need to tell inside from outside.
    pub probe_depth: usize,
    /// Iteration budget for the final pass.
    pub final_depth: usize,
    /// How many probe/select/re-center rounds to run before the
    /// final pass.
    pub zoom_steps: u32,
    /// The window half-width before any zooming.  It is halved once
    /// at setup and once per zoom step, so the final pass renders at
    /// `start_inv_zoom / 2^(zoom_steps + 1)`.
    pub start_inv_zoom: f64,
    /// The escape-time color mapping for the final pass.
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig {
            width: 800,
            height: 480,
            probe_depth: 50,
            final_depth: 100,
            zoom_steps: 3,
            start_inv_zoom: 4.0,
            palette: Palette::default(),
        }
    }
}

/// Owns a render configuration and runs renders against caller-owned
/// framebuffers.  The renderer itself holds no frame state, so one
/// renderer can paint any number of buffers.
pub struct ZoomRenderer {
    config: RenderConfig,
}

impl ZoomRenderer {
    /// A renderer for the given configuration.
    pub fn new(config: RenderConfig) -> ZoomRenderer {
        ZoomRenderer { config }
    }

    /// The configuration this renderer was built with.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Fully overwrites `image` with a rendered zoom of the set and
    /// returns the viewport of the final pass.  The buffer must pack
    /// to exactly the configured dimensions; that is checked before
    /// any pixel is written.  All randomness comes from the caller's
    /// generator, so a seeded generator replays the same zoom.
    pub fn render<R: Rng>(&self, image: &mut [u8], rng: &mut R) -> Result<Viewport, RenderError> {
        let cfg = &self.config;
        let mut frame = FrameBuffer::new(image, cfg.width, cfg.height)?;
        let mut viewport = Viewport::new(cfg.start_inv_zoom * 0.5);
        let mut candidates = CandidateSet::for_width(cfg.width);
        for step in 1..=cfg.zoom_steps {
            viewport.zoom_in();
            probe_pass(&mut frame, &viewport, cfg.probe_depth);
            let target = find_interesting_pixel(&frame, &mut candidates, rng);
            viewport.recenter(target, cfg.width, cfg.height);
            info!(
                "zoom {}/{}: {} candidates, window half-width {}, center {}",
                step,
                cfg.zoom_steps,
                candidates.len(),
                viewport.inv_zoom,
                viewport.center
            );
        }
        final_pass(&mut frame, &viewport, cfg.final_depth, &cfg.palette);
        info!(
            "final pass done at offset {}, {}",
            viewport.center.re, viewport.center.im
        );
        Ok(viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use framebuffer::packed_len;
    use rand::prelude::*;

    fn toy_config() -> RenderConfig {
        RenderConfig {
            width: 16,
            height: 16,
            probe_depth: 30,
            final_depth: 40,
            ..Default::default()
        }
    }

    #[test]
    fn n_zoom_steps_halve_the_window_n_plus_one_times() {
        let renderer = ZoomRenderer::new(toy_config());
        let mut bytes = vec![0u8; packed_len(16, 16)];
        let mut rng = StdRng::seed_from_u64(3);
        let viewport = renderer.render(&mut bytes, &mut rng).unwrap();
        // Three steps plus the setup halving: 4.0 / 2^4.  Halving is
        // exact in binary floating point, so the comparison is too.
        assert_eq!(viewport.inv_zoom, 0.25);
    }

    #[test]
    fn rejects_a_buffer_that_does_not_match_the_frame() {
        let renderer = ZoomRenderer::new(toy_config());
        let mut bytes = vec![0u8; 10];
        let mut rng = StdRng::seed_from_u64(0);
        assert!(renderer.render(&mut bytes, &mut rng).is_err());
    }

    #[test]
    fn the_final_frame_only_holds_palette_values() {
        let config = toy_config();
        let renderer = ZoomRenderer::new(config);
        let mut bytes = vec![0u8; packed_len(16, 16)];
        let mut rng = StdRng::seed_from_u64(41);
        renderer.render(&mut bytes, &mut rng).unwrap();
        let frame = FrameBuffer::new(&mut bytes, 16, 16).unwrap();
        for (row, col) in iproduct!(0..16, 0..16) {
            assert!(frame.get(col, row) <= config.palette.bands);
        }
    }

    #[test]
    fn the_same_seed_renders_the_same_image() {
        let renderer = ZoomRenderer::new(toy_config());
        let mut first = vec![0u8; packed_len(16, 16)];
        let mut second = vec![0u8; packed_len(16, 16)];
        let mut rng = StdRng::seed_from_u64(23);
        renderer.render(&mut first, &mut rng).unwrap();
        let mut rng = StdRng::seed_from_u64(23);
        renderer.render(&mut second, &mut rng).unwrap();
        assert_eq!(first, second);
    }
}
