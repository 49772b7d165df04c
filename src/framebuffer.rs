//! Contains the FrameBuffer struct, a packed four-bit-per-pixel view
//! over a byte buffer the caller owns.  The panel this format targets
//! draws from a palette of at most sixteen inks, so two pixels share
//! each byte: the even column takes the high nibble, the odd column
//! the low nibble.  The byte order is exactly what the panel's driver
//! shifts out over the wire, which is why nothing in this module is
//! allowed to be clever about layout.

/// The number of bytes a `width` by `height` frame occupies once two
/// pixels are packed into each byte.  Odd pixel counts round up.
pub fn packed_len(width: usize, height: usize) -> usize {
    (width * height + 1) / 2
}

/// The ways a render call can fail before any pixel is written.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The caller's buffer does not hold exactly as many bytes as the
    /// configured dimensions pack into.
    #[fail(
        display = "framebuffer is {} bytes but a {}x{} frame packs into exactly {}",
        actual, width, height, needed
    )]
    BufferSize {
        /// How many bytes the caller actually handed over.
        actual: usize,
        /// The configured frame width in pixels.
        width: usize,
        /// The configured frame height in pixels.
        height: usize,
        /// How many bytes that width and height pack into.
        needed: usize,
    },
}

/// A row-major, 4-bit-per-pixel frame borrowed from the caller for
/// the duration of a render.  The engine never allocates or resizes
/// it; every write lands in the bytes the caller will later hand to
/// the panel verbatim.
pub struct FrameBuffer<'a> {
    bytes: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> FrameBuffer<'a> {
    /// Wraps a caller-owned byte buffer.  The length is checked once,
    /// here, against the packed size of the requested dimensions, so
    /// that no later write can run past the end of the allocation.
    pub fn new(
        bytes: &'a mut [u8],
        width: usize,
        height: usize,
    ) -> Result<FrameBuffer<'a>, RenderError> {
        // Nibble selection goes by column parity.  An odd width would
        // fold the first column of one row into the last byte of the
        // row above it.
        debug_assert!(width % 2 == 0 || height < 2);
        let needed = packed_len(width, height);
        if bytes.len() != needed {
            return Err(RenderError::BufferSize {
                actual: bytes.len(),
                width,
                height,
                needed,
            });
        }
        Ok(FrameBuffer {
            bytes,
            width,
            height,
        })
    }

    /// The frame width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The frame height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Reads the palette value of the pixel at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        let packed = self.bytes[(y * self.width + x) / 2];
        if x % 2 == 1 {
            packed & 0x0F
        } else {
            (packed & 0xF0) >> 4
        }
    }

    /// Writes a palette value to the pixel at column `x`, row `y`,
    /// leaving the other nibble of the shared byte untouched.  Values
    /// above fifteen are masked down to their low four bits.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        let index = (y * self.width + x) / 2;
        let packed = self.bytes[index];
        self.bytes[index] = if x % 2 == 1 {
            (packed & 0xF0) | (value & 0x0F)
        } else {
            (packed & 0x0F) | ((value & 0x0F) << 4)
        };
    }
}
