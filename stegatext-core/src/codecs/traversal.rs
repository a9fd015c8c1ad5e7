//! The order in which channel slots are visited when reading or writing data.
//!
//! A slot is a single channel of a single pixel. Both strategies number the usable
//! slots `0..n` in raster order (pixel by pixel, then red, green, blue and
//! optionally alpha) and differ only in the order in which those numbers are visited.
//!
//! The scatter strategy is part of the storage format: the seed derivation, the
//! PRNG and the reduction used by the shuffle must never change, or previously
//! encoded images will no longer decode.

use crate::{
    error::{Error, Result},
    pixel_buffer::{Channel, PixelBuffer},
};

use hashbrown::HashMap;
use rand_core::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// The channels used when the alpha channel is excluded.
const CHANNELS_RGB: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
/// The channels used when the alpha channel is included.
const CHANNELS_RGBA: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

/// The strategy used to order the channel slots.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Traversal {
    /// Raster order, starting from the top-left pixel.
    Sequential,
    /// A pseudo-random permutation, seeded from the image itself.
    #[default]
    Scatter,
}

/// Describes where data lives within a pixel buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotLayout {
    traversal: Traversal,
    channels: &'static [Channel],
    bits_per_slot: u8,
}

impl SlotLayout {
    /// Build a slot layout.
    ///
    /// # Arguments
    ///
    /// * `traversal` - The order in which slots are visited.
    /// * `include_alpha` - Whether the alpha channel of each pixel holds data.
    /// * `bits_per_slot` - The number of low bits of each channel that hold data.
    ///
    pub fn new(traversal: Traversal, include_alpha: bool, bits_per_slot: u8) -> Result<Self> {
        if !(1..=2).contains(&bits_per_slot) {
            return Err(Error::InvalidBitsPerSlot(bits_per_slot));
        }

        let channels: &'static [Channel] = if include_alpha {
            &CHANNELS_RGBA
        } else {
            &CHANNELS_RGB
        };

        Ok(Self {
            traversal,
            channels,
            bits_per_slot,
        })
    }

    #[inline]
    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    #[inline]
    pub fn bits_per_slot(&self) -> u8 {
        self.bits_per_slot
    }

    #[inline]
    pub fn channels_per_pixel(&self) -> usize {
        self.channels.len()
    }

    /// The number of pixels at the start of the buffer that never hold data.
    ///
    /// `Note:` the scatter strategy reserves the top-left pixel as its seed.
    #[inline]
    pub fn reserved_pixels(&self) -> usize {
        match self.traversal {
            Traversal::Sequential => 0,
            Traversal::Scatter => 1,
        }
    }

    /// The number of slots that may hold data.
    pub fn usable_slots(&self, buffer: &PixelBuffer) -> u64 {
        let pixels = buffer.pixel_count().saturating_sub(self.reserved_pixels());
        pixels as u64 * self.channels.len() as u64
    }

    /// The total number of bits that may be stored within a buffer.
    pub fn capacity(&self, buffer: &PixelBuffer) -> u64 {
        self.usable_slots(buffer) * self.bits_per_slot as u64
    }

    /// Convert a slot number into a raster pixel index and a channel.
    #[inline]
    pub fn locate(&self, slot: u64) -> (usize, Channel) {
        let per_pixel = self.channels.len() as u64;
        let pixel = self.reserved_pixels() + (slot / per_pixel) as usize;
        (pixel, self.channels[(slot % per_pixel) as usize])
    }

    /// Iterate over the slots of a buffer in the order defined by the traversal strategy.
    pub fn slots(&self, buffer: &PixelBuffer) -> SlotOrder {
        let total = self.usable_slots(buffer);

        let order = match self.traversal {
            Traversal::Sequential => Order::Sequential(0..total),
            Traversal::Scatter => Order::Scatter(ScatterOrder::new(scatter_seed(buffer), total)),
        };

        SlotOrder {
            layout: *self,
            order,
        }
    }
}

/// Derive the scatter seed from a buffer.
///
/// `seed = (width << 48) ^ (height << 32) ^ argb(0, 0)`
///
/// `Note:` the top-left pixel is never written, so the seed is the same before
/// and after encoding.
pub fn scatter_seed(buffer: &PixelBuffer) -> u64 {
    let (width, height) = buffer.dimensions();
    ((width as u64) << 48) ^ ((height as u64) << 32) ^ (buffer.get_pixel(0, 0) as u64)
}

enum Order {
    Sequential(std::ops::Range<u64>),
    Scatter(ScatterOrder),
}

/// An iterator over the slots of a buffer, yielding a raster pixel index and a channel.
pub struct SlotOrder {
    layout: SlotLayout,
    order: Order,
}

impl Iterator for SlotOrder {
    type Item = (usize, Channel);

    fn next(&mut self) -> Option<Self::Item> {
        let slot = match &mut self.order {
            Order::Sequential(range) => range.next(),
            Order::Scatter(scatter) => scatter.next(),
        }?;

        Some(self.layout.locate(slot))
    }
}

/// A lazily evaluated Fisher-Yates permutation of `0..len`.
///
/// Only the entries that have been displaced by a swap are held in memory, so
/// visiting the first `m` slots costs `O(m)` time and space regardless of the
/// image size. Each value is yielded exactly once.
pub struct ScatterOrder {
    rng: Xoshiro256PlusPlus,
    /// Positions whose value differs from the position itself.
    displaced: HashMap<u64, u64>,
    position: u64,
    len: u64,
}

impl ScatterOrder {
    pub fn new(seed: u64, len: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
            displaced: HashMap::new(),
            position: 0,
            len,
        }
    }

    /// Pick a uniformly distributed value in `0..bound` with a single multiply.
    #[inline]
    fn bounded(&mut self, bound: u64) -> u64 {
        ((self.rng.next_u64() as u128 * bound as u128) >> 64) as u64
    }
}

impl Iterator for ScatterOrder {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.position >= self.len {
            return None;
        }

        let i = self.position;
        let j = i + self.bounded(self.len - i);
        self.position += 1;

        // Position i is never read again, so its entry can be dropped.
        let at_i = self.displaced.remove(&i).unwrap_or(i);
        if j == i {
            return Some(at_i);
        }

        Some(self.displaced.insert(j, at_i).unwrap_or(j))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.len - self.position) as usize;
        (remaining, Some(remaining))
    }
}
