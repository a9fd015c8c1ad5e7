use crate::{
    alphabet::{Alphabet, TERMINATOR},
    codecs::{
        codec::{Codec, ConfigFlags, ConfigParams},
        data_encoder_decoder::{DataDecoder, DataEncoder},
        traversal::{SlotLayout, Traversal},
    },
    error::{Error, Result},
    logger::Logger,
    pixel_buffer::PixelBuffer,
    utilities::{file_utils, misc_utils},
};

use rand_core::SeedableRng;
use rand_xoshiro::Xoshiro512PlusPlus;

/// The default number of bits stored within each channel.
const DEFAULT_BITS_PER_SLOT: u8 = 1;

/// The space needed to encode a message within a specific buffer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EncodingPlan {
    /// The number of bits used for each character.
    pub bit_width: u8,
    /// The number of bits needed for the characters of the message.
    pub message_bits: u64,
    /// The number of bits needed for the terminator.
    pub terminator_bits: u64,
    /// The number of bits that the buffer can hold.
    pub available_bits: u64,
}

impl EncodingPlan {
    /// The total number of bits needed, including the terminator.
    #[inline]
    pub fn required_bits(&self) -> u64 {
        self.message_bits + self.terminator_bits
    }

    /// Check whether the message fits within the buffer.
    pub fn check(&self) -> Result<()> {
        if self.required_bits() > self.available_bits {
            return Err(Error::CapacityExceeded {
                needed: self.required_bits(),
                available: self.available_bits,
            });
        }

        Ok(())
    }
}

/// The struct that holds the LSB text steganography algorithm.
///
/// Text is converted into fixed-width alphabet codes, followed by a terminator
/// code, and the resulting bits are stored within the low bits of the colour
/// channels of an image.
pub struct StegaLsb<'a> {
    /// The alphabet used to convert characters to codes.
    alphabet: &'a Alphabet,
    /// The order in which the channels are visited.
    traversal: Traversal,
    /// If the alpha channel should hold data.
    include_alpha: bool,
    /// The number of low bits of each channel that hold data.
    bits_per_slot: u8,
    /// If LSB matching, rather than LSB replacement, should be used.
    lsb_matching: bool,
    /// If the resulting files should be saved when encoding or decoding.
    output_files: bool,
    /// The logger instance for this codec.
    logger: Logger,
    /// The RNG for the direction of the LSB matching adjustments.
    noise_rng: Xoshiro512PlusPlus,
}

impl StegaLsb<'static> {
    pub fn new() -> Self {
        StegaLsb::with_alphabet(Alphabet::standard())
    }
}

impl<'a> StegaLsb<'a> {
    /// Create a codec that uses a specific alphabet.
    ///
    /// # Arguments
    ///
    /// * `alphabet` - The alphabet used to convert characters to codes.
    ///
    pub fn with_alphabet(alphabet: &'a Alphabet) -> Self {
        Self {
            alphabet,
            traversal: Traversal::default(),
            include_alpha: false,
            bits_per_slot: DEFAULT_BITS_PER_SLOT,
            lsb_matching: true,
            output_files: true,
            logger: Logger::new(false),
            noise_rng: misc_utils::secure_seeded_xoroshiro512(),
        }
    }

    /// Build the slot layout from the current configuration.
    fn layout(&self) -> Result<SlotLayout> {
        SlotLayout::new(self.traversal, self.include_alpha, self.bits_per_slot)
    }

    /// Build the slot layout for a specific buffer.
    ///
    /// # Arguments
    ///
    /// * `buffer` - The pixel buffer. It must hold at least one pixel.
    ///
    fn layout_for(&self, buffer: &PixelBuffer) -> Result<SlotLayout> {
        let layout = self.layout()?;
        if buffer.pixel_count() == 0 {
            return Err(Error::InvalidBuffer);
        }

        Ok(layout)
    }

    /// Compute the space needed to encode a message within a buffer.
    ///
    /// # Arguments
    ///
    /// * `plaintext` - The text to be encoded.
    /// * `buffer` - The reference pixel buffer.
    ///
    /// `Note:` this fails if the text holds unsupported characters, but not if the text is too long.
    /// Use [`EncodingPlan::check`] for that.
    ///
    pub fn plan(&self, plaintext: &str, buffer: &PixelBuffer) -> Result<EncodingPlan> {
        self.alphabet.validate(plaintext)?;

        let bit_width = self.alphabet.bit_width();
        let chars = plaintext.chars().count() as u64;

        Ok(EncodingPlan {
            bit_width,
            message_bits: chars * bit_width as u64,
            terminator_bits: bit_width as u64,
            available_bits: self.capacity(buffer)?,
        })
    }

    /// Write the value of a slot, using the configured embedding policy.
    #[inline]
    fn write_slot(&mut self, value: u8, target: u8) -> u8 {
        if self.lsb_matching {
            misc_utils::match_low_bits(value, self.bits_per_slot, target, &mut self.noise_rng)
        } else {
            misc_utils::replace_low_bits(value, self.bits_per_slot, target)
        }
    }

    /// The internal implementation of the encoding algorithm.
    ///
    /// # Arguments
    ///
    /// * `plaintext` - The text to be encoded.
    /// * `buffer` - The reference pixel buffer.
    ///
    fn encode_internal(&mut self, plaintext: &str, buffer: &PixelBuffer) -> Result<PixelBuffer> {
        let layout = self.layout_for(buffer)?;

        // Every check must happen before the buffer is touched.
        let plan = self.plan(plaintext, buffer)?;
        plan.check()?;

        self.logger.log(&format!(
            "encoding {} bits into {} available bits ({:?}, {} bit(s) per channel)",
            plan.required_bits(),
            plan.available_bits,
            layout.traversal(),
            layout.bits_per_slot()
        ));

        let codes = self.alphabet.encode(plaintext)?;
        let mut encoder = DataEncoder::new(plan.bit_width, layout.bits_per_slot(), codes.len() + 1);
        encoder.push_codes(&codes);
        let slot_values = encoder.finish();

        let mut encoded = buffer.clone();
        let mut changed = 0usize;
        for ((pixel, channel), target) in layout.slots(buffer).zip(slot_values.iter()) {
            let old = encoded.get_channel_at(pixel, channel);
            let new = self.write_slot(old, *target);
            if new != old {
                encoded.set_channel_at(pixel, channel, new);
                changed += 1;
            }
        }

        self.logger.log(&format!(
            "{} of {} slots were modified",
            changed,
            slot_values.len()
        ));

        Ok(encoded)
    }

    /// The internal implementation of the decoding algorithm.
    ///
    /// # Arguments
    ///
    /// * `buffer` - The encoded pixel buffer.
    ///
    fn decode_internal(&self, buffer: &PixelBuffer) -> Result<String> {
        let layout = self.layout_for(buffer)?;
        let bit_width = self.alphabet.bit_width();
        let mask = (1u8 << layout.bits_per_slot()) - 1;

        let mut decoder = DataDecoder::new(bit_width, layout.bits_per_slot());
        let mut codes = Vec::with_capacity(2);
        let mut plaintext = String::new();

        for (pixel, channel) in layout.slots(buffer) {
            decoder.push_slot(buffer.get_channel_at(pixel, channel) & mask, &mut codes);

            for code in codes.drain(..) {
                if code == TERMINATOR {
                    self.logger.log(&format!(
                        "found the terminator after {} characters",
                        plaintext.chars().count()
                    ));
                    return Ok(plaintext);
                }

                plaintext.push(self.alphabet.decode_symbol(code)?);
            }
        }

        self.logger
            .log("every slot was read without finding a terminator");

        Err(Error::NoPayloadFound)
    }
}

impl Codec for StegaLsb<'_> {
    fn encode(
        &mut self,
        original_img_path: &str,
        plaintext: &str,
        encoded_img_path: &str,
    ) -> Result<()> {
        // Reject a lossy or unknown output format before doing any work.
        if self.output_files {
            PixelBuffer::output_format(encoded_img_path)?;
        }

        let img = PixelBuffer::load_from_file(original_img_path)?;
        let encoded = self.encode_internal(plaintext, &img)?;

        if !self.output_files {
            return Ok(());
        }

        encoded.save(encoded_img_path)
    }

    fn encode_file(
        &mut self,
        original_img_path: &str,
        input_file_path: &str,
        encoded_img_path: &str,
    ) -> Result<()> {
        let text = file_utils::read_text_file(input_file_path)?;
        self.encode(original_img_path, &text, encoded_img_path)
    }

    fn decode(&mut self, encoded_img_path: &str) -> Result<String> {
        let img = PixelBuffer::load_from_file(encoded_img_path)?;
        self.decode_internal(&img)
    }

    fn decode_file(&mut self, encoded_img_path: &str, output_file_path: &str) -> Result<()> {
        let text = self.decode(encoded_img_path)?;

        if self.output_files {
            file_utils::write_text_file(output_file_path, &text)
        } else {
            Ok(())
        }
    }

    fn encode_buffer(&mut self, plaintext: &str, buffer: &PixelBuffer) -> Result<PixelBuffer> {
        self.encode_internal(plaintext, buffer)
    }

    fn decode_buffer(&mut self, buffer: &PixelBuffer) -> Result<String> {
        self.decode_internal(buffer)
    }

    fn capacity(&self, buffer: &PixelBuffer) -> Result<u64> {
        Ok(self.layout_for(buffer)?.capacity(buffer))
    }

    fn set_flag_state(&mut self, config: ConfigFlags, state: bool) {
        match config {
            ConfigFlags::Verbose => {
                if state {
                    self.logger.enable_verbose_mode();
                } else {
                    self.logger.disable_verbose_mode();
                }
            }
            ConfigFlags::OutputFiles => {
                self.output_files = state;
            }
            ConfigFlags::IncludeAlpha => {
                self.include_alpha = state;
            }
            ConfigFlags::LsbMatching => {
                self.lsb_matching = state;
            }
            ConfigFlags::Scatter => {
                self.traversal = if state {
                    Traversal::Scatter
                } else {
                    Traversal::Sequential
                };
            }
        }
    }

    fn set_parameter(&mut self, param: ConfigParams) {
        match param {
            ConfigParams::BitsPerSlot(b) => {
                self.bits_per_slot = b;
            }
            ConfigParams::NoiseSeed(seed) => {
                self.noise_rng = Xoshiro512PlusPlus::seed_from_u64(seed);
            }
        }
    }
}

impl Default for StegaLsb<'static> {
    fn default() -> Self {
        Self::new()
    }
}
