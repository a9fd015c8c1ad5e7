use crate::{error::Result, pixel_buffer::PixelBuffer};

pub trait Codec {
    /// Encode text into a copy of a reference image, and save the copy.
    ///
    /// # Arguments
    ///
    /// * `original_img_path` - The path to the reference image.
    /// * `plaintext` - The text to be encoded within the reference image.
    /// * `encoded_img_path` - The path that will be used to store the encoded image.
    ///
    fn encode(
        &mut self,
        original_img_path: &str,
        plaintext: &str,
        encoded_img_path: &str,
    ) -> Result<()>;

    /// Encode the contents of a text file into a copy of a reference image, and save the copy.
    ///
    /// # Arguments
    ///
    /// * `original_img_path` - The path to the reference image.
    /// * `input_file_path` - The path to the `.txt` file to be encoded.
    /// * `encoded_img_path` - The path that will be used to store the encoded image.
    ///
    fn encode_file(
        &mut self,
        original_img_path: &str,
        input_file_path: &str,
        encoded_img_path: &str,
    ) -> Result<()>;

    /// Decode the text held within an image.
    ///
    /// # Arguments
    ///
    /// * `encoded_img_path` - The path to the modified image.
    ///
    fn decode(&mut self, encoded_img_path: &str) -> Result<String>;

    /// Decode the text held within an image and write it to a text file.
    ///
    /// # Arguments
    ///
    /// * `encoded_img_path` - The path to the modified image.
    /// * `output_file_path` - The path to the `.txt` file that will hold the text.
    ///
    fn decode_file(&mut self, encoded_img_path: &str, output_file_path: &str) -> Result<()>;

    /// Encode text into a copy of a pixel buffer.
    ///
    /// # Arguments
    ///
    /// * `plaintext` - The text to be encoded.
    /// * `buffer` - The reference pixel buffer. It is never modified.
    ///
    /// `Note:` on failure, no modified buffer is ever returned.
    ///
    fn encode_buffer(&mut self, plaintext: &str, buffer: &PixelBuffer) -> Result<PixelBuffer>;

    /// Decode the text held within a pixel buffer.
    ///
    /// # Arguments
    ///
    /// * `buffer` - The encoded pixel buffer.
    ///
    fn decode_buffer(&mut self, buffer: &PixelBuffer) -> Result<String>;

    /// The total number of bits that can be stored within a pixel buffer,
    /// including the space needed for the terminator.
    ///
    /// # Arguments
    ///
    /// * `buffer` - The pixel buffer.
    ///
    fn capacity(&self, buffer: &PixelBuffer) -> Result<u64>;

    /// Enable or disable a specific configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The [`ConfigFlags`] option to be configured.
    /// * `state` - A boolean indicating whether the config option should be enabled or disabled.
    ///
    fn set_flag_state(&mut self, config: ConfigFlags, state: bool);

    /// Set the value of a specific parameter.
    ///
    /// # Arguments
    ///
    /// * `param` - The [`ConfigParams`] option to be set.
    ///
    fn set_parameter(&mut self, param: ConfigParams);
}

/// A list of configuration flags that are applicable to a [`Codec`].
///
/// `Note:` `IncludeAlpha`, `Scatter` and the bits per slot describe where the
/// text lives in the image, and must be the same when encoding and decoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigFlags {
    /// Enable or disable verbose mode.
    Verbose,
    /// Enable or disable the saving of files when encoding or decoding.
    OutputFiles,
    /// Enable or disable the use of the alpha channel for storing data.
    IncludeAlpha,
    /// Use LSB matching (enabled) or LSB replacement (disabled) when writing bits.
    LsbMatching,
    /// Visit the channels in a seeded pseudo-random order (enabled) or in raster order (disabled).
    Scatter,
}

/// A list of configuration parameters that are applicable to a [`Codec`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigParams {
    /// The number of low bits of each channel that hold data. Either 1 or 2.
    BitsPerSlot(u8),
    /// A fixed seed for the direction of LSB matching adjustments.
    NoiseSeed(u64),
}
