use crate::{alphabet::Alphabet, pixel_buffer::PixelBuffer};

use path_absolutize::Absolutize;
use rand::Rng;
use rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fs;

pub(crate) struct TestUtils {
    /// A vector of files that will be automatically cleared when the instance is dropped.
    auto_clear_files: Vec<String>,
}

impl TestUtils {
    pub fn new() -> Self {
        Self {
            auto_clear_files: Vec::new(),
        }
    }

    /// Add a file to the automatic file clearing list.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the file to be cleared.
    ///
    fn add_auto_clear_file(&mut self, path: &str) {
        self.auto_clear_files.push(path.to_string());
    }

    /// Get the full path to a random output file path.
    /// These files are created in the operating system's temp directory.
    ///
    /// # Arguments
    ///
    /// * `ext` - The extension of the temporary file.
    /// * `auto_clear` - Whether this file should be automatically cleared after the test has finished.
    ///
    /// `Note:` This path is normalized to avoid creating any issues
    /// with relative paths.
    ///
    pub fn get_out_file(&mut self, ext: &str, auto_clear: bool) -> String {
        let random: u128 = rand::rng().random();

        let mut path = std::env::temp_dir();
        path.push(format!("{random}.{ext}"));

        let path = path.absolutize().unwrap();
        let path_str = path.to_str().unwrap().to_string();

        // Do we need to automatically delete this file after we are finished?
        if auto_clear {
            self.add_auto_clear_file(&path_str);
        }

        path_str
    }

    /// Generate a random string from the symbols of the standard alphabet.
    ///
    /// # Arguments
    ///
    /// * `len` - The number of characters in the final string.
    /// * `seed` - The seed for the random number generator.
    ///
    pub fn generate_text(len: usize, seed: u64) -> String {
        let alphabet = Alphabet::standard();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        (0..len)
            .map(|_| {
                let code = rng.random_range(1..=alphabet.len() as u8);
                alphabet.decode_symbol(code).unwrap()
            })
            .collect()
    }

    /// Create a buffer filled with random pixels, to stand in for a photograph.
    ///
    /// # Arguments
    ///
    /// * `width` - The width of the buffer.
    /// * `height` - The height of the buffer.
    /// * `seed` - The seed for the random number generator.
    ///
    pub fn noise_buffer(width: u32, height: u32, seed: u64) -> PixelBuffer {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let pixels = (0..width * height).map(|_| rng.random()).collect();

        PixelBuffer::from_pixels(width, height, pixels).unwrap()
    }
}

impl Drop for TestUtils {
    fn drop(&mut self) {
        for f in &self.auto_clear_files {
            let _ = fs::remove_file(f);
        }
    }
}
