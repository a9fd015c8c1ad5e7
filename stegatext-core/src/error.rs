use core::fmt;

/// Result with internal [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The alphabet symbol list is empty, contains duplicates or is too large.
    AlphabetInvalid,
    /// The message, including the terminator, needs more bits than the image can hold.
    CapacityExceeded { needed: u64, available: u64 },
    /// The decoded string isn't valid.
    DecodeStringInvalid,
    /// Error creating a file.
    FileCreate,
    /// Error opening a file.
    FileOpen,
    /// Error reading from a file.
    FileRead,
    /// Error writing to a file.
    FileWrite,
    /// The output image format would discard the least significant bits.
    ImageFormatLossy,
    /// The image format was not recognized.
    ImageFormatNotRecognized,
    /// There was an error when attempting to load an image file.
    ImageOpening,
    /// There was an error when attempting to save an image file.
    ImageSaving(String),
    /// Only one or two bits may be stored in each channel.
    InvalidBitsPerSlot(u8),
    /// The pixel buffer has no pixels, or its dimensions do not match its data.
    InvalidBuffer,
    /// A code was read that has no symbol assigned to it.
    InvalidCode(u8),
    /// Every slot was read without finding a terminator.
    NoPayloadFound,
    /// The specified path is invalid.
    PathInvalid,
    /// Text files must have the `.txt` extension.
    TextFileExtensionInvalid,
    /// The message contains a character that is not part of the alphabet.
    UnsupportedCharacter(char),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AlphabetInvalid => {
                f.write_str("The alphabet must contain between 1 and 255 unique symbols.")
            }
            Error::CapacityExceeded { needed, available } => write!(
                f,
                "There is insufficient space to encode the text within the image: {needed} bits are needed but only {available} are available."
            ),
            Error::DecodeStringInvalid => f.write_str("The decoded data isn't valid Unicode."),
            Error::FileCreate => f.write_str("An error occurred when attempting to create a file."),
            Error::FileOpen => f.write_str("An error occurred when attempting open a file."),
            Error::FileRead => {
                f.write_str("An error occurred when attempting to read from a file.")
            }
            Error::FileWrite => f.write_str("An error occurred when attempting to write to a file."),
            Error::ImageFormatLossy => f.write_str(
                "The output image format is lossy and would destroy the encoded text. Use .png or .bmp.",
            ),
            Error::ImageFormatNotRecognized => f.write_str("The image format was not recognized."),
            Error::ImageOpening => f.write_str("Error when attempting to load the image."),
            Error::ImageSaving(s) => f.write_str(s),
            Error::InvalidBitsPerSlot(b) => write!(
                f,
                "Invalid number of bits per channel ({b}); only 1 or 2 are supported."
            ),
            Error::InvalidBuffer => f.write_str("The pixel buffer is empty or malformed."),
            Error::InvalidCode(c) => write!(
                f,
                "The code {c} does not map to any character; the image may be corrupted."
            ),
            Error::NoPayloadFound => f.write_str("No encoded text could be found within the image."),
            Error::PathInvalid => f.write_str("The path is invalid or does not exist."),
            Error::TextFileExtensionInvalid => f.write_str("Text files must have a .txt extension."),
            Error::UnsupportedCharacter(c) => {
                write!(f, "The character {c:?} is not supported by the alphabet.")
            }
        }
    }
}

impl std::error::Error for Error {}
