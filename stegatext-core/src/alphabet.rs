use crate::error::{Error, Result};

use hashbrown::HashMap;
use std::sync::LazyLock;

/// The code that marks the end of the encoded text. It is never assigned to a symbol.
pub const TERMINATOR: u8 = 0;

/// The symbols of the standard alphabet, in code order. The first symbol has the code `1`.
const STANDARD_SYMBOLS: &str = concat!(
    " \n\t",
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
    "áéíóúüñÁÉÍÓÚÜÑ¿¡",
);

static STANDARD: LazyLock<Alphabet> = LazyLock::new(|| {
    Alphabet::new(STANDARD_SYMBOLS.chars()).expect("the standard alphabet is always valid")
});

/// A closed set of symbols, each mapped to a fixed-width code.
#[derive(Clone, Debug)]
pub struct Alphabet {
    /// The code to symbol map. Index `0` holds the terminator and has no symbol.
    symbols: Vec<char>,
    /// The symbol to code map.
    codes: HashMap<char, u8>,
    /// The number of bits needed to store any code, including the terminator.
    bit_width: u8,
}

impl Alphabet {
    /// Build an alphabet from a sequence of symbols.
    ///
    /// # Arguments
    ///
    /// * `symbols` - The symbols, in code order. The first symbol receives the code `1`.
    ///
    /// `Note:` at most 255 symbols are permitted, since code `0` is reserved.
    ///
    pub fn new<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let mut table = vec!['\0'];
        let mut codes = HashMap::new();

        for symbol in symbols {
            let Ok(code) = u8::try_from(table.len()) else {
                return Err(Error::AlphabetInvalid);
            };

            if codes.insert(symbol, code).is_some() {
                return Err(Error::AlphabetInvalid);
            }

            table.push(symbol);
        }

        // ceil(log2(N + 1)), where N + 1 is the length of the table.
        let bit_width = (usize::BITS - (table.len() - 1).leading_zeros()) as u8;

        let alphabet = Self {
            symbols: table,
            codes,
            bit_width,
        };
        if alphabet.is_empty() {
            return Err(Error::AlphabetInvalid);
        }

        Ok(alphabet)
    }

    /// The process-wide standard alphabet: printable ASCII, tab, newline and the Spanish letters.
    pub fn standard() -> &'static Alphabet {
        &STANDARD
    }

    /// The number of bits used to store each code.
    #[inline]
    pub fn bit_width(&self) -> u8 {
        self.bit_width
    }

    /// The number of symbols in the alphabet.
    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Check whether a character has a code.
    #[inline]
    pub fn contains(&self, symbol: char) -> bool {
        self.codes.contains_key(&symbol)
    }

    /// Get the code for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The character to be encoded.
    ///
    #[inline]
    pub fn encode_symbol(&self, symbol: char) -> Result<u8> {
        self.codes
            .get(&symbol)
            .copied()
            .ok_or(Error::UnsupportedCharacter(symbol))
    }

    /// Get the symbol for a code.
    ///
    /// # Arguments
    ///
    /// * `code` - The code to be decoded.
    ///
    /// `Note:` the terminator code is not a symbol and will be rejected.
    ///
    #[inline]
    pub fn decode_symbol(&self, code: u8) -> Result<char> {
        if code == TERMINATOR {
            return Err(Error::InvalidCode(code));
        }

        self.symbols
            .get(code as usize)
            .copied()
            .ok_or(Error::InvalidCode(code))
    }

    /// Check that every character of a message has a code.
    ///
    /// Fails on the first character that does not.
    pub fn validate(&self, message: &str) -> Result<()> {
        match message.chars().find(|c| !self.contains(*c)) {
            Some(c) => Err(Error::UnsupportedCharacter(c)),
            None => Ok(()),
        }
    }

    /// Convert a message into a list of codes.
    pub fn encode(&self, message: &str) -> Result<Vec<u8>> {
        message.chars().map(|c| self.encode_symbol(c)).collect()
    }

    /// Convert a list of codes back into a message.
    pub fn decode(&self, codes: &[u8]) -> Result<String> {
        codes.iter().map(|&c| self.decode_symbol(c)).collect()
    }
}
