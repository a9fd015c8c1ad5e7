use crate::alphabet::TERMINATOR;

/// Packs fixed-width codes into the values to be stored within each slot.
///
/// Codes are written most significant bit first. The first bit of the stream
/// lands in the highest of the slot's data bits.
pub struct DataEncoder {
    /// One entry per slot, each holding `bits_per_slot` bits.
    pub slot_values: Vec<u8>,
    bit_width: u8,
    bits_per_slot: u8,
    pending: u8,
    pending_bits: u8,
}

impl DataEncoder {
    pub fn new(bit_width: u8, bits_per_slot: u8, total_codes: usize) -> Self {
        let total_bits = total_codes * bit_width as usize;
        Self {
            slot_values: Vec::with_capacity(total_bits.div_ceil(bits_per_slot as usize)),
            bit_width,
            bits_per_slot,
            pending: 0,
            pending_bits: 0,
        }
    }

    /// Add a code to the stream.
    pub fn push_code(&mut self, code: u8) {
        for i in (0..self.bit_width).rev() {
            self.push_bit((code >> i) & 1);
        }
    }

    /// Add each code from a slice of codes to the stream.
    pub fn push_codes(&mut self, codes: &[u8]) {
        for &code in codes {
            self.push_code(code);
        }
    }

    #[inline]
    fn push_bit(&mut self, bit: u8) {
        self.pending = (self.pending << 1) | bit;
        self.pending_bits += 1;

        if self.pending_bits == self.bits_per_slot {
            self.slot_values.push(self.pending);
            self.pending = 0;
            self.pending_bits = 0;
        }
    }

    /// Append the terminator and pad the final slot with zero bits.
    pub fn finish(mut self) -> Vec<u8> {
        self.push_code(TERMINATOR);

        if self.pending_bits > 0 {
            let padding = self.bits_per_slot - self.pending_bits;
            self.slot_values.push(self.pending << padding);
        }

        self.slot_values
    }
}

/// Collects bits read from slots and reassembles them into codes.
pub struct DataDecoder {
    bit_width: u8,
    bits_per_slot: u8,
    code: u8,
    collected: u8,
}

impl DataDecoder {
    pub fn new(bit_width: u8, bits_per_slot: u8) -> Self {
        Self {
            bit_width,
            bits_per_slot,
            code: 0,
            collected: 0,
        }
    }

    /// Feed the data bits of a slot into the decoder.
    ///
    /// # Arguments
    ///
    /// * `value` - The data bits of the slot.
    /// * `out` - Any codes completed by these bits are appended here.
    ///
    pub fn push_slot(&mut self, value: u8, out: &mut Vec<u8>) {
        for i in (0..self.bits_per_slot).rev() {
            self.code = (self.code << 1) | ((value >> i) & 1);
            self.collected += 1;

            if self.collected == self.bit_width {
                out.push(self.code);
                self.code = 0;
                self.collected = 0;
            }
        }
    }
}
