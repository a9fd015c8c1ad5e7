#[cfg(test)]
use crate::pixel_buffer::{Channel, PixelBuffer};

use rand::Rng;
use rand_core::SeedableRng;
use rand_xoshiro::Xoshiro512PlusPlus;

/// Set the low bits of a channel value by overwriting them.
///
/// # Arguments
///
/// * `value` - The original channel value.
/// * `bits` - The number of low bits to be set.
/// * `target` - The desired state of the low bits.
///
#[inline]
pub(crate) fn replace_low_bits(value: u8, bits: u8, target: u8) -> u8 {
    let mask = (1u8 << bits) - 1;
    (value & !mask) | (target & mask)
}

/// Set the low bits of a channel value by moving the value as little as possible.
///
/// # Arguments
///
/// * `value` - The original channel value.
/// * `bits` - The number of low bits to be set.
/// * `target` - The desired state of the low bits.
/// * `rng` - The random number generator used to break ties.
///
/// `Note:` values that already carry the target bits are returned unchanged. When
/// moving up and down are equally close, the direction is picked at random, and
/// values are never moved outside of `0..=255`.
///
pub(crate) fn match_low_bits<R: Rng>(value: u8, bits: u8, target: u8, rng: &mut R) -> u8 {
    let mask = (1u8 << bits) - 1;
    if value & mask == target & mask {
        return value;
    }

    let v = value as i16;
    let period = 1i16 << bits;
    let base = replace_low_bits(value, bits, target) as i16;

    let mut best: Option<i16> = None;
    let mut tied: Option<i16> = None;
    for candidate in [base - period, base, base + period] {
        if !(0..=255).contains(&candidate) {
            continue;
        }

        match best {
            Some(b) if (candidate - v).abs() > (b - v).abs() => {}
            Some(b) if (candidate - v).abs() == (b - v).abs() => tied = Some(candidate),
            _ => {
                best = Some(candidate);
                tied = None;
            }
        }
    }

    // There is always at least one candidate within range.
    let best = best.unwrap_or(base);
    match tied {
        Some(t) if rng.random_bool(0.5) => t as u8,
        _ => best as u8,
    }
}

/// Calculate the proportion of values of a channel that have their least significant bit set.
///
/// # Arguments
///
/// * `buffer` - The pixel buffer to be inspected.
/// * `channel` - The channel to be inspected.
///
#[cfg(test)]
pub(crate) fn lsb_ratio(buffer: &PixelBuffer, channel: Channel) -> f64 {
    let set = (0..buffer.pixel_count())
        .filter(|&i| buffer.get_channel_at(i, channel) & 1 == 1)
        .count();

    set as f64 / buffer.pixel_count() as f64
}

/// Create a fast random number generator, seeded from the operating system.
pub(crate) fn secure_seeded_xoroshiro512() -> Xoshiro512PlusPlus {
    Xoshiro512PlusPlus::from_os_rng()
}

#[cfg(test)]
mod tests_misc_utils {
    use super::{lsb_ratio, match_low_bits, replace_low_bits};
    use crate::pixel_buffer::{Channel, PixelBuffer};

    use rand_core::SeedableRng;
    use rand_xoshiro::Xoshiro512PlusPlus;

    #[test]
    fn test_replace_low_bits() {
        assert_eq!(replace_low_bits(0b1010_1010, 1, 1), 0b1010_1011);
        assert_eq!(replace_low_bits(0b1010_1011, 1, 0), 0b1010_1010);
        assert_eq!(replace_low_bits(0b1111_1111, 2, 0b01), 0b1111_1101);
        assert_eq!(replace_low_bits(0, 2, 0b10), 0b10);
    }

    #[test]
    fn test_match_low_bits_single_bit() {
        let mut rng = Xoshiro512PlusPlus::seed_from_u64(7);

        for value in 0..=255u8 {
            for target in 0..=1u8 {
                let out = match_low_bits(value, 1, target, &mut rng);

                assert_eq!(out & 1, target, "value = {value}, target = {target}");
                assert!(
                    (out as i16 - value as i16).abs() <= 1,
                    "value = {value} moved too far to {out}"
                );
            }
        }

        // The boundaries force the direction.
        assert_eq!(match_low_bits(0, 1, 1, &mut rng), 1);
        assert_eq!(match_low_bits(255, 1, 0, &mut rng), 254);
        assert_eq!(match_low_bits(100, 1, 0, &mut rng), 100);
    }

    #[test]
    fn test_match_low_bits_two_bits() {
        let mut rng = Xoshiro512PlusPlus::seed_from_u64(7);

        for value in 0..=255u8 {
            for target in 0..=3u8 {
                let out = match_low_bits(value, 2, target, &mut rng);

                // Only the extremes can be forced to move by three.
                let limit = if value == 0 || value == 255 { 3 } else { 2 };

                assert_eq!(out & 3, target, "value = {value}, target = {target}");
                assert!(
                    (out as i16 - value as i16).abs() <= limit,
                    "value = {value} moved too far to {out}"
                );
            }
        }

        assert_eq!(match_low_bits(5, 2, 0b10, &mut rng), 6);
        assert_eq!(match_low_bits(0, 2, 0b11, &mut rng), 3);
        assert_eq!(match_low_bits(255, 2, 0b00, &mut rng), 252);
    }

    #[test]
    fn test_match_low_bits_moves_both_ways() {
        let mut rng = Xoshiro512PlusPlus::seed_from_u64(99);

        let outputs: Vec<u8> = (0..64).map(|_| match_low_bits(100, 1, 1, &mut rng)).collect();
        assert!(outputs.contains(&99));
        assert!(outputs.contains(&101));
    }

    #[test]
    fn test_lsb_ratio() {
        let mut buffer = PixelBuffer::new(2, 2, 0).unwrap();
        assert_eq!(lsb_ratio(&buffer, Channel::Red), 0.0);

        buffer.set_channel(0, 0, Channel::Red, 1);
        buffer.set_channel(1, 1, Channel::Red, 255);
        assert_eq!(lsb_ratio(&buffer, Channel::Red), 0.5);
        assert_eq!(lsb_ratio(&buffer, Channel::Blue), 0.0);
    }
}
