//! Bit-level helpers shared by table construction, the reference decoder, and emission.

#[inline(always)]
pub fn mask_for_width(width: u32) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

/// Mask covering the inclusive bit range `low..=high`.
#[inline(always)]
pub fn range_mask(low: u8, high: u8) -> u32 {
    mask_for_width(u32::from(high - low) + 1) << low
}

/// Positions of the set bits in `mask`, least significant first.
pub fn set_bits(mask: u32) -> impl Iterator<Item = u32> {
    (0..32).filter(move |bit| mask & (1 << bit) != 0)
}

/// Parallel bit extract: compacts the bits of `value` selected by `mask` into a dense integer,
/// keeping mask-bit order from least to most significant.
pub fn pext(value: u32, mask: u32) -> u32 {
    set_bits(mask)
        .enumerate()
        .fold(0, |acc, (slot, bit)| acc | (((value >> bit) & 1) << slot))
}

/// Inverse of [`pext`]: scatters the low bits of `value` into the positions selected by `mask`.
pub fn pdep(value: u32, mask: u32) -> u32 {
    set_bits(mask)
        .enumerate()
        .fold(0, |acc, (slot, bit)| acc | (((value >> slot) & 1) << bit))
}

/// Extracts the inclusive bit range `low..=high` of `word`.
#[inline(always)]
pub fn extract(word: u32, low: u8, high: u8) -> u32 {
    (word & range_mask(low, high)) >> low
}
