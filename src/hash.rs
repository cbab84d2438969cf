/// Base of the polynomial, chosen above the byte alphabet size.
pub const BASE: i64 = 257;
/// Large prime modulus; keeps `BASE * hash` products within `i64`.
pub const MOD: i64 = 1_000_000_009;

/// Reduces a value into `[0, MOD)`, correcting negative intermediates
/// left behind by the subtraction in [`slide`].
pub const fn reduce(value: i64) -> i64 {
    let r = value % MOD;
    if r < 0 {
        r + MOD
    } else {
        r
    }
}

/// Polynomial hash of a window, accumulated Horner-style:
/// `hash = (BASE * hash + byte) mod MOD` per byte.
pub const fn hash_of(window: &[u8]) -> i64 {
    let mut hash = 0;
    let mut i = 0;
    while i < window.len() {
        hash = reduce(BASE * hash + window[i] as i64);
        i += 1;
    }
    hash
}

/// Rolls a window hash one position to the right: drops the leading byte's
/// weighted contribution and appends the new trailing byte.
pub const fn slide(hash: i64, dropped: u8, added: u8, base_power: i64) -> i64 {
    reduce(BASE * (hash - dropped as i64 * base_power) + added as i64)
}

/// `BASE^(len - 1) mod MOD`, the weight of a window's leading byte.
pub const fn base_power(len: usize) -> i64 {
    let mut pow = 1;
    let mut i = 1;
    while i < len {
        pow = pow * BASE % MOD;
        i += 1;
    }
    pow
}
