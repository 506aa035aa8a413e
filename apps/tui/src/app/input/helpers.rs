/// Previous index in a cyclic list of `len` items
pub const fn wrap_decrement(index: usize, len: usize) -> usize {
    match (index, len) {
        (_, 0) => 0,
        (0, _) => len - 1,
        _ if index >= len => len - 1,
        _ => index - 1,
    }
}

/// Next index in a cyclic list of `len` items
pub const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}
