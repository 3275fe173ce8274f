use std::thread::available_parallelism;

use eyre::Result;

fn normalize(requested: isize, max: isize) -> usize {
    if requested > 0 {
        requested.min(max) as usize
    } else if requested == 0 {
        1
    } else {
        // Negative values mean "all available threads minus N"
        (max + requested + 1).max(1) as usize
    }
}

/// Turn a user-supplied thread request into an actual thread count.
/// Positive values are capped by the available parallelism, zero means a
/// single thread, and -N leaves N - 1 threads free for other work.
pub fn available(requested: isize) -> Result<usize> {
    let max = available_parallelism()?.get() as isize;
    Ok(normalize(requested, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        for (requested, max, expected) in [
            (0, 8, 1),
            (1, 8, 1),
            (6, 8, 6),
            (8, 8, 8),
            (64, 8, 8),
            (-1, 8, 8),
            (-3, 8, 6),
            (-8, 8, 1),
            (-100, 8, 1),
        ] {
            assert_eq!(normalize(requested, max), expected);
        }
    }
}
