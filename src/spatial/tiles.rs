//! Square pattern transforms used to expand samples and tiles into symmetry variants

/// Build an `n`×`n` row-major pattern from a function of `(x, y)`
pub fn square_pattern<T, F>(n: usize, mut f: F) -> Vec<T>
where
    F: FnMut(usize, usize) -> T,
{
    let mut result = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            result.push(f(x, y));
        }
    }
    result
}

/// Rotate a square pattern by a quarter turn
///
/// `rotated[x + y·n] = pattern[n − 1 − y + x·n]`
pub fn rotate<T: Copy + Default>(pattern: &[T], n: usize) -> Vec<T> {
    square_pattern(n, |x, y| {
        pattern.get(n - 1 - y + x * n).copied().unwrap_or_default()
    })
}

/// Mirror a square pattern left to right
///
/// `reflected[x + y·n] = pattern[n − 1 − x + y·n]`
pub fn reflect<T: Copy + Default>(pattern: &[T], n: usize) -> Vec<T> {
    square_pattern(n, |x, y| {
        pattern.get(n - 1 - x + y * n).copied().unwrap_or_default()
    })
}

/// The eight dihedral variants of a square pattern
///
/// Ordered as the identity, its reflection, then each further quarter turn
/// followed by the reflection of that turn.
pub fn symmetry_variants<T: Copy + Default>(pattern: &[T], n: usize) -> [Vec<T>; 8] {
    let p0 = pattern.to_vec();
    let p1 = reflect(&p0, n);
    let p2 = rotate(&p0, n);
    let p3 = reflect(&p2, n);
    let p4 = rotate(&p2, n);
    let p5 = reflect(&p4, n);
    let p6 = rotate(&p4, n);
    let p7 = reflect(&p6, n);
    [p0, p1, p2, p3, p4, p5, p6, p7]
}
