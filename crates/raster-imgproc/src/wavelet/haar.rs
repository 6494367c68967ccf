/// Run `cycles` forward Haar cycles on an `n`×`n` row-major plane, in place.
///
/// Each cycle halves the active width and replaces every row of the active region with
/// its pairwise averages on the left and pairwise half differences on the right, then
/// halves the active height and does the same on the columns of the averaged half. Both
/// use integer division truncating toward zero.
///
/// PRECONDITION: `plane.len() == n * n`, `n` is a power of two and `2^cycles <= n`.
pub fn haar_forward(plane: &mut [i32], n: usize, cycles: u32) {
    let mut scratch = vec![0i32; n];
    let (mut w, mut h) = (n, n);

    for _ in 0..cycles {
        w /= 2;
        for j in 0..h {
            let row = &mut plane[j * n..j * n + 2 * w];
            for k in 0..w {
                let (a, b) = (row[2 * k], row[2 * k + 1]);
                scratch[k] = (a + b) / 2;
                scratch[k + w] = (a - b) / 2;
            }
            row.copy_from_slice(&scratch[..2 * w]);
        }

        h /= 2;
        for j in 0..w {
            for k in 0..h {
                let (a, b) = (plane[2 * k * n + j], plane[(2 * k + 1) * n + j]);
                scratch[k] = (a + b) / 2;
                scratch[k + h] = (a - b) / 2;
            }
            for (k, &v) in scratch[..2 * h].iter().enumerate() {
                plane[k * n + j] = v;
            }
        }
    }
}

/// Undo `cycles` forward Haar cycles on an `n`×`n` row-major plane, in place.
///
/// Mirrors [`haar_forward`] in reverse order, columns first, rebuilding each pair as
/// `a + b` and `a - b` without dividing.
///
/// PRECONDITION: `plane.len() == n * n`, `n` is a power of two and `2^cycles <= n`.
pub fn haar_inverse(plane: &mut [i32], n: usize, cycles: u32) {
    let mut scratch = vec![0i32; n];
    let (mut ww, mut hh) = (n >> cycles, n >> cycles);

    for _ in 0..cycles {
        for j in 0..ww {
            for k in 0..hh {
                let (a, b) = (plane[k * n + j], plane[(k + hh) * n + j]);
                scratch[2 * k] = a + b;
                scratch[2 * k + 1] = a - b;
            }
            for (k, &v) in scratch[..2 * hh].iter().enumerate() {
                plane[k * n + j] = v;
            }
        }
        hh *= 2;

        for j in 0..hh {
            let row = &mut plane[j * n..j * n + 2 * ww];
            for k in 0..ww {
                let (a, b) = (row[k], row[k + ww]);
                scratch[2 * k] = a + b;
                scratch[2 * k + 1] = a - b;
            }
            row.copy_from_slice(&scratch[..2 * ww]);
        }
        ww *= 2;
    }
}
