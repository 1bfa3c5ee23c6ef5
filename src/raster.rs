//! Integer line rasterization.
//!
//! Used by [`BitmapLock::draw_line`](crate::BitmapLock::draw_line) for
//! segments that are not axis-aligned; axis-aligned runs take the bulk
//! fill paths instead. Pure integer arithmetic — no division, no floats —
//! so the output is identical across platforms.

/// Walk every pixel of the segment `(x0, y0)`-`(x1, y1)`, both endpoints
/// included, invoking `plot` for each.
///
/// Bresenham stepping: the axis with the larger absolute delta advances
/// every iteration; an error accumulator seeded with half the fast delta
/// decides when the slow axis follows. The result is an 8-connected line
/// with no gaps.
pub fn walk_line<E>(
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    mut plot: impl FnMut(i32, i32) -> Result<(), E>,
) -> Result<(), E> {
    let step_x = if x1 < x0 { -1 } else { 1 };
    let step_y = if y1 < y0 { -1 } else { 1 };
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();

    let mut x = x0;
    let mut y = y0;
    plot(x, y)?;

    if dx >= dy {
        let mut error = dx >> 1;
        for _ in 0..dx {
            x += step_x;
            error -= dy;
            if error < 0 {
                error += dx;
                y += step_y;
            }
            plot(x, y)?;
        }
    } else {
        let mut error = dy >> 1;
        for _ in 0..dy {
            y += step_y;
            error -= dx;
            if error < 0 {
                error += dy;
                x += step_x;
            }
            plot(x, y)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn collect(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
        let mut pts = Vec::new();
        walk_line::<()>(x0, y0, x1, y1, |x, y| {
            pts.push((x, y));
            Ok(())
        })
        .unwrap();
        pts
    }

    #[test]
    fn includes_both_endpoints() {
        let pts = collect(1, 1, 7, 4);
        assert_eq!(pts.first(), Some(&(1, 1)));
        assert_eq!(pts.last(), Some(&(7, 4)));
    }

    #[test]
    fn single_point() {
        assert_eq!(collect(3, 3, 3, 3), [(3, 3)]);
    }

    #[test]
    fn shallow_line_steps_once_per_column() {
        let pts = collect(0, 0, 6, 2);
        assert_eq!(pts.len(), 7);
        for (i, (x, _)) in pts.iter().enumerate() {
            assert_eq!(*x, i as i32);
        }
    }

    #[test]
    fn steep_line_steps_once_per_row() {
        let pts = collect(0, 0, 2, 6);
        assert_eq!(pts.len(), 7);
        for (i, (_, y)) in pts.iter().enumerate() {
            assert_eq!(*y, i as i32);
        }
    }

    #[test]
    fn eight_connected_no_gaps() {
        for &(x1, y1) in &[(9, 4), (-9, 4), (9, -4), (-9, -4), (4, 9), (-4, 9)] {
            let pts = collect(0, 0, x1, y1);
            for pair in pts.windows(2) {
                let dx = (pair[1].0 - pair[0].0).abs();
                let dy = (pair[1].1 - pair[0].1).abs();
                assert!(dx <= 1 && dy <= 1, "gap between {:?} and {:?}", pair[0], pair[1]);
                assert!(dx + dy > 0, "repeated point {:?}", pair[0]);
            }
        }
    }

    #[test]
    fn diagonal_is_exact() {
        let pts = collect(0, 0, 4, 4);
        assert_eq!(pts, [(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn error_propagates() {
        let mut n = 0;
        let res = walk_line(0, 0, 5, 0, |_, _| {
            n += 1;
            if n == 3 { Err("stop") } else { Ok(()) }
        });
        assert_eq!(res, Err("stop"));
        assert_eq!(n, 3);
    }
}
