use raster_image::{Image, Pixel};

/// Set a pixel's color, ignoring points outside the image.
#[inline]
fn set_pixel(img: &mut Image, x: i64, y: i64, color: Pixel) {
    if x >= 0 && x < img.cols() as i64 && y >= 0 && y < img.rows() as i64 {
        img[[y as usize, x as usize]] = color;
    }
}

/// Draws a line on an image inplace using a standard Bresenham's line algorithm.
///
/// Points of the line outside the image are clipped.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The color of the line.
pub fn draw_line(img: &mut Image, p0: (i64, i64), p1: (i64, i64), color: Pixel) {
    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;

    loop {
        set_pixel(img, x0, y0, color);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draws a polyline through `points` inplace, one Bresenham segment per consecutive pair.
pub fn draw_polyline(img: &mut Image, points: &[(i64, i64)], color: Pixel) {
    for segment in points.windows(2) {
        draw_line(img, segment[0], segment[1], color);
    }
}
