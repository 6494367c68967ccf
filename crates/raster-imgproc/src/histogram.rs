use rayon::prelude::*;

use raster_image::{Image, ImageSize, Pixel, MAX_CHANNEL_VALUE};

use crate::{draw, error::TransformError};

/// Number of bins of a channel histogram, one per 8-bit value.
pub const NUM_BINS: usize = 256;

/// Side length of the image produced by [`render_histogram`].
pub const RENDER_SIZE: usize = 256;

/// A color channel of a [`Pixel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
}

impl Channel {
    /// The three color channels in order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// The value of this channel in `pixel`.
    pub fn value(&self, pixel: &Pixel) -> u8 {
        match self {
            Channel::Red => pixel.red(),
            Channel::Green => pixel.green(),
            Channel::Blue => pixel.blue(),
        }
    }

    /// The pure opaque color of this channel.
    pub fn color(&self) -> Pixel {
        match self {
            Channel::Red => Pixel::new(MAX_CHANNEL_VALUE, 0, 0),
            Channel::Green => Pixel::new(0, MAX_CHANNEL_VALUE, 0),
            Channel::Blue => Pixel::new(0, 0, MAX_CHANNEL_VALUE),
        }
    }
}

/// Per-channel frequency tables of an image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    /// Counts of each red value.
    pub red: [usize; NUM_BINS],
    /// Counts of each green value.
    pub green: [usize; NUM_BINS],
    /// Counts of each blue value.
    pub blue: [usize; NUM_BINS],
}

impl Default for Histogram {
    fn default() -> Self {
        Self {
            red: [0; NUM_BINS],
            green: [0; NUM_BINS],
            blue: [0; NUM_BINS],
        }
    }
}

impl Histogram {
    /// The frequency table of one channel.
    pub fn channel(&self, channel: Channel) -> &[usize; NUM_BINS] {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// The peak value of each channel as `[red, green, blue]`.
    pub fn peaks(&self) -> [u8; 3] {
        Channel::ALL.map(|channel| peak_value(self.channel(channel)))
    }

    /// The largest count over all channels and bins.
    pub fn max_frequency(&self) -> usize {
        Channel::ALL
            .iter()
            .flat_map(|&channel| self.channel(channel).iter().copied())
            .max()
            .unwrap_or(0)
    }

    fn add(&mut self, pixel: &Pixel) {
        self.red[pixel.red() as usize] += 1;
        self.green[pixel.green() as usize] += 1;
        self.blue[pixel.blue() as usize] += 1;
    }

    fn merge(mut self, other: Histogram) -> Self {
        for (a, b) in self.red.iter_mut().zip(other.red) {
            *a += b;
        }
        for (a, b) in self.green.iter_mut().zip(other.green) {
            *a += b;
        }
        for (a, b) in self.blue.iter_mut().zip(other.blue) {
            *a += b;
        }
        self
    }
}

/// Compute the per-channel histogram of an image.
///
/// # Arguments
///
/// * `src` - The input image to compute the histogram.
///
/// # Returns
///
/// The red, green and blue frequency tables. Alpha is not counted.
///
/// # Example
///
/// ```
/// use raster_image::{Image, Pixel};
/// use raster_imgproc::histogram::compute_histogram;
///
/// let image = Image::from_rows(vec![
///     vec![Pixel::new(0, 2, 4), Pixel::new(0, 130, 4)],
/// ])
/// .unwrap();
///
/// let histogram = compute_histogram(&image);
/// assert_eq!(histogram.red[0], 2);
/// assert_eq!(histogram.green[130], 1);
/// assert_eq!(histogram.peaks(), [0, 2, 4]);
/// ```
pub fn compute_histogram(src: &Image) -> Histogram {
    src.as_slice()
        .par_chunks(4096)
        .fold(Histogram::default, |mut local, chunk| {
            chunk.iter().for_each(|pixel| local.add(pixel));
            local
        })
        .reduce(Histogram::default, Histogram::merge)
}

/// The value with the highest count. Ties go to the lowest value.
pub fn peak_value(hist: &[usize; NUM_BINS]) -> u8 {
    let mut peak = 0;
    for (value, &count) in hist.iter().enumerate() {
        if count > hist[peak] {
            peak = value;
        }
    }
    peak as u8
}

/// Render the three channel histograms of an image as line plots.
///
/// The plot is a 256×256 image on a white background, scaled so that the largest count over
/// all channels reaches the top row. Red, green and blue are drawn in that order, each as a
/// polyline in its pure color.
///
/// # Errors
///
/// Only fails if the canvas cannot be allocated.
pub fn render_histogram(hist: &Histogram) -> Result<Image, TransformError> {
    let mut canvas = Image::from_size_val(
        ImageSize {
            width: RENDER_SIZE,
            height: RENDER_SIZE,
        },
        Pixel::new(MAX_CHANNEL_VALUE, MAX_CHANNEL_VALUE, MAX_CHANNEL_VALUE),
    )?;

    let max_freq = hist.max_frequency().max(1) as f64;
    let bottom = RENDER_SIZE as i64;

    for channel in Channel::ALL {
        let points = std::iter::once((0, bottom))
            .chain(hist.channel(channel).iter().enumerate().map(|(i, &freq)| {
                let height = (freq as f64 / max_freq * RENDER_SIZE as f64).ceil() as i64;
                (i as i64, bottom - height)
            }))
            .collect::<Vec<_>>();
        draw::draw_polyline(&mut canvas, &points, channel.color());
    }

    Ok(canvas)
}
