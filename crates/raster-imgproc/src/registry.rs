use std::{fmt, str::FromStr};

use raster_image::{Image, ImageStore, Pixel};

use crate::{
    color, config::EngineConfig, dither, enhance, error::TransformError, filter, flip, histogram,
    split::SplitPercentage, tone, wavelet,
};

/// Every transformation the registry can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// 3×3 blur.
    Blur,
    /// 5×5 sharpen.
    Sharpen,
    /// Luma greyscale.
    Greyscale,
    /// Sepia tone.
    Sepia,
    /// Histogram peak alignment.
    ColorCorrect,
    /// Black and white error diffusion.
    Dither,
    /// Quadratic levels curve.
    LevelsAdjust,
    /// Signed brightness offset.
    Brighten,
    /// Haar wavelet compression.
    Compress,
    /// Red channel only.
    RedComponent,
    /// Green channel only.
    GreenComponent,
    /// Blue channel only.
    BlueComponent,
    /// Channel maximum.
    ValueComponent,
    /// Channel mean.
    IntensityComponent,
    /// Luma without a split.
    LumaComponent,
    /// Mirror left to right.
    HorizontalFlip,
    /// Mirror top to bottom.
    VerticalFlip,
    /// Plot of the channel histograms.
    Histogram,
    /// Red, green and blue taken from three images.
    RgbCombine,
}

impl TransformKind {
    /// All transformations, in registry order.
    pub const ALL: [TransformKind; 19] = [
        TransformKind::Blur,
        TransformKind::Sharpen,
        TransformKind::Greyscale,
        TransformKind::Sepia,
        TransformKind::ColorCorrect,
        TransformKind::Dither,
        TransformKind::LevelsAdjust,
        TransformKind::Brighten,
        TransformKind::Compress,
        TransformKind::RedComponent,
        TransformKind::GreenComponent,
        TransformKind::BlueComponent,
        TransformKind::ValueComponent,
        TransformKind::IntensityComponent,
        TransformKind::LumaComponent,
        TransformKind::HorizontalFlip,
        TransformKind::VerticalFlip,
        TransformKind::Histogram,
        TransformKind::RgbCombine,
    ];

    /// The stable identifier of the transformation.
    pub fn name(&self) -> &'static str {
        match self {
            TransformKind::Blur => "blur",
            TransformKind::Sharpen => "sharpen",
            TransformKind::Greyscale => "greyscale",
            TransformKind::Sepia => "sepia",
            TransformKind::ColorCorrect => "color-correct",
            TransformKind::Dither => "dither",
            TransformKind::LevelsAdjust => "levels-adjust",
            TransformKind::Brighten => "brighten",
            TransformKind::Compress => "compress",
            TransformKind::RedComponent => "red-component",
            TransformKind::GreenComponent => "green-component",
            TransformKind::BlueComponent => "blue-component",
            TransformKind::ValueComponent => "value-component",
            TransformKind::IntensityComponent => "intensity-component",
            TransformKind::LumaComponent => "luma-component",
            TransformKind::HorizontalFlip => "horizontal-flip",
            TransformKind::VerticalFlip => "vertical-flip",
            TransformKind::Histogram => "histogram",
            TransformKind::RgbCombine => "rgb-combine",
        }
    }

    /// Number of source images the transformation reads.
    pub fn arity(&self) -> usize {
        match self {
            TransformKind::RgbCombine => 3,
            _ => 1,
        }
    }

    /// Whether the transformation takes a split percentage.
    pub fn is_split_enabled(&self) -> bool {
        matches!(
            self,
            TransformKind::Blur
                | TransformKind::Sharpen
                | TransformKind::Greyscale
                | TransformKind::Sepia
                | TransformKind::ColorCorrect
                | TransformKind::Dither
                | TransformKind::LevelsAdjust
        )
    }

    /// Whether `params` has the shape this transformation expects.
    pub fn accepts(&self, params: &TransformParams) -> bool {
        match (self, params) {
            (TransformKind::LevelsAdjust, TransformParams::Levels { .. }) => true,
            (TransformKind::LevelsAdjust, _) => false,
            (TransformKind::Brighten, TransformParams::Brighten(_)) => true,
            (TransformKind::Compress, TransformParams::Compress(_)) => true,
            (kind, TransformParams::Split(_)) => kind.is_split_enabled(),
            (TransformKind::Brighten | TransformKind::Compress, _) => false,
            (_, TransformParams::None) => true,
            _ => false,
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformKind {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TransformKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| TransformError::UnknownTransform(s.to_string()))
    }
}

/// The parameters of one transformation call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TransformParams {
    /// No parameters. Split-enabled transformations cover the whole image.
    #[default]
    None,
    /// A split percentage for a split-enabled transformation.
    Split(SplitPercentage),
    /// Control points of a levels adjustment.
    Levels {
        /// Input value mapped to 0.
        black: i32,
        /// Input value mapped to 128.
        mid: i32,
        /// Input value mapped to 255.
        white: i32,
        /// The part of the image to adjust.
        split: SplitPercentage,
    },
    /// Offset added to every channel.
    Brighten(i32),
    /// Compression percentage in (0, 100).
    Compress(f64),
}

impl TransformParams {
    fn split(&self) -> SplitPercentage {
        match self {
            TransformParams::Split(split) | TransformParams::Levels { split, .. } => *split,
            _ => SplitPercentage::FULL,
        }
    }
}

/// Looks transformations up by name and runs them.
///
/// The registry holds no images. Sources are passed in directly or resolved from an
/// [`ImageStore`] the caller owns.
///
/// # Examples
///
/// ```
/// use raster_image::{Image, ImageStore, Pixel};
/// use raster_imgproc::registry::{Registry, TransformParams};
///
/// let mut store = ImageStore::new();
/// store.insert("src", Image::from_size_val([3, 3].into(), Pixel::new(10, 20, 30)).unwrap());
///
/// let registry = Registry::new();
/// registry
///     .run(&mut store, "brighten", &["src"], "out", TransformParams::Brighten(5))
///     .unwrap();
///
/// assert_eq!(store.get("out").unwrap()[[0, 0]].rgb(), [15, 25, 35]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry {
    config: EngineConfig,
}

impl Registry {
    /// Create a registry with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the given configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The configuration of this registry.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the transformation named `name` on `sources`.
    ///
    /// # Errors
    ///
    /// * [`TransformError::UnknownTransform`] if no transformation has that name.
    /// * [`TransformError::InvalidParameter`] if the number of sources or the shape of
    ///   `params` does not match the transformation, or a parameter is out of range.
    /// * [`TransformError::InvalidImageSize`] if the sources of `rgb-combine` differ in size.
    pub fn invoke(
        &self,
        name: &str,
        sources: &[&Image],
        params: TransformParams,
    ) -> Result<Image, TransformError> {
        let kind = name.parse::<TransformKind>()?;
        self.apply(kind, sources, params)
    }

    /// Run a transformation on `sources`. See [`Registry::invoke`].
    pub fn apply(
        &self,
        kind: TransformKind,
        sources: &[&Image],
        params: TransformParams,
    ) -> Result<Image, TransformError> {
        if sources.len() != kind.arity() {
            return Err(TransformError::InvalidParameter(format!(
                "{kind} takes {} source image(s), got {}",
                kind.arity(),
                sources.len()
            )));
        }

        if !kind.accepts(&params) {
            return Err(TransformError::InvalidParameter(format!(
                "{kind} does not take {params:?}"
            )));
        }

        log::debug!(
            "running {kind} on {:?} with {params:?}",
            sources.iter().map(|s| s.size()).collect::<Vec<_>>()
        );

        let src = sources[0];
        let split = params.split();

        // fitted before any pixel is touched
        let curve = match (kind, params) {
            (
                TransformKind::LevelsAdjust,
                TransformParams::Levels {
                    black, mid, white, ..
                },
            ) => Some(tone::LevelsCurve::fit(
                black,
                mid,
                white,
                self.config.levels_ordering,
            )?),
            _ => None,
        };

        self.config
            .execution
            .install(|| -> Result<Image, TransformError> {
                let mut dst = Image::from_size_val(src.size(), Pixel::default())?;
                match (kind, params, &curve) {
                    (TransformKind::LevelsAdjust, _, Some(curve)) => {
                        tone::levels_adjust(src, &mut dst, curve, split)?
                    }
                    (TransformKind::Brighten, TransformParams::Brighten(delta), _) => {
                        enhance::brighten(src, &mut dst, delta)?
                    }
                    (TransformKind::Compress, TransformParams::Compress(percentage), _) => {
                        dst = wavelet::compress(src, percentage)?
                    }
                    (
                        TransformKind::LevelsAdjust
                        | TransformKind::Brighten
                        | TransformKind::Compress,
                        params,
                        _,
                    ) => {
                        return Err(TransformError::InvalidParameter(format!(
                            "{kind} does not take {params:?}"
                        )))
                    }
                    (TransformKind::Blur, ..) => filter::blur(src, &mut dst, split)?,
                    (TransformKind::Sharpen, ..) => filter::sharpen(src, &mut dst, split)?,
                    (TransformKind::Greyscale, ..) => color::greyscale(src, &mut dst, split)?,
                    (TransformKind::Sepia, ..) => color::sepia(src, &mut dst, split)?,
                    (TransformKind::ColorCorrect, ..) => {
                        tone::color_correct(src, &mut dst, split)?
                    }
                    (TransformKind::Dither, ..) => dither::dither(src, &mut dst, split)?,
                    (TransformKind::RedComponent, ..) => color::red_component(src, &mut dst)?,
                    (TransformKind::GreenComponent, ..) => color::green_component(src, &mut dst)?,
                    (TransformKind::BlueComponent, ..) => color::blue_component(src, &mut dst)?,
                    (TransformKind::ValueComponent, ..) => color::value_component(src, &mut dst)?,
                    (TransformKind::IntensityComponent, ..) => {
                        color::intensity_component(src, &mut dst)?
                    }
                    (TransformKind::LumaComponent, ..) => color::luma_component(src, &mut dst)?,
                    (TransformKind::HorizontalFlip, ..) => dst = flip::horizontal_flip(src),
                    (TransformKind::VerticalFlip, ..) => dst = flip::vertical_flip(src),
                    (TransformKind::Histogram, ..) => {
                        dst = histogram::render_histogram(&histogram::compute_histogram(src))?
                    }
                    (TransformKind::RgbCombine, ..) => {
                        color::rgb_combine(src, sources[1], sources[2], &mut dst)?
                    }
                }
                Ok(dst)
            })?
    }

    /// Resolve `inputs` in `store`, run the transformation named `name` and store the
    /// result under `output`.
    ///
    /// The store is only modified when the transformation succeeds.
    ///
    /// # Errors
    ///
    /// [`TransformError::MissingSource`] if an input is not in the store, otherwise the
    /// errors of [`Registry::invoke`].
    pub fn run(
        &self,
        store: &mut ImageStore,
        name: &str,
        inputs: &[&str],
        output: &str,
        params: TransformParams,
    ) -> Result<(), TransformError> {
        let kind = name.parse::<TransformKind>()?;

        let result = {
            let sources = inputs
                .iter()
                .map(|&key| {
                    store
                        .get(key)
                        .ok_or_else(|| TransformError::MissingSource(key.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            self.apply(kind, &sources, params)?
        };

        store.insert(output, result);
        Ok(())
    }
}
