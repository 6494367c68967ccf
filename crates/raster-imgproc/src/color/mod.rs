mod component;
mod matrix;

pub use component::{
    blue_component, green_component, intensity_component, red_component, rgb_combine, rgb_split,
    value_component,
};
pub use matrix::{greyscale, luma_component, sepia, GREYSCALE_MATRIX, SEPIA_MATRIX};
