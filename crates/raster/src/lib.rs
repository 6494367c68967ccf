#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use raster_image as image;

#[doc(inline)]
pub use raster_imgproc as imgproc;

#[doc(inline)]
pub use raster_io as io;
