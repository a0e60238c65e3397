//! GPUI front end for the gallery.
//!
//! [`ChartView`] paints one demo through a canvas and routes pointer input
//! to it; [`GalleryView`] hosts the picker and drives animations and the
//! data stream from a frame timer.

mod gallery;
mod paint;
mod text;
mod view;

pub use gallery::{GalleryView, run_gallery};
pub use view::{ChartView, DemoHandle};
