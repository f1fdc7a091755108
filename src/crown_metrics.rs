mod band_stack;
mod crown_attributes;
mod gaussian;
pub mod vegetation;

pub use band_stack::BandStack;
pub use crown_attributes::{crown_volume, describe_crown, CrownAttributes};
pub use gaussian::gaussian_filter;
pub use vegetation::IndexAverages;
