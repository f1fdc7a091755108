pub mod batch;
pub mod box_merge;
pub mod decode;
mod union_find;

pub use batch::{group_by_image, merge_images, ImageDetections, ImageEnsemble};
pub use box_merge::merge;
pub use decode::{decode, RawDetections};
