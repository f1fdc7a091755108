mod crown_box;
mod crown_detection;
mod crown_point;
mod label_map;
mod merged_box;

pub use crown_box::*;
pub use crown_detection::*;
pub use crown_point::*;
pub use label_map::*;
pub use merged_box::*;
