pub mod euclidean;
pub mod space;

pub use euclidean::EuclideanSpace;
pub use space::Space;
