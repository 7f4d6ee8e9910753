pub mod capstan;
pub mod encoder;
pub mod spindles;

pub use capstan::CapstanDrive;
pub use encoder::Encoder;
pub use spindles::Spindles;
