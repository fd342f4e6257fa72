pub mod polar;

pub use polar::PolarProjection;
