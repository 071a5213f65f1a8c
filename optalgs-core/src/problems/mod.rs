pub mod objective;
pub mod quadratic;
pub mod test_functions;

pub use objective::Objective;
pub use quadratic::QuadraticForm;
