pub mod deriv;
pub mod scanner;

pub use deriv::DerivClient;
pub use scanner::{ScanOutcome, Scanner};
