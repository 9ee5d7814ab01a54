pub mod rest;

pub use rest::DerivClient;
