pub mod entities;
pub mod errors;
pub mod ports;
pub mod token;
pub mod validation;
