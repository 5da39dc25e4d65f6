pub mod dump;
pub mod load;
pub mod syntax;

// Publicly re-export all error types from the submodules to simplify
// access from external code.
pub use dump::DumpError;
pub use load::LoadError;
pub use syntax::SyntaxError;
