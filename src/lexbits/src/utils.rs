mod io;
pub use io::*;

mod json;
pub use json::*;
