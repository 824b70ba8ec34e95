pub mod io;
pub mod plot;
