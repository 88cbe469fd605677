pub mod clock;
pub mod weather;
pub mod window;
