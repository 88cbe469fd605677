pub mod clock;
pub mod forecast;
pub mod status;
