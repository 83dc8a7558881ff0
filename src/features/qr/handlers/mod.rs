pub mod qr_handler;

pub use qr_handler::get_qr;
