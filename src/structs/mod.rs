pub mod qr_request;
pub mod style_request;
