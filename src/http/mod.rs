//! Http message parsing and encoding.

pub mod form;
pub mod request;
pub mod response;

cfg_if::cfg_if! {
    if #[cfg(feature = "tokio")] {
        mod async_request;
    }
}

pub use request::Request;
pub use response::Response;
