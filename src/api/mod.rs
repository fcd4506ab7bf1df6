pub mod work_api;

pub use work_api::WorkApi;
