pub mod bar;
pub mod bar_series;
pub mod dates;
pub mod request_params;
