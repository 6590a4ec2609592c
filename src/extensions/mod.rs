pub mod float_ext;
pub mod locale_ext;
