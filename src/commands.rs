pub mod classify;
pub mod css;
pub mod format;
pub mod reduce;
pub mod serve;
