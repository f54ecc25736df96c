mod base;
mod constant;
mod entity;

pub use base::*;
pub use constant::*;
pub use entity::*;

#[cfg(test)]
pub(crate) use base::test::lock_global_config;
