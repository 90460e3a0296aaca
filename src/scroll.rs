pub(crate) mod driver;
pub(crate) mod events;
pub(crate) mod smooth;
pub(crate) mod trigger;
