pub(crate) mod hero;
pub(crate) mod navbar;
pub(crate) mod preloader;
