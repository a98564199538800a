pub(crate) mod budget;
pub(crate) mod nearest;
pub(crate) mod two_opt;
