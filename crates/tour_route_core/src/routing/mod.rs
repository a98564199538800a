pub(crate) mod mode;
pub(crate) mod synth;
