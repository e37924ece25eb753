pub(crate) mod colors;
pub(crate) use colors::StringColor;

pub(crate) mod print;
pub(crate) use print::set_verbose;
pub(crate) use print::verbose;
