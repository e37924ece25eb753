use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

#[macro_export]
macro_rules! sourcelink_print {
    ($message:expr) => {
        eprintln!(
            "{} {}",
            $crate::internal::user_interface::StringColor::light_cyan("sourcelink:"),
            $message
        )
    };
}

#[macro_export]
macro_rules! sourcelink_info {
    ($message:expr) => {
        $crate::sourcelink_print!($message)
    };
}

#[macro_export]
macro_rules! sourcelink_warning {
    ($message:expr) => {
        $crate::sourcelink_print!(format!(
            "{} {}",
            $crate::internal::user_interface::StringColor::yellow("warning:"),
            $message
        ))
    };
}

#[macro_export]
macro_rules! sourcelink_error {
    ($message:expr) => {
        $crate::sourcelink_print!(format!(
            "{} {}",
            $crate::internal::user_interface::StringColor::red("error:"),
            $message
        ))
    };
}

#[macro_export]
macro_rules! sourcelink_debug {
    ($message:expr) => {
        if $crate::internal::user_interface::verbose() {
            $crate::sourcelink_print!($crate::internal::user_interface::StringColor::light_black(
                format!("{}", $message).as_str()
            ))
        }
    };
}
