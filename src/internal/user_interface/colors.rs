use lazy_static::lazy_static;

lazy_static! {
    static ref ENABLE_COLORS: bool = colors_enabled();
}

fn colors_enabled() -> bool {
    colors_enabled_from_env(
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn colors_enabled_from_env(no_color: bool, term: Option<&str>) -> bool {
    if no_color {
        return false;
    }
    !matches!(term, Some("dumb"))
}

fn colorize(text: &str, code: &str) -> String {
    if !*ENABLE_COLORS {
        return text.to_string();
    }
    format!("\x1B[{}m{}\x1B[0m", code, text)
}

pub trait StringColor {
    fn as_str_for_color(&self) -> &str;

    fn red(&self) -> String {
        colorize(self.as_str_for_color(), "31")
    }

    fn yellow(&self) -> String {
        colorize(self.as_str_for_color(), "33")
    }

    fn light_black(&self) -> String {
        colorize(self.as_str_for_color(), "90")
    }

    fn light_blue(&self) -> String {
        colorize(self.as_str_for_color(), "94")
    }

    fn light_cyan(&self) -> String {
        colorize(self.as_str_for_color(), "96")
    }

    fn light_yellow(&self) -> String {
        colorize(self.as_str_for_color(), "93")
    }
}

impl StringColor for str {
    fn as_str_for_color(&self) -> &str {
        self
    }
}

impl StringColor for String {
    fn as_str_for_color(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
#[path = "colors_test.rs"]
mod tests;
