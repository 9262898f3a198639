// vim: set ai et ts=4 sw=4 sts=4:
use std::fmt;
use std::os::unix::io::AsRawFd;
use ansi_term::ANSIString;

pub fn maybe_color(s: &ANSIString, emit_color: bool) -> String {
    match emit_color {
        true  => s.to_string(),
        false => (**s).to_string(), // deref once to get ANSIString, once more to get underlying str
    }
}
pub fn ralign(s: &str, width: usize) -> String {
    if s.len() >= width {
        return String::from(s);
    }
    format!("{}{}", " ".repeat(width-s.len()), s)
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
}
impl fmt::Display for Direction {
    fn fmt(&self,
           f: &mut fmt::Formatter) -> fmt::Result
    {
        write!(f, "{}", match self {
            Direction::Horizontal => "Horizontal",
            Direction::Vertical   => "Vertical",
        })
    }
}
impl Direction {
    // horizontal lines are rows, vertical lines are columns
    pub fn line_name(&self) -> &'static str {
        match self {
            Direction::Horizontal => "row",
            Direction::Vertical   => "col",
        }
    }
}

pub fn is_a_tty<T: AsRawFd>(handle: T) -> bool {
    extern crate libc;
    let fd = handle.as_raw_fd();
    unsafe { libc::isatty(fd) != 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansi_term::Colour;

    #[test]
    fn ralign_pads_on_the_left() {
        assert_eq!(ralign("3", 3), "  3");
        assert_eq!(ralign("1234", 3), "1234");
    }

    #[test]
    fn maybe_color_strips_escapes_when_disabled() {
        let painted = Colour::Red.paint("x");
        assert_eq!(maybe_color(&painted, false), "x");
        assert_ne!(maybe_color(&painted, true), "x");
    }
}
