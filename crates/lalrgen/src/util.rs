use std::fmt;

/// Turn a formatting closure into a value implementing `Display`.
pub fn display_fn<F>(f: F) -> impl fmt::Display
where
    F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
{
    struct Displayed<F>(F);
    impl<F> fmt::Display for Displayed<F>
    where
        F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result,
    {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            (self.0)(formatter)
        }
    }
    Displayed(f)
}

/// `"1 conflict"`, `"3 conflicts"`.
pub fn count(n: usize, noun: &str) -> String {
    match n {
        1 => format!("1 {}", noun),
        n => format!("{} {}s", n, noun),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts() {
        assert_eq!(count(0, "conflict"), "0 conflicts");
        assert_eq!(count(1, "conflict"), "1 conflict");
        assert_eq!(count(4, "rule"), "4 rules");
    }

    #[test]
    fn display_closure() {
        let shown = display_fn(|f| write!(f, "{}-{}", 1, 2));
        assert_eq!(shown.to_string(), "1-2");
    }
}
