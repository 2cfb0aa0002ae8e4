//! Small string predicates used by the builder.

/// Check whether `s` contains a comma.
pub fn is_comma_exist(s: &str) -> bool {
    s.contains(',')
}

/// Emptiness check shared by strings and sequences.
///
/// Strings are not trimmed; trim first if whitespace should count as empty.
pub trait IsNotEmpty {
    fn is_not_empty(&self) -> bool;
}

impl IsNotEmpty for str {
    fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }
}

impl IsNotEmpty for String {
    fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> IsNotEmpty for [T] {
    fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> IsNotEmpty for Vec<T> {
    fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: IsNotEmpty + ?Sized> IsNotEmpty for &T {
    fn is_not_empty(&self) -> bool {
        (**self).is_not_empty()
    }
}

/// True if `data` holds at least one char / element.
pub fn is_not_empty<T: IsNotEmpty + ?Sized>(data: &T) -> bool {
    data.is_not_empty()
}

/// Quote `value` as a SQL string literal, doubling embedded single quotes.
///
/// Backslashes are left alone, which is correct for servers running with
/// `standard_conforming_strings = on`.
pub fn prepare_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

/// Quote `value` as a Postgres escape-string literal (`E'...'`).
///
/// Both `'` and `\` are doubled, so the literal reads the same whatever
/// `standard_conforming_strings` is set to.
pub fn prepare_escaped_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 3);
    out.push_str("E'");
    for ch in value.chars() {
        if ch == '\'' || ch == '\\' {
            out.push(ch);
        }
        out.push(ch);
    }
    out.push('\'');
    out
}
