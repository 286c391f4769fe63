//! Markup escaping for untrusted text.
//!
//! Every server-provided value passes through [`escape`] before it is placed
//! into markup. Absent and empty values render as nothing, except the number
//! zero which renders as `"0"`.

use std::borrow::Cow;

/// A value that may be written into markup
pub trait Escapable {
    /// The value's text form, or `None` when it should render as nothing
    fn markup_text(&self) -> Option<Cow<'_, str>>;
}

/// Escapes `&`, `<`, `>`, `"` and `'` in the value's text form
pub fn escape<T: Escapable + ?Sized>(value: &T) -> String {
    let Some(text) = value.markup_text() else {
        return String::new();
    };

    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Formats a number the way it should read on screen: no trailing `.0`,
/// no negative zero.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else {
        value.to_string()
    }
}

impl Escapable for str {
    fn markup_text(&self) -> Option<Cow<'_, str>> {
        (!self.is_empty()).then_some(Cow::Borrowed(self))
    }
}

impl Escapable for String {
    fn markup_text(&self) -> Option<Cow<'_, str>> {
        self.as_str().markup_text()
    }
}

impl<T: Escapable + ?Sized> Escapable for &T {
    fn markup_text(&self) -> Option<Cow<'_, str>> {
        (**self).markup_text()
    }
}

impl<T: Escapable> Escapable for Option<T> {
    fn markup_text(&self) -> Option<Cow<'_, str>> {
        self.as_ref().and_then(Escapable::markup_text)
    }
}

fn number_text(value: f64) -> Option<Cow<'static, str>> {
    (!value.is_nan()).then(|| Cow::Owned(format_number(value)))
}

impl Escapable for f64 {
    fn markup_text(&self) -> Option<Cow<'_, str>> {
        number_text(*self)
    }
}

impl Escapable for f32 {
    fn markup_text(&self) -> Option<Cow<'_, str>> {
        number_text(f64::from(*self))
    }
}

macro_rules! escapable_integer {
    ($($ty:ty),*) => {
        $(
            impl Escapable for $ty {
                fn markup_text(&self) -> Option<Cow<'_, str>> {
                    Some(Cow::Owned(self.to_string()))
                }
            }
        )*
    };
}

escapable_integer!(i32, i64, u32, u64, usize);

impl Escapable for bool {
    fn markup_text(&self) -> Option<Cow<'_, str>> {
        self.then_some(Cow::Borrowed("true"))
    }
}

impl Escapable for serde_json::Value {
    fn markup_text(&self) -> Option<Cow<'_, str>> {
        match self {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => b.markup_text(),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => number_text(f),
                None => Some(Cow::Owned(n.to_string())),
            },
            serde_json::Value::String(s) => s.markup_text(),
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}
