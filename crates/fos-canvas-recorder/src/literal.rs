//! Statement Literals
//!
//! Renders recorded arguments as JavaScript source text.
//!
//! Grammar of emitted statements:
//! - calls: `name.method(arg1,arg2);`
//! - property writes: `name.prop=value;`
//! - handle creation: `const name = expr;`

use std::fmt;

/// Argument separator of 2D calls and WebGL value calls.
pub const ARG_SEPARATOR: &str = ",";
/// Argument separator of WebGL calls taking handles or enum names.
pub const ARG_SEPARATOR_SPACED: &str = ", ";

/// Quote a string as a single-quoted JavaScript literal.
///
/// `\` is doubled before `'` is escaped, so the result is always a valid
/// literal. Line breaks are escaped as well since a raw newline would end
/// the literal.
pub fn string_arg(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Format a number the way JavaScript's `String(number)` does.
pub fn number_arg(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // also covers -0
        return "0".to_string();
    }

    let abs = value.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{value}");
    }

    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

/// Widen an `f32` through its shortest decimal form (`0.1f32` stays `0.1`).
pub(crate) fn widen(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(value as f64)
}

/// A recorded argument
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Number(f64),
    Int(i64),
    Bool(bool),
    /// Quoted and escaped
    Str(String),
    /// Emitted verbatim: handle names, enum references, element variables
    Ref(String),
    /// `[a,b,c]`
    List(Vec<f64>),
    Json(serde_json::Value),
    Null,
}

impl Arg {
    /// Bare identifier or expression
    pub fn reference(expr: impl Into<String>) -> Self {
        Self::Ref(expr.into())
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&number_arg(*n)),
            Self::Int(i) => write!(f, "{i}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(&string_arg(s)),
            Self::Ref(r) => f.write_str(r),
            Self::List(values) => write!(f, "[{}]", join_numbers(values)),
            Self::Json(value) => write!(f, "{value}"),
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Self::Number(widen(value))
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<u32> for Arg {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&[f64]> for Arg {
    fn from(values: &[f64]) -> Self {
        Self::List(values.to_vec())
    }
}

impl From<&[f32]> for Arg {
    fn from(values: &[f32]) -> Self {
        Self::List(values.iter().copied().map(widen).collect())
    }
}

impl From<&[i32]> for Arg {
    fn from(values: &[i32]) -> Self {
        Self::List(values.iter().copied().map(f64::from).collect())
    }
}

/// Comma-join numbers without spaces
pub fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|&v| number_arg(v))
        .collect::<Vec<_>>()
        .join(",")
}

/// JSON number in its shortest JavaScript form (`1` rather than `1.0`)
pub(crate) fn json_number(value: f64) -> serde_json::Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serde_json::Value::from(value as i64)
    } else {
        // JSON.stringify writes NaN and infinities as null
        serde_json::Number::from_f64(value)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

/// Render and join arguments
pub fn join_args(args: &[Arg], separator: &str) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// `target.method(args)`
pub fn invocation(target: &str, method: &str, args: &[Arg], separator: &str) -> String {
    format!("{target}.{method}({})", join_args(args, separator))
}

/// `target.method(args);`
pub fn call(target: &str, method: &str, args: &[Arg], separator: &str) -> String {
    format!("{};", invocation(target, method, args, separator))
}

/// `target.prop=value;`
pub fn assign(target: &str, prop: &str, value: &Arg) -> String {
    format!("{target}.{prop}={value};")
}

/// `const name = expr;`
pub fn declare(name: &str, expr: &str) -> String {
    format!("const {name} = {expr};")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_arg_escapes_in_order() {
        assert_eq!(string_arg("Don't"), r"'Don\'t'");
        assert_eq!(string_arg(r"a\b"), r"'a\\b'");
        // backslash before quote must not swallow the escape
        assert_eq!(string_arg(r"\'"), r"'\\\''");
        assert_eq!(string_arg("two\nlines"), r"'two\nlines'");
    }

    #[test]
    fn test_number_arg_matches_javascript() {
        assert_eq!(number_arg(0.0), "0");
        assert_eq!(number_arg(-0.0), "0");
        assert_eq!(number_arg(3.0), "3");
        assert_eq!(number_arg(-2.5), "-2.5");
        assert_eq!(number_arg(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_arg(1e21), "1e+21");
        assert_eq!(number_arg(1.5e-7), "1.5e-7");
        assert_eq!(number_arg(f64::NAN), "NaN");
        assert_eq!(number_arg(f64::INFINITY), "Infinity");
        assert_eq!(number_arg(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_f32_keeps_short_form() {
        assert_eq!(Arg::from(0.1f32).to_string(), "0.1");
        assert_eq!(Arg::from(&[0.5f32, 1.0][..]).to_string(), "[0.5,1]");
    }

    #[test]
    fn test_call_and_assign() {
        let args = [Arg::from(1.0), Arg::from("x"), Arg::Null, Arg::reference("h_0")];
        assert_eq!(call("_c0", "f", &args, ARG_SEPARATOR), "_c0.f(1,'x',null,h_0);");
        assert_eq!(call("_cgl0", "g", &args[..2], ARG_SEPARATOR_SPACED), "_cgl0.g(1, 'x');");
        assert_eq!(call("_c0", "save", &[], ARG_SEPARATOR), "_c0.save();");
        assert_eq!(join_args(&[Arg::from(0.5), Arg::from(2i32)], ARG_SEPARATOR), "0.5,2");
        assert_eq!(assign("_c0", "lineWidth", &Arg::from(2.0)), "_c0.lineWidth=2;");
        assert_eq!(declare("_c0_0", "_c0.createPattern()"), "const _c0_0 = _c0.createPattern();");
        assert_eq!(invocation("_cgl0", "createShader", &[Arg::reference("_cgl0.VERTEX_SHADER")], ARG_SEPARATOR_SPACED), "_cgl0.createShader(_cgl0.VERTEX_SHADER)");
    }

    #[test]
    fn test_json_number() {
        assert_eq!(json_number(1.0).to_string(), "1");
        assert_eq!(json_number(0.5).to_string(), "0.5");
        assert_eq!(json_number(f64::NAN), serde_json::Value::Null);
    }
}
