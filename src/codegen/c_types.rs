use std::collections::HashSet;

use crate::parser::ast::has_type_prefix;

/// Map a language type spelling onto the C type it occupies. Struct names
/// and anything unknown pass through verbatim; unknown spellings are left
/// for the C compiler to complain about.
pub(crate) fn c_type(name: &str, _structs: &HashSet<String>) -> String {
    match name {
        "int" => "int64_t".to_string(),
        "float" => "double".to_string(),
        "bool" => "bool".to_string(),
        "string" => "struct lz_string *".to_string(),
        "null" => "void *".to_string(),
        _ => {
            if has_type_prefix(name, "result") {
                "lz_result".to_string()
            } else if has_type_prefix(name, "maybe") {
                "lz_maybe".to_string()
            } else {
                name.to_string()
            }
        }
    }
}

/// Like [`c_type`], except that `null` in return position means `void`.
pub(crate) fn c_return_type(name: &str, structs: &HashSet<String>) -> String {
    if name == "null" {
        "void".to_string()
    } else {
        c_type(name, structs)
    }
}

/// Pick the runtime assignment funnel for a value of the given language
/// type. Every observable write goes through one of these helpers so the
/// runtime keeps a single interception point for future bookkeeping.
pub(crate) fn assign_helper(name: &str, structs: &HashSet<String>) -> String {
    match name {
        "int" => "lz_assign_int64".to_string(),
        "float" => "lz_assign_double".to_string(),
        "bool" => "lz_assign_bool".to_string(),
        "string" => "lz_assign_string".to_string(),
        _ => {
            if has_type_prefix(name, "result") {
                "lz_assign_result".to_string()
            } else if has_type_prefix(name, "maybe") {
                "lz_assign_maybe".to_string()
            } else if structs.contains(name) {
                format!("lz_assign_struct_{name}")
            } else {
                "lz_assign_ptr".to_string()
            }
        }
    }
}

/// Escape a raw string literal for emission between C double quotes.
/// Printable ASCII passes through; everything else becomes a `\xHH`
/// escape.
pub(crate) fn escape_c_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for byte in value.bytes() {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\x{byte:02x}")),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_structs() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn test_scalar_type_mapping() {
        assert_eq!(c_type("int", &no_structs()), "int64_t");
        assert_eq!(c_type("float", &no_structs()), "double");
        assert_eq!(c_type("bool", &no_structs()), "bool");
        assert_eq!(c_type("string", &no_structs()), "struct lz_string *");
        assert_eq!(c_type("null", &no_structs()), "void *");
    }

    #[test]
    fn test_flow_type_mapping() {
        assert_eq!(c_type("result[int,int]", &no_structs()), "lz_result");
        assert_eq!(c_type("maybe[User]", &no_structs()), "lz_maybe");
    }

    #[test]
    fn test_null_return_type_is_void() {
        assert_eq!(c_return_type("null", &no_structs()), "void");
        assert_eq!(c_return_type("int", &no_structs()), "int64_t");
    }

    #[test]
    fn test_unknown_type_passes_through() {
        assert_eq!(c_type("Widget", &no_structs()), "Widget");
    }

    #[test]
    fn test_assign_helper_per_category() {
        let mut structs = HashSet::new();
        structs.insert("Point".to_string());

        assert_eq!(assign_helper("int", &structs), "lz_assign_int64");
        assert_eq!(assign_helper("float", &structs), "lz_assign_double");
        assert_eq!(assign_helper("bool", &structs), "lz_assign_bool");
        assert_eq!(assign_helper("string", &structs), "lz_assign_string");
        assert_eq!(assign_helper("result[int,int]", &structs), "lz_assign_result");
        assert_eq!(assign_helper("maybe[int]", &structs), "lz_assign_maybe");
        assert_eq!(assign_helper("Point", &structs), "lz_assign_struct_Point");
        assert_eq!(assign_helper("Widget", &structs), "lz_assign_ptr");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(escape_c_string("plain"), "plain");
        assert_eq!(escape_c_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_c_string("a\\b"), "a\\\\b");
        assert_eq!(escape_c_string("line\nbreak\tand\r"), "line\\nbreak\\tand\\r");
        assert_eq!(escape_c_string("\u{1}"), "\\x01");
    }
}
