//! Small markdown building blocks shared by the renderers.

use crate::manifest::Member;
use std::fmt::{self, Write};

/// URI under which a component's documentation is addressed.
pub fn component_link(tag_name: &str) -> String {
    format!("forge://component/{tag_name}")
}

/// Make text safe for a single markdown table cell.
pub fn escape_cell(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_space = false;
    for c in text.trim().chars() {
        match c {
            '|' => {
                out.push_str("\\|");
                last_space = false;
            }
            '\n' | '\r' => {
                if !last_space {
                    out.push(' ');
                    last_space = true;
                }
            }
            _ => {
                out.push(c);
                last_space = c == ' ';
            }
        }
    }
    out
}

/// `name(param: Type = default, other?: Type): Return`
pub fn method_signature(method: &Member) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_method_signature(&mut out, method);
    out
}

pub(crate) fn write_method_signature<W: Write>(w: &mut W, method: &Member) -> fmt::Result {
    write!(w, "{}(", method.name)?;
    for (i, param) in method.parameters.iter().enumerate() {
        if i > 0 {
            w.write_str(", ")?;
        }
        w.write_str(&param.name)?;
        if param.optional {
            w.write_char('?')?;
        }
        if let Some(ty) = &param.ty {
            write!(w, ": {}", ty.text)?;
        }
        if let Some(default) = &param.default {
            write!(w, " = {default}")?;
        }
    }
    w.write_char(')')?;
    if let Some(ret) = method.return_type() {
        write!(w, ": {ret}")?;
    }
    Ok(())
}

/// Write a markdown table. Cells are escaped here.
pub(crate) fn write_table<W: Write>(
    w: &mut W,
    headers: &[&str],
    rows: impl IntoIterator<Item = Vec<String>>,
) -> fmt::Result {
    writeln!(w, "| {} |", headers.join(" | "))?;
    let separator: Vec<String> = headers.iter().map(|h| "-".repeat(h.len().max(3))).collect();
    writeln!(w, "|{}|", separator.iter().map(|s| format!("-{s}-")).collect::<Vec<_>>().join("|"))?;
    for row in rows {
        let cells: Vec<String> = row.iter().map(|cell| escape_cell(cell)).collect();
        writeln!(w, "| {} |", cells.join(" | "))?;
    }
    Ok(())
}

/// `` `text` `` or an empty string.
pub(crate) fn code_or_blank(text: Option<&str>) -> String {
    text.filter(|t| !t.is_empty())
        .map(|t| format!("`{t}`"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::{MemberKind, Parameter, ReturnInfo, TypeText};
    use assert2::check;

    fn text(t: &str) -> Option<TypeText> {
        Some(TypeText { text: t.into() })
    }

    #[test]
    fn signature_includes_params_and_return() {
        let method = Member {
            kind: MemberKind::Method,
            name: "open".into(),
            parameters: vec![
                Parameter {
                    name: "target".into(),
                    ty: text("HTMLElement"),
                    default: None,
                    optional: false,
                },
                Parameter {
                    name: "options".into(),
                    ty: text("OpenOptions"),
                    default: Some("{}".into()),
                    optional: true,
                },
            ],
            returns: Some(ReturnInfo { ty: text("Promise<void>") }),
            ..Member::default()
        };
        check!(
            method_signature(&method)
                == "open(target: HTMLElement, options?: OpenOptions = {}): Promise<void>"
        );
    }

    #[test]
    fn bare_signature() {
        let method = Member {
            kind: MemberKind::Method,
            name: "focus".into(),
            ..Member::default()
        };
        check!(method_signature(&method) == "focus()");
    }

    #[test]
    fn cells_are_escaped() {
        check!(escape_cell("a | b") == "a \\| b");
        check!(escape_cell("line one\nline two") == "line one line two");
        check!(escape_cell("  padded  ") == "padded");
    }

    #[test]
    fn table_layout() {
        let mut out = String::new();
        write_table(
            &mut out,
            &["Name", "Description"],
            [vec!["x".to_string(), "has | pipe".to_string()]],
        )
        .unwrap();
        check!(out == "| Name | Description |\n|------|-------------|\n| x | has \\| pipe |\n");
    }
}
