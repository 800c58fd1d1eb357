use arch::op::Op;
use indexmap::IndexMap;

use crate::error::ErrorKind;
use crate::label::Labels;

// ----------------------------------------------------------------------------
// Statement

#[derive(Debug, Clone)]
pub enum Stmt {
    Label(String),
    Const(String, i128),
    Item(ItemKind),
}

impl Stmt {
    pub fn parse(text: &str, consts: &Consts) -> Result<Stmt, ErrorKind> {
        // [label]
        if let Some(name) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            return Ok(Stmt::Label(name.to_string()));
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        let Some((&head, args)) = words.split_first() else {
            return Err(ErrorKind::Internal("empty line reached the classifier".to_string()));
        };

        // name EQU value
        if words.len() == 3 && words[1].eq_ignore_ascii_case("EQU") {
            let value = parse_int(words[2])
                .ok_or_else(|| ErrorKind::BadConstValue(head.to_string(), words[2].to_string()))?;
            return Ok(Stmt::Const(head.to_string(), value));
        }

        // db 1, 2, "data"
        if head.eq_ignore_ascii_case("DB") {
            let Some((_, rest)) = text.split_once(char::is_whitespace) else {
                return Err(ErrorKind::EmptyData);
            };
            let bytes = parse_data(rest)?;
            if bytes.is_empty() {
                return Err(ErrorKind::EmptyData);
            }
            return Ok(Stmt::Item(ItemKind::Data(bytes)));
        }

        // instruction
        let op = Op::parse(head).map_err(|_| ErrorKind::UnknownInstruction(head.to_string()))?;
        match args {
            [] => Ok(Stmt::Item(ItemKind::Inst(op, None))),
            [arg] => Ok(Stmt::Item(ItemKind::Inst(op, Some(Operand::parse(arg, consts))))),
            _ => Err(ErrorKind::ExtraOperands(head.to_string())),
        }
    }
}

// ----------------------------------------------------------------------------
// Item

/// A unit occupying bytecode space, tied to its source line for diagnostics.
#[derive(Debug, Clone)]
pub struct Item {
    pub line: usize,
    pub raw: String,
    pub kind: ItemKind,
}

#[derive(Debug, Clone)]
pub enum ItemKind {
    Inst(Op, Option<Operand>),
    Data(Vec<u8>),
}

impl ItemKind {
    /// Byte size under the SV64 encoding. Address resolution and emission
    /// both go through here, so the two passes cannot disagree.
    pub fn size(&self) -> usize {
        match self {
            ItemKind::Inst(op, operand) => match (op.push_width(), operand) {
                (Some(width), _) => 1 + width,
                (None, Some(_)) => 1 + 1 + 8,
                (None, None) => 1,
            },
            ItemKind::Data(bytes) => bytes.len(),
        }
    }
}

// ----------------------------------------------------------------------------
// Operand

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Literal(i128),
    Const(i128),
    Symbol(String),
}

impl Operand {
    /// Integer literal, else known constant, else a symbol deferred to the
    /// label pass.
    fn parse(s: &str, consts: &Consts) -> Operand {
        if let Some(value) = parse_int(s) {
            return Operand::Literal(value);
        }
        match consts.get(s) {
            Some(value) => Operand::Const(value),
            None => Operand::Symbol(s.to_string()),
        }
    }

    pub fn resolve(&self, labels: &Labels) -> Result<i128, ErrorKind> {
        match self {
            Operand::Literal(value) | Operand::Const(value) => Ok(*value),
            Operand::Symbol(name) => match labels.get(name) {
                Some(offset) => Ok(offset as i128),
                None => Err(ErrorKind::UndefinedSymbol(name.clone())),
            },
        }
    }
}

// ----------------------------------------------------------------------------
// Constants

#[derive(Debug)]
pub struct Consts {
    case_sensitive: bool,
    table: IndexMap<String, (usize, i128)>,
}

impl Consts {
    pub fn new(case_sensitive: bool) -> Self {
        Consts {
            case_sensitive,
            table: IndexMap::new(),
        }
    }

    pub fn define(&mut self, name: &str, value: i128, line: usize) -> Result<(), ErrorKind> {
        let key = fold_key(name, self.case_sensitive);
        if let Some(&(first, _)) = self.table.get(&key) {
            return Err(ErrorKind::RedefinedConst {
                name: name.to_string(),
                first,
            });
        }
        self.table.insert(key, (line, value));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<i128> {
        self.table
            .get(&fold_key(name, self.case_sensitive))
            .map(|&(_, value)| value)
    }
}

pub fn fold_key(name: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        name.to_string()
    } else {
        name.to_lowercase()
    }
}

// ----------------------------------------------------------------------------
// Literals

pub fn parse_int(s: &str) -> Option<i128> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let (radix, digits) = match body.get(..2) {
        Some("0x") | Some("0X") => (16, &body[2..]),
        Some("0o") | Some("0O") => (8, &body[2..]),
        Some("0b") | Some("0B") => (2, &body[2..]),
        _ => (10, body),
    };
    let digits = digits.replace('_', "");
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let value = i128::from_str_radix(&digits, radix).ok()?;
    Some(if negative { -value } else { value })
}

fn unescape(s: &str) -> Result<String, ErrorKind> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                match u8::from_str_radix(&hex, 16) {
                    Ok(code) if hex.len() == 2 => out.push(code as char),
                    _ => return Err(ErrorKind::BadEscape(format!("x{hex}"))),
                }
            }
            // Unknown escapes keep the backslash.
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Ok(out)
}

/// A whole argument wrapped in matching quotes. The delimiter may not appear
/// unescaped inside, and the closing quote may not itself be escaped.
fn quoted(arg: &str) -> Option<&str> {
    let quote = arg.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let inner = arg.strip_prefix(quote)?.strip_suffix(quote)?;
    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return None;
        }
    }
    if escaped {
        return None;
    }
    Some(inner)
}

/// Split a `db` argument list on commas, except inside quoted spans. The
/// scanner only toggles quote state; escapes are not interpreted here.
fn split_data_args(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_single = false;
    let mut in_double = false;
    for (i, c) in args.char_indices() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            ',' if !in_single && !in_double => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[start..].trim());
    parts
}

pub fn parse_data(args: &str) -> Result<Vec<u8>, ErrorKind> {
    let mut bytes = Vec::new();
    for arg in split_data_args(args) {
        if arg.is_empty() {
            continue;
        }
        if let Some(text) = quoted(arg) {
            for c in unescape(text)?.chars() {
                let code = u32::from(c);
                if code > 0xFF {
                    return Err(ErrorKind::CharOutOfRange(c));
                }
                bytes.push(code as u8);
            }
        } else if let Some(value) = parse_int(arg) {
            if !(0..=255).contains(&value) {
                return Err(ErrorKind::ByteOutOfRange(value));
            }
            bytes.push(value as u8);
        } else {
            return Err(ErrorKind::BadDataArg(arg.to_string()));
        }
    }
    Ok(bytes)
}
