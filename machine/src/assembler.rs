//! Two-pass symbolic assembler: source text with labels and an `ORG`
//! directive in, a flat vector of assembled words out.

use std::collections::HashMap;

use accumulon_core::{encode, Opcode, Word};

enum Line<'a> {
    Org(u32),
    Label(&'a str),
    Instruction { mnemonic: &'a str, operand: Option<&'a str> },
}

/// Strip a `;` comment and surrounding whitespace; `None` if nothing is left.
fn clean_line(raw: &str) -> Option<&str> {
    let without_comment = match raw.find(';') {
        Some(i) => &raw[..i],
        None => raw,
    };
    let trimmed = without_comment.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn classify(line: &str) -> Line<'_> {
    if let Some(rest) = line.strip_prefix("ORG ").or_else(|| line.strip_prefix("ORG\t")) {
        let k = rest.trim().parse::<u32>().unwrap_or(0);
        return Line::Org(k);
    }
    if let Some(label) = line.strip_suffix(':') {
        return Line::Label(label);
    }
    let mut parts = line.splitn(2, char::is_whitespace);
    let mnemonic = parts.next().unwrap_or("");
    let operand = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());
    Line::Instruction { mnemonic, operand }
}

/// Result of assembling a source program: the emitted words plus any
/// diagnostics collected along the way. Diagnostics never abort assembly —
/// the offending word is emitted as 0, matching the "report and keep going"
/// error-handling contract.
pub struct AssembledProgram {
    pub words: Vec<Word>,
    pub diagnostics: Vec<String>,
}

pub fn assemble(source: &str) -> AssembledProgram {
    let cleaned: Vec<&str> = source.lines().filter_map(clean_line).collect();

    // Pass 1: assign addresses.
    let mut symbol_table: HashMap<&str, u32> = HashMap::new();
    let mut current_address: u32 = 0;
    for line in &cleaned {
        match classify(line) {
            Line::Org(k) => current_address = k,
            Line::Label(name) => {
                symbol_table.insert(name, current_address);
            }
            Line::Instruction { .. } => current_address += 1,
        }
    }

    // Pass 2: emit words.
    let mut words: Vec<Word> = Vec::new();
    let mut diagnostics: Vec<String> = Vec::new();
    let mut cursor: u32 = 0;
    for line in &cleaned {
        match classify(line) {
            Line::Org(k) => {
                while cursor < k {
                    words.push(0);
                    cursor += 1;
                }
            }
            Line::Label(_) => {}
            Line::Instruction { mnemonic, operand } => {
                words.push(assemble_line(mnemonic, operand, &symbol_table, &mut diagnostics));
                cursor += 1;
            }
        }
    }

    AssembledProgram { words, diagnostics }
}

fn assemble_line(
    mnemonic: &str,
    operand: Option<&str>,
    symbol_table: &HashMap<&str, u32>,
    diagnostics: &mut Vec<String>,
) -> Word {
    let upper = mnemonic.to_ascii_uppercase();
    let Some(opcode) = Opcode::from_mnemonic(&upper) else {
        diagnostics.push(format!("unknown mnemonic '{mnemonic}'"));
        return 0;
    };

    if opcode.has_no_operand() {
        return encode(opcode, false, 0);
    }

    let Some(token) = operand else {
        diagnostics.push(format!("{mnemonic} requires an operand"));
        return encode(opcode, false, 0);
    };

    if let Some(lit) = token.strip_prefix('#') {
        let value = parse_int(lit, diagnostics);
        return encode(opcode, false, value);
    }

    if token.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        let value = parse_int(token, diagnostics);
        return encode(opcode, true, value);
    }

    match symbol_table.get(token) {
        Some(&addr) => encode(opcode, true, addr),
        None => {
            diagnostics.push(format!("unresolved label '{token}'"));
            encode(opcode, true, 0)
        }
    }
}

fn parse_int(token: &str, diagnostics: &mut Vec<String>) -> u32 {
    match token.parse::<u32>() {
        Ok(v) => v,
        Err(_) => {
            diagnostics.push(format!("malformed integer literal '{token}'"));
            0
        }
    }
}
