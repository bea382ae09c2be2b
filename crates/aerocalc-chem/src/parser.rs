//! Parse molecular formulas such as `C16H27O8N`, `Ca(OH)2` or
//! `CuSO4.5H2O` into element compositions.
//!
//! Grammar:
//!
//! ```text
//! formula := group ( ('.' | '·' | '*') count? group )*
//! group   := item+
//! item    := element count? | '(' group ')' count? | '[' group ']' count?
//! element := [A-Z][a-z]*
//! ```

use std::collections::BTreeMap;

use crate::elements;
use crate::types::{ChemError, Formula};

/// Parse a formula string into a [`Formula`].
///
/// Every element symbol must be known to the atomic weight table, so a
/// successfully parsed formula always has a defined molar mass.
pub fn parse_formula(text: &str) -> Result<Formula, ChemError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ChemError::EmptyFormula);
    }

    let mut parser = Parser {
        text: trimmed,
        chars: trimmed.chars().collect(),
        pos: 0,
    };
    let composition = parser.formula()?;

    Ok(Formula {
        text: trimmed.to_string(),
        composition,
    })
}

struct Parser<'a> {
    text: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl Parser<'_> {
    fn formula(&mut self) -> Result<BTreeMap<String, u32>, ChemError> {
        let mut total = self.group(None)?;
        while let Some(c) = self.peek() {
            if !is_hydrate_separator(c) {
                return Err(self.unexpected(c));
            }
            self.pos += 1;
            let multiplier = self.count()?.unwrap_or(1);
            let part = self.group(None)?;
            merge(&mut total, &part, multiplier).map_err(|_| self.overflow())?;
        }
        Ok(total)
    }

    /// Parse items until end of input, a hydrate separator, or `close`.
    fn group(&mut self, close: Option<char>) -> Result<BTreeMap<String, u32>, ChemError> {
        let mut counts = BTreeMap::new();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if Some(c) == close || is_hydrate_separator(c) {
                break;
            }
            match c {
                '(' | '[' => {
                    let open_pos = self.pos;
                    let closing = if c == '(' { ')' } else { ']' };
                    self.pos += 1;
                    let inner = self.group(Some(closing))?;
                    if self.peek() != Some(closing) {
                        return Err(ChemError::UnbalancedParen {
                            formula: self.text.to_string(),
                            pos: open_pos,
                        });
                    }
                    self.pos += 1;
                    let n = self.count()?.unwrap_or(1);
                    merge(&mut counts, &inner, n).map_err(|_| self.overflow())?;
                }
                ')' | ']' => {
                    return Err(ChemError::UnbalancedParen {
                        formula: self.text.to_string(),
                        pos: self.pos,
                    });
                }
                c if c.is_ascii_uppercase() => {
                    let symbol = self.element();
                    if !elements::is_element(&symbol) {
                        return Err(ChemError::UnknownElement {
                            formula: self.text.to_string(),
                            symbol,
                        });
                    }
                    let n = self.count()?.unwrap_or(1);
                    let entry = counts.entry(symbol).or_insert(0u32);
                    *entry = entry.checked_add(n).ok_or_else(|| self.overflow())?;
                }
                other => return Err(self.unexpected(other)),
            }
        }
        if self.pos == start {
            return match self.peek() {
                Some(c) => Err(self.unexpected(c)),
                None => Err(ChemError::EmptyFormula),
            };
        }
        Ok(counts)
    }

    fn element(&mut self) -> String {
        let mut symbol = String::new();
        if let Some(c) = self.peek() {
            symbol.push(c);
            self.pos += 1;
        }
        while let Some(c) = self.peek() {
            if !c.is_ascii_lowercase() {
                break;
            }
            symbol.push(c);
            self.pos += 1;
        }
        symbol
    }

    fn count(&mut self) -> Result<Option<u32>, ChemError> {
        let mut value: Option<u32> = None;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            let acc = value.unwrap_or(0);
            value = Some(
                acc.checked_mul(10)
                    .and_then(|v| v.checked_add(d))
                    .ok_or_else(|| self.overflow())?,
            );
            self.pos += 1;
        }
        Ok(value)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self, ch: char) -> ChemError {
        ChemError::UnexpectedChar {
            formula: self.text.to_string(),
            ch,
            pos: self.pos,
        }
    }

    fn overflow(&self) -> ChemError {
        ChemError::CountOverflow(self.text.to_string())
    }
}

fn is_hydrate_separator(c: char) -> bool {
    matches!(c, '.' | '·' | '*')
}

/// Add `part * multiplier` into `total`.
fn merge(
    total: &mut BTreeMap<String, u32>,
    part: &BTreeMap<String, u32>,
    multiplier: u32,
) -> Result<(), ()> {
    for (symbol, &n) in part {
        let scaled = n.checked_mul(multiplier).ok_or(())?;
        let entry = total.entry(symbol.clone()).or_insert(0);
        *entry = entry.checked_add(scaled).ok_or(())?;
    }
    Ok(())
}
