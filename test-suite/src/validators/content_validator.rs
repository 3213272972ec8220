//! Content Stream Validator
//!
//! Tokenizes page content streams and checks operator nesting and operand
//! counts.

use anyhow::{bail, Result};
use std::collections::HashMap;

/// Operators the writer emits
#[derive(Debug, Clone, PartialEq)]
pub enum ContentOperation {
    BeginText,
    EndText,
    SetFont(String, f64),
    MoveText(f64, f64),
    ShowText(Vec<u8>),
    SetWordSpacing(f64),
    SaveGraphicsState,
    RestoreGraphicsState,
    SetLineWidth(f64),
    SetLineCap(i64),
    SetStrokeGray(f64),
    SetStrokeRgb(f64, f64, f64),
    SetFillGray(f64),
    SetFillRgb(f64, f64, f64),
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Rectangle(f64, f64, f64, f64),
    Stroke,
    Fill,
    FillStroke,
}

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Number(f64),
    Name(String),
    String(Vec<u8>),
}

/// Split a content stream into operations
pub fn tokenize(content: &[u8]) -> Result<Vec<ContentOperation>> {
    let mut operations = Vec::new();
    let mut operands: Vec<Operand> = Vec::new();
    let mut i = 0;

    while i < content.len() {
        let byte = content[i];
        match byte {
            b' ' | b'\n' | b'\r' | b'\t' => i += 1,
            b'(' => {
                let (string, next) = read_literal(content, i)?;
                operands.push(Operand::String(string));
                i = next;
            }
            b'/' => {
                let end = token_end(content, i + 1);
                operands.push(Operand::Name(String::from_utf8_lossy(&content[i + 1..end]).into_owned()));
                i = end;
            }
            b'-' | b'.' | b'0'..=b'9' => {
                let end = token_end(content, i);
                let token = String::from_utf8_lossy(&content[i..end]);
                let value: f64 = token.parse().map_err(|_| anyhow::anyhow!("Bad number {token:?}"))?;
                operands.push(Operand::Number(value));
                i = end;
            }
            _ => {
                let end = token_end(content, i);
                let operator = String::from_utf8_lossy(&content[i..end]).into_owned();
                operations.push(build_operation(&operator, &operands)?);
                operands.clear();
                i = end;
            }
        }
    }

    if !operands.is_empty() {
        bail!("Trailing operands without an operator: {operands:?}");
    }
    Ok(operations)
}

fn token_end(content: &[u8], start: usize) -> usize {
    content[start..]
        .iter()
        .position(|b| matches!(b, b' ' | b'\n' | b'\r' | b'\t' | b'(' | b'/'))
        .map_or(content.len(), |p| start + p)
}

fn read_literal(content: &[u8], start: usize) -> Result<(Vec<u8>, usize)> {
    let mut out = Vec::new();
    let mut depth = 0;
    let mut i = start;
    while i < content.len() {
        let byte = content[i];
        match byte {
            b'\\' => {
                let Some(&next) = content.get(i + 1) else {
                    bail!("Dangling escape in string");
                };
                out.push(match next {
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    other => other,
                });
                i += 2;
                continue;
            }
            b'(' => {
                depth += 1;
                if depth > 1 {
                    out.push(byte);
                }
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((out, i + 1));
                }
                out.push(byte);
            }
            _ => out.push(byte),
        }
        i += 1;
    }
    bail!("Unterminated string literal")
}

fn numbers<const N: usize>(operator: &str, operands: &[Operand]) -> Result<[f64; N]> {
    if operands.len() != N {
        bail!("{operator} expects {N} operands, got {}", operands.len());
    }
    let mut values = [0.0; N];
    for (value, operand) in values.iter_mut().zip(operands) {
        match operand {
            Operand::Number(n) => *value = *n,
            other => bail!("{operator} expects numbers, got {other:?}"),
        }
    }
    Ok(values)
}

fn build_operation(operator: &str, operands: &[Operand]) -> Result<ContentOperation> {
    use ContentOperation::*;
    Ok(match operator {
        "BT" => {
            numbers::<0>(operator, operands)?;
            BeginText
        }
        "ET" => {
            numbers::<0>(operator, operands)?;
            EndText
        }
        "q" => {
            numbers::<0>(operator, operands)?;
            SaveGraphicsState
        }
        "Q" => {
            numbers::<0>(operator, operands)?;
            RestoreGraphicsState
        }
        "S" => Stroke,
        "f" => Fill,
        "B" => FillStroke,
        "Tf" => match operands {
            [Operand::Name(name), Operand::Number(size)] => SetFont(name.clone(), *size),
            _ => bail!("Tf expects a name and a size, got {operands:?}"),
        },
        "Tj" => match operands {
            [Operand::String(text)] => ShowText(text.clone()),
            _ => bail!("Tj expects one string, got {operands:?}"),
        },
        "Td" => {
            let [x, y] = numbers(operator, operands)?;
            MoveText(x, y)
        }
        "Tw" => SetWordSpacing(numbers::<1>(operator, operands)?[0]),
        "w" => SetLineWidth(numbers::<1>(operator, operands)?[0]),
        "J" => SetLineCap(numbers::<1>(operator, operands)?[0] as i64),
        "G" => SetStrokeGray(numbers::<1>(operator, operands)?[0]),
        "g" => SetFillGray(numbers::<1>(operator, operands)?[0]),
        "RG" => {
            let [r, g, b] = numbers(operator, operands)?;
            SetStrokeRgb(r, g, b)
        }
        "rg" => {
            let [r, g, b] = numbers(operator, operands)?;
            SetFillRgb(r, g, b)
        }
        "m" => {
            let [x, y] = numbers(operator, operands)?;
            MoveTo(x, y)
        }
        "l" => {
            let [x, y] = numbers(operator, operands)?;
            LineTo(x, y)
        }
        "re" => {
            let [x, y, w, h] = numbers(operator, operands)?;
            Rectangle(x, y, w, h)
        }
        other => bail!("Unknown operator {other:?}"),
    })
}

/// Validator for page content streams
pub struct ContentValidator {
    /// Maximum nesting depth for save/restore
    max_nesting_depth: usize,
}

impl ContentValidator {
    /// Create a new content validator
    pub fn new() -> Self {
        Self {
            max_nesting_depth: 28,
        }
    }

    /// Validate a content stream
    pub fn validate(&self, content: &[u8]) -> Result<ContentValidationReport> {
        let operations = tokenize(content)?;
        let mut report = ContentValidationReport::new();
        let mut in_text_object = false;
        let mut depth = 0usize;

        for (index, operation) in operations.iter().enumerate() {
            match operation {
                ContentOperation::BeginText => {
                    if in_text_object {
                        report.add_error(format!("Nested text object at operator {index}"));
                    }
                    in_text_object = true;
                }
                ContentOperation::EndText => {
                    if !in_text_object {
                        report.add_error(format!("ET without BT at operator {index}"));
                    }
                    in_text_object = false;
                }
                ContentOperation::SaveGraphicsState => {
                    depth += 1;
                    if depth > self.max_nesting_depth {
                        report.add_error(format!("Graphics state nesting too deep at operator {index}"));
                    }
                }
                ContentOperation::RestoreGraphicsState => {
                    if depth == 0 {
                        report.add_error(format!("Q without q at operator {index}"));
                    } else {
                        depth -= 1;
                    }
                }
                ContentOperation::ShowText(text) => {
                    if !in_text_object {
                        report.add_error(format!("Tj outside a text object at operator {index}"));
                    }
                    report.texts.push(text.clone());
                }
                ContentOperation::SetFont(..) | ContentOperation::MoveText(..) => {
                    if !in_text_object {
                        report.add_error(format!("Text operator outside BT/ET at operator {index}"));
                    }
                }
                ContentOperation::MoveTo(..)
                | ContentOperation::LineTo(..)
                | ContentOperation::Rectangle(..) => {
                    if in_text_object {
                        report.add_error(format!("Path operator inside a text object at operator {index}"));
                    }
                }
                _ => {}
            }

            let name = format!("{operation:?}");
            let name = name.split('(').next().unwrap_or("Unknown").to_string();
            *report.operator_usage.entry(name).or_insert(0) += 1;
            report.operator_count += 1;
        }

        if in_text_object {
            report.add_error("Unclosed text object (missing ET)");
        }
        if depth > 0 {
            report.add_error(format!("Unbalanced graphics state: {depth} saves without restore"));
        }
        Ok(report)
    }
}

impl Default for ContentValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Content validation report
#[derive(Debug)]
pub struct ContentValidationReport {
    /// Validation errors
    pub errors: Vec<String>,
    /// Total operator count
    pub operator_count: usize,
    /// Operator usage statistics
    pub operator_usage: HashMap<String, usize>,
    /// Strings shown with `Tj`, unescaped
    pub texts: Vec<Vec<u8>>,
}

impl ContentValidationReport {
    fn new() -> Self {
        Self {
            errors: Vec::new(),
            operator_count: 0,
            operator_usage: HashMap::new(),
            texts: Vec::new(),
        }
    }

    fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Shown strings decoded as Latin-1
    pub fn shown_text(&self) -> Vec<String> {
        self.texts
            .iter()
            .map(|bytes| bytes.iter().map(|b| *b as char).collect())
            .collect()
    }
}
