use arch::op::Op;

use crate::error::{Error, ErrorKind};
use crate::label::Labels;
use crate::parser::{Item, ItemKind};

fn emit_le(out: &mut Vec<u8>, value: i128, width: usize) -> Result<(), ErrorKind> {
    if value < 0 || value >> (8 * width as u32) != 0 {
        return Err(ErrorKind::ImmOutOfRange { value, width });
    }
    out.extend_from_slice(&value.to_le_bytes()[..width]);
    Ok(())
}

/// Emit the final byte stream. All structural validation happened earlier;
/// only symbol resolution and immediate fit are checked here.
pub fn generate(items: &[Item], labels: &Labels) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    for item in items {
        let start = bytes.len();
        match &item.kind {
            ItemKind::Data(data) => bytes.extend_from_slice(data),
            ItemKind::Inst(op, None) => {
                if op.push_width().is_some() {
                    return Err(ErrorKind::MissingOperand(*op).at(item.line, &item.raw));
                }
                bytes.push(op.code());
            }
            ItemKind::Inst(op, Some(operand)) => {
                let value = operand
                    .resolve(labels)
                    .map_err(|kind| kind.at(item.line, &item.raw))?;
                match op.push_width() {
                    Some(width) => {
                        bytes.push(op.code());
                        emit_le(&mut bytes, value, width)
                            .map_err(|kind| kind.at(item.line, &item.raw))?;
                    }
                    // Operands on non-push ops ride an implicit wide push.
                    None => {
                        bytes.push(Op::PUSH8.code());
                        emit_le(&mut bytes, value, 8)
                            .map_err(|kind| kind.at(item.line, &item.raw))?;
                        bytes.push(op.code());
                    }
                }
            }
        }
        debug_assert_eq!(bytes.len() - start, item.kind.size());
    }
    Ok(bytes)
}
