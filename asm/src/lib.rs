mod codegen;
mod error;
mod label;
mod parser;
mod preprocess;

pub use error::{Error, ErrorClass, ErrorKind};

use label::PendingLabel;
use parser::{Consts, Item, Stmt};

/// Assemble SV64 source text into its flat bytecode stream.
///
/// Pure function of the source and the case rule: constants resolve during
/// classification, labels in a dedicated pass, and emission either yields the
/// whole byte stream or the first error. No partial output.
pub fn assemble(source: &str, case_sensitive: bool) -> Result<Vec<u8>, Error> {
    let lines = preprocess::preprocess(source)?;

    let mut consts = Consts::new(case_sensitive);
    let mut items: Vec<Item> = Vec::new();
    let mut pending: Vec<PendingLabel> = Vec::new();
    for line in &lines {
        match Stmt::parse(&line.text, &consts).map_err(|kind| kind.at(line.num, &line.raw))? {
            Stmt::Label(name) => pending.push(PendingLabel {
                item: items.len(),
                name,
                line: line.num,
                raw: line.raw.clone(),
            }),
            Stmt::Const(name, value) => consts
                .define(&name, value, line.num)
                .map_err(|kind| kind.at(line.num, &line.raw))?,
            Stmt::Item(kind) => items.push(Item {
                line: line.num,
                raw: line.raw.clone(),
                kind,
            }),
        }
    }

    let labels = label::resolve(&items, &pending, case_sensitive)?;
    codegen::generate(&items, &labels)
}
