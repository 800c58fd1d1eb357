use indexmap::IndexMap;

use crate::error::{Error, ErrorKind};
use crate::parser::{fold_key, Item, ItemKind};

// ----------------------------------------------------------------------------
// Pending declarations

/// A label declaration waiting for the offset of the item after it.
#[derive(Debug, Clone)]
pub struct PendingLabel {
    pub item: usize,
    pub name: String,
    pub line: usize,
    pub raw: String,
}

// ----------------------------------------------------------------------------
// Labels

#[derive(Debug)]
pub struct Labels {
    case_sensitive: bool,
    table: IndexMap<String, (usize, usize)>,
}

impl Labels {
    pub fn new(case_sensitive: bool) -> Self {
        Labels {
            case_sensitive,
            table: IndexMap::new(),
        }
    }

    fn define(&mut self, decl: &PendingLabel, offset: usize) -> Result<(), Error> {
        let key = fold_key(&decl.name, self.case_sensitive);
        if let Some(&(first, _)) = self.table.get(&key) {
            let kind = ErrorKind::RedefinedLabel {
                name: decl.name.clone(),
                first,
            };
            return Err(kind.at(decl.line, &decl.raw));
        }
        self.table.insert(key, (decl.line, offset));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.table
            .get(&fold_key(name, self.case_sensitive))
            .map(|&(_, offset)| offset)
    }
}

// ----------------------------------------------------------------------------
// Address resolution

/// Walk the items once, assigning every pending label the offset of the item
/// it anchors to. Several labels may share an anchor; labels after the last
/// item land one past the end of the stream.
pub fn resolve(
    items: &[Item],
    pending: &[PendingLabel],
    case_sensitive: bool,
) -> Result<Labels, Error> {
    let mut labels = Labels::new(case_sensitive);
    let mut queue = pending.iter().peekable();
    let mut offset = 0;
    for (idx, item) in items.iter().enumerate() {
        while let Some(decl) = queue.next_if(|decl| decl.item == idx) {
            labels.define(decl, offset)?;
        }
        if let ItemKind::Inst(op, None) = &item.kind {
            if op.push_width().is_some() {
                return Err(ErrorKind::MissingOperand(*op).at(item.line, &item.raw));
            }
        }
        offset += item.kind.size();
    }
    for decl in queue {
        labels.define(decl, offset)?;
    }
    Ok(labels)
}
