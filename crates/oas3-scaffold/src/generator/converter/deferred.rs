use serde_json::Value;

use crate::generator::ast::TypeToken;

#[derive(Debug, Clone)]
pub(crate) struct DeferredType<'a> {
  pub(crate) name: TypeToken,
  pub(crate) node: &'a Value,
}

/// Named types registered during resolution whose declarations are not built yet.
///
/// Resolving a field may register more types, so the queue is drained in
/// passes until a pass leaves it empty.
#[derive(Debug, Default)]
pub(crate) struct DeferredTypeQueue<'a> {
  pending: Vec<DeferredType<'a>>,
}

impl<'a> DeferredTypeQueue<'a> {
  pub(crate) fn push(&mut self, name: TypeToken, node: &'a Value) {
    self.pending.push(DeferredType { name, node });
  }

  /// Takes the current pass, leaving the queue empty for the next one.
  pub(crate) fn take_pass(&mut self) -> Vec<DeferredType<'a>> {
    std::mem::take(&mut self.pending)
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.pending.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_take_pass_clears_queue() {
    let node = json!({ "type": "object" });
    let mut queue = DeferredTypeQueue::default();
    queue.push(TypeToken::new("Pet"), &node);
    queue.push(TypeToken::new("PetOwner"), &node);

    let pass = queue.take_pass();
    assert_eq!(pass.len(), 2);
    assert_eq!(pass[1].name, TypeToken::new("PetOwner"));
    assert!(queue.is_empty());
    assert!(queue.take_pass().is_empty());
  }
}
