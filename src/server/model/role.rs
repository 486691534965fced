/// A single role mutation produced by tier reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleChange {
    Add(u64),
    Remove(u64),
}
