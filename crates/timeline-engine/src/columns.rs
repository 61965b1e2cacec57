//! Member column assignment on the timeline grid.

/// Maps owner ids to column indices.
///
/// A fixed set comes from an explicit member list (the team roster); owners
/// outside it have no column. An open set grows as owners are first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberColumns<O = String> {
    members: Vec<O>,
    fixed: bool,
}

impl<O: PartialEq> MemberColumns<O> {
    /// Columns in roster order. Duplicate ids keep their first position.
    pub fn fixed(members: impl IntoIterator<Item = O>) -> Self {
        let mut unique: Vec<O> = Vec::new();
        for member in members {
            if !unique.contains(&member) {
                unique.push(member);
            }
        }
        Self {
            members: unique,
            fixed: true,
        }
    }

    /// Columns in order of first appearance.
    pub fn by_appearance() -> Self {
        Self {
            members: Vec::new(),
            fixed: false,
        }
    }

    pub fn index_of(&self, owner: &O) -> Option<usize> {
        self.members.iter().position(|m| m == owner)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[O] {
        &self.members
    }

    pub fn into_members(self) -> Vec<O> {
        self.members
    }
}

impl<O: PartialEq + Clone> MemberColumns<O> {
    /// Column for `owner`, adding one if the set is open.
    pub fn resolve(&mut self, owner: &O) -> Option<usize> {
        if let Some(idx) = self.index_of(owner) {
            return Some(idx);
        }
        if self.fixed {
            return None;
        }
        self.members.push(owner.clone());
        Some(self.members.len() - 1)
    }
}
