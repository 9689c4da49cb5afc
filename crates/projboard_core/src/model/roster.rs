//! Ordered member roster of one project.
//!
//! # Responsibility
//! - Own index-number assignment for members.
//!
//! # Invariants
//! - The member at position `i` (1-based) always has `index_number == i`.
//! - Removal renumbers remaining members while preserving relative order.
//! - Decoding rejects stored numbering that is not dense `1..=N`; task
//!   assignments refer to those numbers and would silently drift.
//! - Cascading a removal into task assignments is done by `Project`, which
//!   owns both the roster and the board.

use crate::model::error::{ModelError, ModelResult};
use crate::model::member::Member;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Member>", into = "Vec<Member>")]
pub struct MemberRoster {
    members: Vec<Member>,
}

impl TryFrom<Vec<Member>> for MemberRoster {
    type Error = ModelError;

    fn try_from(members: Vec<Member>) -> ModelResult<Self> {
        for (position, member) in members.iter().enumerate() {
            if member.index_number != to_index_number(position) {
                return Err(ModelError::InvalidValue {
                    field: "index_number",
                    value: format!(
                        "{} at roster position {}",
                        member.index_number,
                        position + 1
                    ),
                });
            }
        }
        Ok(Self { members })
    }
}

impl From<MemberRoster> for Vec<Member> {
    fn from(roster: MemberRoster) -> Self {
        roster.members
    }
}

impl MemberRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a member and assigns it the next index number.
    pub fn add_member(&mut self, mut member: Member) -> u32 {
        let index_number = self.next_index_number();
        member.index_number = index_number;
        self.members.push(member);
        index_number
    }

    /// Overwrites the details of the member with `index_number`.
    ///
    /// Returns `false` without error when no member matches.
    pub fn edit_member(
        &mut self,
        index_number: u32,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> bool {
        match self
            .members
            .iter_mut()
            .find(|member| member.index_number == index_number)
        {
            Some(member) => {
                member.update_details(name, phone, email);
                true
            }
            None => false,
        }
    }

    /// Removes the member at `index_number` and renumbers the rest.
    ///
    /// # Errors
    /// - `ModelError::NotFound` when `index_number` is outside `[1, N]`.
    pub fn remove_member(&mut self, index_number: u32) -> ModelResult<Member> {
        let position = self.position_of(index_number)?;
        let removed = self.members.remove(position);
        self.renumber();
        Ok(removed)
    }

    /// 1-based lookup.
    ///
    /// # Errors
    /// - `ModelError::NotFound` when `index_number` is outside `[1, N]`.
    pub fn get_member(&self, index_number: u32) -> ModelResult<&Member> {
        let position = self.position_of(index_number)?;
        Ok(&self.members[position])
    }

    /// Lazily formatted detail lines in roster order.
    pub fn all_member_details(&self) -> impl Iterator<Item = String> + '_ {
        self.members.iter().map(Member::details)
    }

    pub fn num_of_members(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> + '_ {
        self.members.iter()
    }

    fn renumber(&mut self) {
        for (position, member) in self.members.iter_mut().enumerate() {
            member.index_number = to_index_number(position);
        }
    }

    fn next_index_number(&self) -> u32 {
        to_index_number(self.members.len())
    }

    fn position_of(&self, index_number: u32) -> ModelResult<usize> {
        let number = index_number as usize;
        if number == 0 || number > self.members.len() {
            return Err(ModelError::not_found("member", index_number));
        }
        Ok(number - 1)
    }
}

fn to_index_number(position: usize) -> u32 {
    u32::try_from(position + 1).unwrap_or(u32::MAX)
}
