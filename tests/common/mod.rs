//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;

use alignmeter::{Axis, Category, Party, PartyId, Question, QuestionBank};

pub fn pid(id: &str) -> PartyId {
    PartyId::from(id)
}

/// A three-question bank with two mirrored parties: X is the baseline,
/// Y opposes it on every question. Q1 and Q2 are economic (weight 1),
/// Q3 is social (weight 2).
pub fn mirrored_bank() -> QuestionBank {
    QuestionBank {
        parties: vec![
            Party {
                id: pid("x"),
                name: "Party X".into(),
            },
            Party {
                id: pid("y"),
                name: "Party Y".into(),
            },
        ],
        baseline: pid("x"),
        questions: vec![
            question(1, Category::Taxation, Axis::Economic, 1, &[("x", 2), ("y", -2)]),
            question(2, Category::Housing, Axis::Economic, 1, &[("x", 1), ("y", -1)]),
            question(
                3,
                Category::CivilLiberties,
                Axis::Social,
                2,
                &[("x", -2), ("y", 2)],
            ),
        ],
    }
}

pub fn question(
    id: u32,
    category: Category,
    axis: Axis,
    weight: u8,
    stances: &[(&str, i8)],
) -> Question {
    Question {
        id,
        text: format!("Statement {}", id),
        category,
        axis,
        weight,
        stances: stances
            .iter()
            .map(|(party, stance)| (pid(party), *stance))
            .collect::<BTreeMap<_, _>>(),
    }
}
