#![allow(dead_code)]

use cubeview::notation::Modifier;
use cubeview::{Algorithm, Face, Move};
use proptest::prelude::*;

pub const SOLVED: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

pub fn any_move() -> impl Strategy<Value = Move> {
    (0..Face::ALL.len(), 0..Modifier::ALL.len())
        .prop_map(|(f, m)| Move::new(Face::ALL[f], Modifier::ALL[m]))
}

pub fn any_algorithm(max_len: usize) -> impl Strategy<Value = Algorithm> {
    prop::collection::vec(any_move(), 0..max_len).prop_map(Algorithm::from)
}
