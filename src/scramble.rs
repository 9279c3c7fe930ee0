//! Random scramble generation.

use rand::Rng;

use crate::notation::{Algorithm, Face, Modifier, Move};

/// Generates a random algorithm of `length` moves.
///
/// Faces are drawn uniformly and redrawn while they share an axis with the
/// previous move, which also rules out repeating the previous face. Modifiers
/// are drawn uniformly and independently.
pub fn generate_scramble<R: Rng>(length: usize, rng: &mut R) -> Algorithm {
    let mut algorithm = Algorithm::new();
    let mut previous: Option<Face> = None;
    for _ in 0..length {
        let mut face = Face::ALL[rng.random_range(0..Face::ALL.len())];
        while previous.is_some_and(|p| p == face || p.axis() == face.axis()) {
            face = Face::ALL[rng.random_range(0..Face::ALL.len())];
        }
        previous = Some(face);
        let modifier = Modifier::ALL[rng.random_range(0..Modifier::ALL.len())];
        algorithm.push(Move::new(face, modifier));
    }
    log::debug!("generated scramble: {algorithm}");
    algorithm
}

/// Generates a scramble using the thread-local RNG.
pub fn random_scramble(length: usize) -> Algorithm {
    generate_scramble(length, &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn has_requested_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for length in [0, 1, 2, 10, 25] {
            assert_eq!(generate_scramble(length, &mut rng).len(), length);
        }
        assert_eq!(random_scramble(0).to_string(), "");
    }

    #[test]
    fn consecutive_moves_use_different_axes() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let scramble = generate_scramble(30, &mut rng);
            for pair in scramble.moves().windows(2) {
                assert_ne!(pair[0].face, pair[1].face, "{scramble}");
                assert_ne!(pair[0].axis(), pair[1].axis(), "{scramble}");
            }
        }
    }

    #[test]
    fn output_is_space_separated_tokens() {
        let scramble = random_scramble(10).to_string();
        assert!(!scramble.starts_with(' ') && !scramble.ends_with(' '));
        assert!(!scramble.contains("  "));
        let tokens: Vec<&str> = scramble.split(' ').collect();
        assert_eq!(tokens.len(), 10);
        for token in tokens {
            assert!(token.parse::<Move>().is_ok(), "{token}");
        }
    }

    #[test]
    fn uses_every_face_and_modifier() {
        let mut rng = StdRng::seed_from_u64(3);
        let scramble = generate_scramble(500, &mut rng);
        for face in Face::ALL {
            assert!(scramble.iter().any(|mv| mv.face == face));
        }
        for modifier in Modifier::ALL {
            assert!(scramble.iter().any(|mv| mv.modifier == modifier));
        }
    }
}
