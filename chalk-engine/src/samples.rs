//! The starter equations offered when no equation has been loaded.

use crate::tree::{Equation, Kind};
use rand::{seq::SliceRandom, Rng};
use tracing::warn;

/// The starter equations, from short to very long.
pub const SAMPLE_EXPRESSIONS: [&str; 4] = [
    "a+b=c",
    "2*x+3=7",
    "a*x+a*y=2*(b+c)",
    "3*(x+1)-2*y/z=a*b+(c-d)*4-f(x,\"label\")",
];

/// Picks one of the starter equations at random.
///
/// Falls back to `0=0` if none of them parse.
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Equation {
    let mut order = SAMPLE_EXPRESSIONS;
    order.shuffle(rng);

    for text in order {
        match Equation::parse(text) {
            Ok(eq) => return eq,
            Err(err) => warn!(%text, %err, "sample expression does not parse"),
        }
    }

    Equation::from_leaves(Kind::Zero, Kind::Zero)
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use super::*;

    #[test]
    fn every_sample_parses() {
        for text in SAMPLE_EXPRESSIONS {
            let eq = Equation::parse(text).unwrap();
            assert!(eq.check_links(), "{}", text);
        }
    }

    #[test]
    fn pick_is_a_sample() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..16 {
            let rendered = pick(&mut rng).to_string();
            assert!(
                SAMPLE_EXPRESSIONS.iter().any(|text| Equation::parse(text).unwrap().to_string() == rendered),
                "{}",
                rendered,
            );
        }
    }

    #[test]
    fn same_seed_same_pick() {
        let a = pick(&mut StdRng::seed_from_u64(42)).to_string();
        let b = pick(&mut StdRng::seed_from_u64(42)).to_string();
        assert_eq!(a, b);
    }
}
