//! Random train/test splitting

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SpamError};

/// Randomly split a sequence into two lists.
///
/// Each element goes to the first list with probability `p`, independently of
/// the others, so the list sizes are only `p`-proportional on average.
pub fn random_split<T, I, R>(seq: I, p: f64, rng: &mut R) -> Result<(Vec<T>, Vec<T>)>
where
    I: IntoIterator<Item = T>,
    R: Rng + ?Sized,
{
    if !(0.0..=1.0).contains(&p) {
        return Err(SpamError::InvalidProbability(p));
    }

    let mut first = Vec::new();
    let mut second = Vec::new();
    for element in seq {
        if rng.gen::<f64>() < p {
            first.push(element);
        } else {
            second.push(element);
        }
    }

    Ok((first, second))
}

/// [`random_split`] with a generator seeded from `seed`, or from entropy when `None`
pub fn random_split_seeded<T, I>(seq: I, p: f64, seed: Option<u64>) -> Result<(Vec<T>, Vec<T>)>
where
    I: IntoIterator<Item = T>,
{
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    random_split(seq, p, &mut rng)
}
