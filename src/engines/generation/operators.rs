use crate::config::RouletteMode;
use crate::engines::generation::genome::{BitString, Chromosome};
use rand::Rng;

/// Roulette wheel selection: walk the running fitness sum until it reaches
/// the drawn slice, falling back to a uniform pick if it never does.
///
/// In [`RouletteMode::Unnormalized`] the slice is a plain `[0, 1)` draw, so
/// once `total_fitness` exceeds 1 the earliest chromosomes are favoured.
/// [`RouletteMode::Normalized`] scales the slice by `total_fitness`.
pub fn roulette_index<R: Rng>(
    population: &[Chromosome],
    total_fitness: f64,
    mode: RouletteMode,
    rng: &mut R,
) -> Option<usize> {
    if population.is_empty() {
        return None;
    }

    let slice = match mode {
        RouletteMode::Unnormalized => rng.gen::<f64>(),
        RouletteMode::Normalized if total_fitness.is_finite() && total_fitness > 0.0 => {
            rng.gen::<f64>() * total_fitness
        }
        RouletteMode::Normalized => return Some(rng.gen_range(0..population.len())),
    };

    let mut current = 0.0;
    for (i, chromosome) in population.iter().enumerate() {
        current += chromosome.fitness;
        if current >= slice {
            return Some(i);
        }
    }

    // Fallback
    log::trace!("Roulette fell through at slice {:.6}, picking uniformly", slice);
    Some(rng.gen_range(0..population.len()))
}

/// Roulette selection returning a copy of the chosen bit string
pub fn roulette_selection<R: Rng>(
    population: &[Chromosome],
    total_fitness: f64,
    mode: RouletteMode,
    rng: &mut R,
) -> Option<BitString> {
    roulette_index(population, total_fitness, mode, rng).map(|i| population[i].bits.clone())
}

/// Single-point crossover: with probability `crossover_rate`, swap the
/// suffixes of both strings at a uniform cut in `[0, len)`.
pub fn crossover<R: Rng>(
    parent1: BitString,
    parent2: BitString,
    crossover_rate: f64,
    rng: &mut R,
) -> (BitString, BitString) {
    let len = parent1.len().min(parent2.len());
    if len == 0 || rng.gen::<f64>() >= crossover_rate {
        return (parent1, parent2);
    }

    let point = rng.gen_range(0..len);
    crossover_at(parent1, parent2, point)
}

/// Swap everything from `point` onwards.
///
/// A cut at or past the end returns `(parent1, parent2)` untouched. A cut at
/// `0` returns `(parent2, parent1)`: the pair is unchanged only as a set, and
/// no new bit string is created either way.
pub fn crossover_at(parent1: BitString, parent2: BitString, point: usize) -> (BitString, BitString) {
    let mut child1 = parent1;
    let mut child2 = parent2;
    child1.swap_suffix(&mut child2, point);
    (child1, child2)
}

/// Mutation: flip each bit independently with probability `mutation_rate`
pub fn mutate<R: Rng>(bits: &mut BitString, mutation_rate: f64, rng: &mut R) {
    for i in 0..bits.len() {
        if rng.gen::<f64>() < mutation_rate {
            bits.flip(i);
        }
    }
}

/// Generate a random chromosome with zero fitness
pub fn random_chromosome<R: Rng>(length: usize, rng: &mut R) -> Chromosome {
    Chromosome::new(BitString::random(length, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scored(fitness: &[f64]) -> Vec<Chromosome> {
        fitness
            .iter()
            .enumerate()
            .map(|(i, &f)| Chromosome {
                bits: BitString::from_genes(&[i as u32], 8),
                fitness: f,
            })
            .collect()
    }

    #[test]
    fn test_roulette_single_holder_always_wins() {
        let mut rng = StdRng::seed_from_u64(42);
        let population = scored(&[0.0, 0.0, 999.0, 0.0]);
        for mode in [RouletteMode::Unnormalized, RouletteMode::Normalized] {
            for _ in 0..1000 {
                assert_eq!(roulette_index(&population, 999.0, mode, &mut rng), Some(2));
            }
        }
    }

    #[test]
    fn test_unnormalized_roulette_favours_early_members() {
        let mut rng = StdRng::seed_from_u64(1);
        // First member alone already exceeds any [0, 1) slice
        let population = scored(&[1.0, 5.0, 5.0, 5.0]);
        for _ in 0..500 {
            assert_eq!(
                roulette_index(&population, 16.0, RouletteMode::Unnormalized, &mut rng),
                Some(0)
            );
        }
    }

    #[test]
    fn test_normalized_roulette_is_proportional() {
        let mut rng = StdRng::seed_from_u64(3);
        let population = scored(&[1.0, 3.0]);
        let mut counts = [0usize; 2];
        for _ in 0..10_000 {
            let idx = roulette_index(&population, 4.0, RouletteMode::Normalized, &mut rng).unwrap();
            counts[idx] += 1;
        }
        // Expect roughly 25% / 75%
        assert!(counts[0] > 2000 && counts[0] < 3000, "counts: {:?}", counts);
    }

    #[test]
    fn test_roulette_falls_back_when_sum_is_short() {
        let mut rng = StdRng::seed_from_u64(5);
        let population = scored(&[0.0, 0.0, 0.0]);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let idx = roulette_index(&population, 0.0, RouletteMode::Unnormalized, &mut rng).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(roulette_index(&[], 0.0, RouletteMode::Unnormalized, &mut rng), None);
    }

    #[test]
    fn test_crossover_end_cut_is_identity_and_zero_cut_swaps_parents() {
        let a = BitString::parse("000000").unwrap();
        let b = BitString::parse("111111").unwrap();

        let (c1, c2) = crossover_at(a.clone(), b.clone(), 6);
        assert_eq!((c1, c2), (a.clone(), b.clone()));

        // Same pair as a set, but in swapped order
        let (c1, c2) = crossover_at(a.clone(), b.clone(), 0);
        assert_eq!((c1, c2), (b, a));
    }

    #[test]
    fn test_crossover_swaps_suffix() {
        let a = BitString::parse("000000").unwrap();
        let b = BitString::parse("111111").unwrap();
        let (c1, c2) = crossover_at(a, b, 4);
        assert_eq!(c1.to_string(), "000011");
        assert_eq!(c2.to_string(), "111100");
    }

    #[test]
    fn test_crossover_rate_zero_keeps_parents() {
        let mut rng = StdRng::seed_from_u64(11);
        let a = BitString::random(64, &mut rng);
        let b = BitString::random(64, &mut rng);
        for _ in 0..100 {
            let (c1, c2) = crossover(a.clone(), b.clone(), 0.0, &mut rng);
            assert_eq!(c1, a);
            assert_eq!(c2, b);
        }
    }

    #[test]
    fn test_crossover_preserves_bits_per_position() {
        let mut rng = StdRng::seed_from_u64(12);
        let a = BitString::random(100, &mut rng);
        let b = BitString::random(100, &mut rng);
        let (c1, c2) = crossover(a.clone(), b.clone(), 1.0, &mut rng);
        assert_eq!(c1.len(), 100);
        assert_eq!(c2.len(), 100);
        for i in 0..100 {
            let parents = [a.bits()[i], b.bits()[i]];
            let children = [c1.bits()[i], c2.bits()[i]];
            assert!(children == parents || children == [parents[1], parents[0]]);
        }
    }

    #[test]
    fn test_mutation_rate_extremes() {
        let mut rng = StdRng::seed_from_u64(13);
        let original = BitString::random(300, &mut rng);

        let mut unchanged = original.clone();
        mutate(&mut unchanged, 0.0, &mut rng);
        assert_eq!(unchanged, original);

        let mut inverted = original.clone();
        mutate(&mut inverted, 1.0, &mut rng);
        for (a, b) in inverted.bits().iter().zip(original.bits()) {
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_random_chromosome_starts_unscored() {
        let mut rng = StdRng::seed_from_u64(14);
        let chromosome = random_chromosome(40, &mut rng);
        assert_eq!(chromosome.bits.len(), 40);
        assert!(chromosome.fitness.abs() < f64::EPSILON);
    }
}
