//! Demand sampling and reorder policy per ABC class.

use rand::Rng;
use rand_distr::{Distribution, Exp, Gamma, Normal};

use slotwise_core::AbcClass;

/// Samples one month's demand quantity for a SKU.
///
/// A-movers draw from a Normal around the mean, B-movers from a Gamma,
/// C-movers from an Exponential. The draw is rounded to a whole quantity
/// and floored at zero; a non-positive mean always yields zero.
pub fn sample_demand<R: Rng + ?Sized>(mean: f64, class: AbcClass, rng: &mut R) -> usize {
    if mean <= 0.0 {
        return 0;
    }

    let value = match class {
        AbcClass::A => Normal::new(mean, 0.2 * mean).map_or(mean, |d| d.sample(rng)),
        AbcClass::B => Gamma::new(2.0, mean / 2.0).map_or(mean, |d| d.sample(rng)),
        AbcClass::C => Exp::new(1.0 / mean).map_or(mean, |d| d.sample(rng)),
    };

    value.round().max(0.0) as usize
}

/// Reorder point and order-up-to target for a SKU's pooled capacity.
pub fn reorder_params(class: AbcClass, max_capacity: usize) -> (usize, usize) {
    if max_capacity == 0 {
        return (0, 0);
    }

    let capacity = max_capacity as f64;
    let (reorder, target) = match class {
        AbcClass::A => (0.5, 0.9),
        AbcClass::B => (0.4, 0.8),
        AbcClass::C => (0.3, 0.7),
    };

    ((reorder * capacity) as usize, (target * capacity) as usize)
}

/// Replenishment lead time in months.
///
/// A-movers are on a fixed two-month contract; everything else draws from
/// a wide Normal, floored at one month.
pub fn sample_lead_time<R: Rng + ?Sized>(class: AbcClass, rng: &mut R) -> u32 {
    if class == AbcClass::A {
        return 2;
    }

    let lead: f64 = Normal::new(5.0, 3.5).map_or(5.0, |d| d.sample(rng));
    lead.round().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_mean_yields_zero_demand() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(sample_demand(0.0, AbcClass::A, &mut rng), 0);
        assert_eq!(sample_demand(-3.0, AbcClass::C, &mut rng), 0);
    }

    #[test]
    fn test_demand_stays_reasonable() {
        let mut rng = StdRng::seed_from_u64(42);
        for class in [AbcClass::A, AbcClass::B, AbcClass::C] {
            for _ in 0..200 {
                let qty = sample_demand(50.0, class, &mut rng);
                assert!(qty < 10_000, "implausible demand draw: {qty}");
            }
        }
    }

    #[test]
    fn test_reorder_params() {
        assert_eq!(reorder_params(AbcClass::A, 100), (50, 90));
        assert_eq!(reorder_params(AbcClass::B, 100), (40, 80));
        assert_eq!(reorder_params(AbcClass::C, 100), (30, 70));
        assert_eq!(reorder_params(AbcClass::A, 0), (0, 0));
    }

    #[test]
    fn test_lead_time_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(sample_lead_time(AbcClass::A, &mut rng), 2);

        for _ in 0..200 {
            assert!(sample_lead_time(AbcClass::C, &mut rng) >= 1);
        }
    }
}
