//! Randomized field values for synthetic credit transfers.

use rand::Rng;
use rust_decimal::Decimal;

pub const AMOUNT_DECIMAL_PLACES: u32 = 2;
/// Lower and upper bound of a generated amount, in cents
pub const MIN_AMOUNT_CENTS: i64 = 10_000;
pub const MAX_AMOUNT_CENTS: i64 = 5_000_000;

pub const ACCOUNT_PREFIX: &str = "ACC";

pub const FIRST_NAMES: [&str; 8] = [
    "John", "Jane", "Robert", "Mary", "Michael", "Patricia", "James", "Linda",
];
pub const LAST_NAMES: [&str; 8] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
];
pub const COMPANY_SUFFIXES: [&str; 8] = [
    "Inc.",
    "LLC",
    "Corp.",
    "Ltd.",
    "Solutions",
    "Services",
    "Group",
    "Enterprises",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// `ACC` followed by an 8 digit number
pub fn account_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}{}", ACCOUNT_PREFIX, rng.gen_range(10_000_000..=99_999_999))
}

/// Either a personal name or, half of the time, a company name built on one.
pub fn creditor_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = pick(rng, &FIRST_NAMES);
    let last = pick(rng, &LAST_NAMES);
    if rng.gen_bool(0.5) {
        format!("{first} {last}")
    } else {
        format!("{first} {last} {}", pick(rng, &COMPANY_SUFFIXES))
    }
}

/// Uniform over [100.00, 50000.00] with a scale of exactly 2
pub fn amount<R: Rng + ?Sized>(rng: &mut R) -> Decimal {
    Decimal::new(
        rng.gen_range(MIN_AMOUNT_CENTS..=MAX_AMOUNT_CENTS),
        AMOUNT_DECIMAL_PLACES,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_account_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let id = account_id(&mut rng);
            assert_eq!(id.len(), 11);
            assert!(id.starts_with("ACC"));
            let digits: u32 = id[3..].parse().unwrap();
            assert!((10_000_000..=99_999_999).contains(&digits));
        }
    }

    #[test]
    fn test_amount_bounds_and_scale() {
        let mut rng = StdRng::seed_from_u64(42);
        let min = Decimal::new(10_000, 2);
        let max = Decimal::new(5_000_000, 2);
        for _ in 0..10_000 {
            let amount = amount(&mut rng);
            assert!(amount >= min && amount <= max, "{amount} out of range");
            assert_eq!(amount.scale(), 2);
            assert_eq!(amount.to_string().split('.').nth(1).unwrap().len(), 2);
        }
    }

    #[test]
    fn test_creditor_name_pools() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut personal = HashSet::new();
        let mut corporate = HashSet::new();
        for _ in 0..20_000 {
            let name = creditor_name(&mut rng);
            let parts: Vec<&str> = name.splitn(3, ' ').collect();
            assert!(FIRST_NAMES.contains(&parts[0]));
            assert!(LAST_NAMES.contains(&parts[1]));
            match parts.get(2) {
                Some(suffix) => {
                    assert!(COMPANY_SUFFIXES.contains(suffix));
                    corporate.insert(name.clone());
                }
                None => {
                    personal.insert(name.clone());
                }
            }
        }
        assert_eq!(personal.len(), 64);
        assert!(corporate.len() > 400 && corporate.len() <= 512);
    }

    #[test]
    fn test_seeded_values_repeat() {
        let mut rng_1 = StdRng::seed_from_u64(99);
        let mut rng_2 = StdRng::seed_from_u64(99);
        assert_eq!(amount(&mut rng_1), amount(&mut rng_2));
        assert_eq!(creditor_name(&mut rng_1), creditor_name(&mut rng_2));
        assert_eq!(account_id(&mut rng_1), account_id(&mut rng_2));
    }
}
