use ddcore::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;

fn random_bdd(dd: &mut BddManager, rng: &mut StdRng, depth: usize) -> Bdd {
    if depth == 0 {
        let v = rng.gen_range(0..dd.num_vars());
        return if rng.gen_bool(0.5) {
            dd.var(v).unwrap()
        } else {
            dd.nvar(v).unwrap()
        };
    }
    let a = random_bdd(dd, rng, depth - 1);
    let b = random_bdd(dd, rng, depth - 1);
    match rng.gen_range(0..3) {
        0 => dd.and(&a, &b).unwrap(),
        1 => dd.or(&a, &b).unwrap(),
        _ => dd.xor(&a, &b).unwrap(),
    }
}

fn random_family(rng: &mut StdRng, num_vars: usize, max_sets: usize) -> Vec<Vec<VarId>> {
    let sets = rng.gen_range(0..=max_sets);
    (0..sets)
        .map(|_| (0..num_vars).filter(|_| rng.gen_bool(0.4)).collect())
        .collect()
}

#[test]
fn bdd_round_trips_through_a_zdd() {
    let mut rng = StdRng::seed_from_u64(0x10ad);
    let mut bm = BddManager::with_default_order(5, 1 << 10).unwrap();
    let mut zm = ZddManager::with_default_order(5, 1 << 10).unwrap();
    for _ in 0..20 {
        let f = random_bdd(&mut bm, &mut rng, 3);
        let z = bm.to_zdd(&f, &mut zm).unwrap();
        let back = zm.to_bdd(&z, &mut bm).unwrap();
        assert_eq!(back, f);
        // the family has one member per satisfying assignment
        assert_eq!(zm.count(&z).unwrap(), bm.count(&f).unwrap());
    }
}

#[test]
fn zdd_round_trips_through_a_bdd() {
    let mut rng = StdRng::seed_from_u64(0x2b2b);
    let mut bm = BddManager::with_default_order(5, 1 << 10).unwrap();
    let mut zm = ZddManager::with_default_order(5, 1 << 10).unwrap();
    for _ in 0..20 {
        let f = zm.family(&random_family(&mut rng, 5, 8)).unwrap();
        let b = zm.to_bdd(&f, &mut bm).unwrap();
        let back = bm.to_zdd(&b, &mut zm).unwrap();
        assert_eq!(back, f);
    }
}

#[test]
fn conversion_works_across_different_orderings() {
    let mut rng = StdRng::seed_from_u64(0x3333);
    let mut bm = BddManager::new(5, &[3, 0, 4, 1, 2], 1 << 10).unwrap();
    let mut zm = ZddManager::new(5, &[0, 1, 2, 3, 4], 1 << 10).unwrap();
    for _ in 0..10 {
        let f = random_bdd(&mut bm, &mut rng, 3);
        let z = bm.to_zdd(&f, &mut zm).unwrap();
        let back = zm.to_bdd(&z, &mut bm).unwrap();
        assert_eq!(back, f);
    }
}

#[test]
fn terminal_conversions() {
    let mut bm = BddManager::with_default_order(3, 64).unwrap();
    let mut zm = ZddManager::with_default_order(3, 64).unwrap();

    let zero = bm.zero();
    let z = bm.to_zdd(&zero, &mut zm).unwrap();
    assert!(z.is_empty());

    let one = bm.one();
    let z = bm.to_zdd(&one, &mut zm).unwrap();
    assert_eq!(zm.count(&z).unwrap(), 8);

    let empty = zm.empty();
    let b = zm.to_bdd(&empty, &mut bm).unwrap();
    assert!(b.is_zero());

    // {∅} selects exactly the all-false assignment
    let base = zm.base();
    let b = zm.to_bdd(&base, &mut bm).unwrap();
    let all_false = bm.assignment(&[false, false, false]).unwrap();
    assert_eq!(b, all_false);
}
