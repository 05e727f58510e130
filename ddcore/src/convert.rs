//! Cross-variant conversion.
//!
//! Both directions are reference realisations that enumerate the source
//! diagram and rebuild in the target, trading speed for an implementation
//! whose correctness is immediate. Cost is linear in the number of
//! satisfying assignments / member sets, so these are for moderately sized
//! diagrams and for cross-checking in tests.

use common::prelude::*;

use crate::bdd::{Bdd, BddManager};
use crate::zdd::{Zdd, ZddManager};

impl BddManager {
    /// The family whose members are exactly the satisfying assignments of
    /// `f`, read as sets of true variables. The target factory must span
    /// the same universe; it may use a different ordering.
    pub fn to_zdd(&self, f: &Bdd, target: &mut ZddManager) -> Result<Zdd> {
        self.check(f)?;
        if self.num_vars() != target.num_vars() {
            return Err(DdError::UniverseMismatch {
                left: self.num_vars(),
                right: target.num_vars(),
            });
        }
        let mut sets: Vec<Vec<VarId>> = Vec::new();
        let mut walker = self.assignment_walker(f)?;
        while let Some(assignment) = walker.advance() {
            sets.push((0..assignment.len()).filter(|&v| assignment[v]).collect());
        }
        target.family(&sets)
    }
}

impl ZddManager {
    /// The disjunction of one full assignment cube per member set of `f`:
    /// the Boolean function satisfied exactly by the members. The target
    /// factory must span the same universe; it may use a different
    /// ordering.
    pub fn to_bdd(&self, f: &Zdd, target: &mut BddManager) -> Result<Bdd> {
        self.check(f)?;
        if self.num_vars() != target.num_vars() {
            return Err(DdError::UniverseMismatch {
                left: self.num_vars(),
                right: target.num_vars(),
            });
        }
        let mut result = target.zero();
        let mut walker = self.member_walker(f)?;
        while let Some(member) = walker.advance() {
            let member = member.to_vec();
            let cube = target.assignment(&member)?;
            result = target.or(&result, &cube)?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bdd_members_become_zdd_sets() {
        let mut bm = BddManager::with_default_order(3, 64).unwrap();
        let mut zm = ZddManager::with_default_order(3, 64).unwrap();
        let x = bm.var(0).unwrap();
        let ny = bm.nvar(1).unwrap();
        let f = bm.and(&x, &ny).unwrap();
        let z = bm.to_zdd(&f, &mut zm).unwrap();
        // satisfying assignments {0} and {0,2}
        let expected = zm.family(&[vec![0], vec![0, 2]]).unwrap();
        assert_eq!(z, expected);
    }

    #[test]
    fn universe_sizes_must_agree() {
        let bm = BddManager::with_default_order(3, 64).unwrap();
        let mut zm = ZddManager::with_default_order(4, 64).unwrap();
        let one = bm.one();
        assert_eq!(
            bm.to_zdd(&one, &mut zm).unwrap_err(),
            DdError::UniverseMismatch { left: 3, right: 4 }
        );
    }

    #[test]
    fn round_trip_restores_the_original_handle() {
        let mut bm = BddManager::with_default_order(3, 64).unwrap();
        let mut zm = ZddManager::with_default_order(3, 64).unwrap();
        let x = bm.var(0).unwrap();
        let y = bm.var(1).unwrap();
        let f = bm.xor(&x, &y).unwrap();
        let z = bm.to_zdd(&f, &mut zm).unwrap();
        let back = zm.to_bdd(&z, &mut bm).unwrap();
        assert_eq!(back, f);
    }

    #[test]
    fn zdd_round_trip_preserves_the_family() {
        let mut bm = BddManager::with_default_order(4, 64).unwrap();
        let mut zm = ZddManager::with_default_order(4, 64).unwrap();
        let f = zm.family(&[vec![0, 2], vec![1], vec![]]).unwrap();
        let b = zm.to_bdd(&f, &mut bm).unwrap();
        let back = bm.to_zdd(&b, &mut zm).unwrap();
        assert_eq!(back, f);
    }
}
